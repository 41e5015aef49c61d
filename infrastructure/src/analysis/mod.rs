//! Word analysis adapters

mod stemming_analyzer;

pub use stemming_analyzer::StemmingAnalyzer;
