//! Text analysis port

use lingua_domain::WordAnalysis;

/// Breaks a punctuation-free text into analysed words
pub trait TextAnalyzer: Send + Sync {
    /// One row per unique lowercased word
    fn analyze(&self, text: &str) -> Vec<WordAnalysis>;
}
