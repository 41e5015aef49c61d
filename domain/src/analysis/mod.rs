//! Linguistic breakdown of a tutor reply

use serde::{Deserialize, Serialize};

/// One row of the analysis table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAnalysis {
    /// Lowercased surface form
    pub word: String,
    /// Base form (lemma or stem)
    pub base_form: String,
    /// Coarse part-of-speech tag
    pub tag: String,
}

/// Analysis of one reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The reply as displayed
    pub original_text: String,
    /// One row per unique word, sorted by word
    pub rows: Vec<WordAnalysis>,
}

impl AnalysisReport {
    /// Build a report, deduplicating and sorting rows by word.
    pub fn new(original_text: impl Into<String>, mut rows: Vec<WordAnalysis>) -> Self {
        rows.sort_by(|a, b| a.word.cmp(&b.word));
        rows.dedup_by(|a, b| a.word == b.word);
        Self {
            original_text: original_text.into(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
