//! Lightweight English word analysis
//!
//! Tokenizes with a regex, reduces content words with the Snowball English
//! stemmer and assigns a coarse Universal POS tag from closed-class word
//! lists and suffix rules.

use lingua_application::ports::text_analyzer::TextAnalyzer;
use lingua_domain::WordAnalysis;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

const WORD_PATTERN: &str = r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*";

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "every", "each", "some", "any", "no",
    "my", "your", "his", "her", "its", "our", "their",
];
const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
    "yourself", "who", "whom", "what", "which", "mine", "yours", "ours", "theirs",
    "someone", "something", "everyone", "everything", "nothing",
];
const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have",
    "has", "had", "will", "would", "can", "could", "shall", "should", "may", "might", "must",
];
const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "to", "of", "for", "with", "from", "by", "about", "into", "over",
    "under", "after", "before", "between", "through", "during", "without", "like",
];
const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "so"];
const SUBORDINATORS: &[&str] = &["if", "because", "when", "while", "although", "since", "unless", "whether"];
const PARTICLES: &[&str] = &["not"];
const ADVERBS: &[&str] = &[
    "very", "too", "also", "here", "there", "now", "then", "always", "never", "often",
    "sometimes", "again", "already", "just", "still", "well", "how", "why", "where",
];
const INTERJECTIONS: &[&str] = &["hello", "hi", "hey", "oh", "wow", "yes", "please", "thanks", "bye"];

/// [`TextAnalyzer`] backed by a regex tokenizer and the Snowball stemmer
pub struct StemmingAnalyzer {
    tokenizer: Regex,
    stemmer: Stemmer,
}

impl StemmingAnalyzer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            tokenizer: Regex::new(WORD_PATTERN)?,
            stemmer: Stemmer::create(Algorithm::English),
        })
    }

    fn analyze_word(&self, word: &str) -> WordAnalysis {
        let tag = tag_for(word);
        let base_form = match tag {
            "NOUN" | "VERB" | "ADJ" | "ADV" => self.stemmer.stem(word).into_owned(),
            _ => word.to_string(),
        };
        WordAnalysis {
            word: word.to_string(),
            base_form,
            tag: tag.to_string(),
        }
    }
}

fn tag_for(word: &str) -> &'static str {
    let lists: [(&[&str], &'static str); 9] = [
        (DETERMINERS, "DET"),
        (PRONOUNS, "PRON"),
        (AUXILIARIES, "AUX"),
        (ADPOSITIONS, "ADP"),
        (COORDINATORS, "CCONJ"),
        (SUBORDINATORS, "SCONJ"),
        (PARTICLES, "PART"),
        (ADVERBS, "ADV"),
        (INTERJECTIONS, "INTJ"),
    ];
    if let Some(tag) = lists
        .iter()
        .find(|(list, _)| list.contains(&word))
        .map(|(_, tag)| *tag)
    {
        return tag;
    }
    if word.chars().all(|c| c.is_numeric()) {
        return "NUM";
    }

    let long = word.chars().count() > 4;
    if long && word.ends_with("ly") {
        "ADV"
    } else if long && (word.ends_with("ing") || word.ends_with("ed") || word.ends_with("ize")) {
        "VERB"
    } else if ["ful", "ous", "ive", "able", "ible", "less", "ish", "ic"]
        .iter()
        .any(|suffix| long && word.ends_with(suffix))
    {
        "ADJ"
    } else {
        "NOUN"
    }
}

impl TextAnalyzer for StemmingAnalyzer {
    fn analyze(&self, text: &str) -> Vec<WordAnalysis> {
        let mut seen = HashSet::new();
        self.tokenizer
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase().replace('’', "'"))
            .filter(|word| seen.insert(word.clone()))
            .map(|word| self.analyze_word(&word))
            .collect()
    }
}
