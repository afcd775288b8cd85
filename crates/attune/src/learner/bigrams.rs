//! Bigram extraction from conversation text
//!
//! Adjacent word pairs accumulate in a non-persisted staging map and are
//! promoted into the persistent bigram counter once they cross a threshold.
//! Promoted bigrams then follow the normal integer decay cycle.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::learner::state::Learner;

/// Minimum accumulated count before a staged bigram is promoted to the
/// persistent map.
pub const BIGRAM_THRESHOLD: u32 = 6;

/// Token shape: first char `[a-z]`, then `[a-z0-9_]+`, minimum two chars.
/// Underscore keeps identifiers like `auth_handler` as one token.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z][a-z0-9_]+\b").expect("token regex is valid"));

/// Common English function words carrying no domain signal. Kept
/// conservative: only words that are unambiguously non-technical.
const STOP_WORDS: &[&str] = &[
    "about", "all", "also", "an", "and", "are", "as", "at", "been", "being", "both", "but", "by",
    "can", "could", "did", "do", "does", "each", "every", "few", "for", "from", "had", "has",
    "have", "her", "here", "him", "his", "how", "if", "in", "into", "is", "it", "its", "just",
    "might", "more", "most", "no", "nor", "not", "on", "only", "onto", "or", "other", "our",
    "over", "shall", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "to", "up", "very", "was", "were",
    "what", "when", "where", "which", "who", "whom", "whose", "will", "with", "would", "you",
    "your",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .filter(|token| !is_stop_word(token))
        .collect()
}

/// Extract adjacent word pairs from text as `"word1:word2"` counts.
///
/// Returns an empty map when fewer than two tokens survive stop-word
/// filtering.
pub fn extract_bigrams(text: &str) -> BTreeMap<String, u32> {
    let words = tokenize(text);
    let mut bigrams = BTreeMap::new();
    for pair in words.windows(2) {
        let key = format!("{}:{}", pair[0], pair[1]);
        *bigrams.entry(key).or_insert(0) += 1;
    }
    bigrams
}

impl Learner {
    /// Extract bigrams from conversation text and accumulate counts.
    ///
    /// Already-promoted bigrams are incremented directly in the persistent
    /// map; the rest stage internally until [`BIGRAM_THRESHOLD`].
    pub fn process_bigrams(&mut self, text: &str) {
        for (bigram, count) in extract_bigrams(text) {
            if let Some(promoted) = self.state.bigrams.get_mut(&bigram) {
                *promoted += count;
                continue;
            }
            let staged = self.staging.entry(bigram.clone()).or_insert(0);
            *staged += count;
            if *staged >= BIGRAM_THRESHOLD {
                self.state.bigrams.insert(bigram.clone(), *staged);
                self.staging.remove(&bigram);
            }
        }
    }
}
