//! Descriptive statistics shown next to a summary

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Average adult silent reading speed
pub const WORDS_PER_MINUTE: usize = 200;

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").unwrap());

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "is", "in", "it", "of", "for", "on", "with", "as", "at", "by",
        "to", "was", "were", "be", "are", "i", "you", "he", "she", "they", "we", "my", "your",
        "his", "her", "their", "our", "this", "that", "what", "which", "who",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStatistics {
    pub word_count: usize,
    pub reading_time_minutes: usize,
    pub common_words: Vec<(String, usize)>,
}

impl TextStatistics {
    pub const COMMON_WORD_LIMIT: usize = 5;

    pub fn from_text(text: &str) -> Self {
        let word_count = word_count(text);
        Self {
            word_count,
            reading_time_minutes: reading_time_minutes(word_count),
            common_words: common_words(text, Self::COMMON_WORD_LIMIT),
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn reading_time_minutes(word_count: usize) -> usize {
    word_count / WORDS_PER_MINUTE
}

/// Most frequent meaningful words, by count descending then alphabetically
///
/// Stop words and single-character tokens are ignored.
pub fn common_words(text: &str, limit: usize) -> Vec<(String, usize)> {
    let lower = text.to_lowercase();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for m in WORD_REGEX.find_iter(&lower) {
        let word = m.as_str();
        if word.chars().count() > 1 && !STOP_WORDS.contains(word) {
            *counts.entry(word).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .sorted_by(|(wa, ca), (wb, cb)| cb.cmp(ca).then_with(|| wa.cmp(wb)))
        .take(limit)
        .map(|(word, count)| (word.to_string(), count))
        .collect()
}

/// Render common words as a numbered markdown list
pub fn format_common_words(words: &[(String, usize)]) -> String {
    if words.is_empty() {
        return "No meaningful words found.".to_string();
    }
    words
        .iter()
        .enumerate()
        .map(|(i, (word, count))| format!("{}. **{}**: {}", i + 1, word, count))
        .join("\n")
}
