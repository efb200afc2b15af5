//! Small text-processing helpers for report text: sentence splitting, word
//! tokenization, normalized term frequencies, and a coarse noun heuristic.
//! Lab reports are short and mostly tabular, so a lightweight lexical
//! approach outperforms heavier NLP here.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Stop words
// ---------------------------------------------------------------------------

/// English stop words filtered out before frequency counting and term
/// candidate selection.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can",
    "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i", "if",
    "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor", "not",
    "now", "of", "off", "on", "once", "only", "or", "other", "our", "out", "over", "own", "per",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under", "until",
    "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "whose", "why", "will", "with", "you", "your",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

// ---------------------------------------------------------------------------
// Tokenization
// ---------------------------------------------------------------------------

/// Split text into sentences. A sentence ends at a run of `.`, `!` or `?`
/// followed by whitespace (or end of text), so decimal values like "9.2"
/// never split a sentence.
pub fn sentences(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') {
            let mut end = i + 1;
            while end < bytes.len() && matches!(bytes[end], b'.' | b'!' | b'?') {
                end += 1;
            }
            let at_break = end >= bytes.len() || bytes[end].is_ascii_whitespace();
            if at_break {
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    out.push(sentence);
                }
                start = end;
            }
            i = end;
        } else {
            i += 1;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Lowercased alphanumeric word tokens.
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

// ---------------------------------------------------------------------------
// Term statistics
// ---------------------------------------------------------------------------

/// Word frequencies over the whole text, with stop words and pure numbers
/// removed, normalized so the most frequent term scores 1.0.
pub fn term_frequencies(text: &str) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, f64> = BTreeMap::new();
    for word in words(text) {
        if is_stop_word(&word) || word.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        *counts.entry(word).or_insert(0.0) += 1.0;
    }

    let max = counts.values().cloned().fold(f64::MIN, f64::max);
    if max > 0.0 {
        for value in counts.values_mut() {
            *value /= max;
        }
    }
    counts
}

/// Coarse noun heuristic: alphabetic, longer than 3 characters, not a stop
/// word, and not an adverb-looking "-ly" form. Good enough to pick out
/// test names ("hemoglobin", "creatinine") from surrounding prose.
pub fn is_probable_noun(word: &str) -> bool {
    word.chars().count() > 3
        && word.chars().all(char::is_alphabetic)
        && !is_stop_word(&word.to_lowercase())
        && !word.to_lowercase().ends_with("ly")
}

/// Noun-ish tokens in reading order, original casing preserved, deduplicated.
pub fn candidate_terms(text: &str) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut out = Vec::new();
    for token in text.split(|c: char| !c.is_alphanumeric()) {
        if token.is_empty() || !is_probable_noun(token) {
            continue;
        }
        if seen.insert(token.to_lowercase()) {
            out.push(token.to_string());
        }
    }
    out
}
