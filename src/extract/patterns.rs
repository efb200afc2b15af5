//! Shared pattern primitives for value extraction: case-insensitive label
//! location and the number-matching regexes every strategy builds on.
//! Labels in the reference data are ASCII, so byte-window matching is both
//! correct and cheap here.

use std::sync::LazyLock;

use regex::Regex;

/// Number immediately following a label, optionally separated by `:` or `=`.
/// Applied to the text after the label, so it covers "Hb: 9.2", "Hb = 9.2"
/// and "Hb 9.2" alike.
static RE_AFTER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[:=]?\s*(\d+\.?\d*)").expect("valid regex"));

/// Number at the very end of a prefix, separated from the label by
/// whitespace (the "9.2 g/dL Hemoglobin" layout).
static RE_BEFORE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)\s+$").expect("valid regex"));

/// Number at the start of a line (continuation-line values).
static RE_LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+\.?\d*)").expect("valid regex"));

/// Any number anywhere.
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("valid regex"));

/// Byte offset of the first case-insensitive occurrence of `label` in
/// `haystack`, or None. ASCII-only comparison.
pub fn find_label_ci(haystack: &str, label: &str) -> Option<usize> {
    let needle = label.as_bytes();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

/// Like [`find_label_ci`] but requires the match to sit on word boundaries,
/// so "Iron" does not match inside "Environment".
pub fn find_whole_word_ci(haystack: &str, label: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut from = 0;
    while let Some(rel) = find_label_ci(&haystack[from..], label) {
        let start = from + rel;
        let end = start + label.len();
        let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let after_ok = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return Some(start);
        }
        from = start + 1;
    }
    None
}

/// Value for the inline layouts "label: N", "label = N", "label N".
pub fn value_after_label(line: &str, label: &str) -> Option<f64> {
    let pos = find_label_ci(line, label)?;
    let rest = &line[pos + label.len()..];
    RE_AFTER_LABEL
        .captures(rest)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Value for the reversed layout "N <whitespace> label".
pub fn value_before_label(line: &str, label: &str) -> Option<f64> {
    let pos = find_label_ci(line, label)?;
    RE_BEFORE_LABEL
        .captures(&line[..pos])
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Number at the start of a line, for values carried on the next line.
pub fn leading_number(line: &str) -> Option<f64> {
    RE_LEADING_NUMBER
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// All numbers in a piece of text, in reading order.
pub fn numbers(text: &str) -> Vec<f64> {
    RE_NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// All numbers with their byte offsets, for proximity scoring.
pub fn numbers_with_offsets(text: &str) -> Vec<(usize, f64)> {
    RE_NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok().map(|v| (m.start(), v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_layouts() {
        assert_eq!(value_after_label("Hemoglobin: 9.2 g/dL", "Hemoglobin"), Some(9.2));
        assert_eq!(value_after_label("Glucose = 250", "Glucose"), Some(250.0));
        assert_eq!(value_after_label("WBC 15.3", "WBC"), Some(15.3));
        assert_eq!(value_after_label("wbc: 15.3", "WBC"), Some(15.3));
        assert_eq!(value_after_label("Sodium high", "Sodium"), None);
    }

    #[test]
    fn reversed_layout() {
        assert_eq!(value_before_label("9.2 Hemoglobin", "Hemoglobin"), Some(9.2));
        // No separating whitespace, no match.
        assert_eq!(value_before_label("9.2Hemoglobin", "Hemoglobin"), None);
    }

    #[test]
    fn whole_word_boundaries() {
        assert!(find_whole_word_ci("Serum Iron 80", "Iron").is_some());
        assert!(find_whole_word_ci("Environment 80", "Iron").is_none());
        assert!(find_whole_word_ci("iron: 80", "Iron").is_some());
    }

    #[test]
    fn leading_and_scattered_numbers() {
        assert_eq!(leading_number("  14.2 g/dL"), Some(14.2));
        assert_eq!(leading_number("g/dL 14.2"), None);
        assert_eq!(numbers("a 1 b 2.5 c"), vec![1.0, 2.5]);
    }
}
