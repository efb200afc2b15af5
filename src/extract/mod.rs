//! Value extraction from free-form report text.
//!
//! OCR output is messy: labels and values appear inline, reversed, in
//! columns, or split across lines. Extraction runs a fixed sequence of
//! strategies from most to least reliable, and the first strategy to
//! resolve a code wins; later strategies never overwrite it.
//!
//! 1. Dedicated hemoglobin/WBC finders with plausibility bands.
//! 2. Alias-driven line scan over every known alternate test name.
//! 3. Canonical-name scan (code and display name).
//! 4. Proximity fallback: noun-like terms matched to test names, paired
//!    with the nearest number (only when few codes resolved so far).
//! 5. Tabular fallback: whole-word label with the first number to its right.

pub mod critical;
pub mod patterns;

use std::collections::BTreeMap;

use crate::catalog::ReferenceCatalog;
use crate::messages::ReportMessages;
use crate::nlp;

/// Proximity fallback only runs when fewer codes than this resolved.
const PROXIMITY_THRESHOLD: usize = 10;
/// Half-width of the text window searched around a matched term.
const PROXIMITY_WINDOW: usize = 75;
/// A number farther than this from the term is not its value.
const PROXIMITY_MAX_DISTANCE: usize = 50;

/// Extract every recognizable test value from report text.
/// Returns resolved values keyed by canonical code, plus advisory warnings
/// for critical measurements that could not be located.
pub fn extract(text: &str, catalog: &ReferenceCatalog) -> (BTreeMap<String, f64>, Vec<String>) {
    let mut results: BTreeMap<String, f64> = BTreeMap::new();

    if let Some(value) = critical::find_hemoglobin(text) {
        results.insert("Hb".to_string(), value);
    }
    if let Some(value) = critical::find_wbc(text) {
        results.insert("WBC".to_string(), value);
    }

    scan_aliases(text, catalog, &mut results);
    scan_canonical_names(text, catalog, &mut results);

    if results.len() < PROXIMITY_THRESHOLD {
        scan_by_proximity(text, catalog, &mut results);
    }

    scan_tabular(text, catalog, &mut results);

    let mut warnings = Vec::new();
    if !results.contains_key("Hb") {
        tracing::warn!("hemoglobin not found in report text");
        warnings.push(ReportMessages::missing_hemoglobin());
    }
    if !results.contains_key("WBC") {
        tracing::warn!("white blood cell count not found in report text");
        warnings.push(ReportMessages::missing_wbc());
    }

    tracing::debug!(resolved = results.len(), "extraction finished");
    (results, warnings)
}

/// Plausibility gate applied before any insertion. Hemoglobin and WBC carry
/// hard bands in every strategy, not just their dedicated finders; other
/// codes accept any parsed number.
fn accept(code: &str, value: f64) -> Option<f64> {
    match code {
        "Hb" => critical::normalize_hemoglobin(value),
        "WBC" => critical::plausible_wbc(value).then_some(value),
        _ => Some(value),
    }
}

fn insert_first(results: &mut BTreeMap<String, f64>, code: &str, value: f64) -> bool {
    if results.contains_key(code) {
        return false;
    }
    match accept(code, value) {
        Some(accepted) => {
            results.insert(code.to_string(), accepted);
            true
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Strategy 2: alias scan
// ---------------------------------------------------------------------------

fn scan_aliases(text: &str, catalog: &ReferenceCatalog, results: &mut BTreeMap<String, f64>) {
    let lines: Vec<&str> = text.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        for alias_entry in catalog.alias_entries() {
            let code = alias_entry.code.as_str();
            if results.contains_key(code) {
                continue;
            }

            for alias in &alias_entry.aliases {
                // Tabular split: the line is exactly the label, value follows.
                if line.trim().eq_ignore_ascii_case(alias) {
                    if let Some(next) = lines.get(i + 1) {
                        if let Some(value) = patterns::leading_number(next) {
                            if insert_first(results, code, value) {
                                break;
                            }
                        }
                    }
                }

                let found = patterns::value_after_label(line, alias)
                    .or_else(|| patterns::value_before_label(line, alias));
                if let Some(value) = found {
                    if insert_first(results, code, value) {
                        break;
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Strategy 3: canonical names
// ---------------------------------------------------------------------------

fn scan_canonical_names(
    text: &str,
    catalog: &ReferenceCatalog,
    results: &mut BTreeMap<String, f64>,
) {
    for entry in catalog.entries() {
        if results.contains_key(&entry.code) {
            continue;
        }
        'lines: for line in text.lines() {
            for label in [entry.code.as_str(), entry.name.as_str()] {
                if let Some(value) = patterns::value_after_label(line, label) {
                    if insert_first(results, &entry.code, value) {
                        break 'lines;
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Strategy 4: proximity fallback
// ---------------------------------------------------------------------------

/// Pair noun-like terms with the nearest number in a window around them.
/// Runs only on sparse reports where line-based scans found little, since
/// it is the least precise strategy.
fn scan_by_proximity(text: &str, catalog: &ReferenceCatalog, results: &mut BTreeMap<String, f64>) {
    for term in nlp::candidate_terms(text) {
        for entry in catalog.entries() {
            if results.contains_key(&entry.code) {
                continue;
            }
            // Exact match only. A loose substring match would let a word
            // like "hemoglobin" claim values for MCH or HbA1c as well.
            let code_match = entry.code.eq_ignore_ascii_case(&term);
            let name_match = entry.name.eq_ignore_ascii_case(&term);
            if !name_match && !code_match {
                continue;
            }

            let Some(term_pos) = patterns::find_label_ci(text, &term) else {
                continue;
            };
            let start = floor_char_boundary(text, term_pos.saturating_sub(PROXIMITY_WINDOW));
            let end = ceil_char_boundary(
                text,
                (term_pos + term.len() + PROXIMITY_WINDOW).min(text.len()),
            );
            let window = &text[start..end];
            let term_in_window = term_pos - start;

            let nearest = patterns::numbers_with_offsets(window)
                .into_iter()
                .map(|(offset, value)| (offset.abs_diff(term_in_window), value))
                .min_by_key(|(distance, _)| *distance);

            if let Some((distance, value)) = nearest {
                if distance < PROXIMITY_MAX_DISTANCE {
                    insert_first(results, &entry.code, value);
                }
            }
        }
    }
}

fn floor_char_boundary(text: &str, mut i: usize) -> usize {
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(text: &str, mut i: usize) -> usize {
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

// ---------------------------------------------------------------------------
// Strategy 5: tabular fallback
// ---------------------------------------------------------------------------

/// Columnar layouts: a whole-word label somewhere on the line, value in a
/// column to its right. Falls back to the last number on the line when
/// nothing sits to the right of the label.
fn scan_tabular(text: &str, catalog: &ReferenceCatalog, results: &mut BTreeMap<String, f64>) {
    for line in text.lines() {
        for entry in catalog.entries() {
            if results.contains_key(&entry.code) {
                continue;
            }

            let hit = [entry.code.as_str(), entry.name.as_str()]
                .into_iter()
                .find_map(|label| {
                    patterns::find_whole_word_ci(line, label).map(|pos| pos + label.len())
                });
            let Some(label_end) = hit else { continue };

            let right_numbers = patterns::numbers(&line[label_end..]);
            let value = right_numbers
                .first()
                .copied()
                .or_else(|| patterns::numbers(line).last().copied());
            if let Some(value) = value {
                insert_first(results, &entry.code, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn run(text: &str) -> BTreeMap<String, f64> {
        extract(text, catalog::shared()).0
    }

    #[test]
    fn inline_report() {
        let values = run("CBC Report\nHemoglobin: 9.2 g/dL\nWBC: 15.3\nGlucose 250 mg/dL\n");
        assert_eq!(values.get("Hb"), Some(&9.2));
        assert_eq!(values.get("WBC"), Some(&15.3));
        assert_eq!(values.get("Glucose"), Some(&250.0));
    }

    /// The first strategy to resolve a code wins; later matches for the
    /// same code never overwrite it.
    #[test]
    fn first_match_wins() {
        let values = run("Hemoglobin: 9.2 g/dL\nHb 14.1 g/dL\n");
        assert_eq!(values.get("Hb"), Some(&9.2));
    }

    /// Plausibility bands hold in every strategy, including alias scans.
    #[test]
    fn implausible_hemoglobin_never_extracted() {
        let values = run("Hemoglobin: 300 g/dL\n");
        assert!(!values.contains_key("Hb"));
    }

    #[test]
    fn gl_hemoglobin_rescaled() {
        let values = run("Hb: 140 g/L\n");
        assert_eq!(values.get("Hb"), Some(&14.0));
    }

    #[test]
    fn alias_resolution() {
        let values = run("Packed Cell Volume: 41.5\nThrombocytes 210\nSerum Creatinine = 1.1\n");
        assert_eq!(values.get("HCT"), Some(&41.5));
        assert_eq!(values.get("PLT"), Some(&210.0));
        assert_eq!(values.get("Creatinine"), Some(&1.1));
    }

    #[test]
    fn label_on_own_line_value_on_next() {
        let values = run("Ferritin\n85.0 ng/mL\n");
        assert_eq!(values.get("Ferritin"), Some(&85.0));
    }

    #[test]
    fn reversed_layout() {
        let values = run("0.9 Creatinine\n");
        assert_eq!(values.get("Creatinine"), Some(&0.9));
    }

    /// Sparse prose reports resolve through the proximity fallback.
    #[test]
    fn proximity_fallback_on_prose() {
        let values = run("The ferritin measured this visit was 12 which is worth review.");
        assert_eq!(values.get("Ferritin"), Some(&12.0));
    }

    #[test]
    fn tabular_value_right_of_label() {
        let values = run("Test            Result   Range\nUric Acid       7.9      3.5-7.2\n");
        assert_eq!(values.get("Uric Acid"), Some(&7.9));
    }

    #[test]
    fn missing_critical_values_warn() {
        let (values, warnings) = extract("Glucose: 98 mg/dL\n", catalog::shared());
        assert!(values.contains_key("Glucose"));
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("hemoglobin"));
        assert!(warnings[1].contains("WBC"));
    }

    /// Same text in, same map out.
    #[test]
    fn extraction_is_deterministic() {
        let text = "Hb 13.9\nWBC 6.2\nSodium: 141\nPotassium: 4.4\nGlucose = 101\n";
        let first = run(text);
        let second = run(text);
        assert_eq!(first, second);
    }
}
