//! Extractive summarization and the structured report markdown.

use crate::indications::indications_for;
use crate::nlp;
use crate::types::Classification;

/// Pick the highest-scoring sentences from the text, scored by the summed
/// normalized frequencies of their words. Short texts pass through whole.
/// Ties prefer the earlier sentence; selected sentences keep reading order.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let sentences = nlp::sentences(text);
    if sentences.len() <= max_sentences {
        return sentences.join(" ");
    }

    let frequencies = nlp::term_frequencies(text);

    let mut scored: Vec<(f64, usize)> = sentences
        .iter()
        .enumerate()
        .filter_map(|(i, sentence)| {
            let score: f64 = nlp::words(sentence)
                .iter()
                .filter_map(|w| frequencies.get(w))
                .sum();
            (score > 0.0).then_some((score, i))
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut picked: Vec<usize> = scored.iter().take(max_sentences).map(|&(_, i)| i).collect();
    picked.sort_unstable();

    picked
        .into_iter()
        .map(|i| sentences[i])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the full report markdown: the extractive summary plus, when
/// anything is out of range, a health-implications table sorted by code
/// (Low rows before High for the same code).
pub fn build_report(
    text: &str,
    classifications: &[Classification],
    max_sentences: usize,
    catalog: &crate::catalog::ReferenceCatalog,
) -> String {
    let mut report = format!(
        "## Blood Report Summary\n\n{}\n",
        summarize(text, max_sentences)
    );

    if classifications.is_empty() {
        return report;
    }

    report.push_str("\n### Possible Health Implications\n\n");
    report.push_str("| Test | Status | Possible Conditions | Clinical Significance |\n");
    report.push_str("|------|--------|-------------------|----------------------|\n");

    let mut rows: Vec<&Classification> = classifications.iter().collect();
    rows.sort_by(|a, b| a.code.cmp(&b.code).then(a.status.cmp(&b.status)));

    for row in rows {
        let text = indications_for(&row.code, row.status);
        report.push_str(&format!(
            "| **{}** ({}) | {} | {} | {} |\n",
            row.code,
            catalog.display_name(&row.code),
            row.status.as_str(),
            text.conditions,
            text.details,
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use std::collections::BTreeMap;

    const LONG_TEXT: &str = "The patient presented for a routine follow-up visit. \
        Laboratory testing showed hemoglobin of 9.2 which is below the expected range. \
        The hemoglobin finding is consistent with the prior hemoglobin trend. \
        Glucose was elevated at 250 on a fasting sample. \
        Diet and medication adherence were discussed at length. \
        A repeat panel was ordered for next month.";

    /// Texts at or under the sentence budget pass through unchanged.
    #[test]
    fn short_text_passes_through() {
        let text = "Hemoglobin low. Glucose high.";
        assert_eq!(summarize(text, 3), "Hemoglobin low. Glucose high.");
    }

    #[test]
    fn picks_high_frequency_sentences_in_reading_order() {
        let summary = summarize(LONG_TEXT, 2);
        // "hemoglobin" dominates the frequency table, so both
        // hemoglobin-heavy sentences are picked, earliest first.
        assert!(summary.contains("below the expected range"));
        assert!(summary.contains("prior hemoglobin trend"));
        let a = summary.find("below the expected range");
        let b = summary.find("prior hemoglobin trend");
        assert!(a < b);
    }

    /// Summarizing a summary returns it unchanged once it fits the budget.
    #[test]
    fn summarization_is_idempotent() {
        let once = summarize(LONG_TEXT, 3);
        let twice = summarize(&once, 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn report_without_abnormalities_has_no_table() {
        let report = build_report("All values normal.", &[], 3, catalog::shared());
        assert!(report.starts_with("## Blood Report Summary"));
        assert!(!report.contains("Possible Health Implications"));
    }

    #[test]
    fn report_table_rows_sorted_by_code() {
        let mut values = BTreeMap::new();
        values.insert("WBC".to_string(), 15.3);
        values.insert("Hb".to_string(), 9.2);
        let classifications = crate::analyze::classify(&values, catalog::shared());

        let report = build_report("Report text.", &classifications, 3, catalog::shared());
        assert!(report.contains("Possible Health Implications"));
        let hb = report.find("| **Hb** (Hemoglobin) | Low |");
        let wbc = report.find("| **WBC** (White Blood Cells) | High |");
        assert!(hb.is_some() && wbc.is_some());
        assert!(hb < wbc);
    }
}
