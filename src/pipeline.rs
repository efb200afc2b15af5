//! End-to-end report analysis: extract, classify, summarize, categorize.

use std::time::Instant;

use crate::catalog::{self, ReferenceCatalog};
use crate::types::{AnalysisError, ReportAnalysis};
use crate::{analyze, categorize, config, extract, summary};

/// Orchestrates the full analysis of one report's text.
/// Stateless apart from the shared reference catalog, so one instance can
/// serve any number of reports.
pub struct ReportAnalyzer {
    catalog: &'static ReferenceCatalog,
    max_summary_sentences: usize,
}

impl Default for ReportAnalyzer {
    fn default() -> Self {
        Self::new(config::DEFAULT_SUMMARY_SENTENCES)
    }
}

impl ReportAnalyzer {
    pub fn new(max_summary_sentences: usize) -> Self {
        Self {
            catalog: catalog::shared(),
            max_summary_sentences,
        }
    }

    /// Run the full pipeline over report text.
    ///
    /// Fails soft in exactly two cases: blank input and input from which no
    /// test value could be extracted. Everything else (unknown codes, odd
    /// layouts, malformed numbers) is absorbed during extraction.
    pub fn analyze(&self, text: &str) -> Result<ReportAnalysis, AnalysisError> {
        let started = Instant::now();

        if text.trim().is_empty() {
            return Err(AnalysisError::NoInputText);
        }

        let (extracted_values, warnings) = extract::extract(text, self.catalog);
        if extracted_values.is_empty() {
            return Err(AnalysisError::EmptyExtraction);
        }

        let classifications = analyze::classify(&extracted_values, self.catalog);
        let (abnormal_values, insights) = analyze::describe(&classifications, self.catalog);

        let summary = summary::build_report(
            text,
            &classifications,
            self.max_summary_sentences,
            self.catalog,
        );
        let categorized_results = categorize::categorize(&extracted_values, self.catalog);

        tracing::info!(
            values = extracted_values.len(),
            abnormal = abnormal_values.len(),
            panels = categorized_results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "report analyzed"
        );

        Ok(ReportAnalysis {
            extracted_values,
            abnormal_values,
            insights,
            summary,
            categorized_results,
            warnings,
        })
    }
}
