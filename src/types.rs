use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// TestStatus
// ---------------------------------------------------------------------------

/// Direction of an out-of-range result. Values exactly on a bound are Normal
/// and never produce a status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum TestStatus {
    Low,
    High,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::High => "High",
        }
    }
}

// ---------------------------------------------------------------------------
// Classification & Insight
// ---------------------------------------------------------------------------

/// An extracted value that breached its reference range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub code: String,
    pub value: f64,
    pub status: TestStatus,
    /// Percent deviation from the breached bound: (value − bound) / bound × 100.
    pub deviation_percent: f64,
}

/// Clinical-indication text attached to an abnormal result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub code: String,
    pub status: TestStatus,
    pub conditions: String,
    pub details: String,
}

// ---------------------------------------------------------------------------
// ReportAnalysis — the full pipeline output record
// ---------------------------------------------------------------------------

/// Everything the pipeline produces for one report.
/// All maps are `BTreeMap` so serialized output is byte-identical across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportAnalysis {
    pub extracted_values: BTreeMap<String, f64>,
    pub abnormal_values: Vec<String>,
    pub insights: Vec<String>,
    pub summary: String,
    pub categorized_results: BTreeMap<String, BTreeMap<String, f64>>,
    /// Advisory extraction warnings (e.g. hemoglobin not found). Non-fatal.
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// AnalysisError
// ---------------------------------------------------------------------------

/// Soft failures surfaced to the host layer. Everything else (malformed
/// numbers, unknown codes, odd layouts) is absorbed during extraction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Failed to extract text from the file.")]
    NoInputText,

    #[error("No blood test values were detected.")]
    EmptyExtraction,
}
