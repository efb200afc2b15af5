//! Blood-report text analysis: extract test values from noisy report text,
//! classify them against reference ranges, and produce a patient-facing
//! summary grouped into clinical panels.

pub mod analyze;
pub mod catalog;
pub mod categorize;
pub mod config;
pub mod extract;
pub mod indications;
pub mod messages;
pub mod nlp;
pub mod pipeline;
pub mod summary;
pub mod types;

pub use catalog::{ReferenceCatalog, ReferenceEntry, ReferenceRange};
pub use pipeline::ReportAnalyzer;
pub use types::{AnalysisError, Classification, Insight, ReportAnalysis, TestStatus};
