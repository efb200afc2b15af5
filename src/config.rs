/// Application-level constants
pub const APP_NAME: &str = "Hemascan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How many sentences the extractive summary keeps by default.
pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "hemascan=info".to_string()
}
