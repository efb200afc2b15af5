//! Message template builder for patient-facing text.
//! Calm, non-alarming wording; every message names the measurement it is
//! about so it can be checked against the source report.

use crate::types::TestStatus;

pub struct ReportMessages;

impl ReportMessages {
    /// Abnormal-value line, e.g. "Hb (Hemoglobin) is low: 9.2 g/dL".
    pub fn abnormal_value(
        code: &str,
        name: &str,
        status: TestStatus,
        value: f64,
        unit: &str,
    ) -> String {
        format!(
            "{} ({}) is {}: {} {}",
            code,
            name,
            status.as_str().to_lowercase(),
            value,
            unit,
        )
    }

    /// Insight line, e.g. "Low Hb may indicate anemia, blood loss, ...".
    pub fn insight(code: &str, status: TestStatus, conditions: &str) -> String {
        format!("{} {} may indicate {}.", status.as_str(), code, conditions)
    }

    /// Advisory warning when hemoglobin could not be located.
    pub fn missing_hemoglobin() -> String {
        "Could not detect hemoglobin value in the report. \
         Please check if it's present in the original document."
            .to_string()
    }

    /// Advisory warning when the white blood cell count could not be located.
    pub fn missing_wbc() -> String {
        "Could not detect white blood cell count (WBC) in the report. \
         Please check if it's present in the original document."
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abnormal_value_format() {
        let msg = ReportMessages::abnormal_value("Hb", "Hemoglobin", TestStatus::Low, 9.2, "g/dL");
        assert_eq!(msg, "Hb (Hemoglobin) is low: 9.2 g/dL");
    }

    #[test]
    fn insight_format() {
        let msg = ReportMessages::insight("WBC", TestStatus::High, "infection or inflammation");
        assert_eq!(msg, "High WBC may indicate infection or inflammation.");
    }
}
