use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::types::TestStatus;

const INDICATIONS_JSON: &str = include_str!("../resources/indications.json");

/// Generic fallback when a code has no specific indication entry.
const FALLBACK_CONDITIONS: &str =
    "various medical conditions requiring further clinical correlation";
const FALLBACK_DETAILS: &str = "Abnormal values should be interpreted in the context of your \
     overall health, symptoms, and other test results. Consult with a healthcare provider for \
     proper diagnosis.";

/// Clinical-indication text for one (code, direction) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicationText {
    pub conditions: String,
    pub details: String,
}

#[derive(Debug, Deserialize)]
struct IndicationTables {
    low: BTreeMap<String, IndicationText>,
    high: BTreeMap<String, IndicationText>,
}

static TABLES: LazyLock<IndicationTables> = LazyLock::new(|| {
    serde_json::from_str(INDICATIONS_JSON).expect("embedded indication tables are valid JSON")
});

/// Pure lookup: indication text for a code and direction, with the generic
/// fallback when no specific entry exists.
pub fn indications_for(code: &str, status: TestStatus) -> IndicationText {
    let table = match status {
        TestStatus::Low => &TABLES.low,
        TestStatus::High => &TABLES.high,
    };
    table.get(code).cloned().unwrap_or_else(|| IndicationText {
        conditions: FALLBACK_CONDITIONS.to_string(),
        details: FALLBACK_DETAILS.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_hemoglobin_has_specific_entry() {
        let text = indications_for("Hb", TestStatus::Low);
        assert!(text.conditions.contains("anemia"));
    }

    #[test]
    fn unknown_code_falls_back() {
        let text = indications_for("XYZ-unknown", TestStatus::High);
        assert_eq!(text.conditions, FALLBACK_CONDITIONS);
        assert_eq!(text.details, FALLBACK_DETAILS);
    }

    /// Direction matters: TSH has a high-side entry but no low-side entry.
    #[test]
    fn direction_specific_lookup() {
        let high = indications_for("TSH", TestStatus::High);
        assert!(high.conditions.contains("hypothyroidism"));

        let low = indications_for("TSH", TestStatus::Low);
        assert_eq!(low.conditions, FALLBACK_CONDITIONS);
    }

    /// Indication tables only reference codes the catalog knows.
    #[test]
    fn indication_codes_resolve_in_catalog() {
        let catalog = crate::catalog::shared();
        for code in TABLES.low.keys().chain(TABLES.high.keys()) {
            assert!(
                catalog.get(code).is_some(),
                "indication entry for unknown code: {code}"
            );
        }
    }
}
