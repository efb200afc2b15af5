//! Result classification against reference ranges, and the patient-facing
//! abnormal-value and insight lines derived from it.

use std::collections::BTreeMap;

use crate::catalog::ReferenceCatalog;
use crate::indications::indications_for;
use crate::messages::ReportMessages;
use crate::types::{Classification, Insight, TestStatus};

/// Classify extracted values against their reference ranges.
/// Strict inequalities: a value exactly on a bound is normal. Codes without
/// an established range are skipped. Output follows map order, so it is
/// stable across runs.
pub fn classify(values: &BTreeMap<String, f64>, catalog: &ReferenceCatalog) -> Vec<Classification> {
    let mut out = Vec::new();

    for (code, &value) in values {
        let Some(range) = catalog.range(code) else {
            continue;
        };

        let status = if value < range.low {
            TestStatus::Low
        } else if value > range.high {
            TestStatus::High
        } else {
            continue;
        };

        let bound = match status {
            TestStatus::Low => range.low,
            TestStatus::High => range.high,
        };
        out.push(Classification {
            code: code.clone(),
            value,
            status,
            deviation_percent: (value - bound) / bound * 100.0,
        });
    }

    out
}

/// Attach clinical-indication text to each classification.
pub fn insights(classifications: &[Classification]) -> Vec<Insight> {
    classifications
        .iter()
        .map(|c| {
            let text = indications_for(&c.code, c.status);
            Insight {
                code: c.code.clone(),
                status: c.status,
                conditions: text.conditions,
                details: text.details,
            }
        })
        .collect()
}

/// Render classifications as the two parallel string lists the report
/// carries: abnormal-value lines and insight lines.
pub fn describe(
    classifications: &[Classification],
    catalog: &ReferenceCatalog,
) -> (Vec<String>, Vec<String>) {
    let mut abnormal = Vec::new();
    let mut insight_lines = Vec::new();

    for c in classifications {
        let unit = catalog
            .range(&c.code)
            .map_or("", |r| r.unit.as_str());
        abnormal.push(ReportMessages::abnormal_value(
            &c.code,
            catalog.display_name(&c.code),
            c.status,
            c.value,
            unit,
        ));
        let text = indications_for(&c.code, c.status);
        insight_lines.push(ReportMessages::insight(&c.code, c.status, &text.conditions));
    }

    (abnormal, insight_lines)
}
