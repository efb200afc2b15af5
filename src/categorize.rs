//! Grouping of extracted values into clinical panels for display.

use std::collections::BTreeMap;

use crate::catalog::ReferenceCatalog;

const OTHER_PANEL: &str = "Other";

/// Partition extracted values into panels using each code's catalog
/// category. Codes the catalog does not know land in "Other". Panels with
/// no resolved values are simply absent.
pub fn categorize(
    values: &BTreeMap<String, f64>,
    catalog: &ReferenceCatalog,
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut panels: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

    for (code, &value) in values {
        let panel = catalog
            .get(code)
            .map_or(OTHER_PANEL, |entry| entry.category.as_str());
        panels
            .entry(panel.to_string())
            .or_default()
            .insert(code.clone(), value);
    }

    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn values(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs
            .iter()
            .map(|(code, v)| (code.to_string(), *v))
            .collect()
    }

    #[test]
    fn codes_land_in_their_panels() {
        let panels = categorize(
            &values(&[("Hb", 9.2), ("WBC", 15.3), ("Glucose", 250.0)]),
            catalog::shared(),
        );
        assert_eq!(panels.len(), 2);
        assert_eq!(panels["Complete Blood Count (CBC)"].len(), 2);
        assert_eq!(panels["Blood Glucose"]["Glucose"], 250.0);
    }

    #[test]
    fn unknown_codes_go_to_other() {
        let panels = categorize(&values(&[("Mystery", 1.0)]), catalog::shared());
        assert_eq!(panels["Other"]["Mystery"], 1.0);
    }

    /// Every input value appears in exactly one panel.
    #[test]
    fn partition_is_complete() {
        let input = values(&[
            ("Hb", 14.0),
            ("Sodium", 141.0),
            ("TSH", 2.1),
            ("Ferritin", 85.0),
            ("Unlisted", 3.0),
        ]);
        let panels = categorize(&input, catalog::shared());
        let total: usize = panels.values().map(BTreeMap::len).sum();
        assert_eq!(total, input.len());
    }

    #[test]
    fn empty_panels_are_absent() {
        let panels = categorize(&values(&[("Hb", 14.0)]), catalog::shared());
        assert!(!panels.contains_key("Lipid Panel"));
        assert!(!panels.contains_key("Other"));
    }
}
