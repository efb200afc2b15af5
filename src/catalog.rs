use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

const CATALOG_JSON: &str = include_str!("../resources/test_catalog.json");
const ALIASES_JSON: &str = include_str!("../resources/test_aliases.json");
const CATEGORIES_JSON: &str = include_str!("../resources/categories.json");

// ---------------------------------------------------------------------------
// Catalog data types
// ---------------------------------------------------------------------------

/// Normal range for a test, with the unit the bounds are expressed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
    pub unit: String,
}

/// One catalog row: canonical code, display name, clinical panel,
/// and (where established) a normal range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub code: String,
    pub name: String,
    pub category: String,
    pub range: Option<ReferenceRange>,
}

/// Alternate textual forms for a code, most common first.
/// Alias order is a matching-priority hint, not a correctness requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasEntry {
    pub code: String,
    pub aliases: Vec<String>,
}

/// Patient-facing description of a clinical panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// ReferenceCatalog
// ---------------------------------------------------------------------------

/// The loaded reference catalog. Parsed once from embedded JSON at first use
/// and shared read-only for the process lifetime.
pub struct ReferenceCatalog {
    entries: Vec<ReferenceEntry>,
    aliases: Vec<AliasEntry>,
    categories: Vec<CategoryEntry>,
    by_code: BTreeMap<String, usize>,
}

impl ReferenceCatalog {
    fn from_embedded() -> Result<Self, serde_json::Error> {
        let entries: Vec<ReferenceEntry> = serde_json::from_str(CATALOG_JSON)?;
        let aliases: Vec<AliasEntry> = serde_json::from_str(ALIASES_JSON)?;
        let categories: Vec<CategoryEntry> = serde_json::from_str(CATEGORIES_JSON)?;

        let by_code = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.code.clone(), i))
            .collect();

        Ok(Self {
            entries,
            aliases,
            categories,
            by_code,
        })
    }

    /// All catalog rows, in catalog order.
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// All alias rows, in matching-priority order.
    pub fn alias_entries(&self) -> &[AliasEntry] {
        &self.aliases
    }

    /// Look up a catalog row by canonical code.
    pub fn get(&self, code: &str) -> Option<&ReferenceEntry> {
        self.by_code.get(code).map(|&i| &self.entries[i])
    }

    /// Normal range for a code, if one is established.
    pub fn range(&self, code: &str) -> Option<&ReferenceRange> {
        self.get(code).and_then(|e| e.range.as_ref())
    }

    /// Display name for a code; falls back to the code itself when the code
    /// is not in the catalog (tolerated "unclassified" extras).
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).map_or(code, |e| e.name.as_str())
    }

    /// Patient-facing description for a clinical panel name.
    pub fn category_description(&self, name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.description.as_str())
    }
}

static SHARED: LazyLock<ReferenceCatalog> = LazyLock::new(|| {
    ReferenceCatalog::from_embedded().expect("embedded reference data is valid JSON")
});

/// Process-wide shared catalog.
pub fn shared() -> &'static ReferenceCatalog {
    &SHARED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_parses_and_resolves_core_codes() {
        let catalog = shared();
        for code in ["Hb", "WBC", "RBC", "Glucose", "TSH", "Ferritin"] {
            assert!(catalog.get(code).is_some(), "missing catalog entry: {code}");
        }
    }

    #[test]
    fn hemoglobin_range() {
        let range = shared().range("Hb").unwrap();
        assert_eq!(range.low, 13.5);
        assert_eq!(range.high, 17.5);
        assert_eq!(range.unit, "g/dL");
    }

    #[test]
    fn display_name_falls_back_to_code() {
        let catalog = shared();
        assert_eq!(catalog.display_name("Hb"), "Hemoglobin");
        assert_eq!(catalog.display_name("XYZ-unknown"), "XYZ-unknown");
    }

    /// Every alias row must point at a real catalog entry.
    #[test]
    fn alias_codes_resolve_in_catalog() {
        let catalog = shared();
        for alias_entry in catalog.alias_entries() {
            assert!(
                catalog.get(&alias_entry.code).is_some(),
                "alias row references unknown code: {}",
                alias_entry.code
            );
            assert!(!alias_entry.aliases.is_empty());
        }
    }

    /// Every catalog category must have a description row.
    #[test]
    fn categories_have_descriptions() {
        let catalog = shared();
        for entry in catalog.entries() {
            assert!(
                catalog.category_description(&entry.category).is_some(),
                "category without description: {}",
                entry.category
            );
        }
    }

    #[test]
    fn ranges_are_well_formed() {
        for entry in shared().entries() {
            if let Some(range) = &entry.range {
                assert!(
                    range.low <= range.high,
                    "inverted range for {}: {} > {}",
                    entry.code,
                    range.low,
                    range.high
                );
            }
        }
    }
}
