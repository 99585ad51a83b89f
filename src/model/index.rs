//! Identity index over the components of one document.
//!
//! `ComponentIndex` maps identity keys to records. It is built once per
//! document and read-only afterwards.
//!
//! # Example
//!
//! ```
//! use sbom_delta::model::{ComponentIndex, ComponentRecord};
//!
//! let index = ComponentIndex::build([
//!     ComponentRecord::new("libfoo").with_version("1.0"),
//!     ComponentRecord::new("libbar").with_version("2.0"),
//!     ComponentRecord::new("libfoo").with_version("1.1"),
//! ]);
//!
//! // Later duplicates win, earlier position is kept
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.get("libfoo").map(|c| c.version.as_str()), Some("1.1"));
//! assert_eq!(index.keys().next(), Some("libfoo"));
//! assert_eq!(index.duplicates(), 1);
//! ```

use super::ComponentRecord;
use indexmap::IndexMap;

/// Mapping from identity key to component record for one document.
///
/// Iteration follows the order in which each key first appeared.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ComponentIndex {
    by_key: IndexMap<String, ComponentRecord>,
    duplicates: usize,
}

impl ComponentIndex {
    /// Build an index, applying last-write-wins to duplicate identity keys.
    pub fn build(records: impl IntoIterator<Item = ComponentRecord>) -> Self {
        let mut by_key = IndexMap::new();
        let mut duplicates = 0;

        for record in records {
            // IndexMap::insert keeps the slot of an existing key and swaps the value
            if let Some(previous) = by_key.insert(record.identity_key.clone(), record) {
                duplicates += 1;
                tracing::debug!(
                    "Duplicate identity '{}': replacing version {} with a later entry",
                    previous.identity_key,
                    previous.version
                );
            }
        }

        Self { by_key, duplicates }
    }

    /// Look up a record by identity key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ComponentRecord> {
        self.by_key.get(key)
    }

    /// Whether a key is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Number of unique identities
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Number of entries that were overwritten by a later duplicate
    #[must_use]
    pub const fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Identity keys in first-appearance order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    /// Records in first-appearance order
    pub fn records(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.by_key.values()
    }
}

impl FromIterator<ComponentRecord> for ComponentIndex {
    fn from_iter<I: IntoIterator<Item = ComponentRecord>>(iter: I) -> Self {
        Self::build(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = ComponentIndex::build(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.duplicates(), 0);
    }

    #[test]
    fn test_last_write_wins() {
        let index: ComponentIndex = vec![
            ComponentRecord::new("libfoo").with_version("1.0").with_license("MIT"),
            ComponentRecord::new("libfoo").with_version("2.0").with_license("BSD-2-Clause"),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.len(), 1);
        let rec = index.get("libfoo").expect("libfoo indexed");
        assert_eq!(rec.version, "2.0");
        assert_eq!(rec.license, "BSD-2-Clause");
        assert_eq!(index.duplicates(), 1);
    }

    #[test]
    fn test_first_appearance_order() {
        let index = ComponentIndex::build(vec![
            ComponentRecord::new("b"),
            ComponentRecord::new("a"),
            ComponentRecord::new("b"),
            ComponentRecord::new("c"),
        ]);
        let keys: Vec<_> = index.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert!(index.contains("c"));
        assert!(!index.contains("d"));
    }
}
