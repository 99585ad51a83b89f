//! Trait definitions for diff computation strategies.
//!
//! Each category of change is computed by its own [`ChangeComputer`], so
//! categories can be enabled, skipped or tested independently.

use crate::model::{ComponentIndex, ComponentRecord};

/// Trait for computing a specific type of change between two indices.
pub trait ChangeComputer: Send + Sync {
    /// The type of changes this computer produces.
    type ChangeSet;

    /// Compute changes between the old and new index.
    fn compute(&self, old: &ComponentIndex, new: &ComponentIndex) -> Self::ChangeSet;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}

/// Container for membership changes (added, removed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipChangeSet {
    pub added: Vec<ComponentRecord>,
    pub removed: Vec<ComponentRecord>,
}

impl MembershipChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// `(old, new)` record pairs sharing an identity key, in new-index order.
pub fn matched_pairs<'a>(
    old: &'a ComponentIndex,
    new: &'a ComponentIndex,
) -> impl Iterator<Item = (&'a ComponentRecord, &'a ComponentRecord)> + 'a {
    new.records()
        .filter_map(move |n| old.get(&n.identity_key).map(|o| (o, n)))
}
