//! Version change computer.

use crate::diff::traits::{matched_pairs, ChangeComputer};
use crate::diff::VersionChange;
use crate::model::ComponentIndex;

/// Compares version strings of components present on both sides.
///
/// Versions are compared as exact strings: `1.0` and `1.0.0` differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionChangeComputer;

impl VersionChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ChangeComputer for VersionChangeComputer {
    type ChangeSet = Vec<VersionChange>;

    fn compute(&self, old: &ComponentIndex, new: &ComponentIndex) -> Vec<VersionChange> {
        matched_pairs(old, new)
            .filter(|(o, n)| o.version != n.version)
            .map(|(o, n)| VersionChange::new(o, n))
            .collect()
    }

    fn name(&self) -> &'static str {
        "VersionChangeComputer"
    }
}
