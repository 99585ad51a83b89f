//! License change computer implementation.

use crate::diff::traits::{matched_pairs, ChangeComputer};
use crate::diff::LicenseChange;
use crate::model::ComponentIndex;

/// Compares canonical license strings of components present on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct LicenseChangeComputer;

impl LicenseChangeComputer {
    /// Create a new license change computer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ChangeComputer for LicenseChangeComputer {
    type ChangeSet = Vec<LicenseChange>;

    fn compute(&self, old: &ComponentIndex, new: &ComponentIndex) -> Vec<LicenseChange> {
        matched_pairs(old, new)
            .filter(|(o, n)| o.license != n.license)
            .map(|(o, n)| LicenseChange::new(o, n))
            .collect()
    }

    fn name(&self) -> &'static str {
        "LicenseChangeComputer"
    }
}
