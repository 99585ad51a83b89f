//! Diff engine implementation.

use super::changes::{LicenseChangeComputer, MembershipChangeComputer, VersionChangeComputer};
use super::traits::ChangeComputer;
use super::DiffResult;
use crate::config::DiffOptions;
use crate::model::ComponentIndex;

/// Compares two component indices.
///
/// The engine is stateless apart from its options and can be reused for
/// any number of comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Create a diff engine for the given options
    #[must_use]
    pub fn new(options: &DiffOptions) -> Self {
        Self { options: *options }
    }

    /// Compare two indices and return the classified changes.
    pub fn diff(&self, old: &ComponentIndex, new: &ComponentIndex) -> DiffResult {
        let mut result = DiffResult::new();

        let membership = MembershipChangeComputer::new();
        let changes = membership.compute(old, new);
        tracing::debug!(
            "{}: {} added, {} removed",
            membership.name(),
            changes.added.len(),
            changes.removed.len()
        );
        result.added = changes.added;
        result.removed = changes.removed;

        if self.options.ignore_version {
            tracing::debug!("Version comparison disabled");
        } else {
            let versions = VersionChangeComputer::new();
            result.version_changes = versions.compute(old, new);
            tracing::debug!(
                "{}: {} changes",
                versions.name(),
                result.version_changes.len()
            );
        }

        let licenses = LicenseChangeComputer::new();
        result.license_changes = licenses.compute(old, new);
        tracing::debug!(
            "{}: {} changes",
            licenses.name(),
            result.license_changes.len()
        );

        result.calculate_summary(old.len(), new.len());
        result
    }
}
