//! Diff result structures.

use crate::model::{ComponentRecord, LicenseFamily};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Complete result of comparing two component indices.
///
/// The four collections are disjoint by construction: a key is either added,
/// removed, or present on both sides, and only keys present on both sides
/// can carry a version or license change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct DiffResult {
    /// Summary statistics
    pub summary: DiffSummary,
    /// Components only in the new document, in new-document order
    pub added: Vec<ComponentRecord>,
    /// Components only in the old document, in old-document order
    pub removed: Vec<ComponentRecord>,
    /// Components whose version string differs
    pub version_changes: Vec<VersionChange>,
    /// Components whose canonical license string differs
    pub license_changes: Vec<LicenseChange>,
}

impl DiffResult {
    /// Create a new empty diff result
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute summary counts from the collections and the index sizes.
    pub fn calculate_summary(&mut self, total_old: usize, total_new: usize) {
        self.summary = DiffSummary {
            total_old,
            total_new,
            added: self.added.len(),
            removed: self.removed.len(),
            version_changed: self.version_changes.len(),
            license_changed: self.license_changes.len(),
        };
    }

    /// Check if there are any changes
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.total_changes() > 0
    }

    /// Sort every collection by component name, then identity key.
    pub fn sort_by_name(&mut self) {
        self.added.sort_by(|a, b| by_name(&a.name, &a.identity_key, &b.name, &b.identity_key));
        self.removed.sort_by(|a, b| by_name(&a.name, &a.identity_key, &b.name, &b.identity_key));
        self.version_changes
            .sort_by(|a, b| by_name(&a.name, &a.identity_key, &b.name, &b.identity_key));
        self.license_changes
            .sort_by(|a, b| by_name(&a.name, &a.identity_key, &b.name, &b.identity_key));
    }

    /// A copy with every collection sorted for display.
    pub fn sorted(&self) -> Self {
        let mut sorted = self.clone();
        sorted.sort_by_name();
        sorted
    }

    /// Identity keys of every added component
    pub fn added_keys(&self) -> impl Iterator<Item = &str> {
        self.added.iter().map(|c| c.identity_key.as_str())
    }

    /// Identity keys of every removed component
    pub fn removed_keys(&self) -> impl Iterator<Item = &str> {
        self.removed.iter().map(|c| c.identity_key.as_str())
    }
}

fn by_name(a_name: &str, a_key: &str, b_name: &str, b_key: &str) -> Ordering {
    a_name.cmp(b_name).then_with(|| a_key.cmp(b_key))
}

/// Summary statistics for a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Unique identities in the old document
    pub total_old: usize,
    /// Unique identities in the new document
    pub total_new: usize,
    pub added: usize,
    pub removed: usize,
    pub version_changed: usize,
    pub license_changed: usize,
}

impl DiffSummary {
    /// Signed change in component count, new minus old.
    #[must_use]
    pub fn delta(&self) -> i64 {
        let old = i64::try_from(self.total_old).unwrap_or(i64::MAX);
        let new = i64::try_from(self.total_new).unwrap_or(i64::MAX);
        new - old
    }

    /// Total number of reported changes across all categories
    #[must_use]
    pub const fn total_changes(&self) -> usize {
        self.added + self.removed + self.version_changed + self.license_changed
    }
}

/// A component whose version differs between the two documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChange {
    pub identity_key: String,
    pub name: String,
    pub old: String,
    pub new: String,
    /// Display hint only; classification uses exact string equality
    pub direction: VersionDirection,
}

impl VersionChange {
    pub fn new(old: &ComponentRecord, new: &ComponentRecord) -> Self {
        Self {
            identity_key: new.identity_key.clone(),
            name: new.name.clone(),
            old: old.version.clone(),
            new: new.version.clone(),
            direction: VersionDirection::between(&old.version, &new.version),
        }
    }
}

/// A component whose canonical license differs between the two documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseChange {
    pub identity_key: String,
    pub name: String,
    pub old: String,
    pub new: String,
}

impl LicenseChange {
    pub fn new(old: &ComponentRecord, new: &ComponentRecord) -> Self {
        Self {
            identity_key: new.identity_key.clone(),
            name: new.name.clone(),
            old: old.license.clone(),
            new: new.license.clone(),
        }
    }

    #[must_use]
    pub fn old_family(&self) -> LicenseFamily {
        LicenseFamily::classify(&self.old)
    }

    #[must_use]
    pub fn new_family(&self) -> LicenseFamily {
        LicenseFamily::classify(&self.new)
    }

    /// Whether the change moves to a more restrictive license family.
    #[must_use]
    pub fn is_more_restrictive(&self) -> bool {
        self.new_family().restrictiveness() > self.old_family().restrictiveness()
    }
}

/// Direction of a version change, when both versions are semver-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionDirection {
    Upgrade,
    Downgrade,
    /// Not comparable, or equal once normalized (`1.0` vs `1.0.0`)
    Unordered,
}

impl VersionDirection {
    /// Compare two version strings leniently.
    ///
    /// A leading `v` is ignored and missing minor/patch parts count as zero.
    #[must_use]
    pub fn between(old: &str, new: &str) -> Self {
        match (lenient_semver(old), lenient_semver(new)) {
            (Some(old), Some(new)) => match new.cmp(&old) {
                Ordering::Greater => Self::Upgrade,
                Ordering::Less => Self::Downgrade,
                Ordering::Equal => Self::Unordered,
            },
            _ => Self::Unordered,
        }
    }

    /// Arrow used in text reports
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Upgrade => "↑",
            Self::Downgrade => "↓",
            Self::Unordered => "→",
        }
    }
}

impl fmt::Display for VersionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upgrade => write!(f, "upgrade"),
            Self::Downgrade => write!(f, "downgrade"),
            Self::Unordered => write!(f, "changed"),
        }
    }
}

fn lenient_semver(version: &str) -> Option<semver::Version> {
    let trimmed = version.trim();
    let trimmed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
    if let Ok(parsed) = semver::Version::parse(trimmed) {
        return Some(parsed);
    }

    // Pad "1" and "1.2" out to three numeric parts, keeping any suffix
    let split = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split);
    let parts = core.split('.').count();
    let numeric = core
        .split('.')
        .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    if parts > 2 || !numeric {
        return None;
    }
    let padded = format!("{core}{}{suffix}", ".0".repeat(3 - parts));
    semver::Version::parse(&padded).ok()
}
