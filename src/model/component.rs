//! Component records extracted from an SBOM.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used for a version or license that is absent or unparseable.
pub const UNKNOWN: &str = "unknown";

/// How a component's identity key is derived.
///
/// The identity key is what matches a component across the two documents.
/// It never includes the version, so a version bump shows up as a version
/// change rather than a removal plus an addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityStrategy {
    /// Component name only
    #[default]
    Name,
    /// Versionless package URL, falling back to `group:name`, then name
    Purl,
}

impl fmt::Display for IdentityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Purl => write!(f, "purl"),
        }
    }
}

impl IdentityStrategy {
    /// Derive the identity key for a component.
    ///
    /// `name` must already be trimmed and non-empty.
    #[must_use]
    pub fn key_for(self, name: &str, group: Option<&str>, purl: Option<&str>) -> String {
        match self {
            Self::Name => name.to_string(),
            Self::Purl => {
                if let Some(base) = purl.map(strip_purl_version).filter(|p| !p.is_empty()) {
                    return base;
                }
                match group.filter(|g| !g.is_empty()) {
                    Some(group) => format!("{group}:{name}"),
                    None => name.to_string(),
                }
            }
        }
    }
}

/// Remove the `@version` segment of a package URL, keeping qualifiers and subpath.
///
/// `pkg:npm/lodash@4.17.21?arch=x64` becomes `pkg:npm/lodash?arch=x64`.
/// Only an `@` inside the last path segment counts, so a literal npm scope
/// (`pkg:npm/@angular/core`) survives.
#[must_use]
pub fn strip_purl_version(purl: &str) -> String {
    let end = purl.find(['?', '#']).unwrap_or(purl.len());
    let (head, tail) = purl.split_at(end);
    let name_start = head.rfind('/').map_or(0, |i| i + 1);
    match head[name_start..].find('@') {
        Some(at) => format!("{}{tail}", &head[..name_start + at]),
        None => purl.to_string(),
    }
}

/// A single component as seen by the comparison engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Component name (trimmed, never empty)
    pub name: String,
    /// Version string, or [`UNKNOWN`]
    pub version: String,
    /// Canonical license string, or [`UNKNOWN`]
    pub license: String,
    /// Key used to match this component across documents
    pub identity_key: String,
    /// CycloneDX group / namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Package URL as declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
}

impl ComponentRecord {
    /// Create a record keyed by name, with unknown version and license.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            identity_key: name.clone(),
            name,
            version: UNKNOWN.to_string(),
            license: UNKNOWN.to_string(),
            group: None,
            purl: None,
        }
    }

    /// Set the version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the canonical license
    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = license.into();
        self
    }
}

impl fmt::Display for ComponentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.license)
    }
}
