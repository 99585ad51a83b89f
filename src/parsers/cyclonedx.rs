//! CycloneDX component extraction.
//!
//! Only the JSON component-list shape is understood: a top-level object
//! with a `components` array. A document without that array is rejected;
//! inside it, individual entries that cannot be used are skipped and
//! reported as [`MalformedEntry`] values.

use crate::config::DiffOptions;
use crate::error::{ParseErrorKind, Result, SbomDiffError};
use crate::model::{canonical_license, ComponentRecord, IdentityStrategy, LicenseField, UNKNOWN};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// A parsed CycloneDX document, ready for extraction.
#[derive(Debug, Clone)]
pub struct CycloneDxDocument {
    /// `specVersion`, when declared
    pub spec_version: Option<String>,
    /// `serialNumber`, when declared
    pub serial_number: Option<String>,
    /// Name of `metadata.component`, when declared
    pub name: Option<String>,
    entries: Vec<Value>,
}

/// A component entry that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("component #{position}: {reason}")]
pub struct MalformedEntry {
    /// Zero-based position in the `components` array
    pub position: usize,
    pub reason: String,
}

/// All records of a document plus the entries that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<ComponentRecord>,
    pub malformed: Vec<MalformedEntry>,
}

impl Extraction {
    /// Number of entries that were skipped
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.malformed.len()
    }
}

/// Parse a CycloneDX JSON document.
pub fn parse_cyclonedx_str(content: &str) -> Result<CycloneDxDocument> {
    let value: Value = serde_json::from_str(content).map_err(|e| {
        SbomDiffError::parse("CycloneDX JSON", ParseErrorKind::InvalidJson(e.to_string()))
    })?;
    CycloneDxDocument::from_value(value)
}

impl CycloneDxDocument {
    /// Build a document from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut root = match value {
            Value::Object(root) => root,
            other => {
                return Err(SbomDiffError::parse(
                    "document root",
                    ParseErrorKind::NotAnObject(json_type(&other)),
                ));
            }
        };

        let entries = match root.remove("components") {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(SbomDiffError::parse(
                    "components",
                    ParseErrorKind::ComponentsNotArray(json_type(&other)),
                ));
            }
            None => {
                return Err(SbomDiffError::parse(
                    "components",
                    ParseErrorKind::MissingComponents,
                ));
            }
        };

        let header = CdxHeader::deserialize(Value::Object(root)).unwrap_or_default();

        Ok(Self {
            spec_version: header.spec_version,
            serial_number: header.serial_number,
            name: header
                .metadata
                .and_then(|m| m.component)
                .and_then(|c| c.name),
            entries,
        })
    }

    /// Number of raw entries in the `components` array
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Lazily extract records in document order.
    ///
    /// The document is not modified; calling this again starts over.
    pub fn records(&self, options: &DiffOptions) -> Records<'_> {
        Records {
            entries: self.entries.iter().enumerate(),
            identity: options.identity,
        }
    }

    /// Extract every record, collecting skipped entries.
    pub fn extract_all(&self, options: &DiffOptions) -> Extraction {
        let mut extraction = Extraction::default();
        for outcome in self.records(options) {
            match outcome {
                Ok(record) => extraction.records.push(record),
                Err(malformed) => {
                    tracing::debug!("Skipping {malformed}");
                    extraction.malformed.push(malformed);
                }
            }
        }
        extraction
    }
}

/// Iterator over the component records of a [`CycloneDxDocument`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    entries: std::iter::Enumerate<std::slice::Iter<'a, Value>>,
    identity: IdentityStrategy,
}

impl Iterator for Records<'_> {
    type Item = std::result::Result<ComponentRecord, MalformedEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let (position, entry) = self.entries.next()?;
        Some(convert_entry(position, entry, self.identity))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

/// Turn one raw component entry into a record.
fn convert_entry(
    position: usize,
    entry: &Value,
    identity: IdentityStrategy,
) -> std::result::Result<ComponentRecord, MalformedEntry> {
    let malformed = |reason: String| MalformedEntry { position, reason };

    if !entry.is_object() {
        return Err(malformed(format!(
            "expected an object, found {}",
            json_type(entry)
        )));
    }

    let cdx = CdxComponent::deserialize(entry).map_err(|e| malformed(e.to_string()))?;

    let name = cdx
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| malformed("missing component name".to_string()))?;

    let version = cdx
        .version
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN);

    let group = cdx.group.filter(|g| !g.trim().is_empty());
    let purl = cdx.purl.filter(|p| !p.trim().is_empty());
    let license = canonical_license(cdx.licenses.iter().chain(cdx.license.iter()));

    Ok(ComponentRecord {
        identity_key: identity.key_for(name, group.as_deref(), purl.as_deref()),
        name: name.to_string(),
        version: version.to_string(),
        license,
        group,
        purl,
    })
}

/// Human-readable JSON type name for error messages.
const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Deserialize an optional field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

// CycloneDX JSON structures for deserialization.
// Only the fields the comparison needs are modelled.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxHeader {
    #[serde(default, deserialize_with = "lenient")]
    spec_version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    serial_number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    metadata: Option<CdxMetadata>,
}

#[derive(Debug, Deserialize)]
struct CdxMetadata {
    #[serde(default, deserialize_with = "lenient")]
    component: Option<CdxMetadataComponent>,
}

#[derive(Debug, Deserialize)]
struct CdxMetadataComponent {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxComponent {
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    group: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    purl: Option<String>,
    /// CycloneDX `licenses` array
    #[serde(default, deserialize_with = "lenient")]
    licenses: Option<LicenseField>,
    /// Single `license` field used by simplified inventories
    #[serde(default, deserialize_with = "lenient")]
    license: Option<LicenseField>,
}
