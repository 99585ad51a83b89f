//! Report types and configuration.

use crate::config::DiffOptions;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Markdown-flavoured text for people
    #[default]
    #[value(alias = "md", alias = "text")]
    Markdown,
    /// Structured JSON for tooling
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Rendering flags (`ignore_version`, `license_focus`)
    pub options: DiffOptions,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    #[must_use]
    pub fn new(options: DiffOptions) -> Self {
        Self {
            title: None,
            options,
            metadata: ReportMetadata::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: ReportMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Title, or the default one
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("SBOM Comparison Report")
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Old SBOM file name
    pub old_sbom_path: Option<String>,
    /// New SBOM file name
    pub new_sbom_path: Option<String>,
    /// `metadata.component.name` of the old document
    pub old_sbom_name: Option<String>,
    /// `metadata.component.name` of the new document
    pub new_sbom_name: Option<String>,
    /// `specVersion` of the old document
    pub old_spec_version: Option<String>,
    /// `specVersion` of the new document
    pub new_spec_version: Option<String>,
    /// `serialNumber` of the old document
    pub old_serial_number: Option<String>,
    /// `serialNumber` of the new document
    pub new_serial_number: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp; omitted from the report when `None`
    pub generated_at: Option<DateTime<Utc>>,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }

    /// Stamp the metadata with the current time.
    #[must_use]
    pub fn generated_now(mut self) -> Self {
        self.generated_at = Some(Utc::now());
        self
    }
}
