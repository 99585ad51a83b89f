//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::config::DiffOptions;
use crate::diff::{DiffResult, DiffSummary, LicenseChange, VersionChange};
use crate::model::{ComponentRecord, LicenseFamily};
use serde::Serialize;

/// JSON report generator
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let result = result.sorted();
        let meta = &config.metadata;

        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: &meta.tool_version,
                },
                generated_at: meta.generated_at.map(|at| at.to_rfc3339()),
                old_sbom: SbomInfo {
                    file: meta.old_sbom_path.as_deref(),
                    name: meta.old_sbom_name.as_deref(),
                    spec_version: meta.old_spec_version.as_deref(),
                    serial_number: meta.old_serial_number.as_deref(),
                },
                new_sbom: SbomInfo {
                    file: meta.new_sbom_path.as_deref(),
                    name: meta.new_sbom_name.as_deref(),
                    spec_version: meta.new_spec_version.as_deref(),
                    serial_number: meta.new_serial_number.as_deref(),
                },
                options: config.options,
            },
            summary: result.summary,
            added: &result.added,
            removed: &result.removed,
            version_changes: (!config.options.ignore_version).then_some(&result.version_changes),
            license_changes: result
                .license_changes
                .iter()
                .map(JsonLicenseChange::from)
                .collect(),
        };

        serde_json::to_string_pretty(&report)
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata<'a>,
    summary: DiffSummary,
    added: &'a [ComponentRecord],
    removed: &'a [ComponentRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    version_changes: Option<&'a Vec<VersionChange>>,
    license_changes: Vec<JsonLicenseChange<'a>>,
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<String>,
    old_sbom: SbomInfo<'a>,
    new_sbom: SbomInfo<'a>,
    options: DiffOptions,
}

#[derive(Serialize)]
struct ToolInfo<'a> {
    name: &'static str,
    version: &'a str,
}

#[derive(Serialize)]
struct SbomInfo<'a> {
    file: Option<&'a str>,
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spec_version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    serial_number: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonLicenseChange<'a> {
    #[serde(flatten)]
    change: &'a LicenseChange,
    old_family: LicenseFamily,
    new_family: LicenseFamily,
}

impl<'a> From<&'a LicenseChange> for JsonLicenseChange<'a> {
    fn from(change: &'a LicenseChange) -> Self {
        Self {
            change,
            old_family: change.old_family(),
            new_family: change.new_family(),
        }
    }
}
