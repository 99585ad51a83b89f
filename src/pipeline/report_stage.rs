//! Report output stage.

use super::{write_output, OutputTarget, ParsedSbom};
use crate::config::DiffConfig;
use crate::diff::DiffResult;
use crate::reports::{create_reporter, ReportConfig, ReportMetadata};
use anyhow::Result;

/// Build the report configuration for one run.
#[must_use]
pub fn report_config(config: &DiffConfig, old: &ParsedSbom, new: &ParsedSbom) -> ReportConfig {
    let mut metadata = ReportMetadata {
        old_sbom_path: Some(old.file_name()),
        new_sbom_path: Some(new.file_name()),
        old_sbom_name: old.document.name.clone(),
        new_sbom_name: new.document.name.clone(),
        old_spec_version: old.document.spec_version.clone(),
        new_spec_version: new.document.spec_version.clone(),
        old_serial_number: old.document.serial_number.clone(),
        new_serial_number: new.document.serial_number.clone(),
        ..ReportMetadata::new()
    };
    if config.output.timestamp {
        metadata = metadata.generated_now();
    }
    ReportConfig::new(config.options).with_metadata(metadata)
}

/// Render the report and write it to the configured destination.
///
/// The report is rendered completely before anything is written.
pub fn output_report(
    config: &DiffConfig,
    result: &DiffResult,
    old: &ParsedSbom,
    new: &ParsedSbom,
) -> Result<()> {
    let reporter = create_reporter(config.output.format);
    let report = reporter.generate_diff_report(result, &report_config(config, old, new))?;

    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&report, &target, config.behavior.quiet)
}
