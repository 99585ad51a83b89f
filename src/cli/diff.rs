//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two SBOMs.

use crate::config::{DiffConfig, Validatable};
use crate::diff::DiffResult;
use crate::pipeline::{compute_diff, exit_codes, output_report, parse_sbom_with_context};
use anyhow::{bail, Result};

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("invalid configuration: {}", messages.join("; "));
    }

    let old = parse_sbom_with_context(&config.paths.old, &config.options)?;
    let new = parse_sbom_with_context(&config.paths.new, &config.options)?;

    if !config.behavior.quiet {
        tracing::info!(
            "Parsed {} components from old SBOM, {} from new SBOM",
            old.component_count(),
            new.component_count()
        );
    }

    let result = compute_diff(&config, &old, &new);
    let exit_code = determine_exit_code(&config, &result);

    output_report(&config, &result, &old, &new)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on diff results and config flags.
fn determine_exit_code(config: &DiffConfig, result: &DiffResult) -> i32 {
    if config.behavior.fail_on_change && result.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
