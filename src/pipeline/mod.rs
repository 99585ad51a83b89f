//! Pipeline orchestration for a comparison run.
//!
//! parse → index → diff → report, shared by the CLI handlers and usable on
//! its own:
//!
//! ```no_run
//! use sbom_delta::config::DiffConfig;
//! use sbom_delta::pipeline::{compute_diff, output_report, parse_sbom_with_context};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = DiffConfig::builder()
//!     .old_path("before.cdx.json".into())
//!     .new_path("after.cdx.json".into())
//!     .build()?;
//! let old = parse_sbom_with_context(&config.paths.old, &config.options)?;
//! let new = parse_sbom_with_context(&config.paths.new, &config.options)?;
//! let result = compute_diff(&config, &old, &new);
//! output_report(&config, &result, &old, &new)?;
//! # Ok(())
//! # }
//! ```

mod diff_stage;
mod dump;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::compute_diff;
pub use dump::{dump_components, dump_or_warn, NEW_DUMP_FILE, OLD_DUMP_FILE};
pub use output::{write_output, OutputTarget};
pub use parse::{parse_sbom_with_context, ParsedSbom};
pub use report_stage::{output_report, report_config};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success (changes are only a failure with `--fail-on-change`)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected and `--fail-on-change` was given
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}
