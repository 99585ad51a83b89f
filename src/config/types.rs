//! Configuration types for sbom-delta operations.

use crate::error::{OptionContext, Result};
use crate::model::IdentityStrategy;
use crate::reports::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// File-loadable Application Configuration
// ============================================================================

/// Settings that can be stored in a `.sbom-delta.yaml` file.
///
/// Every field has a default, so a partial file is valid. Command-line flags
/// are applied on top through [`DiffConfigBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Comparison options
    pub options: DiffOptions,
    /// Report output
    pub output: OutputConfig,
    /// Debug dumps
    pub debug: DebugConfig,
    /// Exit-code and verbosity behavior
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Options that change what counts as a difference and how it is shown.
///
/// Passed explicitly to the extractor, the differ and the renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Skip version comparison entirely
    pub ignore_version: bool,
    /// Move license changes directly after the summary
    pub license_focus: bool,
    /// How component identity keys are derived
    pub identity: IdentityStrategy,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Include a generation timestamp in the report header
    pub timestamp: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Markdown,
            file: None,
            timestamp: true,
        }
    }
}

/// Diagnostic verbosity of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLevel {
    #[default]
    Off,
    /// Verbose logging
    Debug,
    /// Verbose logging plus component dumps
    Deep,
}

impl DebugLevel {
    /// Whether debug logging is on
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self >= Self::Debug
    }

    /// Whether component dumps are written
    #[must_use]
    pub fn dumps_components(self) -> bool {
        self == Self::Deep
    }
}

/// Debug dump configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Requested verbosity
    pub level: DebugLevel,
    /// Directory for `old_components.txt` / `new_components.txt`
    /// (current directory when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dump_dir: Option<PathBuf>,
}

impl DebugConfig {
    /// Directory the dump files go to.
    #[must_use]
    pub fn dump_directory(&self) -> PathBuf {
        self.dump_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Behavior flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 when any change is detected
    pub fail_on_change: bool,
    /// Only log warnings and errors
    pub quiet: bool,
}

// ============================================================================
// Command Configuration
// ============================================================================

/// Effective configuration of one `diff` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// Comparison options
    pub options: DiffOptions,
    /// Output configuration
    pub output: OutputConfig,
    /// Debug configuration
    pub debug: DebugConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl DiffConfig {
    pub fn builder() -> DiffConfigBuilder {
        DiffConfigBuilder::new()
    }
}

/// Paths for diff operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPaths {
    /// Path to the "before" SBOM
    pub old: PathBuf,
    /// Path to the "after" SBOM
    pub new: PathBuf,
}

// ============================================================================
// Builder for DiffConfig
// ============================================================================

/// Builder for `DiffConfig`.
///
/// Start from [`DiffConfigBuilder::from_app_config`] to layer flags over a
/// config file.
#[derive(Debug, Default)]
#[must_use]
pub struct DiffConfigBuilder {
    old: Option<PathBuf>,
    new: Option<PathBuf>,
    options: DiffOptions,
    output: OutputConfig,
    debug: DebugConfig,
    behavior: BehaviorConfig,
}

impl DiffConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the builder with file-level defaults.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            old: None,
            new: None,
            options: config.options,
            output: config.output.clone(),
            debug: config.debug.clone(),
            behavior: config.behavior,
        }
    }

    pub fn old_path(mut self, path: PathBuf) -> Self {
        self.old = Some(path);
        self
    }

    pub fn new_path(mut self, path: PathBuf) -> Self {
        self.new = Some(path);
        self
    }

    pub const fn ignore_version(mut self, ignore: bool) -> Self {
        self.options.ignore_version = ignore;
        self
    }

    pub const fn license_focus(mut self, focus: bool) -> Self {
        self.options.license_focus = focus;
        self
    }

    pub const fn identity(mut self, identity: IdentityStrategy) -> Self {
        self.options.identity = identity;
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.output.file = file;
        self
    }

    pub const fn timestamp(mut self, timestamp: bool) -> Self {
        self.output.timestamp = timestamp;
        self
    }

    pub const fn debug_level(mut self, level: DebugLevel) -> Self {
        self.debug.level = level;
        self
    }

    pub fn dump_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.debug.dump_dir = dir;
        self
    }

    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.behavior.fail_on_change = fail;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.behavior.quiet = quiet;
        self
    }

    /// Finish the configuration. Both paths are required.
    pub fn build(self) -> Result<DiffConfig> {
        let old = self.old.context_none("old SBOM path is required")?;
        let new = self.new.context_none("new SBOM path is required")?;

        Ok(DiffConfig {
            paths: DiffPaths { old, new },
            options: self.options,
            output: self.output,
            debug: self.debug,
            behavior: self.behavior,
        })
    }
}
