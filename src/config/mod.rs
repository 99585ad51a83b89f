//! Configuration for sbom-delta.
//!
//! A run is described by a [`DiffConfig`]. Its defaults can come from a
//! YAML file ([`AppConfig`]) and are overridden by command-line flags:
//!
//! ```
//! use sbom_delta::config::{AppConfig, DiffConfigBuilder, Validatable};
//!
//! let file_defaults = AppConfig::default();
//! let config = DiffConfigBuilder::from_app_config(&file_defaults)
//!     .old_path("before.cdx.json".into())
//!     .new_path("after.cdx.json".into())
//!     .license_focus(true)
//!     .build()
//!     .unwrap();
//! assert!(config.is_valid());
//! ```
//!
//! # Configuration File
//!
//! Place a `.sbom-delta.yaml` file in your project root or `~/.config/sbom-delta/`:
//!
//! ```yaml
//! options:
//!   ignore_version: false
//!   license_focus: true
//!   identity: name
//! output:
//!   format: markdown
//!   timestamp: true
//! debug:
//!   dump_dir: ./sbom-dumps
//! behavior:
//!   fail_on_change: false
//! ```

pub mod file;
mod types;
mod validation;

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError, DEFAULT_CONFIG_FILE_NAME,
};
pub use types::{
    AppConfig, BehaviorConfig, DebugConfig, DebugLevel, DiffConfig, DiffConfigBuilder, DiffOptions,
    DiffPaths, OutputConfig,
};
pub use validation::{ConfigError, Validatable};
