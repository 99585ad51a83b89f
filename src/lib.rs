//! **Component-level delta reports between two `CycloneDX` SBOMs.**
//!
//! `sbom-delta` reads an "old" and a "new" `CycloneDX` JSON document, reduces
//! each to a flat list of component records, indexes them by identity and
//! reports what was added, removed, re-versioned or re-licensed.
//!
//! ## Modules
//!
//! - **[`parsers`]**: reads a `CycloneDX` document and extracts [`ComponentRecord`]s.
//! - **[`model`]**: component records, license normalization and the
//!   [`ComponentIndex`] keyed by identity.
//! - **[`diff`]**: the [`DiffEngine`] producing a [`DiffResult`].
//! - **[`reports`]**: Markdown and JSON renderers.
//! - **[`pipeline`]**: parse → diff → report stages plus deep-debug dumps.
//! - **[`config`]**: run configuration, YAML config file and validation.
//!
//! ## Diffing two documents
//!
//! ```
//! use sbom_delta::config::DiffOptions;
//! use sbom_delta::parsers::parse_cyclonedx_str;
//! use sbom_delta::{ComponentIndex, DiffEngine};
//!
//! let options = DiffOptions::default();
//! let old = parse_cyclonedx_str(r#"{"components": [{"name": "openssl", "version": "3.0.1"}]}"#)?;
//! let new = parse_cyclonedx_str(r#"{"components": [{"name": "openssl", "version": "3.0.2"}]}"#)?;
//!
//! let old_index: ComponentIndex = old.records(&options).flatten().collect();
//! let new_index: ComponentIndex = new.records(&options).flatten().collect();
//! let result = DiffEngine::new(&options).diff(&old_index, &new_index);
//!
//! assert_eq!(result.version_changes.len(), 1);
//! assert_eq!(result.version_changes[0].new, "3.0.2");
//! # Ok::<(), sbom_delta::SbomDiffError>(())
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, BehaviorConfig, DiffConfig, DiffOptions, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use diff::{DiffEngine, DiffResult, DiffSummary};
pub use error::{ErrorContext, OptionContext, Result, SbomDiffError};
pub use model::{ComponentIndex, ComponentRecord, IdentityStrategy};
pub use parsers::{parse_cyclonedx_file, parse_cyclonedx_str, CycloneDxDocument};
pub use reports::{ReportFormat, ReportGenerator};
