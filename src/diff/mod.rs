//! Component-level diff of two SBOMs.
//!
//! # Architecture
//!
//! - [`ChangeComputer`](traits::ChangeComputer): one implementation per
//!   change category, in the [`changes`] module
//! - [`DiffEngine`]: runs the computers the options call for and assembles
//!   a [`DiffResult`]
//!
//! # Example
//!
//! ```
//! use sbom_delta::config::DiffOptions;
//! use sbom_delta::diff::DiffEngine;
//! use sbom_delta::model::{ComponentIndex, ComponentRecord};
//!
//! let old = ComponentIndex::build([ComponentRecord::new("libfoo").with_version("1.0")]);
//! let new = ComponentIndex::build([ComponentRecord::new("libfoo").with_version("1.1")]);
//!
//! let result = DiffEngine::new(&DiffOptions::default()).diff(&old, &new);
//! assert_eq!(result.summary.version_changed, 1);
//! assert!(result.added.is_empty());
//! ```

pub mod changes;
mod engine;
mod result;
pub mod traits;

pub use engine::DiffEngine;
pub use result::{
    DiffResult, DiffSummary, LicenseChange, VersionChange, VersionDirection,
};
pub use traits::{ChangeComputer, MembershipChangeSet};
