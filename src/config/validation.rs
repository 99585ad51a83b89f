//! Configuration validation for sbom-delta.

use super::types::{DiffConfig, OutputConfig};
use std::path::Path;
use thiserror::Error;

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (field, path) in [("paths.old", &self.paths.old), ("paths.new", &self.paths.new)] {
            if path.as_os_str().is_empty() {
                errors.push(ConfigError::new(field, "path must not be empty"));
            }
        }

        if let Some(ref file) = self.output.file {
            for input in [&self.paths.old, &self.paths.new] {
                if same_file(file, input) {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("report would overwrite input {}", input.display()),
                    ));
                }
            }
        }

        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if file_path.as_os_str().is_empty() {
                errors.push(ConfigError::new("output.file", "path must not be empty"));
            } else if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

/// Compare two paths, resolving them when both exist.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
