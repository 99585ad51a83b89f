//! Unified error types for sbom-delta.
//!
//! Every fatal condition of a comparison run maps onto one variant of
//! [`SbomDiffError`]. Problems with individual component entries are not
//! errors: they are collected as [`MalformedEntry`](crate::parsers::MalformedEntry)
//! values and the entry is skipped.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for sbom-delta operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SbomDiffError {
    /// An input document does not exist
    #[error("SBOM file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// An input document is not the expected CycloneDX component-list shape
    #[error("Malformed SBOM document: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// The report or a dump file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors with context
    #[error("IO error{}: {message}", at_path(path.as_deref()))]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Reasons a document is rejected as malformed
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Document root must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("Missing top-level \"components\" collection")]
    MissingComponents,

    #[error("Top-level \"components\" must be an array, found {0}")]
    ComponentsNotArray(&'static str),

    #[error("File is {size_mb} MB, exceeding the {limit_mb} MB limit")]
    TooLarge { size_mb: u64, limit_mb: u64 },
}

fn at_path(path: Option<&Path>) -> String {
    path.map(|p| format!(" at {}", p.display())).unwrap_or_default()
}

/// Convenient Result type for sbom-delta operations
pub type Result<T> = std::result::Result<T, SbomDiffError>;

impl SbomDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an error for a missing input file
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an IO error with path context.
    ///
    /// A `NotFound` error is promoted to [`SbomDiffError::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::FileNotFound { path };
        }
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create an output write error
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The file this error concerns, when known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FileNotFound { path } | Self::OutputWrite { path, .. } => Some(path),
            Self::Io { path, .. } => path.as_deref(),
            Self::Parse { .. } | Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for SbomDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SbomDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to whatever context the error already
/// carries, so a chain reads outermost first:
///
/// ```
/// use sbom_delta::error::{ErrorContext, ParseErrorKind, Result, SbomDiffError};
///
/// let err: Result<()> = Err(SbomDiffError::parse(
///     "components",
///     ParseErrorKind::MissingComponents,
/// ));
/// let err = err.context("old.cdx.json").unwrap_err();
/// assert!(err.to_string().contains("old.cdx.json: components"));
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SbomDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// Variants that already identify their file by path are left untouched.
fn add_context_to_error(err: SbomDiffError, new_ctx: &str) -> SbomDiffError {
    match err {
        SbomDiffError::Parse {
            context: existing,
            source,
        } => SbomDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SbomDiffError::Io {
            path,
            message,
            source,
        } => SbomDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SbomDiffError::Config(msg) => SbomDiffError::Config(chain_context(new_ctx, &msg)),
        other @ (SbomDiffError::FileNotFound { .. } | SbomDiffError::OutputWrite { .. }) => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to a configuration error with the given message.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| SbomDiffError::Config(context.into()))
    }
}
