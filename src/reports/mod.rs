//! Report generation for diff results.
//!
//! Two output formats are available:
//! - Markdown: the human-readable delta report (default)
//! - JSON: structured data for programmatic integration
//!
//! Reporters only turn a [`DiffResult`] into text. Choosing between stdout
//! and a file is up to the caller (see [`crate::pipeline`]).
//!
//! # Security
//!
//! Component names, versions and licenses are escaped with
//! [`escape::escape_markdown_inline`] before they are embedded in Markdown.

pub mod escape;
mod json;
mod markdown;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::diff::DiffResult;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from diff results
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_diff_report(result, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
