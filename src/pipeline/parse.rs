//! SBOM parsing stage.

use crate::config::DiffOptions;
use crate::parsers::{parse_cyclonedx_file, CycloneDxDocument, Extraction};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// A parsed SBOM together with its extracted component records
#[derive(Debug)]
pub struct ParsedSbom {
    /// Where the document was read from
    pub path: PathBuf,
    /// Document-level metadata and raw component entries
    pub document: CycloneDxDocument,
    /// Extracted records in document order, plus skipped entries
    pub extraction: Extraction,
}

impl ParsedSbom {
    /// File name used to label this document in reports
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// Number of usable component records
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.extraction.records.len()
    }
}

/// Read, parse and extract one SBOM.
///
/// Errors already name the offending file, so no further context is added.
pub fn parse_sbom_with_context(path: &Path, options: &DiffOptions) -> Result<ParsedSbom> {
    tracing::info!("Parsing SBOM: {}", path.display());

    let document = parse_cyclonedx_file(path)?;
    let extraction = document.extract_all(options);

    if extraction.skipped() > 0 {
        tracing::debug!(
            "{}: skipped {} of {} component entries",
            path.display(),
            extraction.skipped(),
            document.entry_count()
        );
    }
    tracing::info!(
        "Parsed {} components from {}",
        extraction.records.len(),
        path.display()
    );

    Ok(ParsedSbom {
        path: path.to_path_buf(),
        document,
        extraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counts_and_label() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("before.cdx.json");
        std::fs::write(
            &path,
            r#"{"components": [{"name": "a"}, {"version": "1"}, {"name": "b"}]}"#,
        )
        .expect("write fixture");

        let parsed = parse_sbom_with_context(&path, &DiffOptions::default()).expect("parse");
        assert_eq!(parsed.component_count(), 2);
        assert_eq!(parsed.extraction.skipped(), 1);
        assert_eq!(parsed.file_name(), "before.cdx.json");
    }

    #[test]
    fn test_missing_file_message_names_path() {
        let err = parse_sbom_with_context(Path::new("/nonexistent/a.json"), &DiffOptions::default())
            .expect_err("missing");
        assert!(format!("{err:#}").contains("/nonexistent/a.json"));
    }
}
