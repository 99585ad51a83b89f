//! SBOM document parsing and component extraction.
//!
//! ## Usage
//!
//! ```no_run
//! use sbom_delta::config::DiffOptions;
//! use sbom_delta::parsers::parse_cyclonedx_file;
//! use std::path::Path;
//!
//! let doc = parse_cyclonedx_file(Path::new("sbom.cdx.json")).unwrap();
//! let extraction = doc.extract_all(&DiffOptions::default());
//! println!("{} components, {} skipped", extraction.records.len(), extraction.skipped());
//! ```

mod cyclonedx;

pub use cyclonedx::{
    parse_cyclonedx_str, CycloneDxDocument, Extraction, MalformedEntry, Records,
};

use crate::error::{ErrorContext, ParseErrorKind, Result, SbomDiffError};
use std::path::Path;

/// Maximum SBOM file size (512 MB).
const MAX_SBOM_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Read and parse a CycloneDX JSON file.
///
/// The file is read into memory and closed before parsing starts. Parse
/// errors carry the file path as context.
pub fn parse_cyclonedx_file(path: &Path) -> Result<CycloneDxDocument> {
    let metadata = std::fs::metadata(path).map_err(|e| SbomDiffError::io(path, e))?;
    if metadata.len() > MAX_SBOM_FILE_SIZE {
        return Err(SbomDiffError::parse(
            path.display().to_string(),
            ParseErrorKind::TooLarge {
                size_mb: metadata.len() / (1024 * 1024),
                limit_mb: MAX_SBOM_FILE_SIZE / (1024 * 1024),
            },
        ));
    }

    let bytes = std::fs::read(path).map_err(|e| SbomDiffError::io(path, e))?;
    let content = String::from_utf8(bytes).map_err(|e| {
        SbomDiffError::parse(
            path.display().to_string(),
            ParseErrorKind::InvalidJson(format!("not valid UTF-8: {}", e.utf8_error())),
        )
    })?;
    parse_cyclonedx_str(&content).with_context(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_file_not_found() {
        let err = parse_cyclonedx_file(Path::new("/nonexistent/old.cdx.json"))
            .expect_err("missing file");
        assert!(matches!(err, SbomDiffError::FileNotFound { .. }));
        assert!(err.to_string().contains("/nonexistent/old.cdx.json"));
    }

    #[test]
    fn test_invalid_utf8_is_malformed_document() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("latin1.json");
        std::fs::write(&path, b"{\"components\":[{\"name\":\"\xff\xfe\"}]}")
            .expect("write temp file");

        let err = parse_cyclonedx_file(&path).expect_err("invalid utf-8");
        assert!(
            matches!(
                err,
                SbomDiffError::Parse {
                    source: ParseErrorKind::InvalidJson(_),
                    ..
                }
            ),
            "{err:?}"
        );
        assert!(err.to_string().contains("latin1.json"), "{err}");
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"bomFormat": "CycloneDX"}"#).expect("write temp file");

        let err = parse_cyclonedx_file(&path).expect_err("no components");
        assert!(err.to_string().contains("broken.json"), "{err}");
    }
}
