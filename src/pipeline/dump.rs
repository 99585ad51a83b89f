//! Flat component dumps for deep-debug runs.
//!
//! One line per extracted record, tab-separated:
//! `identity_key  name  version  license`. Duplicates are kept, so a dump
//! shows exactly what the extractor produced before indexing.

use crate::error::{Result, SbomDiffError};
use crate::model::ComponentRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Dump file name for the old document
pub const OLD_DUMP_FILE: &str = "old_components.txt";
/// Dump file name for the new document
pub const NEW_DUMP_FILE: &str = "new_components.txt";

/// Write records to `path`, one per line.
pub fn dump_components<'a>(
    records: impl IntoIterator<Item = &'a ComponentRecord>,
    path: &Path,
) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for record in records {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                flatten(&record.identity_key),
                flatten(&record.name),
                flatten(&record.version),
                flatten(&record.license)
            )?;
        }
        writer.flush()
    };
    write().map_err(|e| SbomDiffError::output_write(path, e))
}

/// Write a dump, logging instead of failing.
///
/// Returns the path on success.
pub fn dump_or_warn<'a>(
    records: impl IntoIterator<Item = &'a ComponentRecord>,
    dir: &Path,
    file_name: &str,
) -> Option<PathBuf> {
    let path = dir.join(file_name);
    match dump_components(records, &path) {
        Ok(()) => {
            tracing::info!("Component list written to {}", path.display());
            Some(path)
        }
        Err(e) => {
            tracing::warn!("Skipping component dump: {e}");
            None
        }
    }
}

/// Tabs and line breaks inside a field would break the line format.
fn flatten(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains(['\t', '\n', '\r']) {
        field.replace(['\t', '\n', '\r'], " ").into()
    } else {
        field.into()
    }
}
