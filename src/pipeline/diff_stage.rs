//! Diff computation stage.
//!
//! Builds one identity index per document, writes deep-debug dumps when
//! asked to, and runs the diff engine.

use super::dump::{dump_or_warn, NEW_DUMP_FILE, OLD_DUMP_FILE};
use super::ParsedSbom;
use crate::config::DiffConfig;
use crate::diff::{DiffEngine, DiffResult};
use crate::model::ComponentIndex;

/// Run the diff between two parsed SBOMs.
pub fn compute_diff(config: &DiffConfig, old: &ParsedSbom, new: &ParsedSbom) -> DiffResult {
    if config.debug.level.dumps_components() {
        let dir = config.debug.dump_directory();
        dump_or_warn(&old.extraction.records, &dir, OLD_DUMP_FILE);
        dump_or_warn(&new.extraction.records, &dir, NEW_DUMP_FILE);
    }

    let old_index = build_index(old);
    let new_index = build_index(new);

    tracing::info!("Computing component diff...");
    let result = DiffEngine::new(&config.options).diff(&old_index, &new_index);

    let summary = &result.summary;
    tracing::info!(
        "Diff complete: {} added, {} removed, {} version changes, {} license changes",
        summary.added,
        summary.removed,
        summary.version_changed,
        summary.license_changed
    );

    result
}

fn build_index(parsed: &ParsedSbom) -> ComponentIndex {
    let index = ComponentIndex::build(parsed.extraction.records.iter().cloned());
    if index.duplicates() > 0 {
        tracing::debug!(
            "{}: {} duplicate entries collapsed, {} unique components",
            parsed.path.display(),
            index.duplicates(),
            index.len()
        );
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DebugLevel, DiffConfigBuilder};
    use crate::pipeline::parse_sbom_with_context;
    use std::path::Path;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    #[test]
    fn test_deep_debug_writes_dumps() {
        let dir = tempfile::tempdir().expect("temp dir");
        let old = write(
            dir.path(),
            "old.json",
            r#"{"components": [{"name": "a", "version": "1"}]}"#,
        );
        let new = write(
            dir.path(),
            "new.json",
            r#"{"components": [{"name": "a", "version": "2"}]}"#,
        );

        let config = DiffConfigBuilder::new()
            .old_path(old.clone())
            .new_path(new.clone())
            .debug_level(DebugLevel::Deep)
            .dump_dir(Some(dir.path().to_path_buf()))
            .build()
            .expect("config");

        let old = parse_sbom_with_context(&old, &config.options).expect("parse old");
        let new = parse_sbom_with_context(&new, &config.options).expect("parse new");
        let result = compute_diff(&config, &old, &new);

        assert_eq!(result.summary.version_changed, 1);
        let dump = std::fs::read_to_string(dir.path().join(OLD_DUMP_FILE)).expect("old dump");
        assert_eq!(dump, "a\ta\t1\tunknown\n");
        assert!(dir.path().join(NEW_DUMP_FILE).exists());
    }

    #[test]
    fn test_dump_failure_does_not_abort() {
        let dir = tempfile::tempdir().expect("temp dir");
        let old = write(dir.path(), "old.json", r#"{"components": []}"#);
        let new = write(dir.path(), "new.json", r#"{"components": [{"name": "x"}]}"#);

        let config = DiffConfigBuilder::new()
            .old_path(old.clone())
            .new_path(new.clone())
            .debug_level(DebugLevel::Deep)
            .dump_dir(Some(dir.path().join("missing-subdir")))
            .build()
            .expect("config");

        let old = parse_sbom_with_context(&old, &config.options).expect("parse old");
        let new = parse_sbom_with_context(&new, &config.options).expect("parse new");
        assert_eq!(compute_diff(&config, &old, &new).summary.added, 1);
    }
}
