//! Markdown report generator.

use super::escape::escape_markdown_inline as esc;
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffResult, LicenseChange, VersionChange, VersionDirection};
use crate::model::ComponentRecord;

/// Markdown-flavoured text report.
///
/// Section order is fixed: summary, version changes, added, removed, license
/// changes. In license-focus mode the license section moves up to follow the
/// summary and each license carries its family.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let result = result.sorted();
        let options = &config.options;
        let mut md = String::new();

        write_header(&mut md, config);
        write_summary(&mut md, &result, config);

        let focus_licenses = options.license_focus && !result.license_changes.is_empty();
        if focus_licenses {
            write_license_changes(&mut md, &result.license_changes, true);
        }

        if !options.ignore_version && !result.version_changes.is_empty() {
            md.push_str("## Version Changes\n\n");
            for change in &result.version_changes {
                md.push_str(&version_line(change));
                md.push('\n');
            }
            md.push('\n');
        }

        if !result.added.is_empty() {
            md.push_str("## Added Components\n\n");
            for component in &result.added {
                md.push_str(&component_line(component));
                md.push('\n');
            }
            md.push('\n');
        }

        if !result.removed.is_empty() {
            md.push_str("## Removed Components\n\n");
            for component in &result.removed {
                md.push_str(&component_line(component));
                md.push('\n');
            }
            md.push('\n');
        }

        if !focus_licenses && !result.license_changes.is_empty() {
            write_license_changes(&mut md, &result.license_changes, false);
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

fn write_header(md: &mut String, config: &ReportConfig) {
    let meta = &config.metadata;
    md.push_str(&format!("# {}\n\n", esc(config.title())));
    if let Some(at) = meta.generated_at {
        md.push_str(&format!(
            "- Generated: {}\n",
            at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    let old = sbom_label(
        meta.old_sbom_path.as_deref(),
        meta.old_sbom_name.as_deref(),
        meta.old_spec_version.as_deref(),
        meta.old_serial_number.as_deref(),
    );
    let new = sbom_label(
        meta.new_sbom_path.as_deref(),
        meta.new_sbom_name.as_deref(),
        meta.new_spec_version.as_deref(),
        meta.new_serial_number.as_deref(),
    );
    md.push_str(&format!("- Old SBOM: {old}\n"));
    md.push_str(&format!("- New SBOM: {new}\n"));
    md.push('\n');
}

/// `file (component name), CycloneDX <specVersion>, serial <serialNumber>`
fn sbom_label(
    path: Option<&str>,
    name: Option<&str>,
    spec_version: Option<&str>,
    serial: Option<&str>,
) -> String {
    let mut label = match (path, name) {
        (Some(path), Some(name)) => format!("{} ({})", esc(path), esc(name)),
        (Some(path), None) => esc(path),
        (None, Some(name)) => esc(name),
        (None, None) => "-".to_string(),
    };
    if let Some(version) = spec_version {
        label.push_str(&format!(", CycloneDX {}", esc(version)));
    }
    if let Some(serial) = serial {
        label.push_str(&format!(", serial {}", esc(serial)));
    }
    label
}

fn write_summary(md: &mut String, result: &DiffResult, config: &ReportConfig) {
    let summary = &result.summary;
    md.push_str("## Summary of Changes\n\n");
    md.push_str(&format!(
        "- Total components: {} -> {} ({:+})\n",
        summary.total_old,
        summary.total_new,
        summary.delta()
    ));
    md.push_str(&format!("- Added components: {}\n", summary.added));
    md.push_str(&format!("- Removed components: {}\n", summary.removed));
    if !config.options.ignore_version {
        md.push_str(&format!(
            "- Version changes: {}\n",
            summary.version_changed
        ));
    }
    md.push_str(&format!(
        "- License changes: {}\n",
        summary.license_changed
    ));
    md.push('\n');
}

fn write_license_changes(md: &mut String, changes: &[LicenseChange], with_families: bool) {
    md.push_str("## License Changes\n\n");
    for change in changes {
        md.push_str(&format!(
            "- {}: ",
            label(&change.name, &change.identity_key)
        ));
        if with_families {
            md.push_str(&format!(
                "{} ({}) -> {} ({})",
                esc(&change.old),
                change.old_family(),
                esc(&change.new),
                change.new_family()
            ));
            if change.is_more_restrictive() {
                md.push_str(", more restrictive");
            }
        } else {
            md.push_str(&format!("{} -> {}", esc(&change.old), esc(&change.new)));
        }
        md.push('\n');
    }
    md.push('\n');
}

fn version_line(change: &VersionChange) -> String {
    let mut line = format!(
        "- {}: {} -> {}",
        label(&change.name, &change.identity_key),
        esc(&change.old),
        esc(&change.new)
    );
    if change.direction != VersionDirection::Unordered {
        line.push_str(&format!(" ({})", change.direction));
    }
    line
}

fn component_line(component: &ComponentRecord) -> String {
    format!(
        "- {} (version: {}, license: {})",
        label(&component.name, &component.identity_key),
        esc(&component.version),
        esc(&component.license)
    )
}

/// Bold name, plus the identity key when it differs from the name.
fn label(name: &str, identity_key: &str) -> String {
    if name == identity_key {
        format!("**{}**", esc(name))
    } else {
        format!("**{}** ({})", esc(name), esc(identity_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffOptions;
    use crate::diff::DiffEngine;
    use crate::model::ComponentIndex;
    use crate::reports::ReportMetadata;

    fn render(old: ComponentIndex, new: ComponentIndex, options: DiffOptions) -> String {
        let result = DiffEngine::new(&options).diff(&old, &new);
        let config = ReportConfig::new(options).with_metadata(ReportMetadata {
            old_sbom_path: Some("old.json".to_string()),
            new_sbom_path: Some("new.json".to_string()),
            ..ReportMetadata::new()
        });
        MarkdownReporter
            .generate_diff_report(&result, &config)
            .expect("render")
    }

    fn rec(name: &str, version: &str, license: &str) -> ComponentRecord {
        ComponentRecord::new(name)
            .with_version(version)
            .with_license(license)
    }

    #[test]
    fn test_section_order() {
        let old = ComponentIndex::build([rec("a", "1", "MIT"), rec("gone", "1", "MIT")]);
        let new = ComponentIndex::build([rec("a", "2", "Apache-2.0"), rec("new", "1", "MIT")]);
        let md = render(old, new, DiffOptions::default());

        let positions: Vec<_> = [
            "## Summary of Changes",
            "## Version Changes",
            "## Added Components",
            "## Removed Components",
            "## License Changes",
        ]
        .iter()
        .map(|h| md.find(h).unwrap_or_else(|| panic!("missing {h} in\n{md}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{md}");
        assert!(md.contains("- Total components: 2 -> 2 (+0)"));
        assert!(md.contains("- **a**: 1 -> 2"));
        assert!(md.contains("- Old SBOM: old.json"));
        assert!(!md.contains("Generated:"));
    }

    #[test]
    fn test_license_focus_moves_section_up() {
        let old = ComponentIndex::build([rec("a", "1", "MIT"), rec("b", "1", "MIT")]);
        let new = ComponentIndex::build([rec("a", "2", "GPL-3.0-only"), rec("c", "1", "MIT")]);
        let options = DiffOptions {
            license_focus: true,
            ..DiffOptions::default()
        };
        let md = render(old, new, options);

        let licenses = md.find("## License Changes").expect("license section");
        let summary = md.find("## Summary of Changes").expect("summary");
        let versions = md.find("## Version Changes").expect("version section");
        assert!(summary < licenses && licenses < versions, "{md}");
        assert_eq!(md.matches("## License Changes").count(), 1);
        assert!(md.contains("MIT (permissive) -> GPL-3.0-only (copyleft), more restrictive"));
    }

    #[test]
    fn test_ignore_version_hides_version_section_and_count() {
        let old = ComponentIndex::build([rec("a", "1", "MIT")]);
        let new = ComponentIndex::build([rec("a", "2", "MIT")]);
        let options = DiffOptions {
            ignore_version: true,
            ..DiffOptions::default()
        };
        let md = render(old, new, options);
        assert!(!md.contains("## Version Changes"));
        assert!(!md.contains("Version changes:"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let idx = ComponentIndex::build([rec("a", "1", "MIT")]);
        let md = render(idx.clone(), idx, DiffOptions::default());
        assert!(md.contains("## Summary of Changes"));
        assert!(!md.contains("## Added Components"));
        assert!(!md.contains("## Removed Components"));
        assert!(!md.contains("## License Changes"));
    }

    #[test]
    fn test_sections_sorted_by_name() {
        let old = ComponentIndex::default();
        let new = ComponentIndex::build([rec("zlib", "1", "Zlib"), rec("abc", "1", "MIT")]);
        let md = render(old, new, DiffOptions::default());
        let abc = md.find("**abc**").expect("abc listed");
        let zlib = md.find("**zlib**").expect("zlib listed");
        assert!(abc < zlib);
    }

    #[test]
    fn test_header_shows_document_metadata() {
        let config = ReportConfig::new(DiffOptions::default()).with_metadata(ReportMetadata {
            old_sbom_path: Some("old.json".to_string()),
            old_sbom_name: Some("firmware".to_string()),
            old_spec_version: Some("1.6".to_string()),
            old_serial_number: Some("urn:uuid:1".to_string()),
            new_spec_version: Some("1.4".to_string()),
            ..ReportMetadata::new()
        });
        let md = MarkdownReporter
            .generate_diff_report(&DiffResult::new(), &config)
            .expect("render");
        assert!(
            md.contains("- Old SBOM: old.json (firmware), CycloneDX 1.6, serial urn:uuid:1\n"),
            "{md}"
        );
        assert!(md.contains("- New SBOM: -, CycloneDX 1.4\n"), "{md}");
    }

    #[test]
    fn test_component_data_is_escaped() {
        let old = ComponentIndex::default();
        let new = ComponentIndex::build([rec("evil_*pkg*", "1.0", "[MIT](http://x)")]);
        let md = render(old, new, DiffOptions::default());
        assert!(md.contains("**evil\\_\\*pkg\\***"), "{md}");
        assert!(md.contains("\\[MIT\\](http://x)"));
    }
}
