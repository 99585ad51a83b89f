//! Property-based tests for the diff engine.
//!
//! Component names, versions and licenses are drawn from small pools so
//! that random documents overlap often enough to exercise every change kind.

use proptest::prelude::*;
use sbom_delta::config::DiffOptions;
use sbom_delta::model::{ComponentIndex, ComponentRecord};
use sbom_delta::parsers::parse_cyclonedx_str;
use sbom_delta::DiffEngine;
use std::collections::BTreeSet;

fn record() -> impl Strategy<Value = ComponentRecord> {
    (
        "(openssl|zlib|busybox|curl|libxml2|dropbear)",
        "(1\\.0|1\\.1|2\\.0\\.3|unknown)",
        "(MIT|Apache-2\\.0|GPL-2\\.0-only|unknown)",
    )
        .prop_map(|(name, version, license)| {
            ComponentRecord::new(name)
                .with_version(version)
                .with_license(license)
        })
}

fn index() -> impl Strategy<Value = ComponentIndex> {
    prop::collection::vec(record(), 0..12).prop_map(|records| records.into_iter().collect())
}

fn options() -> impl Strategy<Value = DiffOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(ignore_version, license_focus)| DiffOptions {
        ignore_version,
        license_focus,
        ..DiffOptions::default()
    })
}

fn key_set<'a>(keys: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    keys.map(str::to_string).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn added_and_removed_are_disjoint(old in index(), new in index(), opts in options()) {
        let result = DiffEngine::new(&opts).diff(&old, &new);

        let added: BTreeSet<_> = result.added_keys().collect();
        let removed: BTreeSet<_> = result.removed_keys().collect();
        prop_assert!(added.is_disjoint(&removed));

        for key in &added {
            prop_assert!(new.contains(key) && !old.contains(key));
        }
        for key in &removed {
            prop_assert!(old.contains(key) && !new.contains(key));
        }
        for change in &result.version_changes {
            prop_assert!(old.contains(&change.identity_key) && new.contains(&change.identity_key));
            prop_assert_ne!(&change.old, &change.new);
        }
        for change in &result.license_changes {
            prop_assert!(old.contains(&change.identity_key) && new.contains(&change.identity_key));
            prop_assert_ne!(&change.old, &change.new);
        }
    }

    #[test]
    fn self_comparison_is_empty(doc in index(), opts in options()) {
        let result = DiffEngine::new(&opts).diff(&doc, &doc);
        prop_assert!(!result.has_changes());
        prop_assert_eq!(result.summary.total_old, doc.len());
        prop_assert_eq!(result.summary.total_new, doc.len());
    }

    #[test]
    fn swapping_inputs_mirrors_the_result(old in index(), new in index(), opts in options()) {
        let engine = DiffEngine::new(&opts);
        let forward = engine.diff(&old, &new);
        let backward = engine.diff(&new, &old);

        prop_assert_eq!(key_set(forward.added_keys()), key_set(backward.removed_keys()));
        prop_assert_eq!(key_set(forward.removed_keys()), key_set(backward.added_keys()));

        let versions = |r: &sbom_delta::DiffResult| {
            r.version_changes
                .iter()
                .map(|c| (c.identity_key.clone(), c.old.clone(), c.new.clone()))
                .collect::<BTreeSet<_>>()
        };
        let swapped: BTreeSet<_> = versions(&backward)
            .into_iter()
            .map(|(key, old, new)| (key, new, old))
            .collect();
        prop_assert_eq!(versions(&forward), swapped);

        let licenses = |r: &sbom_delta::DiffResult| {
            r.license_changes
                .iter()
                .map(|c| (c.identity_key.clone(), c.old.clone(), c.new.clone()))
                .collect::<BTreeSet<_>>()
        };
        let swapped: BTreeSet<_> = licenses(&backward)
            .into_iter()
            .map(|(key, old, new)| (key, new, old))
            .collect();
        prop_assert_eq!(licenses(&forward), swapped);
    }

    #[test]
    fn ignore_version_never_reports_versions(old in index(), new in index()) {
        let opts = DiffOptions { ignore_version: true, ..DiffOptions::default() };
        let result = DiffEngine::new(&opts).diff(&old, &new);
        prop_assert!(result.version_changes.is_empty());
        prop_assert_eq!(result.summary.version_changed, 0);
    }

    #[test]
    fn summary_matches_collections(old in index(), new in index(), opts in options()) {
        let result = DiffEngine::new(&opts).diff(&old, &new);
        let s = &result.summary;
        prop_assert_eq!(s.added, result.added.len());
        prop_assert_eq!(s.removed, result.removed.len());
        prop_assert_eq!(s.version_changed, result.version_changes.len());
        prop_assert_eq!(s.license_changed, result.license_changes.len());
    }

    #[test]
    fn extractor_never_panics(s in "\\PC{0,300}") {
        if let Ok(doc) = parse_cyclonedx_str(&s) {
            let _ = doc.extract_all(&DiffOptions::default());
        }
    }

    #[test]
    fn arbitrary_component_values_never_panic(
        name in prop::option::of("\\PC{0,20}"),
        version in prop::option::of("\\PC{0,20}"),
        license in prop::option::of("\\PC{0,40}"),
    ) {
        let entry = serde_json::json!({
            "name": name,
            "version": version,
            "licenses": [{ "license": { "id": license } }],
        });
        let doc = serde_json::json!({ "components": [entry] }).to_string();
        let parsed = parse_cyclonedx_str(&doc).unwrap();
        let extraction = parsed.extract_all(&DiffOptions::default());
        prop_assert_eq!(extraction.records.len() + extraction.skipped(), 1);
    }
}
