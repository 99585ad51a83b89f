#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_delta::config::DiffOptions;
use sbom_delta::model::{ComponentIndex, IdentityStrategy};
use sbom_delta::parsers::parse_cyclonedx_str;
use sbom_delta::DiffEngine;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz extraction and a self-diff.
///
/// Input is also wrapped as a `components` array so most runs get past the
/// document-shape checks and into per-entry extraction.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        check(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            check(&format!(r#"{{"bomFormat":"CycloneDX","components":[{s}]}}"#));
        }
    }
});

fn check(json: &str) {
    let Ok(doc) = parse_cyclonedx_str(json) else {
        return;
    };
    for identity in [IdentityStrategy::Name, IdentityStrategy::Purl] {
        let options = DiffOptions {
            identity,
            ..DiffOptions::default()
        };
        let extraction = doc.extract_all(&options);
        assert_eq!(extraction.records.len() + extraction.skipped(), doc.entry_count());

        let index: ComponentIndex = extraction.records.into_iter().collect();
        let result = DiffEngine::new(&options).diff(&index, &index);
        assert!(!result.has_changes());
    }
}
