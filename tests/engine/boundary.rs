const ENGINE_SOURCES: [(&str, &str); 6] = [
    ("mod.rs", include_str!("../../src/engine/mod.rs")),
    ("contracts.rs", include_str!("../../src/engine/contracts.rs")),
    ("error.rs", include_str!("../../src/engine/error.rs")),
    ("pipeline.rs", include_str!("../../src/engine/pipeline.rs")),
    ("ports.rs", include_str!("../../src/engine/ports.rs")),
    ("runner.rs", include_str!("../../src/engine/runner.rs")),
];

const DOMAIN_TERMS: [&str; 5] = ["weight", "calorie", "workout", "recovery", "cycle"];

#[test]
fn given_engine_sources_then_no_domain_vocabulary() {
    for (file, source) in ENGINE_SOURCES {
        let text = source.to_lowercase();
        for term in DOMAIN_TERMS {
            assert!(!text.contains(term), "found '{term}' in src/engine/{file}");
        }
    }
}
