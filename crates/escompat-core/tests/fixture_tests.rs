//! End-to-end tests over the fixtures in tests/fixtures/

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use escompat_core::analysis::AnalysisEngine;
use escompat_core::coverage;
use escompat_core::database::CompatTable;
use escompat_core::features::{FeatureId, FeatureRegistry};
use escompat_core::parser::ParsedFile;
use escompat_core::records::{ErrorKey, ErrorRecord, FileErrors};
use escompat_core::usage::UsageTable;
use escompat_core::visitor::{DetectionOutcome, detect_features};
use escompat_core::{Aggregator, EnvironmentId};
use insta::assert_json_snapshot;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/fixtures");

fn read_fixture(relative_path: &str) -> String {
    let path = Path::new(FIXTURES_DIR).join(relative_path);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

fn engine(envs: &[&str]) -> AnalysisEngine {
    AnalysisEngine::new(
        FeatureRegistry::with_defaults(),
        Box::new(CompatTable::bundled().expect("bundled table")),
        envs,
    )
}

fn analyze_fixture(engine: &AnalysisEngine, relative_path: &str) -> FileErrors {
    engine.analyze_source(relative_path, &read_fixture(relative_path))
}

fn detected_ids(relative_path: &str) -> BTreeSet<String> {
    let file = ParsedFile::from_source(relative_path, &read_fixture(relative_path));
    match detect_features(&file, &FeatureRegistry::with_defaults()) {
        DetectionOutcome::Report(report) => report.keys().map(|id| id.to_string()).collect(),
        DetectionOutcome::ParseFailed(message) => {
            panic!("fixture {} failed to parse: {}", relative_path, message)
        }
    }
}

fn env(s: &str) -> EnvironmentId {
    s.parse().unwrap()
}

fn key(id: &str) -> ErrorKey {
    ErrorKey::Feature(FeatureId::new(id))
}

#[test]
fn es5_fixture_uses_no_modern_syntax() {
    assert!(detected_ids("javascript/es5.js").is_empty());

    let errors = analyze_fixture(&engine(&["ie9", "ie11"]), "javascript/es5.js");
    assert!(errors.is_empty());
}

#[test]
fn computed_shorthand_method_is_incompatible() {
    let errors = analyze_fixture(
        &engine(&["chrome40", "chrome60", "ie11"]),
        "javascript/computed-methods.js",
    );

    assert_eq!(errors.len(), 1);
    match &errors[&key("computedShorthandMethods")] {
        ErrorRecord::Incompatibility {
            matches,
            incompat_envs,
            partial_envs,
            ..
        } => {
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].location.start.line, 4);
            assert_eq!(incompat_envs, &[env("chrome40"), env("ie11")]);
            assert!(partial_envs.is_empty());
        }
        other => panic!("Expected incompatibility, got {other:?}"),
    }
}

#[test]
fn computed_method_snippet_starts_at_key() {
    let source = read_fixture("javascript/computed-methods.js");
    let errors = engine(&["ie11"]).analyze_source("computed-methods.js", &source);

    let ErrorRecord::Incompatibility { matches, .. } = &errors[&key("computedShorthandMethods")]
    else {
        panic!("Expected incompatibility");
    };
    let snippet = matches[0].snippet(&source);

    assert!(snippet.starts_with("[key]()"));
    assert!(snippet.ends_with('}'));
}

#[test]
fn syntax_error_yields_single_parse_record() {
    let errors = analyze_fixture(&engine(&["ie11", "chrome40"]), "invalid/unterminated.js");

    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[&ErrorKey::Parse], ErrorRecord::Parse { message } if !message.is_empty()));
}

#[test]
fn sloppy_script_features_are_still_reported() {
    let errors = analyze_fixture(&engine(&["ie11"]), "javascript/legacy.js");

    assert!(!errors.contains_key(&ErrorKey::Parse), "unexpected parse record: {errors:?}");
    assert_eq!(errors.len(), 1);
    let record = &errors[&key("computedShorthandMethods")];
    assert_eq!(record.incompat_envs(), &[env("ie11")]);
}

#[test]
fn legacy_octal_literal_is_not_a_modern_feature() {
    let ids = detected_ids("javascript/legacy.js");

    assert!(!ids.contains("octalLiterals"));
    assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["computedShorthandMethods"]);
}

#[test]
fn unknown_environment_is_excluded() {
    let engine = engine(&["ie11", "netscape4"]);

    assert_eq!(engine.targets(), &[env("ie11")]);
    assert_eq!(engine.undefined_environments(), &["netscape4"]);

    let errors = analyze_fixture(&engine, "javascript/computed-methods.js");
    assert_eq!(errors[&key("computedShorthandMethods")].incompat_envs(), &[env("ie11")]);
}

#[test]
fn modern_fixture_detects_expected_features() {
    let ids = detected_ids("javascript/modern.js");

    for expected in [
        "const",
        "let",
        "asyncFunctions",
        "defaultParameters",
        "objectSpreadProperties",
        "forOfLoops",
        "exponentiationAssignment",
        "classDeclarations",
        "privateClassFields",
        "optionalChaining",
        "nullishCoalescing",
    ] {
        assert!(ids.contains(expected), "{expected} not detected in {ids:?}");
    }
    assert!(!ids.contains("arrowFunctions"));
}

#[test]
fn typescript_fixture_detects_expected_features() {
    let ids = detected_ids("typescript/greeting.ts");

    assert_json_snapshot!(ids, @r###"
    [
      "arrowFunctions",
      "const",
      "templateLiterals"
    ]
    "###);
}

#[test]
fn modern_fixture_is_clean_on_recent_browsers() {
    let errors = analyze_fixture(&engine(&["chrome100", "firefox100"]), "javascript/modern.js");

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn aggregation_and_coverage_over_fixtures() {
    let engine = engine(&["chrome40", "chrome60", "ie11", "firefox100"]);
    let fixtures = [
        "javascript/es5.js",
        "javascript/computed-methods.js",
        "javascript/modern.js",
        "invalid/unterminated.js",
    ];

    let aggregator = fixtures
        .iter()
        .map(|path| {
            let mut aggregator = Aggregator::new();
            aggregator.add_file(*path, analyze_fixture(&engine, path));
            aggregator
        })
        .fold(Aggregator::new(), Aggregator::merge);

    assert!(!aggregator.errors().contains_key("javascript/es5.js"));
    assert_eq!(aggregator.errors().len(), 3);
    assert!(aggregator.incompatible_environments().contains(&env("chrome60")));
    assert!(aggregator.incompatible_environments().contains(&env("ie11")));
    assert!(!aggregator.incompatible_environments().contains(&env("firefox100")));

    let usage = UsageTable::bundled().unwrap();
    let result = coverage::compute(
        engine.targets(),
        aggregator.incompatible_environments(),
        "defaults",
        &usage,
    )
    .unwrap();

    assert_eq!(result.query, "defaults, not chrome <= 60, not ie <= 11");
    assert_eq!(result.minimum_requirements.len(), 1);
    assert_eq!(result.minimum_requirements["firefox"].to_string(), "100");
    assert!(result.coverage_percentage > 0.0 && result.coverage_percentage < 100.0);
}
