//! Library integration tests.

use std::fs;
use std::path::Path;

use check_node_types::checker::{
    classify, resolve_runtime_version, DependencySection, TypesReading, VersionReading,
};
use check_node_types::{
    reconcile, CheckError, CheckStatus, DeclarationSource, ReconciliationOutcome,
};
use tempfile::TempDir;

fn project(manifest: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.json"), manifest).unwrap();
    temp
}

#[test]
fn error_types_are_public() {
    let err = CheckError::ManifestNull {
        path: "package.json".into(),
    };
    assert!(err.to_string().contains("package.json"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> check_node_types::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use check_node_types::cli::Cli;
    use clap::Parser;

    let cli = Cli::parse_from(["check-node-types", "--json", "--source", "volta"]);
    assert!(cli.check.json);
    assert_eq!(cli.check.source, DeclarationSource::Volta);
}

#[test]
fn outcome_round_trips_through_json() {
    let temp = project(
        r#"{ "engines": { "node": ">=20" }, "devDependencies": { "@types/node": "^22.1.0" } }"#,
    );
    let outcome = reconcile(&temp.path().join("package.json"), DeclarationSource::Engines);

    let json = serde_json::to_string_pretty(&outcome).unwrap();
    let parsed: ReconciliationOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, outcome);
}

#[test]
fn every_rule_round_trips_through_json() {
    let cases = [
        (VersionReading::absent(), TypesReading::absent()),
        (
            VersionReading::absent(),
            TypesReading::declared("^20.0.0", Some(20), DependencySection::Dependencies),
        ),
        (VersionReading::declared(">=20", Some(20)), TypesReading::absent()),
        (
            VersionReading::declared("current", None),
            TypesReading::declared("^20.0.0", Some(20), DependencySection::DevDependencies),
        ),
        (
            VersionReading::declared(">=20", Some(20)),
            TypesReading::declared("latest", None, DependencySection::DevDependencies),
        ),
    ];
    for source in DeclarationSource::ALL {
        for (runtime, types) in cases.clone() {
            let outcome = classify(source, runtime, types);
            assert_eq!(outcome.status, CheckStatus::Warning);
            let json = serde_json::to_value(&outcome).unwrap();
            let parsed: ReconciliationOutcome = serde_json::from_value(json).unwrap();
            assert_eq!(parsed, outcome);
        }
    }
}

#[test]
fn scenario_a_pass() {
    let temp = project(
        r#"{ "engines": { "node": ">=20" }, "devDependencies": { "@types/node": "^20.11.0" } }"#,
    );
    let outcome = reconcile(&temp.path().join("package.json"), DeclarationSource::Engines);
    assert_eq!(outcome.status, CheckStatus::Pass);
    assert_eq!(outcome.runtime_version.major(), Some(20));
    assert_eq!(outcome.type_package_version.major(), Some(20));
    assert_eq!(outcome.fix, None);
}

#[test]
fn scenario_b_fail() {
    let temp = project(
        r#"{ "engines": { "node": ">=20" }, "devDependencies": { "@types/node": "^22.1.0" } }"#,
    );
    let outcome = reconcile(&temp.path().join("package.json"), DeclarationSource::Engines);
    assert_eq!(outcome.status, CheckStatus::Fail);
    assert!(outcome.fix.unwrap().contains("@types/node@^20"));
}

#[test]
fn scenario_c_missing_engines() {
    let temp = project(r#"{ "devDependencies": { "@types/node": "^20.0.0" } }"#);
    let outcome = reconcile(&temp.path().join("package.json"), DeclarationSource::Engines);
    assert_eq!(outcome.status, CheckStatus::Warning);
    assert!(outcome.message.contains("engines.node"));
    assert!(outcome.fix.unwrap().contains("engines"));
}

#[test]
fn scenario_d_missing_types() {
    let temp = project(r#"{ "engines": { "node": "^18.17.0" } }"#);
    let outcome = reconcile(&temp.path().join("package.json"), DeclarationSource::Engines);
    assert_eq!(outcome.status, CheckStatus::Warning);
    assert_eq!(outcome.fix.as_deref(), Some("npm install -D @types/node@^18"));
}

#[test]
fn scenario_e_dev_dependencies_win() {
    let temp = project(
        r#"{
            "engines": { "node": ">=22" },
            "dependencies": { "@types/node": "^22.0.0" },
            "devDependencies": { "@types/node": "^20.0.0" }
        }"#,
    );
    let outcome = reconcile(&temp.path().join("package.json"), DeclarationSource::Engines);
    assert_eq!(
        outcome.type_package_version.location(),
        Some(DependencySection::DevDependencies)
    );
    assert_eq!(outcome.type_package_version.raw(), Some("^20.0.0"));
    assert_eq!(outcome.status, CheckStatus::Fail);
}

#[test]
fn scenario_f_unreadable_manifest() {
    let outcome = reconcile(Path::new("/nonexistent/package.json"), DeclarationSource::Volta);
    assert_eq!(outcome.status, CheckStatus::Warning);
    assert!(outcome.message.contains("Could not read"));
    assert_eq!(outcome.fix, None);

    let temp = project("{ \"engines\": { \"node\": ");
    let outcome = reconcile(&temp.path().join("package.json"), DeclarationSource::Engines);
    assert_eq!(outcome.status, CheckStatus::Warning);
    assert_eq!(outcome.fix, None);
}

#[test]
fn runtime_resolution_is_public() {
    let temp = project(r#"{ "volta": { "node": "18.20.2" } }"#);
    let reading =
        resolve_runtime_version(&temp.path().join("package.json"), DeclarationSource::Volta);
    assert_eq!(reading.major(), Some(18));
}
