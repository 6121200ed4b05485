//! Integration tests for dataset persistence
//!
//! Covers the save/load round trip and each failure the loader reports.

use std::fs;

use sso_fixtures::config::{ConfigError, GenerationConfig};
use sso_fixtures::error::FixtureError;
use sso_fixtures::generator;
use sso_fixtures::models::DatasetViolation;
use sso_fixtures::storage;
use tempfile::TempDir;

#[test]
fn save_then_load_returns_identical_dataset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");

    for config in [
        GenerationConfig::new(1, 1, 1),
        GenerationConfig::new(25, 3, 2),
        GenerationConfig::new(60, 2, 4),
    ] {
        let dataset = generator::generate(&config);
        storage::save(&dataset, &path).expect("dataset saves");

        let loaded = storage::load(&path).expect("dataset loads");
        assert_eq!(loaded, dataset);
    }
    assert!(!dir.path().join("data.json.tmp").exists());
}

#[test]
fn saved_document_uses_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    let dataset = generator::generate(&GenerationConfig::new(2, 1, 2));
    storage::save(&dataset, &path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["config"]["userCount"], 2);
    assert_eq!(json["config"]["orgDepth"], 1);
    assert_eq!(json["config"]["orgBranches"], 2);
    assert_eq!(json["orgs"][0]["parentId"], "0");
    assert!(json["users"][0]["memberName"].is_string());
}

#[test]
fn save_into_missing_directory_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("data.json");
    let dataset = generator::generate(&GenerationConfig::new(1, 1, 1));

    let err = storage::save(&dataset, &path).expect_err("missing directory should fail");
    assert!(matches!(
        err,
        FixtureError::Config(ConfigError::OutputDirMissing { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn load_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = storage::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn load_malformed_json_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        storage::load(&path),
        Err(FixtureError::Parse { .. })
    ));

    fs::write(&path, r#"{"users": [], "orgs": []}"#).unwrap();
    assert!(matches!(
        storage::load(&path),
        Err(FixtureError::Parse { .. })
    ));
}

#[test]
fn load_rejects_broken_tree() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dangling.json");
    let document = serde_json::json!({
        "users": [],
        "orgs": [
            {"id": "1", "name": "总公司", "parentId": "0"},
            {"id": "2", "name": "总公司-部门1", "parentId": "7"}
        ],
        "config": {"userCount": 1, "orgDepth": 1, "orgBranches": 1}
    });
    fs::write(&path, document.to_string()).unwrap();

    match storage::load(&path) {
        Err(FixtureError::MalformedDataset { violation, .. }) => assert_eq!(
            violation,
            DatasetViolation::UnknownParent {
                id: "2".to_string(),
                parent_id: "7".to_string(),
            }
        ),
        other => panic!("expected malformed dataset, got {other:?}"),
    }
}
