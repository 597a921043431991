//! Integration tests for identifier derivation and path composition.

mod common;

use std::path::PathBuf;

use common::Sandbox;
use projdata_core::testing::StaticEnv;
use projdata_core::config::{CONFIG_ENV_VAR, INTERNAL_ENV_VAR, SELF_TEST_VAR};
use projdata_core::{AppDataError, DataLayout, derive_identifier};

fn project(name: &str) -> PathBuf {
    std::env::temp_dir().join("projects").join(name)
}

#[test]
fn identifier_is_deterministic() {
    let path = project("alpha");
    let ids: Vec<_> = (0..3).map(|_| derive_identifier(&path).unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn identifiers_do_not_collide() {
    let ids: std::collections::HashSet<_> = (0..200)
        .map(|i| derive_identifier(project(&format!("p{i}"))).unwrap())
        .collect();
    assert_eq!(ids.len(), 200);
}

#[cfg(unix)]
#[test]
fn identifier_matches_known_value() {
    let id = derive_identifier("/Users/dev/my-app").unwrap();
    assert_eq!(
        id.to_string(),
        "my-app-bea12dd28a83795741a24d0a5d4b0d060ff2e1a7e2d3c5470e6c60c8de19d9f3"
    );
}

#[test]
fn identifier_rejects_bad_input() {
    for input in ["", "project/sub", "relative"] {
        let err = derive_identifier(input).unwrap_err();
        assert!(matches!(err, AppDataError::InvalidInput(_)), "input {input:?}");
    }
}

#[test]
fn identifier_has_no_separators() {
    let id = derive_identifier(project("my:proj*ect")).unwrap();
    for c in ['/', '\\', ':', '*', '?', '"', '<', '>', '|'] {
        assert!(!id.as_str().contains(c), "identifier contains {c:?}");
    }
}

#[test]
fn bundled_file_path_composes_projects_path() {
    let sandbox = Sandbox::new(StaticEnv::new());
    for name in ["one", "two", "with space"] {
        let p = project(name);
        let id = derive_identifier(&p).unwrap();
        assert_eq!(
            sandbox.app.bundled_file_path(&p, "x.js").unwrap(),
            sandbox
                .app
                .projects_path([id.as_str(), "bundles", "x.js"])
                .unwrap()
        );
    }
}

#[test]
fn data_path_varies_with_channel_but_partitions_do_not() {
    let plain = Sandbox::new(StaticEnv::new());
    let staging = Sandbox::new(StaticEnv::new().with(CONFIG_ENV_VAR, "staging"));
    let self_test = Sandbox::new(
        StaticEnv::new()
            .with(INTERNAL_ENV_VAR, "test")
            .with(SELF_TEST_VAR, "true"),
    );

    let rel = |s: &Sandbox, p: PathBuf| p.strip_prefix(s.data_base()).unwrap().to_path_buf();

    let plain_data = rel(&plain, plain.app.data_dir().unwrap());
    let staging_data = rel(&staging, staging.app.data_dir().unwrap());
    let self_test_data = rel(&self_test, self_test.app.data_dir().unwrap());
    assert_ne!(plain_data, staging_data);
    assert!(plain_data.ends_with("app/development"));
    assert!(staging_data.ends_with("app/staging"));
    assert!(self_test_data.ends_with("app/test-self-test"));

    let plain_parts = rel(&plain, plain.app.partitions_path().unwrap());
    let staging_parts = rel(&staging, staging.app.partitions_path().unwrap());
    assert_eq!(plain_parts, staging_parts);
    assert_eq!(plain_parts, PathBuf::from("data/projdata-it/Partitions"));
}

#[test]
fn layout_is_consistent() {
    let sandbox = Sandbox::new(StaticEnv::new());
    let p = project("layout");
    let layout = DataLayout::resolve(&sandbox.app, Some(&p)).unwrap();
    let project = layout.project.as_ref().unwrap();

    assert!(layout.data_dir.starts_with(&layout.root));
    assert!(project.project_dir.starts_with(&layout.projects_dir));
    assert_eq!(project.identifier, derive_identifier(&p).unwrap());
    assert_eq!(layout.link_path, sandbox.work_dir().join(".projdata"));
}
