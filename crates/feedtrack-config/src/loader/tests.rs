//! Tests for layered configuration loading.

use super::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// Options that only see layers created inside the temp dir.
fn isolated_options(cwd: &Path) -> LayeredConfigOptions {
    let mut options = LayeredConfigOptions::new(cwd);
    options.system_config_path = None;
    options.user_config_path = None;
    options.requirements_path = None;
    options
}

#[test]
fn parse_minimal_config() {
    let config = FeedTrackConfig::load_from_str("{}").expect("config");
    assert_eq!(config.server.bind, "127.0.0.1:5000");
    assert_eq!(config.insights.window, 50);
    assert_eq!(
        config.ai.models,
        vec![
            "gemini-1.5-flash".to_string(),
            "gemini-1.5-flash-001".to_string(),
            "gemini-1.5-flash-8b".to_string(),
            "gemini-2.0-flash-exp".to_string(),
        ]
    );
    assert_eq!(config.storage.path, None);
}

#[test]
fn rejects_unknown_top_level_key() {
    let err = FeedTrackConfig::load_from_str("{ database: {} }").unwrap_err();
    assert!(format!("{err}").contains("unknown key"));
}

#[test]
fn rejects_wrong_type_with_field_path() {
    let err = FeedTrackConfig::load_from_str("{ insights: { window: \"fifty\" } }").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("insights.window"), "{msg}");
}

#[test]
fn rejects_empty_model_list() {
    let err = FeedTrackConfig::load_from_str("{ ai: { models: [] } }").unwrap_err();
    assert!(format!("{err}").contains("ai.models"));
}

#[test]
fn rejects_zero_window() {
    let err = FeedTrackConfig::load_from_str("{ insights: { window: 0 } }").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn cwd_layer_overrides_user_layer() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let cwd = root.join("work");
    fs::create_dir_all(&cwd).expect("cwd");

    let user_config = root.join("user.json5");
    write_json5(&user_config, "{ server: { bind: \"0.0.0.0:1\" }, insights: { window: 10 } }");
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        "{ server: { bind: \"0.0.0.0:2\" } }",
    );

    let mut options = isolated_options(&cwd);
    options.user_config_path = Some(user_config);
    let layered = FeedTrackConfig::load_layered_with_options(options).expect("layered");

    assert_eq!(layered.config.server.bind, "0.0.0.0:2");
    assert_eq!(layered.config.insights.window, 10);
    assert_eq!(layered.layers.len(), 2);
}

#[test]
fn requirements_lock_overrides() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();

    let requirements = root.join("requirements.json5");
    write_json5(&requirements, "{ ai: { models: [\"approved-model\"] } }");
    let runtime = root.join("runtime.json5");
    write_json5(
        &runtime,
        "{ ai: { models: [\"other-model\"], request_timeout_secs: 5 } }",
    );

    let mut options = isolated_options(root).with_runtime_path(&runtime);
    options.requirements_path = Some(requirements);
    let layered = FeedTrackConfig::load_layered_with_options(options).expect("layered");

    assert_eq!(layered.config.ai.models, vec!["approved-model".to_string()]);
    assert_eq!(layered.config.ai.request_timeout_secs, 5);
}

#[test]
fn missing_runtime_layer_is_an_error() {
    let temp = TempDir::new().expect("tmp");
    let options = isolated_options(temp.path()).with_runtime_path(temp.path().join("nope.json5"));
    let err = FeedTrackConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::ReadLayer { .. }));
}

#[test]
fn explicit_api_key_wins_over_environment() {
    let config = FeedTrackConfig::load_from_str(
        "{ ai: { api_key: \"  literal-key \", api_key_env: \"FEEDTRACK_TEST_UNSET_KEY\" } }",
    )
    .expect("config");
    assert_eq!(config.ai.resolve_api_key(), Some("literal-key".to_string()));
}

#[test]
fn blank_api_key_counts_as_missing() {
    let config = FeedTrackConfig::load_from_str(
        "{ ai: { api_key: \"   \", api_key_env: \"FEEDTRACK_TEST_UNSET_KEY\" } }",
    )
    .expect("config");
    assert_eq!(config.ai.resolve_api_key(), None);
}
