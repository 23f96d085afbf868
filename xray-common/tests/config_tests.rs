//! Integration tests for config file resolution and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate XRAY_CONFIG are marked with #[serial].

use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use xray_common::config::{
    default_config_path, load_config, resolve_config_path, ConfigSource, TomlConfig,
    CONFIG_ENV_VAR,
};
use xray_common::Error;

fn write_config(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Should write config file");
    path
}

#[test]
#[serial]
fn test_cli_argument_takes_priority_over_env() {
    let dir = tempfile::tempdir().unwrap();
    let cli_path = write_config(&dir, "cli.toml", "port = 9001");
    let env_path = write_config(&dir, "env.toml", "port = 9002");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let source = resolve_config_path(Some(&cli_path));
    assert_eq!(source, Some(ConfigSource::CommandLine(cli_path.clone())));

    let config = load_config(Some(&cli_path)).unwrap();
    assert_eq!(config.port, 9001);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_without_cli_argument() {
    let dir = tempfile::tempdir().unwrap();
    let env_path = write_config(&dir, "env.toml", "port = 9002\nhost = \"0.0.0.0\"");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let source = resolve_config_path(None);
    assert_eq!(source, Some(ConfigSource::Environment(env_path)));

    let config = load_config(None).unwrap();
    assert_eq!(config.port, 9002);
    assert_eq!(config.bind_addr(), "0.0.0.0:9002");

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_blank_env_var_is_ignored() {
    env::set_var(CONFIG_ENV_VAR, "  ");

    if let Some(source) = resolve_config_path(None) {
        assert!(matches!(source, ConfigSource::PlatformDefault(_)));
    }

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_no_overrides_falls_back_to_platform_or_defaults() {
    env::remove_var(CONFIG_ENV_VAR);

    match resolve_config_path(None) {
        None => {
            let config = load_config(None).unwrap();
            assert_eq!(config.port, TomlConfig::default().port);
        }
        Some(source) => {
            assert_eq!(Some(source.path().to_path_buf()), default_config_path());
        }
    }
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_config(Some(&missing)).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
#[serial]
fn test_malformed_explicit_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "bad.toml", "port = \"not a number\"");

    let err = load_config(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
#[serial]
fn test_full_file_sets_all_sections() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        "full.toml",
        r#"
host = "0.0.0.0"
port = 8080
max_upload_bytes = 1048576
cors_origins = ["https://advisor.example.com"]

[logging]
level = "debug"

[report]
use_computed_score = true
"#,
    );

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.max_upload_bytes, 1_048_576);
    assert_eq!(config.cors_origins, vec!["https://advisor.example.com"]);
    assert_eq!(config.logging.level, "debug");
    assert!(config.report.use_computed_score);
}
