//! Layered configuration loading

use std::env;
use std::fs;

use paf_domain::error::Error;
use paf_infrastructure::config::{AppConfig, ConfigLoader};
use paf_infrastructure::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_LOG_LEVEL};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("paf.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new()
        .with_config_path(dir.path().join("missing.toml"))
        .with_env_prefix("PAF_TEST_DEFAULTS");

    let config = loader.load().unwrap();

    assert_eq!(config.auto_factory.cache_capacity, DEFAULT_CACHE_CAPACITY);
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert!(!config.logging.json_format);
}

#[test]
fn test_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[auto_factory]
cache_capacity = 16

[logging]
level = "debug"
json_format = true
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("PAF_TEST_FILE")
        .load()
        .unwrap();

    assert_eq!(config.auto_factory.cache_capacity, 16);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
}

#[test]
fn test_zero_capacity_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[auto_factory]\ncache_capacity = 0\n");

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("PAF_TEST_ZERO")
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_unknown_log_level_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nlevel = \"loud\"\n");

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("PAF_TEST_LEVEL")
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_malformed_file_reported_as_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[auto_factory]\ncache_capacity = \"many\"\n");

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("PAF_TEST_MALFORMED")
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let mut config = AppConfig::default();
    config.auto_factory.cache_capacity = 7;
    config.logging.level = "warn".to_string();

    let loader = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("PAF_TEST_SAVE");
    loader.save_to_file(&config, &path).unwrap();
    let loaded = loader.load().unwrap();

    assert_eq!(loaded.auto_factory, config.auto_factory);
    assert_eq!(loaded.logging.level, "warn");
    assert_eq!(loader.config_path(), Some(path.as_path()));
}

/// Run with: `cargo test -p paf-infrastructure --test integration env_override -- --ignored --test-threads=1`
#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[auto_factory]\ncache_capacity = 16\n");

    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var("PAF_ENVTEST_AUTO_FACTORY__CACHE_CAPACITY", "32");
    }

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("PAF_ENVTEST")
        .load();

    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var("PAF_ENVTEST_AUTO_FACTORY__CACHE_CAPACITY");
    }

    assert_eq!(result.unwrap().auto_factory.cache_capacity, 32);
}
