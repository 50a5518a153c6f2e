//! Unit tests for configuration and graceful degradation
//!
//! Tests cover:
//! - Missing TOML files fall back to defaults instead of failing
//! - Partial TOML files only override what they name
//! - Root folder priority order (CLI > ENV > TOML > default)
//! - Root folder creation
//!
//! Note: Uses serial_test to prevent ENV variable race conditions.
//! Tests that touch RESOUND_ROOT_FOLDER are marked with #[serial].

use resound_common::config::{
    CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig, ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};

#[test]
fn test_compiled_defaults_for_current_platform() {
    let defaults = CompiledDefaults::for_current_platform();

    assert!(!defaults.root_folder.as_os_str().is_empty());
    assert!(defaults.root_folder.ends_with("resound") || defaults.root_folder.ends_with("resound_data"));
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = TomlConfig::load(&dir.path().join("does-not-exist.toml")).unwrap();

    assert!(config.root_folder.is_none());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.resource_service.port, 8080);
    assert_eq!(config.resource_service.catalog_url, "http://127.0.0.1:8081");
    assert_eq!(config.resource_service.catalog_timeout_secs, 5);
    assert_eq!(config.song_service.port, 8081);
}

#[test]
fn test_partial_config_keeps_other_defaults() {
    let config = TomlConfig::from_toml_str(
        r#"
        root_folder = "/srv/resound"

        [resource_service]
        catalog_url = "http://songs.internal:9000"
        "#,
    )
    .unwrap();

    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/resound")));
    assert_eq!(config.resource_service.catalog_url, "http://songs.internal:9000");
    assert_eq!(config.resource_service.port, 8080);
    assert_eq!(config.resource_service.max_upload_bytes, 50 * 1024 * 1024);
    assert_eq!(config.song_service.bind_address, "127.0.0.1");
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[resource_service]\nport = \"not a number\"\n").unwrap();

    let result = TomlConfig::load(&path);
    assert!(result.is_err());
}

#[test]
fn test_config_file_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"debug\"\n[song_service]\nport = 9191\n").unwrap();

    let config = TomlConfig::load(&path).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.song_service.port, 9191);
}

#[test]
#[serial]
fn test_resolver_cli_argument_wins() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/resound-from-env");
    let config = TomlConfig::from_toml_str("root_folder = \"/tmp/resound-from-toml\"").unwrap();

    let resolver = RootFolderResolver::new("test-module").with_toml(&config);
    let root = resolver.resolve(Some(Path::new("/tmp/resound-from-cli")));

    assert_eq!(root, PathBuf::from("/tmp/resound-from-cli"));
    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_env_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/resound-from-env");
    let config = TomlConfig::from_toml_str("root_folder = \"/tmp/resound-from-toml\"").unwrap();

    let root = RootFolderResolver::new("test-module")
        .with_toml(&config)
        .resolve(None);

    assert_eq!(root, PathBuf::from("/tmp/resound-from-env"));
    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_toml_beats_default() {
    env::remove_var(ROOT_FOLDER_ENV);
    let config = TomlConfig::from_toml_str("root_folder = \"/tmp/resound-from-toml\"").unwrap();

    let root = RootFolderResolver::new("test-module")
        .with_toml(&config)
        .resolve(None);

    assert_eq!(root, PathBuf::from("/tmp/resound-from-toml"));
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root = RootFolderResolver::new("test-module").resolve(None);

    assert_eq!(root, CompiledDefaults::for_current_platform().root_folder);
}

#[test]
fn test_initializer_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("a").join("b");

    let initializer = RootFolderInitializer::new(root.clone());
    initializer.ensure_directory_exists().unwrap();

    assert!(root.is_dir());
    assert_eq!(initializer.database_path("resources.db"), root.join("resources.db"));
}
