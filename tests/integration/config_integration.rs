//! Integration tests for configuration layering

use pipectl::config::{global_config_path, ConfigLoader};
use pipectl::error::CliError;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

// Tests that touch the process environment run one at a time
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with `vars` set, restoring the previous values afterwards.
fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(&key, v),
            None => std::env::remove_var(&key),
        }
    }
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

fn write_global_config(config_home: &Path, body: &str) {
    let dir = config_home.join("pipectl");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), body).unwrap();
}

#[test]
fn test_global_config_path_follows_xdg_config_home() {
    let temp = TempDir::new().unwrap();
    with_env(&[("XDG_CONFIG_HOME", temp.path().to_str().unwrap())], || {
        assert_eq!(
            global_config_path(),
            Some(temp.path().join("pipectl").join("config.toml"))
        );
    });
}

#[test]
fn test_explicit_file_overrides_global_file() {
    let temp = TempDir::new().unwrap();
    write_global_config(
        temp.path(),
        r#"
endpoint = "https://global.example.com/pipeline"
organization_id = 3
"#,
    );
    let explicit = temp.path().join("team.toml");
    fs::write(&explicit, "organization_id = 9\n").unwrap();

    with_env(&[("XDG_CONFIG_HOME", temp.path().to_str().unwrap())], || {
        let config = ConfigLoader::load(Some(&explicit)).unwrap();
        assert_eq!(config.endpoint, "https://global.example.com/pipeline");
        assert_eq!(config.organization_id, Some(9));
    });
}

#[test]
fn test_environment_overrides_files() {
    let temp = TempDir::new().unwrap();
    write_global_config(temp.path(), "endpoint = \"https://global.example.com/pipeline\"\n");

    with_env(
        &[
            ("XDG_CONFIG_HOME", temp.path().to_str().unwrap()),
            ("PIPECTL_ENDPOINT", "https://env.example.com/pipeline"),
            ("PIPECTL_TOKEN", "env-token"),
            ("PIPECTL_HTTP__REQUEST_TIMEOUT_SECS", "5"),
        ],
        || {
            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.endpoint, "https://env.example.com/pipeline");
            assert_eq!(config.token.as_deref(), Some("env-token"));
            assert_eq!(config.http.request_timeout_secs, 5);
        },
    );
}

#[test]
fn test_invalid_layered_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let explicit = temp.path().join("broken.toml");
    fs::write(&explicit, "[http]\nconnect_timeout_secs = 0\n").unwrap();

    with_env(&[("XDG_CONFIG_HOME", temp.path().to_str().unwrap())], || {
        let err = ConfigLoader::load(Some(&explicit)).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("connect_timeout_secs"));
    });
}

#[test]
fn test_missing_explicit_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent.toml");

    let err = ConfigLoader::load(Some(&missing)).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Configuration error: Config file not found: {}", missing.display())
    );
}
