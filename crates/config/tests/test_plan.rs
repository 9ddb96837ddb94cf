//! Test plan for the `alumnet-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, and environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use alumnet_config::load;

const ENV_VARS_TO_RESET: &[&str] = &[
    "ALUMNET_CONFIG",
    "ALUMNET__AUTH__SESSION_TTL_SECONDS",
    "ALUMNET__DATABASE__MAX_CONNECTIONS",
    "ALUMNET__DATABASE__URL",
    "ALUMNET__HTTP__ADDRESS",
    "ALUMNET__HTTP__PORT",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

#[test]
#[serial]
fn loads_defaults_when_nothing_is_configured() {
    let mut ctx = TestContext::new();
    ctx.reset_environment();

    let temp_dir = TempDir::new().unwrap();
    ctx.set_current_dir(temp_dir.path());

    let config = load().expect("defaults should load");

    assert_eq!(config.http.address, "127.0.0.1");
    assert_eq!(config.http.port, 7080);
    assert_eq!(config.database.url, "sqlite://alumnet.db");
    assert_eq!(config.database.max_connections, 10);
    assert_eq!(config.auth.session_ttl_seconds, 86_400);
}

#[test]
#[serial]
fn loads_file_referenced_by_env_var() {
    let mut ctx = TestContext::new();
    ctx.reset_environment();

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(
        &config_path,
        r#"
[http]
address = "0.0.0.0"
port = 9000

[database]
url = "sqlite://custom.db"
max_connections = 4
"#,
    )
    .unwrap();

    ctx.set_var("ALUMNET_CONFIG", config_path.display().to_string());

    let config = load().expect("config file should load");

    assert_eq!(config.http.address, "0.0.0.0");
    assert_eq!(config.http.port, 9000);
    assert_eq!(config.database.url, "sqlite://custom.db");
    assert_eq!(config.database.max_connections, 4);
}

#[test]
#[serial]
fn discovers_file_in_working_directory() {
    let mut ctx = TestContext::new();
    ctx.reset_environment();

    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("alumnet.toml"),
        r#"
[http]
port = 8123
"#,
    )
    .unwrap();
    ctx.set_current_dir(temp_dir.path());

    let config = load().expect("discovered file should load");

    assert_eq!(config.http.port, 8123);
    // Untouched sections keep their defaults.
    assert_eq!(config.http.address, "127.0.0.1");
}

#[test]
#[serial]
fn environment_overrides_take_precedence() {
    let mut ctx = TestContext::new();
    ctx.reset_environment();

    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("alumnet.toml"),
        r#"
[http]
port = 8123
"#,
    )
    .unwrap();
    ctx.set_current_dir(temp_dir.path());
    ctx.set_var("ALUMNET__HTTP__PORT", "9999");
    ctx.set_var("ALUMNET__AUTH__SESSION_TTL_SECONDS", "3600");

    let config = load().expect("overridden config should load");

    assert_eq!(config.http.port, 9999);
    assert_eq!(config.auth.session_ttl_seconds, 3600);
}
