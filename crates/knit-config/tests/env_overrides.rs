//! Environment variable overlays.
//!
//! Each test uses its own prefix and is serialized, since the process
//! environment is shared between test threads.

use knit_config::{ConfigError, ConfigLoader, Mode};
use serde_json::json;
use serial_test::serial;

struct EnvGuard(Vec<&'static str>);

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (key, value) in vars {
            // SAFETY: tests touching the environment run under #[serial]
            unsafe { std::env::set_var(key, value) };
        }
        Self(vars.iter().map(|(key, _)| *key).collect())
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.0 {
            // SAFETY: see EnvGuard::set
            unsafe { std::env::remove_var(key) };
        }
    }
}

fn base() -> serde_json::Value {
    json!({
        "entry": "./src/index.js",
        "output": { "path": "dist", "filename": "[name].[contenthash].js" },
        "profiles": { "development": { "mode": "development", "dev_server": { "port": 3000 } } }
    })
}

#[test]
#[serial]
fn env_overrides_nested_values() {
    let _env = EnvGuard::set(&[
        ("KNITTEST_A_OUTPUT__PATH", "build"),
        ("KNITTEST_A_MODE", "development"),
    ]);

    let config = ConfigLoader::new(base())
        .env_prefix("KNITTEST_A")
        .load()
        .expect("load");

    assert_eq!(config.mode(), Mode::Development);
    assert_eq!(config.output().path.to_str(), Some("build"));
    assert_eq!(config.output().filename.as_str(), "[name].[contenthash].js");
}

#[test]
#[serial]
fn env_is_applied_after_the_profile() {
    let _env = EnvGuard::set(&[("KNITTEST_B_DEV_SERVER__PORT", "8080")]);

    let config = ConfigLoader::new(base())
        .profile("development")
        .env_prefix("KNITTEST_B_")
        .load()
        .expect("load");

    let server = config.dev_server().expect("dev server");
    assert_eq!(server.port, Some(8080));
}

#[test]
#[serial]
fn env_is_ignored_unless_requested() {
    let _env = EnvGuard::set(&[("KNITTEST_C_MODE", "development")]);

    let config = ConfigLoader::new(base()).load().expect("load");
    assert_eq!(config.mode(), Mode::Production);
}

#[test]
#[serial]
fn invalid_env_values_fail_validation() {
    let _env = EnvGuard::set(&[("KNITTEST_D_DEV_SERVER__PORT", "not-a-port")]);

    let err = ConfigLoader::new(base())
        .profile("development")
        .env_prefix("KNITTEST_D")
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
