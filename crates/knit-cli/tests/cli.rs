//! End-to-end tests for the `knit` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn knit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("knit").expect("binary");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

fn project(config: &str) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("knit.config.toml"), config).expect("write config");
    dir
}

#[test]
fn check_accepts_valid_config() {
    let dir = project("entry = \"./src/index.js\"\n");

    knit(&dir)
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration is valid (1 entry, production mode)"));
}

#[test]
fn check_lists_every_validation_error() {
    let dir = project(
        r#"
devtool = "sourcemap"

[entry]
app = "./a.js"
admin = []

[output]
filename = "[name].[nope].js"
"#,
    );

    knit(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 errors"))
        .stderr(predicate::str::contains("admin"))
        .stderr(predicate::str::contains("[nope]").or(predicate::str::contains("nope")))
        .stderr(predicate::str::contains("devtool"));
}

#[test]
fn check_without_config_fails() {
    let dir = TempDir::new().expect("tempdir");

    knit(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("knit init"));
}

#[test]
fn check_reports_lints() {
    let dir = project("entry = \"./src/index.js\"\n[optimization]\nminimize = false\n");

    knit(&dir)
        .args(["check", "--lints"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[no-content-hash]"))
        .stderr(predicate::str::contains("[unminified-production]"));
}

#[test]
fn check_with_fs_flag_finds_missing_files() {
    let dir = project("entry = \"./src/index.js\"\n");

    knit(&dir)
        .args(["check", "--fs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn check_unknown_profile_fails() {
    let dir = project("entry = \"./src/index.js\"\n");

    knit(&dir)
        .args(["check", "--profile", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn print_applies_profile_and_env() {
    let dir = project(
        r#"
entry = "./src/index.js"

[profiles.development]
mode = "development"
"#,
    );

    let output = knit(&dir)
        .args(["print", "--profile", "development", "--env"])
        .env("KNIT_OUTPUT__PATH", "build")
        .output()
        .expect("run knit");
    assert!(output.status.success());

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(printed["mode"], "development");
    assert_eq!(printed["output"]["path"], "build");
    assert_eq!(printed["entry"]["main"], "./src/index.js");
}

#[test]
fn print_yaml() {
    let dir = project("entry = \"./src/index.js\"\n");

    knit(&dir)
        .args(["print", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main: ./src/index.js"));
}

#[test]
fn explicit_config_path() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("config")).expect("mkdir");
    fs::write(dir.path().join("config/build.json"), r#"{ "entry": { "web": "./web.js" } }"#)
        .expect("write config");

    knit(&dir)
        .args(["print", "--config", "config/build.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"web\""));

    knit(&dir)
        .args(["check", "--config", "config/missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn schema_is_json() {
    let dir = TempDir::new().expect("tempdir");

    let output = knit(&dir).arg("schema").output().expect("run knit");
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json schema");
    assert!(schema["properties"]["entry"].is_object());
}

#[test]
fn init_then_check() {
    let dir = TempDir::new().expect("tempdir");

    knit(&dir)
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("knit.config.toml"));

    knit(&dir)
        .args(["check", "--lints"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No lints found"));

    knit(&dir)
        .args(["check", "--profile", "development"])
        .assert()
        .success()
        .stderr(predicate::str::contains("development mode"));

    knit(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    knit(&dir).args(["init", "--force"]).assert().success();
}

#[test]
fn init_json_into_directory() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("web")).expect("mkdir");

    knit(&dir)
        .args(["init", "--format", "json", "--dir", "web"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("web/knit.config.json")).expect("read config");
    let value: serde_json::Value = serde_json::from_str(&written).expect("json");
    assert!(value["entry"]["app"].is_object());
}
