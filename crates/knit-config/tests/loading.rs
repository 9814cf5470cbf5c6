//! Loading configuration files in every supported format.

use std::fs;
use std::path::PathBuf;

use knit_config::{ConfigError, ConfigLoader, Format, Mode, ValidationError, load, load_str};
use tempfile::TempDir;

const TOML_CONFIG: &str = r#"
mode = "development"
entry = { app = "./src/app.js", vendor = ["react", "react-dom"] }
devtool = "cheap-module-source-map"

[output]
path = "build"
filename = "[name].[contenthash:8].js"
public_path = "/assets/"

[[module.rules]]
test = "\\.tsx?$"
use = ["babel-loader", { loader = "ts-loader", options = { transpile_only = true } }]
exclude = "node_modules"

[[plugins]]
name = "html"
order = 10

[externals]
jquery = "jQuery"
"#;

#[test]
fn loads_toml_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("knit.config.toml");
    fs::write(&path, TOML_CONFIG).expect("write config");

    let config = load(&path).expect("load");

    assert_eq!(config.mode(), Mode::Development);
    assert_eq!(config.context(), Some(dir.path()));
    assert_eq!(
        config.entries().keys().collect::<Vec<_>>(),
        vec!["app", "vendor"]
    );
    assert_eq!(config.entry("vendor").expect("vendor").imports, vec!["react", "react-dom"]);
    assert_eq!(config.output().path, PathBuf::from("build"));
    assert_eq!(config.output().public_path, "/assets/");

    let rule = &config.rules()[0];
    assert_eq!(
        rule.loaders.iter().map(|l| l.loader.as_str()).collect::<Vec<_>>(),
        vec!["babel-loader", "ts-loader"]
    );
    assert!(rule.matches("src/app.tsx"));
    assert!(!rule.matches("node_modules/lib/index.ts"));

    assert_eq!(config.plugins()[0].name, "html");
    assert_eq!(config.external("jquery").expect("jquery").global, "jQuery");
    assert!(config.devtool().expect("devtool").is_cheap());
}

#[test]
fn json_and_yaml_load_the_same_configuration() {
    let json = r#"{
        "entry": { "main": "./index.js" },
        "output": { "filename": "[name].[contenthash].js" },
        "plugins": ["define", { "name": "minify", "order": -5 }]
    }"#;
    let yaml = r#"
entry:
  main: ./index.js
output:
  filename: "[name].[contenthash].js"
plugins:
  - define
  - name: minify
    order: -5
"#;

    let from_json = load_str(json, Format::Json).expect("json");
    let from_yaml = load_str(yaml, Format::Yaml).expect("yaml");
    assert_eq!(from_json, from_yaml);

    let names: Vec<_> = from_json.plugins().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["minify", "define"]);
}

#[test]
fn relative_context_is_resolved_against_the_file() {
    let dir = TempDir::new().expect("tempdir");
    let nested = dir.path().join("config");
    fs::create_dir_all(&nested).expect("mkdir");
    let path = nested.join("knit.config.json");
    fs::write(&path, r#"{ "context": "../web", "entry": "./index.js" }"#).expect("write config");

    let config = load(&path).expect("load");
    assert_eq!(config.context(), Some(nested.join("../web").as_path()));
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("knit.config.toml");

    let err = load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(p) if p == path));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("knit.config.ini");
    fs::write(&path, "entry=./a.js").expect("write config");

    let err = load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "ini"));
}

#[test]
fn syntax_errors_name_the_format() {
    let err = load_str("entry = ", Format::Toml).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { format: Format::Toml, .. }));
    assert!(err.to_string().contains("TOML"));
}

#[test]
fn duplicate_json_keys_are_reported_with_other_problems() {
    let content = r#"{
        "entry": { "app": "./a.js", "app": "./b.js" },
        "output": { "path": "" }
    }"#;

    let err = load_str(content, Format::Json).unwrap_err();
    let errors = err.validation_errors().expect("validation errors").clone().into_vec();

    assert_eq!(errors[0], ValidationError::DuplicateEntry { name: "app".into() });
    assert!(errors.iter().any(
        |e| matches!(e, ValidationError::MissingField { field, .. } if field == "output.path")
    ));
}

#[test]
fn unknown_keys_are_invalid() {
    let err = ConfigLoader::new(serde_json::json!({ "entry": "./a.js", "entrypoint": "./b.js" }))
        .load()
        .unwrap_err();
    assert!(err.validation_errors().is_some());
    assert!(err.to_string().contains("entrypoint"));
}

#[test]
fn duplicate_yaml_keys_are_validation_errors() {
    let err = load_str("entry:\n  app: ./a.js\n  app: ./b.js\n", Format::Yaml).unwrap_err();
    let errors = err.validation_errors().expect("validation errors").clone().into_vec();
    assert_eq!(errors[0], ValidationError::DuplicateEntry { name: "app".into() });
}

#[test]
fn escape_without_closing_backslash_is_an_invalid_template() {
    let content = r#"
entry = "./a.js"

[output]
filename = "[\\]x[name].js"
"#;
    let err = load_str(content, Format::Toml).unwrap_err();
    let errors = err.validation_errors().expect("validation errors").clone().into_vec();
    assert!(errors.iter().any(|e| matches!(
        e,
        ValidationError::InvalidTemplate { field, template, .. }
            if field == "output.filename" && template == "[\\]x[name].js"
    )));
}
