//! Best-practice advisories for configurations that are valid but probably
//! not what was meant.

use std::fmt;

use indexmap::IndexSet;

use crate::normalized::NormalizedConfig;
use crate::options::ChunksKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintCode {
    NoContentHash,
    HotInProduction,
    EvalSourceMapInProduction,
    PublicPathTrailingSlash,
    ExternalBundled,
    SplitChunksDisabled,
    UnminifiedProduction,
}

impl LintCode {
    pub fn as_str(self) -> &'static str {
        match self {
            LintCode::NoContentHash => "no-content-hash",
            LintCode::HotInProduction => "hot-in-production",
            LintCode::EvalSourceMapInProduction => "eval-source-map-in-production",
            LintCode::PublicPathTrailingSlash => "public-path-trailing-slash",
            LintCode::ExternalBundled => "external-bundled",
            LintCode::SplitChunksDisabled => "split-chunks-disabled",
            LintCode::UnminifiedProduction => "unminified-production",
        }
    }
}

impl fmt::Display for LintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lint {
    pub code: LintCode,
    pub message: String,
}

impl Lint {
    fn new(code: LintCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Advisories for `config`, in a stable order.
pub fn lint(config: &NormalizedConfig) -> Vec<Lint> {
    let mut lints = Vec::new();
    let production = config.mode().is_production();
    let output = config.output();

    if production {
        let templates: IndexSet<_> = config
            .entries()
            .values()
            .map(|entry| output.filename_for(entry))
            .filter(|template| !template.is_content_addressed())
            .map(|template| template.as_str())
            .collect();
        for template in templates {
            lints.push(Lint::new(
                LintCode::NoContentHash,
                format!(
                    "'{template}' has no [contenthash]; browsers may keep serving stale bundles after a deploy"
                ),
            ));
        }
    }

    if production && config.dev_server().is_some_and(|server| server.hot) {
        lints.push(Lint::new(
            LintCode::HotInProduction,
            "hot module replacement is enabled in production mode; move dev_server into a development profile",
        ));
    }

    if let Some(style) = config.devtool().filter(|style| production && style.is_eval()) {
        lints.push(Lint::new(
            LintCode::EvalSourceMapInProduction,
            format!("devtool '{style}' wraps modules in eval; use 'source-map' or 'hidden-source-map' in production"),
        ));
    }

    let public_path = output.public_path.as_str();
    if !public_path.is_empty() && public_path != "auto" && !public_path.ends_with('/') {
        lints.push(Lint::new(
            LintCode::PublicPathTrailingSlash,
            format!("public path '{public_path}' does not end with '/'; chunk URLs will be joined without a separator"),
        ));
    }

    for external in config.externals() {
        let bundled = config
            .entries()
            .values()
            .find(|entry| entry.imports.iter().any(|import| import == &external.module));
        if let Some(entry) = bundled {
            lints.push(Lint::new(
                LintCode::ExternalBundled,
                format!(
                    "'{}' is external but entry '{}' imports it directly; it will not be bundled",
                    external.module, entry.name
                ),
            ));
        }
    }

    let optimization = config.optimization();
    let shares_nothing = optimization
        .split_chunks
        .as_ref()
        .is_none_or(|split| split.chunks == ChunksKind::Async);
    if config.entries().len() > 1 && optimization.runtime_chunk.is_none() && shares_nothing {
        lints.push(Lint::new(
            LintCode::SplitChunksDisabled,
            "several entries but no shared initial chunks; modules used by more than one entry are bundled into each (set split_chunks.chunks = \"all\")",
        ));
    }

    if production && !optimization.minimize {
        lints.push(Lint::new(
            LintCode::UnminifiedProduction,
            "minimize is off in production mode",
        ));
    }

    lints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigLoader, RawConfig, load_value};
    use serde_json::json;

    fn codes(value: serde_json::Value) -> Vec<LintCode> {
        lint(&load_value(value).unwrap())
            .into_iter()
            .map(|lint| lint.code)
            .collect()
    }

    #[test]
    fn example_is_clean() {
        let config = ConfigLoader::new(RawConfig::example()).load().unwrap();
        assert_eq!(lint(&config), Vec::new());
    }

    #[test]
    fn production_defaults_lack_content_hash() {
        assert_eq!(codes(json!({ "entry": "./a.js" })), vec![LintCode::NoContentHash]);
        assert!(codes(json!({ "entry": "./a.js", "mode": "development" })).is_empty());
    }

    #[test]
    fn production_only_lints() {
        let codes = codes(json!({
            "entry": "./a.js",
            "output": { "filename": "[name].[contenthash].js" },
            "dev_server": {},
            "devtool": "eval-source-map",
            "optimization": { "minimize": false }
        }));
        assert_eq!(
            codes,
            vec![
                LintCode::HotInProduction,
                LintCode::EvalSourceMapInProduction,
                LintCode::UnminifiedProduction,
            ]
        );
    }

    #[test]
    fn public_path_and_externals() {
        let codes = codes(json!({
            "mode": "development",
            "entry": ["./a.js", "react"],
            "output": { "public_path": "/static" },
            "externals": { "react": "React" }
        }));
        assert_eq!(
            codes,
            vec![LintCode::PublicPathTrailingSlash, LintCode::ExternalBundled]
        );
    }

    #[test]
    fn several_entries_without_sharing() {
        let config = json!({
            "mode": "development",
            "entry": { "a": "./a.js", "b": "./b.js" }
        });
        assert_eq!(codes(config), vec![LintCode::SplitChunksDisabled]);

        let shared = json!({
            "mode": "development",
            "entry": { "a": "./a.js", "b": "./b.js" },
            "optimization": { "split_chunks": { "chunks": "all" } }
        });
        assert!(codes(shared).is_empty());
    }

    #[test]
    fn each_template_lacking_a_hash_is_reported_once() {
        let config = ConfigLoader::new(json!({
            "entry": {
                "a": "./a.js",
                "b": { "import": "./b.js", "filename": "b.js" },
                "c": "./c.js"
            }
        }))
        .load()
        .unwrap();
        let messages: Vec<_> = lint(&config)
            .into_iter()
            .filter(|lint| lint.code == LintCode::NoContentHash)
            .map(|lint| lint.message)
            .collect();
        assert_eq!(messages.len(), 2, "{messages:?}");
        assert!(messages[0].starts_with("'[name].js'"));
        assert!(messages[1].starts_with("'b.js'"));
    }

    #[test]
    fn display_includes_code() {
        let lint = Lint::new(LintCode::UnminifiedProduction, "x");
        assert_eq!(lint.to_string(), "[unminified-production] x");
    }
}
