//! Declarative configuration, exactly as written in a configuration file.
//!
//! These types only describe shape. Cross-field rules, pattern compilation and
//! template parsing happen when a [`RawConfig`] is normalized into a
//! [`NormalizedConfig`](crate::NormalizedConfig).

mod entry;
pub(crate) mod helpers;
mod optimization;
mod output;
mod plugin;
mod resolve;
mod rules;
mod types;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;

use crate::dev::DevServerOptions;
use crate::error::ConfigError;

pub use entry::{DEFAULT_ENTRY_NAME, EntryDescriptor, EntryInput, EntryObject, EntryValue};
pub(crate) use entry::FlatEntry;
pub use optimization::{CacheGroupOptions, OptimizationOptions, SplitChunksOptions};
pub use output::OutputOptions;
pub use plugin::{PLUGIN_ORDER_RANGE, PluginInput, PluginOptions};
pub use resolve::{CacheOptions, ResolveOptions};
pub use rules::{ModuleOptions, RuleOptions, UseInput, UseObject};
pub use types::{AssetType, BoolOr, CacheType, ChunksKind, Mode, OneOrMany, RuntimeChunkKind};

/// Main configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    #[serde(default)]
    pub mode: Mode,

    /// Base directory for relative entry imports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<PathBuf>,

    /// Entry points (at least one is required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryInput>,

    #[serde(default)]
    pub output: OutputOptions,

    #[serde(default, skip_serializing_if = "ModuleOptions::is_empty")]
    pub module: ModuleOptions,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginInput>,

    /// Modules left out of the bundle, mapped to the global that provides them at runtime
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub externals: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerOptions>,

    /// Source map style, or `false` for none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<BoolOr<String>>,

    #[serde(default)]
    pub optimization: OptimizationOptions,

    /// Build cache: `false`, `true` (in-memory) or detailed options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<BoolOr<CacheOptions>>,

    #[serde(default, skip_serializing_if = "ResolveOptions::is_empty")]
    pub resolve: ResolveOptions,

    /// Named partial configurations merged over this one on request
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub profiles: IndexMap<String, Value>,
}

impl RawConfig {
    /// Create from serde_json::Value (for programmatic config from DB/API)
    ///
    /// # Example
    ///
    /// ```
    /// use knit_config::RawConfig;
    /// use serde_json::json;
    ///
    /// let raw = RawConfig::from_value(json!({
    ///     "entry": "./src/index.js",
    ///     "mode": "development"
    /// }))
    /// .unwrap();
    /// assert!(raw.entry.is_some());
    /// ```
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| {
            ConfigError::from(crate::ValidationErrors::from(
                crate::ValidationError::Malformed {
                    message: e.to_string(),
                },
            ))
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// A complete configuration exercising most options, used by `knit init`.
    pub fn example() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(
            "vendor".to_string(),
            EntryValue::Import(OneOrMany::Many(vec![
                "react".to_string(),
                "react-dom".to_string(),
            ])),
        );
        entries.insert(
            "app".to_string(),
            EntryValue::Object(EntryObject {
                import: OneOrMany::One("./src/index.js".to_string()),
                depend_on: Some(OneOrMany::One("vendor".to_string())),
                filename: None,
            }),
        );

        let mut cache_groups = IndexMap::new();
        cache_groups.insert(
            "vendors".to_string(),
            CacheGroupOptions {
                test: Some("/node_modules/".to_string()),
                name: Some("vendors".to_string()),
                chunks: Some(ChunksKind::All),
                priority: -10,
                reuse_existing_chunk: true,
                enforce: false,
            },
        );

        let mut externals = IndexMap::new();
        externals.insert("jquery".to_string(), "jQuery".to_string());

        let mut alias = IndexMap::new();
        alias.insert("@components".to_string(), "src/components".to_string());

        Self {
            mode: Mode::Production,
            context: None,
            entry: Some(EntryInput::Named(entries)),
            output: OutputOptions {
                path: PathBuf::from("dist"),
                filename: "[name].[contenthash:8].js".to_string(),
                chunk_filename: "[id].[contenthash:8].js".to_string(),
                asset_filename: "assets/[name].[hash:8][ext]".to_string(),
                public_path: "/".to_string(),
                clean: true,
            },
            module: ModuleOptions {
                rules: vec![
                    RuleOptions {
                        test: r"\.jsx?$".to_string(),
                        use_: None,
                        loader: Some("babel-loader".to_string()),
                        options: None,
                        kind: None,
                        include: None,
                        exclude: Some(OneOrMany::One("/node_modules/".to_string())),
                    },
                    RuleOptions {
                        test: r"/\.css$/i".to_string(),
                        use_: Some(OneOrMany::Many(vec![
                            UseInput::Name("style-loader".to_string()),
                            UseInput::Detailed(UseObject {
                                loader: "css-loader".to_string(),
                                options: Some(json!({ "modules": true })),
                            }),
                        ])),
                        loader: None,
                        options: None,
                        kind: None,
                        include: None,
                        exclude: None,
                    },
                    RuleOptions {
                        test: r"\.(png|svg|jpe?g|gif)$".to_string(),
                        use_: None,
                        loader: None,
                        options: None,
                        kind: Some(AssetType::Resource),
                        include: None,
                        exclude: None,
                    },
                ],
            },
            plugins: vec![PluginInput::Detailed(PluginOptions {
                name: "html".to_string(),
                options: Some(json!({ "template": "./public/index.html" })),
                order: 0,
                enabled: true,
            })],
            externals,
            dev_server: None,
            devtool: Some(BoolOr::Value("source-map".to_string())),
            optimization: OptimizationOptions {
                minimize: Some(true),
                runtime_chunk: Some(BoolOr::Value(RuntimeChunkKind::Single)),
                split_chunks: Some(BoolOr::Value(SplitChunksOptions {
                    chunks: ChunksKind::All,
                    cache_groups,
                    ..SplitChunksOptions::default()
                })),
            },
            cache: Some(BoolOr::Value(CacheOptions {
                kind: CacheType::Filesystem,
                cache_directory: Some(PathBuf::from(".cache/knit")),
                name: None,
            })),
            resolve: ResolveOptions {
                extensions: vec![".js".to_string(), ".jsx".to_string(), ".json".to_string()],
                alias,
            },
            profiles: IndexMap::from([(
                "development".to_string(),
                json!({
                    "mode": "development",
                    "devtool": "eval-cheap-module-source-map",
                    "output": { "filename": "[name].js" },
                    "dev_server": {
                        "port": 3000,
                        "history_api_fallback": true,
                        "proxy": {
                            "/api": { "target": "http://localhost:8080", "change_origin": true }
                        }
                    }
                }),
            )]),
        }
    }
}
