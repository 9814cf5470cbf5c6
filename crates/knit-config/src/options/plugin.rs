use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::options::helpers::{default_true, is_zero_i32};

/// Plugin order values outside this range are rejected.
pub const PLUGIN_ORDER_RANGE: std::ops::RangeInclusive<i32> = -1000..=1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PluginInput {
    Name(String),
    Detailed(PluginOptions),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PluginOptions {
    /// Name the build engine resolves the plugin by
    pub name: String,

    /// Plugin-specific options, forwarded untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,

    /// Execution order (lower values run earlier)
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub order: i32,

    /// Whether the plugin should be loaded
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl PluginInput {
    pub(crate) fn into_options(self) -> PluginOptions {
        match self {
            PluginInput::Name(name) => PluginOptions {
                name,
                options: None,
                order: 0,
                enabled: true,
            },
            PluginInput::Detailed(options) => options,
        }
    }
}
