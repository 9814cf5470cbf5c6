use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::options::types::{AssetType, OneOrMany};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModuleOptions {
    /// Rules applied to every module whose path matches
    #[serde(default)]
    pub rules: Vec<RuleOptions>,
}

impl ModuleOptions {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Matches module paths and says how to process them
///
/// Exactly one of `use` or `loader` names the loaders; a rule can instead
/// rely on a built-in `type` such as `asset/resource`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RuleOptions {
    /// Pattern tested against the module path
    pub test: String,

    /// Loader chain, applied last to first
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_: Option<OneOrMany<UseInput>>,

    /// Shorthand for a single loader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,

    /// Options for the `loader` shorthand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,

    /// Built-in module type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AssetType>,

    /// Only apply to paths matching one of these patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<OneOrMany<String>>,

    /// Never apply to paths matching one of these patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<OneOrMany<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum UseInput {
    Name(String),
    Detailed(UseObject),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UseObject {
    pub loader: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl UseInput {
    pub fn loader(&self) -> &str {
        match self {
            UseInput::Name(name) => name,
            UseInput::Detailed(object) => &object.loader,
        }
    }

    pub fn options(&self) -> Option<&Value> {
        match self {
            UseInput::Name(_) => None,
            UseInput::Detailed(object) => object.options.as_ref(),
        }
    }
}
