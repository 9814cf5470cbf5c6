use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::options::types::CacheType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ResolveOptions {
    /// Extensions tried, in order, for extensionless imports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,

    /// Import prefix replacements (e.g., "@components" -> "src/components")
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub alias: IndexMap<String, String>,
}

impl ResolveOptions {
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty() && self.alias.is_empty()
    }
}

/// Build cache configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CacheOptions {
    #[serde(rename = "type", default)]
    pub kind: CacheType,

    /// Where the filesystem cache lives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_directory: Option<PathBuf>,

    /// Separate caches for different configurations in one directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
