use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::options::helpers::{default_min_chunks, default_min_size, is_false, is_zero_i32};
use crate::options::types::{BoolOr, ChunksKind, RuntimeChunkKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OptimizationOptions {
    /// Minify output (defaults to on in production)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimize: Option<bool>,

    /// Extract the runtime into its own chunk: `false`, `"single"` or `"multiple"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_chunk: Option<BoolOr<RuntimeChunkKind>>,

    /// Shared chunk extraction, `false` disables it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_chunks: Option<BoolOr<SplitChunksOptions>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SplitChunksOptions {
    #[serde(default)]
    pub chunks: ChunksKind,

    /// Smallest chunk worth extracting, in bytes
    #[serde(default = "default_min_size")]
    pub min_size: u64,

    /// Try to split chunks larger than this (0 = no limit)
    #[serde(default)]
    pub max_size: u64,

    /// Minimum number of chunks that must share a module
    #[serde(default = "default_min_chunks")]
    pub min_chunks: u32,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub cache_groups: IndexMap<String, CacheGroupOptions>,
}

impl Default for SplitChunksOptions {
    fn default() -> Self {
        Self {
            chunks: ChunksKind::default(),
            min_size: default_min_size(),
            max_size: 0,
            min_chunks: default_min_chunks(),
            cache_groups: IndexMap::new(),
        }
    }
}

/// A named bucket shared modules are moved into
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CacheGroupOptions {
    /// Pattern selecting the modules of this group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    /// Chunk name (defaults to the group key)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Overrides `split_chunks.chunks` for this group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<ChunksKind>,

    /// Higher priority groups win when a module matches several
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub priority: i32,

    #[serde(default, skip_serializing_if = "is_false")]
    pub reuse_existing_chunk: bool,

    /// Ignore size and count limits for this group
    #[serde(default, skip_serializing_if = "is_false")]
    pub enforce: bool,
}
