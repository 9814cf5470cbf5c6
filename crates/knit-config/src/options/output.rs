use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::options::helpers::{
    default_asset_filename, default_chunk_filename, default_filename, default_output_path,
    default_public_path, is_false,
};

/// Where and under which names bundles are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OutputOptions {
    /// Output directory for generated files
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Filename template for entry chunks
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Filename template for non-entry chunks
    #[serde(default = "default_chunk_filename")]
    pub chunk_filename: String,

    /// Filename template for emitted assets
    #[serde(default = "default_asset_filename")]
    pub asset_filename: String,

    /// URL prefix the runtime uses to load chunks and assets ("auto" detects it at runtime)
    #[serde(default = "default_public_path")]
    pub public_path: String,

    /// Empty the output directory before emitting
    #[serde(default, skip_serializing_if = "is_false")]
    pub clean: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            filename: default_filename(),
            chunk_filename: default_chunk_filename(),
            asset_filename: default_asset_filename(),
            public_path: default_public_path(),
            clean: false,
        }
    }
}
