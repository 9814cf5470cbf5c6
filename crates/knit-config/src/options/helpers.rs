use std::path::PathBuf;

// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_output_path() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_filename() -> String {
    "[name].js".to_string()
}

pub(crate) fn default_chunk_filename() -> String {
    "[id].js".to_string()
}

pub(crate) fn default_asset_filename() -> String {
    "assets/[hash][ext][query]".to_string()
}

pub(crate) fn default_public_path() -> String {
    "auto".to_string()
}

pub(crate) fn default_host() -> String {
    "localhost".to_string()
}

pub(crate) fn default_min_size() -> u64 {
    20_000
}

pub(crate) fn default_min_chunks() -> u32 {
    1
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_zero_i32(value: &i32) -> bool {
    *value == 0
}
