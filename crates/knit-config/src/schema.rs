//! JSON Schema for configuration files, for editor completion and validation.

use serde_json::Value;

use crate::options::RawConfig;

/// Generate JSON Schema for knit.config.json (and the TOML/YAML equivalents).
pub fn json_schema() -> Value {
    schemars::schema_for!(RawConfig).to_value()
}
