//! Configuration layering.
//!
//! A parsed document is layered before it is deserialized: the selected
//! profile is merged over the base, then environment overrides over the
//! result. Both work on JSON values so that a layer only has to spell out the
//! keys it changes.

use figment::Figment;
use figment::providers::Env;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Merges the profile `name` from the document's `profiles` table over the document.
pub(crate) fn apply_profile(document: &mut Value, name: &str) -> Result<()> {
    let overrides = document
        .get("profiles")
        .and_then(|profiles| profiles.get(name))
        .cloned()
        .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

    match &overrides {
        Value::Null => return Ok(()),
        Value::Object(map) if map.contains_key("profiles") => {
            return Err(ConfigError::InvalidProfileOverride {
                message: format!("profile '{name}' cannot declare nested profiles"),
            });
        }
        Value::Object(_) => {}
        other => {
            return Err(ConfigError::InvalidProfileOverride {
                message: format!("profile '{name}' must be a table, found {}", kind(other)),
            });
        }
    }

    debug!(profile = name, "applying profile");
    merge_values(document, &overrides);
    Ok(())
}

/// Overlays `PREFIX_SECTION__KEY=value` environment variables on the document.
///
/// Keys are lowercased and `__` separates nesting levels, so
/// `KNIT_DEV_SERVER__PORT=8080` sets `dev_server.port`. Values are parsed the
/// way figment parses them: numbers, booleans and arrays keep their type.
pub(crate) fn apply_env(document: &mut Value, prefix: &str) -> Result<()> {
    let prefix = env_prefix(prefix);
    let overlay: Map<String, Value> = Figment::from(Env::prefixed(&prefix).split("__"))
        .extract()
        .map_err(|e| ConfigError::Env(e.to_string()))?;

    if overlay.is_empty() {
        return Ok(());
    }

    debug!(
        prefix = %prefix,
        keys = ?overlay.keys().collect::<Vec<_>>(),
        "applying environment overrides"
    );
    merge_values(document, &Value::Object(overlay));
    Ok(())
}

fn env_prefix(prefix: &str) -> String {
    if prefix.ends_with('_') {
        prefix.to_string()
    } else {
        format!("{prefix}_")
    }
}

/// Deep merge: objects merge key by key, any other value replaces the target.
pub(crate) fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}
