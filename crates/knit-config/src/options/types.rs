use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Build mode, selects production or development defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    /// Optimized output (default)
    #[default]
    Production,
    /// No mode-specific defaults
    None,
}

impl Mode {
    pub fn is_production(self) -> bool {
        self == Mode::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
            Mode::None => "none",
        }
    }
}

/// A single value or a list of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    // lists first, so a struct `T` is never read from a sequence
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.clone().into_vec()
    }

    /// Collapses single-element lists back to `One`.
    pub fn from_vec(mut values: Vec<T>) -> Self {
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return OneOrMany::One(value);
            }
        }
        OneOrMany::Many(values)
    }
}

/// `false`/`true` or a detailed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum BoolOr<T> {
    Bool(bool),
    Value(T),
}

/// Which chunks take part in splitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChunksKind {
    All,
    /// On-demand chunks only (default)
    #[default]
    Async,
    Initial,
}

/// How the runtime is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeChunkKind {
    /// One runtime chunk shared by every entry
    Single,
    /// One runtime chunk per entry
    Multiple,
}

/// Built-in module handling for rules without loaders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AssetType {
    #[serde(rename = "asset")]
    Asset,
    #[serde(rename = "asset/resource")]
    Resource,
    #[serde(rename = "asset/inline")]
    Inline,
    #[serde(rename = "asset/source")]
    Source,
    #[serde(rename = "javascript/auto")]
    JavascriptAuto,
    #[serde(rename = "json")]
    Json,
}

/// Cache storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    #[default]
    Memory,
    Filesystem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_or_many_accepts_both_shapes() {
        let one: OneOrMany<String> = serde_json::from_str("\"a\"").unwrap();
        let many: OneOrMany<String> = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(one.into_vec(), vec!["a"]);
        assert_eq!(many.into_vec(), vec!["a", "b"]);
    }

    #[test]
    fn from_vec_collapses_single_values() {
        assert_eq!(OneOrMany::from_vec(vec![1]), OneOrMany::One(1));
        assert_eq!(OneOrMany::from_vec(vec![1, 2]), OneOrMany::Many(vec![1, 2]));
    }

    #[test]
    fn asset_type_uses_slash_names() {
        assert_eq!(
            serde_json::to_string(&AssetType::Resource).unwrap(),
            "\"asset/resource\""
        );
    }
}
