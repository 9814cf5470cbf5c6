use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::options::types::OneOrMany;

/// Name given to an entry written as a bare string or list.
pub const DEFAULT_ENTRY_NAME: &str = "main";

/// Entry points, in any of the accepted shapes:
///
/// ```toml
/// entry = "./src/index.js"                       # one entry named "main"
/// entry = ["./src/polyfills.js", "./src/index.js"]
///
/// [entry]
/// app = "./src/app.js"
/// admin = { import = "./src/admin.js", depend_on = "app" }
///
/// [[entry]]
/// name = "app"
/// import = "./src/app.js"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EntryInput {
    Single(String),
    List(Vec<String>),
    Descriptors(Vec<EntryDescriptor>),
    Named(IndexMap<String, EntryValue>),
}

/// Value of a named entry in the map form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EntryValue {
    Import(OneOrMany<String>),
    Object(EntryObject),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EntryObject {
    /// Module(s) loaded when the entry starts
    pub import: OneOrMany<String>,

    /// Entries whose modules this entry shares instead of bundling them again
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depend_on: Option<OneOrMany<String>>,

    /// Overrides `output.filename` for this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// An entry in the list-of-descriptors form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EntryDescriptor {
    pub name: String,

    pub import: OneOrMany<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depend_on: Option<OneOrMany<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// An entry before validation, with duplicates still present.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FlatEntry {
    pub name: String,
    pub imports: Vec<String>,
    pub depend_on: Vec<String>,
    pub filename: Option<String>,
}

impl EntryInput {
    /// Flattens every shape into `(name, body)` pairs in declaration order.
    pub(crate) fn flatten(&self) -> Vec<FlatEntry> {
        match self {
            EntryInput::Single(import) => vec![FlatEntry {
                name: DEFAULT_ENTRY_NAME.to_string(),
                imports: vec![import.clone()],
                depend_on: Vec::new(),
                filename: None,
            }],
            EntryInput::List(imports) if imports.is_empty() => Vec::new(),
            EntryInput::List(imports) => vec![FlatEntry {
                name: DEFAULT_ENTRY_NAME.to_string(),
                imports: imports.clone(),
                depend_on: Vec::new(),
                filename: None,
            }],
            EntryInput::Descriptors(descriptors) => descriptors
                .iter()
                .map(|d| FlatEntry {
                    name: d.name.clone(),
                    imports: d.import.to_vec(),
                    depend_on: d.depend_on.as_ref().map(OneOrMany::to_vec).unwrap_or_default(),
                    filename: d.filename.clone(),
                })
                .collect(),
            EntryInput::Named(map) => map
                .iter()
                .map(|(name, value)| match value {
                    EntryValue::Import(imports) => FlatEntry {
                        name: name.clone(),
                        imports: imports.to_vec(),
                        depend_on: Vec::new(),
                        filename: None,
                    },
                    EntryValue::Object(object) => FlatEntry {
                        name: name.clone(),
                        imports: object.import.to_vec(),
                        depend_on: object
                            .depend_on
                            .as_ref()
                            .map(OneOrMany::to_vec)
                            .unwrap_or_default(),
                        filename: object.filename.clone(),
                    },
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Vec<FlatEntry> {
        serde_json::from_value::<EntryInput>(value).unwrap().flatten()
    }

    #[test]
    fn string_entry_is_named_main() {
        let entries = parse(json!("./src/index.js"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "main");
        assert_eq!(entries[0].imports, vec!["./src/index.js"]);
    }

    #[test]
    fn list_entry_is_one_bundle() {
        let entries = parse(json!(["./a.js", "./b.js"]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].imports, vec!["./a.js", "./b.js"]);
    }

    #[test]
    fn named_entries_keep_order_and_details() {
        let entries = parse(json!({
            "vendor": ["react", "react-dom"],
            "app": { "import": "./src/app.js", "depend_on": "vendor", "filename": "app.[contenthash].js" }
        }));
        assert_eq!(entries[0].name, "vendor");
        assert_eq!(entries[1].name, "app");
        assert_eq!(entries[1].depend_on, vec!["vendor"]);
        assert_eq!(entries[1].filename.as_deref(), Some("app.[contenthash].js"));
    }

    #[test]
    fn descriptor_list_keeps_duplicates() {
        let entries = parse(json!([
            { "name": "app", "import": "./a.js" },
            { "name": "app", "import": "./b.js" }
        ]));
        assert_eq!(entries.len(), 2);
    }
}
