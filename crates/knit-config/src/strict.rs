//! Duplicate key detection for JSON and YAML documents.
//!
//! Deserializing into `serde_json::Value` keeps the last value of a repeated
//! key without complaint, which would let `{"entry": {"app": ..., "app": ...}}`
//! silently drop an entry. This walks the document once more and records
//! every repeated key path.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

/// Key paths (object keys and array indices) declared more than once in `content`.
pub(crate) fn duplicate_keys(content: &str) -> Result<Vec<Vec<String>>, serde_json::Error> {
    let mut found = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(content);
    KeyScan {
        path: Vec::new(),
        found: &mut found,
    }
    .deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(found)
}

/// Key paths declared more than once in a YAML document.
pub(crate) fn duplicate_yaml_keys(content: &str) -> Result<Vec<Vec<String>>, serde_yaml::Error> {
    let mut found = Vec::new();
    KeyScan {
        path: Vec::new(),
        found: &mut found,
    }
    .deserialize(serde_yaml::Deserializer::from_str(content))?;
    Ok(found)
}

struct KeyScan<'a> {
    path: Vec<String>,
    found: &'a mut Vec<Vec<String>>,
}

impl KeyScan<'_> {
    fn child(&mut self, segment: String) -> KeyScan<'_> {
        let mut path = self.path.clone();
        path.push(segment);
        KeyScan {
            path,
            found: &mut *self.found,
        }
    }
}

impl<'de> DeserializeSeed<'de> for KeyScan<'_> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for KeyScan<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<(), E> {
        Ok(())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<(), E> {
        Ok(())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<(), E> {
        Ok(())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<(), E> {
        Ok(())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<(), E> {
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        self.deserialize(deserializer)
    }

    fn visit_seq<A>(mut self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut index = 0usize;
        while seq.next_element_seed(self.child(index.to_string()))?.is_some() {
            index += 1;
        }
        Ok(())
    }

    fn visit_map<A>(mut self, mut map: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            if !seen.insert(key.clone()) {
                let mut path = self.path.clone();
                path.push(key.clone());
                self.found.push(path);
            }
            map.next_value_seed(self.child(key))?;
        }
        Ok(())
    }
}
