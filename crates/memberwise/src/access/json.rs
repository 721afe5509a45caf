//! [`Inspect`] for `serde_json::Value`, so JSON documents can be validated
//! without converting them first.

use serde_json::Value as Json;

use super::{AccessStrategy, Inspect, Lookup};
use crate::foundation::Value;
use crate::path::Key;

impl Inspect for Json {
    fn lookup(&self, key: &Key) -> Lookup<'_> {
        match (self, key) {
            (Json::Object(map), Key::Name(name)) => {
                Lookup::borrowed(map.get(&**name).map(|v| v as &dyn Inspect))
            }
            (Json::Array(items), Key::Index(i)) => {
                Lookup::borrowed(items.get(*i).map(|v| v as &dyn Inspect))
            }
            (Json::Null, _) => Lookup::Missing,
            _ => Lookup::Unsupported,
        }
    }

    fn access_strategy(&self, key: &Key) -> Option<AccessStrategy> {
        match (self, key) {
            (Json::Object(_), Key::Name(_)) | (Json::Array(_), Key::Index(_)) => {
                Some(AccessStrategy::At)
            }
            _ => None,
        }
    }

    fn contains_key(&self, key: &Key) -> Option<bool> {
        match (self, key) {
            (Json::Object(map), Key::Name(name)) => Some(map.contains_key(&**name)),
            (Json::Array(items), Key::Index(i)) => Some(*i < items.len()),
            (Json::Null, _) => Some(false),
            _ => None,
        }
    }

    fn value(&self) -> Value {
        Value::from(self)
    }

    fn size(&self) -> Option<usize> {
        match self {
            Json::String(s) => Some(s.chars().count()),
            Json::Array(items) => Some(items.len()),
            Json::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    fn element_keys(&self) -> Option<Vec<Key>> {
        match self {
            Json::Object(map) => Some(map.keys().cloned().map(Key::from).collect()),
            Json::Array(items) => Some((0..items.len()).map(Key::Index).collect()),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Json::Null => "json null",
            Json::Bool(_) => "json bool",
            Json::Number(_) => "json number",
            Json::String(_) => "json string",
            Json::Array(_) => "json array",
            Json::Object(_) => "json object",
        }
    }
}
