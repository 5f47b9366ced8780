//! Resource and model capabilities consumed by the field lifecycle.
//!
//! The decorator never duck-types its collaborators: a resource that can hand
//! out per-locale values advertises the [`TranslationStore`] capability
//! explicitly, and everything else degrades to generic dot-path access.

use serde_json::{Map, Value};

use crate::value::TranslationMap;

/// Read access to a bound record during display and edit resolution.
pub trait Resource {
    /// Look up a value by dot-path (e.g., `"title"` or `"meta.description"`).
    fn get(&self, path: &str) -> Option<Value>;

    /// The locale-aware read capability, when the resource has one.
    fn translations(&self) -> Option<&dyn TranslationStore> {
        None
    }
}

/// Locale-aware read capability.
pub trait TranslationStore {
    /// All stored translations for an attribute; empty when none exist.
    fn get_translations(&self, attribute: &str) -> TranslationMap;
}

/// Write access to a record during fill-on-save.
pub trait Model: Resource {
    /// Assign a value to an attribute.
    fn set(&mut self, attribute: &str, value: Value);

    /// The locale-aware write capability, when the model has one.
    fn translations_mut(&mut self) -> Option<&mut dyn TranslationStoreMut> {
        None
    }
}

/// Locale-aware write capability.
pub trait TranslationStoreMut {
    /// Replace the stored translations for an attribute.
    fn set_translations(&mut self, attribute: &str, translations: TranslationMap);
}

/// Nested dot-path lookup on a JSON value.
///
/// Object segments index by key, array segments by numeric index.
pub fn data_get(value: &Value, path: &str) -> Option<Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current.clone())
}

/// Nested dot-path assignment on a JSON value.
///
/// Missing or non-object intermediate segments are replaced with objects.
pub fn data_set(target: &mut Value, path: &str, value: Value) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    match path.split_once('.') {
        None => {
            if let Some(map) = target.as_object_mut() {
                map.insert(path.to_string(), value);
            }
        }
        Some((head, rest)) => {
            if let Some(map) = target.as_object_mut() {
                let entry = map.entry(head.to_string()).or_insert(Value::Null);
                data_set(entry, rest, value);
            }
        }
    }
}

/// A plain JSON-backed resource with no locale-aware capabilities.
///
/// Useful for hosts whose records are raw JSON documents, and as the
/// degraded-path collaborator in tests.
#[derive(Debug, Clone, Default)]
pub struct JsonResource {
    data: Value,
}

impl JsonResource {
    /// Wrap a JSON document.
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// The underlying document.
    pub fn data(&self) -> &Value {
        &self.data
    }
}

impl Resource for JsonResource {
    fn get(&self, path: &str) -> Option<Value> {
        data_get(&self.data, path)
    }
}

impl Model for JsonResource {
    fn set(&mut self, attribute: &str, value: Value) {
        data_set(&mut self.data, attribute, value);
    }
}
