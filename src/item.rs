//! A concrete content record with translation storage.
//!
//! [`Item`] is the reference model for hosts whose records keep dynamic
//! fields as JSON. Translated attributes store their locale → value map
//! directly in the field JSON, so the record itself satisfies the
//! translation-store capabilities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::resource::{Model, Resource, TranslationStore, TranslationStoreMut, data_get};
use crate::value::{TranslationMap, value_to_map};

/// A content record with dynamic JSON fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (UUIDv7, time-sortable).
    pub id: Uuid,

    /// Content type machine name (e.g., "blog", "page").
    pub item_type: String,

    /// Item title.
    pub title: String,

    /// Dynamic fields as key-value pairs. Translated attributes hold their
    /// locale → value map here.
    pub fields: HashMap<String, Value>,

    /// Publication status (0 = unpublished, 1 = published).
    pub status: i32,

    /// Unix timestamp when created.
    pub created: i64,

    /// Unix timestamp when last changed.
    pub changed: i64,
}

impl Item {
    /// Create a new item with empty fields.
    pub fn new(item_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            item_type: item_type.into(),
            title: title.into(),
            fields: HashMap::new(),
            status: 1,
            created: 0,
            changed: 0,
        }
    }

    /// Get a field value as a specific type.
    pub fn get_field<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Option<T> {
        self.fields
            .get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set a field value.
    pub fn set_field<T: Serialize>(&mut self, name: &str, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(name.to_string(), v);
        }
    }
}

impl Resource for Item {
    fn get(&self, path: &str) -> Option<Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        let root = match head {
            "title" => Value::String(self.title.clone()),
            "item_type" => Value::String(self.item_type.clone()),
            _ => self.fields.get(head)?.clone(),
        };

        match rest {
            Some(rest) => data_get(&root, rest),
            None => Some(root),
        }
    }

    fn translations(&self) -> Option<&dyn TranslationStore> {
        Some(self)
    }
}

impl TranslationStore for Item {
    fn get_translations(&self, attribute: &str) -> TranslationMap {
        self.fields
            .get(attribute)
            .cloned()
            .and_then(value_to_map)
            .unwrap_or_default()
    }
}

impl Model for Item {
    fn set(&mut self, attribute: &str, value: Value) {
        self.fields.insert(attribute.to_string(), value);
    }

    fn translations_mut(&mut self) -> Option<&mut dyn TranslationStoreMut> {
        Some(self)
    }
}

impl TranslationStoreMut for Item {
    fn set_translations(&mut self, attribute: &str, translations: TranslationMap) {
        self.fields.insert(
            attribute.to_string(),
            Value::Object(translations.into_iter().collect()),
        );
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_resolves_title_and_fields() {
        let mut item = Item::new("blog", "My post");
        item.set_field("summary", json!("short"));
        assert_eq!(item.get("title"), Some(json!("My post")));
        assert_eq!(item.get("summary"), Some(json!("short")));
        assert_eq!(item.get("missing"), None);
    }

    #[test]
    fn get_resolves_nested_paths() {
        let mut item = Item::new("blog", "My post");
        item.set_field("meta", json!({"description": {"en": "Hi"}}));
        assert_eq!(item.get("meta.description.en"), Some(json!("Hi")));
    }

    #[test]
    fn translations_roundtrip() {
        let mut item = Item::new("blog", "My post");
        let mut map = TranslationMap::new();
        map.insert("en".to_string(), json!("Hello"));
        map.insert("fr".to_string(), json!("Bonjour"));
        item.set_translations("greeting", map.clone());
        assert_eq!(item.get_translations("greeting"), map);
        assert_eq!(item.get("greeting.fr"), Some(json!("Bonjour")));
    }

    #[test]
    fn translations_parse_serialized_storage() {
        let mut item = Item::new("blog", "My post");
        item.set_field("greeting", json!(r#"{"en":"Hello"}"#));
        assert_eq!(
            item.get_translations("greeting").get("en"),
            Some(&json!("Hello"))
        );
    }

    #[test]
    fn missing_translations_are_empty() {
        let item = Item::new("blog", "My post");
        assert!(item.get_translations("missing").is_empty());
    }
}
