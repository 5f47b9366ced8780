//! Translatable decoration of form fields.
//!
//! [`decorate`] rewires a field's four lifecycle hooks so the field reads and
//! writes a locale → value map while the client renders one editor per locale.
//! The field keeps its identity and its original widget configuration; the
//! client learns both from the `translatable` meta payload stamped on every
//! hook invocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::field::{DisplayFormatter, ElementType, Field};
use crate::locale::{normalize_attribute, resolve_locales};
use crate::resource::Resource;
use crate::value::{TranslationMap, cast_map, coerce_map, parse_payload};

/// Component tag the client resolves to the per-locale editor.
pub const TRANSLATABLE_COMPONENT: &str = "translatable-field";

/// Meta payload consumed by the rendering client.
///
/// This is the sole wire contract the decoration guarantees: any client that
/// respects this shape can render the per-locale editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatableMeta {
    /// The field's attribute before any validation rewrite.
    pub original_attribute: String,

    /// The component tag the field carried before decoration.
    pub original_component: String,

    /// Ordered locale list to render editors for.
    pub locales: Vec<String>,

    /// Current per-locale values.
    pub value: TranslationMap,
}

/// Stamp the `translatable` meta payload onto the field.
fn stamp_meta(field: &mut Field, original_component: &str, locales: &[String], value: TranslationMap) {
    let meta = TranslatableMeta {
        original_attribute: field.attribute.clone(),
        original_component: original_component.to_string(),
        locales: locales.to_vec(),
        value,
    };
    field.with_meta(
        "translatable",
        serde_json::to_value(meta).unwrap_or(Value::Null),
    );
}

/// Resolve the raw per-locale value for an attribute.
///
/// Prefers the resource's translation-store capability; otherwise falls back
/// to generic dot-path lookup.
fn lookup_value(resource: Option<&dyn Resource>, attribute: &str) -> Value {
    let Some(resource) = resource else {
        return Value::Null;
    };
    if let Some(store) = resource.translations() {
        return Value::Object(store.get_translations(attribute).into_iter().collect());
    }
    resource.get(attribute).unwrap_or(Value::Null)
}

/// Decorate a field with multi-locale behavior.
///
/// Resolves the locale set once (a non-empty `override_locales` wins over the
/// configured list), installs the four lifecycle hooks, and rewrites the
/// component tag to [`TRANSLATABLE_COMPONENT`]. Returns the same field for
/// fluent chaining; all runtime behavior lives in the hooks.
pub fn decorate(mut field: Field, override_locales: &[&str]) -> Field {
    let locales = resolve_locales(override_locales);
    let original_component = field.component.clone();
    let original_show_on_creation = field.show_on_creation;
    let wrapped_display_formatter = field.display_formatter.take();

    debug!(
        attribute = %field.attribute,
        component = %original_component,
        locales = locales.len(),
        "decorating field as translatable"
    );

    // Creation visibility: the decision is unchanged from the field's original
    // configuration; only the meta payload and component are side-effected.
    {
        let locales = locales.clone();
        let original_component = original_component.clone();
        field.on_show_on_creating(Box::new(move |field, _request| {
            stamp_meta(field, &original_component, &locales, TranslationMap::new());
            field.component = TRANSLATABLE_COMPONENT.to_string();
            field.show_on_creation = original_show_on_creation;
            field.show_on_creation
        }));
    }

    // Display formatting.
    {
        let locales = locales.clone();
        let original_component = original_component.clone();
        let wrapped = wrapped_display_formatter.clone();
        field.on_display(Box::new(move |field, resource, attribute| {
            let attribute = normalize_attribute(attribute);
            let raw = lookup_value(resource, &attribute);
            let mut value = coerce_map(cast_map(raw));
            debug!(attribute = %attribute, entries = value.len(), "resolved translations for display");

            field.component = TRANSLATABLE_COMPONENT.to_string();
            field.display_formatter = wrapped.clone();

            if matches!(wrapped, Some(DisplayFormatter::SelectLabels)) {
                value = value
                    .into_iter()
                    .map(|(locale, v)| {
                        let label = field.option_label(&v);
                        (locale, label)
                    })
                    .collect();
            }

            stamp_meta(field, &original_component, &locales, value);

            // The textarea display path assumes a single string value and
            // cannot format a map; route it through the base resolution.
            match field.element_type {
                ElementType::Textarea { .. } => field.base_resolve_for_display(resource, &attribute),
                _ => field.default_resolve_for_display(resource, &attribute),
            }
        }));
    }

    // Value resolution for the edit form.
    {
        let locales = locales.clone();
        let original_component = original_component.clone();
        field.on_resolve(Box::new(move |field, resource, attribute, request| {
            let attribute = normalize_attribute(attribute);
            let raw = lookup_value(resource, &attribute);

            let map = match raw {
                Value::Object(_) | Value::Array(_) => cast_map(raw),
                Value::String(ref payload) => match parse_payload(payload) {
                    Some(parsed) => parsed,
                    None => {
                        // Keep the unparsed value rather than failing the request.
                        warn!(
                            attribute = %attribute,
                            "translation payload did not parse; keeping raw value"
                        );
                        cast_map(raw)
                    }
                },
                other => cast_map(other),
            };
            let value = coerce_map(map);
            debug!(attribute = %attribute, entries = value.len(), "resolved translations for editing");

            stamp_meta(field, &original_component, &locales, value);
            field.component = TRANSLATABLE_COMPONENT.to_string();

            // Create and update submissions validate each locale entry as a
            // separate array element; rewrite the attribute at most once per
            // field instance.
            if request.method.is_submission() && !field.wildcard_applied {
                field.attribute = format!("{}.*", field.attribute);
                field.wildcard_applied = true;
                debug!(attribute = %field.attribute, "applied per-locale validation rewrite");
            }

            field.default_resolve_attribute(resource, &attribute)
        }));
    }

    // Fill on save.
    field.on_fill(Box::new(move |field, request, model, attribute| {
        let real_attribute = field
            .meta
            .get("translatable")
            .and_then(|meta| meta.get("original_attribute"))
            .and_then(Value::as_str)
            .unwrap_or(attribute);
        let real_attribute = normalize_attribute(real_attribute);

        let Some(submitted) = request.input(&real_attribute) else {
            debug!(attribute = %real_attribute, "no submitted value; skipping fill");
            return;
        };

        let translations = match submitted {
            Value::String(payload) => parse_payload(payload).unwrap_or_default(),
            other => cast_map(other.clone()),
        };

        if let Some(store) = model.translations_mut() {
            store.set_translations(&real_attribute, translations);
        } else {
            model.set(
                &real_attribute,
                Value::Object(translations.into_iter().collect()),
            );
        }
    }));

    field.component = TRANSLATABLE_COMPONENT.to_string();
    field
}

impl Field {
    /// Decorate this field with multi-locale behavior using the configured
    /// locale list.
    pub fn translatable(self) -> Field {
        decorate(self, &[])
    }

    /// Decorate this field with multi-locale behavior using an explicit
    /// locale list.
    pub fn translatable_with(self, locales: &[&str]) -> Field {
        decorate(self, locales)
    }

    /// Store a validation rule-set for one locale.
    ///
    /// Rules land under the `translatable` rule group for the host's
    /// validation layer to consume.
    pub fn rules_for(mut self, locale: &str, rules: Value) -> Field {
        let group = self
            .rules
            .entry("translatable".to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if let Some(map) = group.as_object_mut() {
            map.insert(locale.to_string(), rules);
        }
        self
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::request::{FormRequest, RequestMethod};
    use crate::resource::JsonResource;
    use serde_json::json;

    fn meta_payload(field: &Field) -> TranslatableMeta {
        serde_json::from_value(field.meta.get("translatable").unwrap().clone()).unwrap()
    }

    #[test]
    fn decorate_rewrites_component_and_keeps_attribute() {
        let field = Field::textfield("title").translatable_with(&["en", "fr"]);
        assert_eq!(field.component, TRANSLATABLE_COMPONENT);
        assert_eq!(field.attribute, "title");
    }

    #[test]
    fn creation_hook_stamps_empty_map() {
        let mut field = Field::textfield("title").translatable_with(&["en", "fr"]);
        let request = FormRequest::new(RequestMethod::Get);
        assert!(field.show_on_creating(&request));

        let meta = meta_payload(&field);
        assert_eq!(meta.original_attribute, "title");
        assert_eq!(meta.original_component, "text-field");
        assert_eq!(meta.locales, vec!["en", "fr"]);
        assert!(meta.value.is_empty());
    }

    #[test]
    fn creation_hook_preserves_hidden_visibility() {
        let mut field = Field::textfield("title")
            .hide_on_creating()
            .translatable_with(&["en"]);
        let request = FormRequest::new(RequestMethod::Get);
        assert!(!field.show_on_creating(&request));
    }

    #[test]
    fn resolve_parses_serialized_payloads() {
        let mut field = Field::textfield("title").translatable_with(&["en", "fr"]);
        let resource = JsonResource::new(json!({"title": r#"{"en":"Hello","fr":"Bonjour"}"#}));
        let request = FormRequest::new(RequestMethod::Get);
        field.resolve(Some(&resource), &request);

        let meta = meta_payload(&field);
        assert_eq!(meta.value.get("en"), Some(&json!("Hello")));
        assert_eq!(meta.value.get("fr"), Some(&json!("Bonjour")));
    }

    #[test]
    fn resolve_keeps_unparseable_payloads() {
        let mut field = Field::textfield("title").translatable_with(&["en"]);
        let resource = JsonResource::new(json!({"title": "not json at all"}));
        let request = FormRequest::new(RequestMethod::Get);
        field.resolve(Some(&resource), &request);

        let meta = meta_payload(&field);
        assert_eq!(meta.value.get("0"), Some(&json!("not json at all")));
    }

    #[test]
    fn wildcard_applied_once_per_instance() {
        let mut field = Field::textfield("title").translatable_with(&["en"]);
        let resource = JsonResource::new(json!({"title": {"en": "Hello"}}));
        let request = FormRequest::new(RequestMethod::Post);

        field.resolve(Some(&resource), &request);
        assert_eq!(field.attribute, "title.*");

        field.resolve(Some(&resource), &request);
        field.resolve(Some(&resource), &request);
        assert_eq!(field.attribute, "title.*");
    }

    #[test]
    fn wildcard_not_applied_on_read_requests() {
        let mut field = Field::textfield("title").translatable_with(&["en"]);
        let resource = JsonResource::new(json!({"title": {"en": "Hello"}}));
        let request = FormRequest::new(RequestMethod::Get);
        field.resolve(Some(&resource), &request);
        assert_eq!(field.attribute, "title");
    }

    #[test]
    fn rules_for_nests_under_translatable_group() {
        let field = Field::textfield("title")
            .rules_for("en", json!(["required", "max:255"]))
            .rules_for("fr", json!(["required"]));
        let group = field.rules.get("translatable").unwrap();
        assert_eq!(group.get("en"), Some(&json!(["required", "max:255"])));
        assert_eq!(group.get("fr"), Some(&json!(["required"])));
    }

    #[test]
    fn display_coerces_numeric_strings() {
        let mut field = Field::textfield("price").translatable_with(&["en", "fr"]);
        let resource = JsonResource::new(json!({"price": {"en": "5", "fr": "Bonjour"}}));
        field.resolve_for_display(Some(&resource));

        let meta = meta_payload(&field);
        assert_eq!(meta.value.get("en"), Some(&json!(5.0)));
        assert_eq!(meta.value.get("fr"), Some(&json!("Bonjour")));
    }

    #[test]
    fn display_maps_select_labels() {
        let mut field = Field::select(
            "status",
            vec![
                ("1".to_string(), "Published".to_string()),
                ("0".to_string(), "Draft".to_string()),
            ],
        )
        .display_using_labels()
        .translatable_with(&["en", "fr"]);

        let resource = JsonResource::new(json!({"status": {"en": "1", "fr": "0"}}));
        field.resolve_for_display(Some(&resource));

        let meta = meta_payload(&field);
        assert_eq!(meta.value.get("en"), Some(&json!("Published")));
        assert_eq!(meta.value.get("fr"), Some(&json!("Draft")));
    }

    #[test]
    fn display_select_labels_fall_back_to_raw_value() {
        let mut field = Field::select("status", vec![("1".to_string(), "Published".to_string())])
            .display_using_labels()
            .translatable_with(&["en"]);

        let resource = JsonResource::new(json!({"status": {"en": "unknown"}}));
        field.resolve_for_display(Some(&resource));

        let meta = meta_payload(&field);
        assert_eq!(meta.value.get("en"), Some(&json!("unknown")));
    }

    #[test]
    fn display_without_resource_stamps_empty_map() {
        let mut field = Field::textfield("title").translatable_with(&["en"]);
        field.resolve_for_display(None);
        assert!(meta_payload(&field).value.is_empty());
    }

    #[test]
    fn locales_are_deduplicated() {
        let mut field = Field::textfield("title").translatable_with(&["en", "fr", "en"]);
        let request = FormRequest::new(RequestMethod::Get);
        field.show_on_creating(&request);
        assert_eq!(meta_payload(&field).locales, vec!["en", "fr"]);
    }
}
