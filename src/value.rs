//! Translation maps and the value-coercion pipeline.

use std::collections::BTreeMap;

use serde_json::{Number, Value};

/// Mapping from locale code to a field's value in that locale.
///
/// Ordered so the map serializes deterministically; extra keys beyond the
/// configured locales are tolerated (the client simply does not render them).
pub type TranslationMap = BTreeMap<String, Value>;

/// Parse a string as a finite JSON number.
fn parse_numeric(s: &str) -> Option<Number> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed: f64 = trimmed.parse().ok()?;
    // `parse::<f64>` accepts "inf" and "NaN"; neither is numeric-looking.
    if !parsed.is_finite() {
        return None;
    }
    Number::from_f64(parsed)
}

/// Coerce numeric-looking scalars to floating-point JSON numbers.
///
/// Numbers and numeric strings become `f64` values; everything else passes
/// through untouched, including nested objects and arrays (no deep coercion).
/// Idempotent: coercing twice yields the same value as coercing once.
pub fn coerce_numeric(value: Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64().and_then(Number::from_f64) {
            Some(float) => Value::Number(float),
            None => Value::Number(n),
        },
        Value::String(s) => match parse_numeric(&s) {
            Some(float) => Value::Number(float),
            None => Value::String(s),
        },
        other => other,
    }
}

/// Apply [`coerce_numeric`] to every entry of a translation map.
pub fn coerce_map(map: TranslationMap) -> TranslationMap {
    map.into_iter()
        .map(|(locale, value)| (locale, coerce_numeric(value)))
        .collect()
}

/// Cast any JSON value to a translation map.
///
/// Objects keep their keys, arrays are keyed by index, null becomes the empty
/// map, and a bare scalar lands under `"0"`.
pub fn cast_map(value: Value) -> TranslationMap {
    match value {
        Value::Null => TranslationMap::new(),
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        scalar => {
            let mut map = TranslationMap::new();
            map.insert("0".to_string(), scalar);
            map
        }
    }
}

/// Parse a serialized-object text payload into a translation map.
///
/// Returns `None` when the payload is not valid JSON or does not decode to an
/// object or array; callers decide whether to keep the prior value.
pub fn parse_payload(payload: &str) -> Option<TranslationMap> {
    let parsed: Value = serde_json::from_str(payload).ok()?;
    match parsed {
        Value::Object(_) | Value::Array(_) => Some(cast_map(parsed)),
        _ => None,
    }
}

/// Interpret an already-resolved value as a translation map.
///
/// Objects and arrays convert directly; strings are parsed as JSON payloads;
/// anything else yields `None`.
pub fn value_to_map(value: Value) -> Option<TranslationMap> {
    match value {
        Value::Object(_) | Value::Array(_) => Some(cast_map(value)),
        Value::String(ref payload) => parse_payload(payload),
        _ => None,
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_numeric_string_becomes_float() {
        assert_eq!(coerce_numeric(json!("5")), json!(5.0));
        assert_eq!(coerce_numeric(json!("2.5")), json!(2.5));
        assert_eq!(coerce_numeric(json!("-3")), json!(-3.0));
        assert_eq!(coerce_numeric(json!("1e2")), json!(100.0));
    }

    #[test]
    fn coerce_non_numeric_untouched() {
        assert_eq!(coerce_numeric(json!("Bonjour")), json!("Bonjour"));
        assert_eq!(coerce_numeric(json!("")), json!(""));
        assert_eq!(coerce_numeric(json!(null)), json!(null));
        assert_eq!(coerce_numeric(json!(true)), json!(true));
    }

    #[test]
    fn coerce_rejects_non_finite_strings() {
        assert_eq!(coerce_numeric(json!("inf")), json!("inf"));
        assert_eq!(coerce_numeric(json!("NaN")), json!("NaN"));
    }

    #[test]
    fn coerce_integer_becomes_float() {
        let coerced = coerce_numeric(json!(5));
        assert_eq!(coerced, json!(5.0));
        assert!(coerced.is_f64());
    }

    #[test]
    fn coerce_is_idempotent() {
        let map: TranslationMap = cast_map(json!({
            "en": "5",
            "fr": "Bonjour",
            "de": 7,
            "nl": null,
            "sv": {"nested": "1"},
        }));
        let once = coerce_map(map);
        let twice = coerce_map(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn coerce_leaves_nested_structures_alone() {
        let nested = json!({"deep": "5"});
        assert_eq!(coerce_numeric(nested.clone()), nested);
    }

    #[test]
    fn cast_map_variants() {
        assert!(cast_map(json!(null)).is_empty());
        assert_eq!(
            cast_map(json!({"en": "a"})).get("en"),
            Some(&json!("a"))
        );
        assert_eq!(cast_map(json!(["a", "b"])).get("1"), Some(&json!("b")));
        assert_eq!(cast_map(json!("solo")).get("0"), Some(&json!("solo")));
    }

    #[test]
    fn parse_payload_object() {
        let map = parse_payload(r#"{"en":"Hello","fr":"Bonjour"}"#).unwrap();
        assert_eq!(map.get("en"), Some(&json!("Hello")));
        assert_eq!(map.get("fr"), Some(&json!("Bonjour")));
    }

    #[test]
    fn parse_payload_rejects_garbage_and_scalars() {
        assert!(parse_payload("not json").is_none());
        assert!(parse_payload("42").is_none());
        assert!(parse_payload(r#""just a string""#).is_none());
    }

    #[test]
    fn value_to_map_parses_strings() {
        let map = value_to_map(json!(r#"{"en":"x"}"#)).unwrap();
        assert_eq!(map.get("en"), Some(&json!("x")));
        assert!(value_to_map(json!(12)).is_none());
        assert!(value_to_map(json!("plain text")).is_none());
    }
}
