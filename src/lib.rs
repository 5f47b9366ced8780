//! Translatable form fields for admin panels.
//!
//! This library decorates an admin-panel form [`Field`](field::Field) so it
//! stores and edits a map of locale → value instead of a single scalar. The
//! decorated field keeps its native widget configuration; the rendering client
//! receives a `translatable` meta payload (original attribute, original
//! component, locale list, current per-locale values) and renders one editor
//! per locale. Persistence stays with the host model: models exposing a
//! translation store get `set_translations`, everything else gets a plain
//! attribute assignment.

pub mod decorator;
pub mod error;
pub mod field;
pub mod item;
pub mod locale;
pub mod request;
pub mod resource;
pub mod value;

pub use decorator::{TRANSLATABLE_COMPONENT, TranslatableMeta, decorate};
pub use error::LocaleError;
pub use field::{DisplayFormatter, ElementType, Field};
pub use item::Item;
pub use locale::{configure_locales, locales_from_env, normalize_attribute, resolve_locales};
pub use request::{FormRequest, RequestMethod};
pub use resource::{
    JsonResource, Model, Resource, TranslationStore, TranslationStoreMut, data_get, data_set,
};
pub use value::{TranslationMap, cast_map, coerce_map, coerce_numeric, parse_payload, value_to_map};
