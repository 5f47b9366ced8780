//! Form field object and its lifecycle hooks.
//!
//! A [`Field`] carries its identity (attribute path), a display component tag
//! for the client, an open meta map, and four overridable lifecycle hook
//! slots. Hooks receive the field itself mutably: each dispatcher takes the
//! hook out of its slot for the duration of the call, so a hook can freely
//! mutate the field and delegate back to the default behavior without
//! re-entering itself.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::locale::normalize_attribute;
use crate::request::FormRequest;
use crate::resource::{Model, Resource};

/// Hook deciding whether the field appears on a create form.
pub type ShowOnCreatingHook = Box<dyn Fn(&mut Field, &FormRequest) -> bool>;

/// Hook resolving the field's value for read-only display.
pub type DisplayHook = Box<dyn Fn(&mut Field, Option<&dyn Resource>, &str) -> Value>;

/// Hook resolving the field's value for the edit form.
pub type ResolveHook = Box<dyn Fn(&mut Field, Option<&dyn Resource>, &str, &FormRequest) -> Value>;

/// Hook persisting submitted data back to the model.
pub type FillHook = Box<dyn Fn(&mut Field, &FormRequest, &mut dyn Model, &str)>;

/// Element type variants with type-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    /// Single-line text input.
    Textfield { max_length: Option<usize> },

    /// Multi-line text input.
    Textarea { rows: u32 },

    /// Dropdown select with `(value, label)` options.
    Select { options: Vec<(String, String)> },
}

impl ElementType {
    /// Get the type name as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementType::Textfield { .. } => "textfield",
            ElementType::Textarea { .. } => "textarea",
            ElementType::Select { .. } => "select",
        }
    }

    /// The default display component tag for this element type.
    pub fn default_component(&self) -> &'static str {
        match self {
            ElementType::Textfield { .. } => "text-field",
            ElementType::Textarea { .. } => "textarea-field",
            ElementType::Select { .. } => "select-field",
        }
    }
}

/// Display formatter applied by the default display path.
///
/// An explicit value rather than an opaque callback, so decorators can
/// inspect what they wrap without reflection.
#[derive(Clone)]
pub enum DisplayFormatter {
    /// Map a select value through the option list to its label.
    SelectLabels,

    /// Arbitrary host-supplied formatter.
    Custom(Rc<dyn Fn(&Value) -> Value>),
}

impl fmt::Debug for DisplayFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayFormatter::SelectLabels => f.write_str("SelectLabels"),
            DisplayFormatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// An admin-panel form field.
pub struct Field {
    /// Attribute path on the bound record. Dot and arrow separators are both
    /// accepted; lookups normalize to dots.
    pub attribute: String,

    /// Display component tag consumed by the rendering client.
    pub component: String,

    /// Element type with type-specific configuration.
    pub element_type: ElementType,

    /// Field title/label.
    pub title: Option<String>,

    /// Open meta map passed through to the rendering client.
    pub meta: Map<String, Value>,

    /// Validation rules keyed by rule group.
    pub rules: BTreeMap<String, Value>,

    /// Whether the field appears on create forms.
    pub show_on_creation: bool,

    /// Formatter applied when resolving for display.
    pub display_formatter: Option<DisplayFormatter>,

    /// Whether the per-locale validation rewrite has been applied to this
    /// field instance. Set at most once per instance.
    pub(crate) wildcard_applied: bool,

    show_on_creating_hook: Option<ShowOnCreatingHook>,
    display_hook: Option<DisplayHook>,
    resolve_hook: Option<ResolveHook>,
    fill_hook: Option<FillHook>,
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("attribute", &self.attribute)
            .field("component", &self.component)
            .field("element_type", &self.element_type)
            .field("show_on_creation", &self.show_on_creation)
            .finish()
    }
}

impl Field {
    /// Create a new field with the given attribute and element type.
    fn new(attribute: impl Into<String>, element_type: ElementType) -> Self {
        let component = element_type.default_component().to_string();
        Self {
            attribute: attribute.into(),
            component,
            element_type,
            title: None,
            meta: Map::new(),
            rules: BTreeMap::new(),
            show_on_creation: true,
            display_formatter: None,
            wildcard_applied: false,
            show_on_creating_hook: None,
            display_hook: None,
            resolve_hook: None,
            fill_hook: None,
        }
    }

    /// Create a single-line text field.
    pub fn textfield(attribute: impl Into<String>) -> Self {
        Self::new(attribute, ElementType::Textfield { max_length: None })
    }

    /// Create a multi-line text field.
    pub fn textarea(attribute: impl Into<String>, rows: u32) -> Self {
        Self::new(attribute, ElementType::Textarea { rows })
    }

    /// Create a select field with `(value, label)` options.
    pub fn select(attribute: impl Into<String>, options: Vec<(String, String)>) -> Self {
        Self::new(attribute, ElementType::Select { options })
    }

    /// Set the field title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set max length for a textfield.
    pub fn max_length(mut self, max: usize) -> Self {
        if let ElementType::Textfield { ref mut max_length } = self.element_type {
            *max_length = Some(max);
        }
        self
    }

    /// Hide the field on create forms.
    pub fn hide_on_creating(mut self) -> Self {
        self.show_on_creation = false;
        self
    }

    /// Display select values as their option labels.
    pub fn display_using_labels(mut self) -> Self {
        self.display_formatter = Some(DisplayFormatter::SelectLabels);
        self
    }

    /// Display values through a host-supplied formatter.
    pub fn format_display_with(mut self, formatter: impl Fn(&Value) -> Value + 'static) -> Self {
        self.display_formatter = Some(DisplayFormatter::Custom(Rc::new(formatter)));
        self
    }

    /// Merge a value into the meta map.
    pub fn with_meta(&mut self, key: impl Into<String>, value: Value) {
        self.meta.insert(key.into(), value);
    }

    /// Install the creation-visibility hook.
    pub fn on_show_on_creating(&mut self, hook: ShowOnCreatingHook) {
        self.show_on_creating_hook = Some(hook);
    }

    /// Install the display hook.
    pub fn on_display(&mut self, hook: DisplayHook) {
        self.display_hook = Some(hook);
    }

    /// Install the resolve hook.
    pub fn on_resolve(&mut self, hook: ResolveHook) {
        self.resolve_hook = Some(hook);
    }

    /// Install the fill hook.
    pub fn on_fill(&mut self, hook: FillHook) {
        self.fill_hook = Some(hook);
    }

    /// Decide whether the field appears on a create form.
    pub fn show_on_creating(&mut self, request: &FormRequest) -> bool {
        if let Some(hook) = self.show_on_creating_hook.take() {
            let shown = hook(self, request);
            self.show_on_creating_hook = Some(hook);
            shown
        } else {
            self.show_on_creation
        }
    }

    /// Resolve the field's value for read-only display.
    pub fn resolve_for_display(&mut self, resource: Option<&dyn Resource>) -> Value {
        let attribute = self.attribute.clone();
        if let Some(hook) = self.display_hook.take() {
            let value = hook(self, resource, &attribute);
            self.display_hook = Some(hook);
            value
        } else {
            self.default_resolve_for_display(resource, &normalize_attribute(&attribute))
        }
    }

    /// Resolve the field's value for the edit form.
    pub fn resolve(&mut self, resource: Option<&dyn Resource>, request: &FormRequest) -> Value {
        let attribute = self.attribute.clone();
        if let Some(hook) = self.resolve_hook.take() {
            let value = hook(self, resource, &attribute, request);
            self.resolve_hook = Some(hook);
            value
        } else {
            self.default_resolve_attribute(resource, &normalize_attribute(&attribute))
        }
    }

    /// Persist submitted data back to the model.
    pub fn fill(&mut self, request: &FormRequest, model: &mut dyn Model) {
        let attribute = self.attribute.clone();
        if let Some(hook) = self.fill_hook.take() {
            hook(self, request, model, &attribute);
            self.fill_hook = Some(hook);
        } else if let Some(value) = request.input(&normalize_attribute(&attribute)) {
            model.set(&normalize_attribute(&attribute), value.clone());
        }
    }

    /// Per-element-type display resolution.
    ///
    /// Applies the display formatter, then the element type's formatting. The
    /// textarea arm assumes a single string value and HTML-escapes it; a map
    /// value must never be routed through here.
    pub fn default_resolve_for_display(
        &self,
        resource: Option<&dyn Resource>,
        attribute: &str,
    ) -> Value {
        let value = self.base_resolve_for_display(resource, attribute);
        let value = match &self.display_formatter {
            Some(DisplayFormatter::SelectLabels) => self.option_label(&value),
            Some(DisplayFormatter::Custom(format)) => format(&value),
            None => value,
        };
        match self.element_type {
            ElementType::Textarea { .. } => {
                Value::String(html_escape(value.as_str().unwrap_or_default()))
            }
            _ => value,
        }
    }

    /// The underlying display resolution shared by all element types: raw
    /// attribute lookup with no formatter and no per-type formatting.
    pub fn base_resolve_for_display(
        &self,
        resource: Option<&dyn Resource>,
        attribute: &str,
    ) -> Value {
        self.default_resolve_attribute(resource, attribute)
    }

    /// Nested dot-path attribute lookup; null when absent.
    pub fn default_resolve_attribute(
        &self,
        resource: Option<&dyn Resource>,
        attribute: &str,
    ) -> Value {
        resource
            .and_then(|r| r.get(attribute))
            .unwrap_or(Value::Null)
    }

    /// Map a select value through the option list to its label.
    ///
    /// Falls back to the raw value when no option matches or the field is not
    /// a select.
    pub fn option_label(&self, value: &Value) -> Value {
        let ElementType::Select { ref options } = self.element_type else {
            return value.clone();
        };
        options
            .iter()
            .find(|(option_value, _)| matches_option(option_value, value))
            .map(|(_, label)| Value::String(label.clone()))
            .unwrap_or_else(|| value.clone())
    }
}

/// Compare a select option value against a resolved field value.
///
/// Numeric values compare numerically so a coerced `1.0` still matches the
/// option `"1"`.
fn matches_option(option_value: &str, value: &Value) -> bool {
    match value {
        Value::String(s) => s == option_value,
        Value::Number(n) => option_value
            .parse::<f64>()
            .is_ok_and(|parsed| n.as_f64() == Some(parsed)),
        _ => false,
    }
}

/// Escape HTML-significant characters for safe display.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
