//! Request-scoped input consumed by the field lifecycle.

use std::collections::HashMap;

use serde_json::Value;

/// HTTP method of the request a hook fires within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Whether this is a create or update submission.
    ///
    /// Create forms submit with POST, update forms with PUT; only those
    /// trigger the per-locale validation rewrite.
    pub fn is_submission(self) -> bool {
        matches!(self, RequestMethod::Post | RequestMethod::Put)
    }
}

/// Submitted form data for one request.
#[derive(Debug, Clone)]
pub struct FormRequest {
    /// HTTP method.
    pub method: RequestMethod,

    /// Submitted values keyed by attribute name.
    pub values: HashMap<String, Value>,
}

impl FormRequest {
    /// Create an empty request with the given method.
    pub fn new(method: RequestMethod) -> Self {
        Self {
            method,
            values: HashMap::new(),
        }
    }

    /// Add a submitted value.
    pub fn value(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(attribute.into(), value.into());
        self
    }

    /// Look up a submitted value by attribute name.
    pub fn input(&self, attribute: &str) -> Option<&Value> {
        self.values.get(attribute)
    }
}
