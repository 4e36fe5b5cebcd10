//! Per-request session data read by the form helpers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ErrorBag, ErrorSource, Result};
use crate::html::transform_key;

/// The slice of the session store the form helpers need: the CSRF token,
/// flashed validation errors and flashed old input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSession {
    /// CSRF token for the current session.
    #[serde(default, rename = "_token")]
    pub token: Option<String>,
    /// Errors from the previous validation pass, if any.
    #[serde(default)]
    pub errors: Option<ErrorBag>,
    /// Input submitted with the previous request.
    #[serde(default, rename = "_old_input")]
    pub old_input: Map<String, Value>,
}

impl FormSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes session data stored as JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the CSRF token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the flashed validation errors.
    #[must_use]
    pub fn with_errors(mut self, errors: ErrorBag) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Sets one old input value.
    #[must_use]
    pub fn with_old(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.old_input.insert(key.into(), value.into());
        self
    }

    /// Returns the CSRF token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns whether the previous request flashed any input.
    pub fn has_old_input(&self) -> bool {
        !self.old_input.is_empty()
    }

    /// Looks up old input by form field name.
    ///
    /// Bracketed names walk nested objects and arrays: `items[1][qty]`
    /// reads `old_input["items"][1]["qty"]`. `null` counts as absent.
    pub fn old(&self, name: &str) -> Option<&Value> {
        let key = transform_key(name);
        let mut segments = key.split('.');
        let mut current = self.old_input.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        (!current.is_null()).then_some(current)
    }

    /// Looks up old input and renders it as a string value.
    pub fn old_string(&self, name: &str) -> Option<String> {
        self.old(name).and_then(scalar_to_string)
    }
}

impl ErrorSource for FormSession {
    fn has(&self, key: &str) -> bool {
        self.errors.as_ref().is_some_and(|e| e.has(key))
    }

    fn first(&self, key: &str, template: &str) -> Option<String> {
        self.errors.as_ref()?.first(key, template)
    }
}

/// Converts a scalar JSON value to the string a form control would submit.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
