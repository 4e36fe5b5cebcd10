//! Class names injected by the Bootstrap form helper.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// CSS classes the decorator adds to the markup it renders.
///
/// Loaded once at start-up and shared read-only. A key set to `null`
/// disables that class entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormBuilderConfig {
    /// Class on the wrapper opened by `open_group`.
    pub group_class: Option<String>,
    /// Class added to a group whose field has errors.
    pub error_class: Option<String>,
    /// Class added to inputs, selects and textareas.
    pub control_class: Option<String>,
    /// Class added to submit buttons.
    pub submit_class: Option<String>,
}

impl Default for FormBuilderConfig {
    fn default() -> Self {
        Self {
            group_class: Some("form-group".to_string()),
            error_class: Some("has-error".to_string()),
            control_class: Some("form-control".to_string()),
            submit_class: Some("btn btn-primary".to_string()),
        }
    }
}

impl FormBuilderConfig {
    /// Creates the default Bootstrap configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with every class unset.
    pub fn empty() -> Self {
        Self {
            group_class: None,
            error_class: None,
            control_class: None,
            submit_class: None,
        }
    }

    /// Parses a JSON object, keeping defaults for missing keys.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the group class.
    #[must_use]
    pub fn group_class(mut self, class: impl Into<String>) -> Self {
        self.group_class = Some(class.into());
        self
    }

    /// Sets the error class.
    #[must_use]
    pub fn error_class(mut self, class: impl Into<String>) -> Self {
        self.error_class = Some(class.into());
        self
    }

    /// Sets the control class.
    #[must_use]
    pub fn control_class(mut self, class: impl Into<String>) -> Self {
        self.control_class = Some(class.into());
        self
    }

    /// Sets the submit class.
    #[must_use]
    pub fn submit_class(mut self, class: impl Into<String>) -> Self {
        self.submit_class = Some(class.into());
        self
    }
}
