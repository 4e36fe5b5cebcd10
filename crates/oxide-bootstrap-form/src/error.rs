//! Error types and the validation error bag.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::html::html_escape;

/// Placeholder substituted with the error message in error templates.
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

/// Form helper errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// A caller passed an argument the helper cannot render.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be parsed or serialized.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for form helper operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Read access to validation errors for the current request.
pub trait ErrorSource: Send + Sync {
    /// Returns whether `key` has at least one error.
    fn has(&self, key: &str) -> bool;

    /// Returns the first error for `key` substituted into `template`.
    fn first(&self, key: &str, template: &str) -> Option<String>;
}

/// Validation errors keyed by dotted field name.
///
/// Usually flashed to the session by a failed validation pass and read
/// back on the next request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorBag {
    /// Errors keyed by field name.
    pub errors: HashMap<String, Vec<String>>,
}

impl ErrorBag {
    /// Creates a new empty bag.
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Builder method to add an error.
    #[must_use]
    pub fn with(mut self, field: &str, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.values().filter(|m| !m.is_empty()).count()
    }

    /// Returns errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    /// Returns all errors as a flat list.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |msg| (field.as_str(), msg.as_str()))
            })
            .collect()
    }
}

impl ErrorSource for ErrorBag {
    fn has(&self, key: &str) -> bool {
        self.errors.get(key).is_some_and(|m| !m.is_empty())
    }

    fn first(&self, key: &str, template: &str) -> Option<String> {
        let message = self.errors.get(key)?.first()?;
        Some(template.replace(MESSAGE_PLACEHOLDER, &html_escape(message)))
    }
}

impl std::fmt::Display for ErrorBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}
