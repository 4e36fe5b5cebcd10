//! Markup primitives: pre-escaped HTML strings and ordered attribute maps.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::{FormError, Result};

static ATTRIBUTE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_:][A-Za-z0-9_:.\-]*$").unwrap());

/// Markup that has already been escaped and may be emitted verbatim.
///
/// Every rendering operation returns this type so that template layers
/// know not to escape the result a second time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HtmlString(String);

impl HtmlString {
    /// Wraps trusted markup.
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Returns the markup as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the markup is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the wrapper and returns the markup.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HtmlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HtmlString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<HtmlString> for String {
    fn from(html: HtmlString) -> Self {
        html.0
    }
}

impl PartialEq<str> for HtmlString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HtmlString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Converts a form field name into the dotted key used by error and
/// old-input lookups.
///
/// `user[email]` becomes `user.email`, `tags[]` becomes `tags`, and a
/// literal dot becomes an underscore so it cannot be mistaken for nesting.
pub fn transform_key(name: &str) -> String {
    name.replace('.', "_")
        .replace("[]", "")
        .replace('[', ".")
        .replace(']', "")
}

/// Returns whether `name` is usable as an HTML attribute name.
pub fn is_valid_attribute_name(name: &str) -> bool {
    ATTRIBUTE_NAME.is_match(name)
}

/// Insertion-ordered HTML attributes, the "options" passed to every
/// rendering call.
///
/// A `None` value is a boolean attribute rendered without a value
/// (`required`, `multiple`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    attrs: Vec<(String, Option<String>)>,
}

impl Attributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.put(key.into(), Some(value.into()));
    }

    /// Sets an attribute after checking that its name is valid.
    pub fn try_set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if !is_valid_attribute_name(&key) {
            return Err(FormError::InvalidArgument(format!(
                "invalid attribute name: {key:?}"
            )));
        }
        self.put(key, Some(value.into()));
        Ok(())
    }

    /// Sets a boolean attribute.
    pub fn flag(&mut self, key: impl Into<String>) {
        self.put(key.into(), None);
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder method to set a boolean attribute.
    #[must_use]
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.flag(key);
        self
    }

    fn put(&mut self, key: String, value: Option<String>) {
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Gets the value of an attribute. Boolean attributes have no value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns whether the attribute is present.
    pub fn contains(&self, key: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == key)
    }

    /// Removes an attribute, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.attrs.iter().position(|(k, _)| k == key)?;
        self.attrs.remove(index).1
    }

    /// Returns whether no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Iterates over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Appends a class, space separated after any existing classes.
    pub fn append_class(&mut self, class: &str) {
        let merged = match self.get("class") {
            Some(existing) => format!("{existing} {class}"),
            None => class.to_string(),
        };
        self.set("class", merged);
    }

    /// Renders the attributes as an HTML attribute string.
    ///
    /// Each attribute is preceded by a space, so the result can be placed
    /// straight after a tag name. Invalid names are dropped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for (key, value) in &self.attrs {
            if !is_valid_attribute_name(key) {
                warn!(attribute = %key, "dropping invalid attribute name");
                continue;
            }
            match value {
                Some(v) => html.push_str(&format!(r#" {key}="{}""#, html_escape(v))),
                None => html.push_str(&format!(" {key}")),
            }
        }
        html
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.set(key, value);
        }
        attrs
    }
}
