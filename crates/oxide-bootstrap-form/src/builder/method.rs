//! Form methods and `<form>` tag options.

use crate::html::Attributes;

/// HTTP methods a form can submit with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormMethod {
    /// GET method
    Get,
    /// POST method
    #[default]
    Post,
    /// PUT method, spoofed over POST
    Put,
    /// PATCH method, spoofed over POST
    Patch,
    /// DELETE method, spoofed over POST
    Delete,
}

impl FormMethod {
    /// Returns the method as a string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Browsers only submit GET and POST; everything else travels as a
    /// hidden `_method` field on a POST form.
    pub const fn is_spoofed(self) -> bool {
        matches!(self, Self::Put | Self::Patch | Self::Delete)
    }

    /// The method written into the `<form>` tag.
    pub const fn form_method(self) -> &'static str {
        match self {
            Self::Get => "GET",
            _ => "POST",
        }
    }
}

impl std::fmt::Display for FormMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for opening a `<form>` tag.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// Submission method.
    pub method: FormMethod,
    /// Target URL. Defaults to the current URL.
    pub action: Option<String>,
    /// Whether the form uploads files.
    pub files: bool,
    /// Extra attributes for the `<form>` tag.
    pub attributes: Attributes,
}

impl FormOptions {
    /// Creates options for a POST form to the current URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the method.
    #[must_use]
    pub fn method(mut self, method: FormMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the action URL.
    #[must_use]
    pub fn action(mut self, url: impl Into<String>) -> Self {
        self.action = Some(url.into());
        self
    }

    /// Marks the form as a multipart upload.
    #[must_use]
    pub fn files(mut self) -> Self {
        self.files = true;
        self
    }

    /// Sets an extra attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spoofed_methods_submit_as_post() {
        assert!(FormMethod::Delete.is_spoofed());
        assert_eq!(FormMethod::Delete.form_method(), "POST");
        assert!(!FormMethod::Get.is_spoofed());
        assert_eq!(FormMethod::Get.form_method(), "GET");
    }
}
