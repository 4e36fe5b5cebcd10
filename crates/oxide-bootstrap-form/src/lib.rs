//! # oxide-bootstrap-form
//!
//! Bootstrap markup for HTML forms, layered over a plain form builder.
//!
//! This crate provides:
//! - A base form builder with old-input repopulation and CSRF tokens
//! - A Bootstrap decorator that injects configured CSS classes
//! - Form groups that display the first validation error of their field
//! - A provider that builds one helper per request
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_bootstrap_form::{Attributes, ErrorBag, FormServiceProvider, FormSession};
//!
//! let provider = FormServiceProvider::default();
//!
//! // Session flashed by the previous, failed submission
//! let session = FormSession::new()
//!     .with_token("abc123")
//!     .with_old("email", "not-an-email")
//!     .with_errors(ErrorBag::new().with("email", "The email must be valid."));
//!
//! let mut form = provider.form(Arc::new(session), "/register");
//!
//! let mut html = String::new();
//! html.push_str(form.open_group("email", None, Attributes::new()).as_str());
//! html.push_str(form.email("email", None, Attributes::new()).as_str());
//! html.push_str(form.close_group().as_str());
//!
//! assert!(html.starts_with(r#"<div class="form-group has-error">"#));
//! assert!(html.contains(r#"class="form-control""#));
//! assert!(html.contains(r#"value="not-an-email""#));
//! assert!(html.ends_with(r#"<p class="help-block">The email must be valid.</p></div>"#));
//! ```
//!
//! ## Custom Renderers
//!
//! The decorator works over any [`FormRenderer`], so the class injection
//! can be reused with a different base builder:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_bootstrap_form::{
//!     Attributes, BootstrapFormBuilder, FormBuilder, FormBuilderConfig,
//! };
//!
//! let config = FormBuilderConfig::new().control_class("input is-small");
//! let mut form = BootstrapFormBuilder::new(FormBuilder::new(), Arc::new(config));
//!
//! let html = form.text("q", Some("rust"), Attributes::new());
//! assert_eq!(
//!     html.as_str(),
//!     r#"<input class="input is-small" name="q" type="text" value="rust">"#,
//! );
//! ```

mod bootstrap;
pub mod builder;
mod config;
mod error;
pub mod html;
mod provider;
mod session;

pub use bootstrap::{
    append_class, BootstrapFormBuilder, CheckableStyle, GroupStack, ERROR_TEMPLATE,
};
pub use builder::{
    FormBuilder, FormMethod, FormOptions, FormRenderer, OptionAttributes, SelectEntry, SelectList,
};
pub use config::FormBuilderConfig;
pub use error::{ErrorBag, ErrorSource, FormError, Result, MESSAGE_PLACEHOLDER};
pub use html::{html_escape, transform_key, Attributes, HtmlString};
pub use provider::FormServiceProvider;
pub use session::FormSession;
