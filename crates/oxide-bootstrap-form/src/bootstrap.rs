//! Bootstrap decoration of the base form builder.
//!
//! [`BootstrapFormBuilder`] wraps any [`FormRenderer`] and adds the
//! configured CSS classes to the controls it renders, wraps checkables in
//! the markup Bootstrap expects, and opens/closes form groups that surface
//! the first validation error of their field.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::builder::{FormBuilder, FormOptions, FormRenderer, OptionAttributes, SelectList};
use crate::config::FormBuilderConfig;
use crate::error::ErrorSource;
use crate::html::{html_escape, transform_key, Attributes, HtmlString};

/// Template for the error block rendered by [`BootstrapFormBuilder::close_group`].
pub const ERROR_TEMPLATE: &str = r#"<p class="help-block">{message}</p>"#;

/// Names of the currently open form groups, innermost last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupStack {
    names: Vec<String>,
}

impl GroupStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a group name.
    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Pops the innermost group name.
    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    /// Returns the innermost group name.
    pub fn peek(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    /// Returns the number of open groups.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether no group is open.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Appends `class` to the `class` attribute of `options`.
///
/// Existing classes come first. An unset or empty class leaves `options`
/// untouched.
pub fn append_class(class: Option<&str>, mut options: Attributes) -> Attributes {
    if let Some(class) = class.filter(|c| !c.is_empty()) {
        options.append_class(class);
    }
    options
}

/// How a checkbox or radio button is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckableStyle {
    /// `<div class="checkbox"><label>..</label></div>`
    Checkbox,
    /// `<div class="radio"><label>..</label></div>`
    Radio,
    /// `<div class="checkbox-inline">..</div>`
    InlineCheckbox,
    /// `<div class="radio-inline">..</div>`
    InlineRadio,
}

impl CheckableStyle {
    const fn kind(self) -> &'static str {
        match self {
            Self::Checkbox | Self::InlineCheckbox => "checkbox",
            Self::Radio | Self::InlineRadio => "radio",
        }
    }

    const fn is_inline(self) -> bool {
        matches!(self, Self::InlineCheckbox | Self::InlineRadio)
    }
}

/// Form helper that decorates a base renderer with Bootstrap markup.
///
/// One instance serves one request: the group stack is instance state, so
/// interleaving renders of different forms on the same instance corrupts
/// group tracking. [`crate::FormServiceProvider`] hands out a fresh
/// instance per request.
pub struct BootstrapFormBuilder<R = FormBuilder> {
    base: R,
    config: Arc<FormBuilderConfig>,
    errors: Option<Arc<dyn ErrorSource>>,
    groups: GroupStack,
}

impl<R: std::fmt::Debug> std::fmt::Debug for BootstrapFormBuilder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapFormBuilder")
            .field("base", &self.base)
            .field("config", &self.config)
            .field("has_error_source", &self.errors.is_some())
            .field("groups", &self.groups)
            .finish()
    }
}

impl<R: FormRenderer> BootstrapFormBuilder<R> {
    /// Wraps `base` using the given class configuration.
    pub fn new(base: R, config: Arc<FormBuilderConfig>) -> Self {
        Self {
            base,
            config,
            errors: None,
            groups: GroupStack::new(),
        }
    }

    /// Attaches the validation errors of the current request.
    #[must_use]
    pub fn with_errors(mut self, errors: Arc<dyn ErrorSource>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Returns the wrapped renderer.
    pub fn base(&self) -> &R {
        &self.base
    }

    /// Returns the wrapped renderer mutably.
    pub fn base_mut(&mut self) -> &mut R {
        &mut self.base
    }

    /// Unwraps the decorator.
    pub fn into_inner(self) -> R {
        self.base
    }

    /// Returns the class configuration.
    pub fn config(&self) -> &FormBuilderConfig {
        &self.config
    }

    /// Returns the number of groups opened and not yet closed.
    pub fn open_groups(&self) -> usize {
        self.groups.len()
    }

    /// Opens a form group for the field `name`.
    ///
    /// Returns the opening `<div>` carrying the group class (plus the error
    /// class when the field has errors) followed by the label, if any. The
    /// caller renders the control and then calls [`Self::close_group`].
    pub fn open_group(
        &mut self,
        name: &str,
        label: Option<&str>,
        options: Attributes,
    ) -> HtmlString {
        if name.is_empty() {
            debug!("opening form group with an empty field name");
        }
        let mut options = append_class(self.config.group_class.as_deref(), options);

        self.groups.push(name);

        if self.has_errors(Some(name)) {
            options = append_class(self.config.error_class.as_deref(), options);
        }

        let label = match label.filter(|l| !l.is_empty()) {
            Some(text) => self.base.label(name, Some(text), Attributes::new()),
            None => HtmlString::default(),
        };

        HtmlString::new(format!("<div{}>{label}", self.base.attributes(&options)))
    }

    /// Closes the innermost open group.
    ///
    /// Renders the first error of the group's field, if any, then `</div>`.
    /// Closing with no open group renders just `</div>`.
    pub fn close_group(&mut self) -> HtmlString {
        let name = self.groups.pop();
        if name.is_none() {
            warn!("close_group called without a matching open_group");
        }

        let errors = self.formatted_errors(name.as_deref());
        HtmlString::new(format!("{errors}</div>"))
    }

    /// Renders a styled input.
    pub fn input(
        &mut self,
        input_type: &str,
        name: &str,
        value: Option<&str>,
        options: Attributes,
    ) -> HtmlString {
        let options = append_class(self.config.control_class.as_deref(), options);
        self.base.input(input_type, name, value, options)
    }

    /// Renders an input without the control class.
    pub fn plain_input(
        &mut self,
        input_type: &str,
        name: &str,
        value: Option<&str>,
        options: Attributes,
    ) -> HtmlString {
        self.base.input(input_type, name, value, options)
    }

    /// Renders a styled text input.
    pub fn text(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.input("text", name, value, options)
    }

    /// Renders a styled email input.
    pub fn email(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.input("email", name, value, options)
    }

    /// Renders a styled password input. Passwords are never refilled.
    pub fn password(&mut self, name: &str, options: Attributes) -> HtmlString {
        self.input("password", name, None, options)
    }

    /// Renders a styled number input.
    pub fn number(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.input("number", name, value, options)
    }

    /// Renders a styled url input.
    pub fn url(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.input("url", name, value, options)
    }

    /// Renders a styled tel input.
    pub fn tel(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.input("tel", name, value, options)
    }

    /// Renders a styled date input.
    pub fn date(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.input("date", name, value, options)
    }

    /// Renders a styled file input.
    pub fn file(&mut self, name: &str, options: Attributes) -> HtmlString {
        self.input("file", name, None, options)
    }

    /// Renders a hidden input. Hidden fields take no styling.
    pub fn hidden(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.plain_input("hidden", name, value, options)
    }

    /// Renders a styled select box.
    pub fn select(
        &mut self,
        name: &str,
        list: &SelectList,
        selected: Option<&str>,
        select_attributes: Attributes,
        option_attributes: &OptionAttributes,
    ) -> HtmlString {
        let select_attributes =
            append_class(self.config.control_class.as_deref(), select_attributes);
        self.base
            .select(name, list, selected, select_attributes, option_attributes)
    }

    /// Renders a select box without the control class.
    pub fn plain_select(
        &mut self,
        name: &str,
        list: &SelectList,
        selected: Option<&str>,
        select_attributes: Attributes,
        option_attributes: &OptionAttributes,
    ) -> HtmlString {
        self.base
            .select(name, list, selected, select_attributes, option_attributes)
    }

    /// Renders a styled textarea.
    pub fn textarea(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        let options = append_class(self.config.control_class.as_deref(), options);
        self.base.textarea(name, value, options)
    }

    /// Renders a textarea without the control class.
    pub fn plain_textarea(
        &mut self,
        name: &str,
        value: Option<&str>,
        options: Attributes,
    ) -> HtmlString {
        self.base.textarea(name, value, options)
    }

    /// Renders a checkbox wrapped in `<div class="checkbox"><label>`.
    pub fn checkbox(
        &mut self,
        name: &str,
        value: &str,
        label: Option<&str>,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString {
        let label = html_escape(label.unwrap_or_default());
        self.render_checkable(CheckableStyle::Checkbox, name, Some(value), &label, checked, options)
    }

    /// Renders a radio button wrapped in `<div class="radio"><label>`.
    pub fn radio(
        &mut self,
        name: &str,
        value: Option<&str>,
        label: Option<&str>,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString {
        let label = html_escape(label.unwrap_or_default());
        self.render_checkable(CheckableStyle::Radio, name, value, &label, checked, options)
    }

    /// Renders a checkbox wrapped in `<div class="checkbox-inline">`.
    pub fn inline_checkbox(
        &mut self,
        name: &str,
        value: &str,
        label: Option<&str>,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString {
        let label = html_escape(label.unwrap_or_default());
        self.render_checkable(
            CheckableStyle::InlineCheckbox,
            name,
            Some(value),
            &label,
            checked,
            options,
        )
    }

    /// Renders a radio button wrapped in `<div class="radio-inline">`.
    pub fn inline_radio(
        &mut self,
        name: &str,
        value: Option<&str>,
        label: Option<&str>,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString {
        let label = html_escape(label.unwrap_or_default());
        self.render_checkable(CheckableStyle::InlineRadio, name, value, &label, checked, options)
    }

    /// Renders a checkable whose label is trusted markup, such as a link to
    /// the terms of service. The label is inserted without escaping.
    ///
    /// A checkbox without a value submits `1`.
    pub fn checkable_html(
        &mut self,
        style: CheckableStyle,
        name: &str,
        value: Option<&str>,
        label: &HtmlString,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString {
        self.render_checkable(style, name, value, label.as_str(), checked, options)
    }

    fn render_checkable(
        &mut self,
        style: CheckableStyle,
        name: &str,
        value: Option<&str>,
        label: &str,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString {
        let control = match style {
            CheckableStyle::Checkbox | CheckableStyle::InlineCheckbox => {
                self.base
                    .checkbox(name, value.unwrap_or("1"), checked, options)
            }
            CheckableStyle::Radio | CheckableStyle::InlineRadio => {
                self.base.radio(name, value, checked, options)
            }
        };
        wrap_checkable(style, &control, label)
    }

    /// Renders a submit button with the submit class.
    pub fn submit(&mut self, value: Option<&str>, mut options: Attributes) -> HtmlString {
        options.set("type", "submit");
        let options = append_class(self.config.submit_class.as_deref(), options);
        self.base.button(value, options)
    }

    /// Renders a label through the base renderer.
    pub fn label(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.base.label(name, value, options)
    }

    /// Renders a button through the base renderer.
    pub fn button(&mut self, value: Option<&str>, options: Attributes) -> HtmlString {
        self.base.button(value, options)
    }

    fn has_errors(&self, name: Option<&str>) -> bool {
        match (name, &self.errors) {
            (Some(name), Some(errors)) => errors.has(&transform_key(name)),
            _ => false,
        }
    }

    fn formatted_errors(&self, name: Option<&str>) -> String {
        if !self.has_errors(name) {
            return String::new();
        }
        match (name, &self.errors) {
            (Some(name), Some(errors)) => errors
                .first(&transform_key(name), ERROR_TEMPLATE)
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl BootstrapFormBuilder<FormBuilder> {
    /// Opens a `<form>` tag.
    pub fn open(&mut self, options: FormOptions) -> HtmlString {
        self.base.open(options)
    }

    /// Closes the form.
    pub fn close(&mut self) -> HtmlString {
        if !self.groups.is_empty() {
            warn!(open = self.groups.len(), "closing form with open groups");
        }
        self.base.close()
    }

    /// Renders the hidden CSRF token field.
    pub fn token(&mut self) -> HtmlString {
        self.base.token()
    }
}

/// `label` must already be escaped.
fn wrap_checkable(style: CheckableStyle, control: &HtmlString, label: &str) -> HtmlString {
    let kind = style.kind();
    let markup = if style.is_inline() {
        format!(r#"<div class="{kind}-inline">{control} {label}</div>"#)
    } else {
        format!(r#"<div class="{kind}"><label>{control} {label}</label></div>"#)
    };
    HtmlString::new(markup)
}
