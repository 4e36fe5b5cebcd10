//! The base form builder: unstyled controls with old-input repopulation.

mod method;
mod select;

pub use method::{FormMethod, FormOptions};
pub use select::{OptionAttributes, SelectEntry, SelectList};

use std::collections::HashSet;
use std::sync::Arc;

use ironhtml::html;
use serde_json::Value;

use crate::html::{html_escape, is_valid_attribute_name, Attributes, HtmlString};
use crate::session::{scalar_to_string, FormSession};

/// Input types whose value is never refilled from old input.
const SKIP_VALUE_TYPES: [&str; 4] = ["file", "password", "checkbox", "radio"];

/// Rendering capabilities the Bootstrap decorator delegates to.
pub trait FormRenderer {
    /// Renders a `<label>` bound to the field `name`.
    fn label(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString;

    /// Renders an `<input>` of the given type.
    fn input(
        &mut self,
        input_type: &str,
        name: &str,
        value: Option<&str>,
        options: Attributes,
    ) -> HtmlString;

    /// Renders a `<select>` box.
    fn select(
        &mut self,
        name: &str,
        list: &SelectList,
        selected: Option<&str>,
        select_attributes: Attributes,
        option_attributes: &OptionAttributes,
    ) -> HtmlString;

    /// Renders a `<textarea>`.
    fn textarea(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString;

    /// Renders a checkbox input, resolving its checked state.
    fn checkbox(
        &mut self,
        name: &str,
        value: &str,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString;

    /// Renders a radio input, resolving its checked state. A missing value
    /// defaults to the field name.
    fn radio(
        &mut self,
        name: &str,
        value: Option<&str>,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString;

    /// Renders a `<button>`.
    fn button(&mut self, value: Option<&str>, options: Attributes) -> HtmlString;

    /// Renders attributes as an escaped HTML attribute string.
    fn attributes(&self, options: &Attributes) -> String {
        options.to_html()
    }
}

/// Plain HTML form builder.
///
/// Holds per-request state: the session (old input and CSRF token) and
/// the names that already have a label, which later controls use as
/// their `id`.
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    session: Option<Arc<FormSession>>,
    current_url: String,
    labels: HashSet<String>,
}

impl FormBuilder {
    /// Creates a builder without a session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the builder to the request's session.
    #[must_use]
    pub fn with_session(mut self, session: Arc<FormSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets the URL forms submit to when no action is given.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.current_url = url.into();
        self
    }

    /// Returns the bound session.
    pub fn session(&self) -> Option<&Arc<FormSession>> {
        self.session.as_ref()
    }

    /// Opens a `<form>` tag, appending the method spoofing field and the
    /// CSRF token where needed.
    pub fn open(&mut self, options: FormOptions) -> HtmlString {
        let action = options
            .action
            .clone()
            .unwrap_or_else(|| self.current_url.clone());

        let mut attrs = Attributes::new()
            .with("method", options.method.form_method())
            .with("action", action)
            .with("accept-charset", "UTF-8");
        if options.files {
            attrs.set("enctype", "multipart/form-data");
        }
        for (key, value) in options.attributes.iter() {
            match value {
                Some(v) => attrs.set(key, v),
                None => attrs.flag(key),
            }
        }

        let mut html = format!("<form{}>", attrs.to_html());
        if options.method.is_spoofed() {
            html.push_str(
                self.hidden("_method", Some(options.method.as_str()), Attributes::new())
                    .as_str(),
            );
        }
        if options.method != FormMethod::Get {
            html.push_str(self.token().as_str());
        }
        HtmlString::new(html)
    }

    /// Closes the form and forgets the labels rendered inside it.
    pub fn close(&mut self) -> HtmlString {
        self.labels.clear();
        HtmlString::new("</form>")
    }

    /// Renders the hidden CSRF token field.
    pub fn token(&mut self) -> HtmlString {
        let token = self
            .session
            .as_ref()
            .and_then(|s| s.token())
            .map(ToString::to_string);
        self.hidden("_token", token.as_deref(), Attributes::new())
    }

    /// Renders a hidden input.
    pub fn hidden(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.input("hidden", name, value, options)
    }

    fn id_attribute(&self, name: &str, options: &Attributes) -> Option<String> {
        if let Some(id) = options.get("id") {
            return Some(id.to_string());
        }
        self.labels.contains(name).then(|| name.to_string())
    }

    /// Old input wins over the given value; `_method` is never refilled.
    fn value_attribute(&self, name: &str, value: Option<&str>) -> Option<String> {
        if name != "_method" {
            if let Some(old) = self.old_string(name) {
                return Some(old);
            }
        }
        value.map(ToString::to_string)
    }

    fn old(&self, name: &str) -> Option<&Value> {
        self.session.as_ref()?.old(name)
    }

    fn old_string(&self, name: &str) -> Option<String> {
        self.old(name).and_then(scalar_to_string)
    }

    fn has_old_input(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.has_old_input())
    }

    fn selected_values(&self, name: &str, selected: Option<&str>) -> Vec<String> {
        match self.old(name) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(other) => scalar_to_string(other).into_iter().collect(),
            None => selected.map(ToString::to_string).into_iter().collect(),
        }
    }

    fn checkbox_checked(&self, name: &str, value: &str, checked: bool) -> bool {
        match self.old(name) {
            // Unchecked boxes are not submitted at all.
            None if self.has_old_input() => false,
            None => checked,
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(scalar_to_string)
                .any(|v| v == value),
            Some(posted) => is_truthy(posted),
        }
    }

    fn radio_checked(&self, name: &str, value: &str, checked: bool) -> bool {
        self.old_string(name).map_or(checked, |old| old == value)
    }

    fn checkable(
        &mut self,
        input_type: &str,
        name: &str,
        value: &str,
        checked: bool,
        mut options: Attributes,
    ) -> HtmlString {
        if checked {
            options.set("checked", "checked");
        }
        self.input(input_type, name, Some(value), options)
    }
}

impl FormRenderer for FormBuilder {
    fn label(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.labels.insert(name.to_string());

        let for_id = options
            .get("for")
            .map_or_else(|| name.to_string(), ToString::to_string);
        let text = value
            .filter(|v| !v.is_empty())
            .map_or_else(|| humanize(name), ToString::to_string);

        let mut label = html! { label.for_(#for_id) { #text } };
        for (key, value) in options.iter() {
            if key != "for" && is_valid_attribute_name(key) {
                label = label.attr(key.to_string(), value.unwrap_or(key));
            }
        }
        HtmlString::new(label.render())
    }

    fn input(
        &mut self,
        input_type: &str,
        name: &str,
        value: Option<&str>,
        mut options: Attributes,
    ) -> HtmlString {
        if !options.contains("name") {
            options.set("name", name);
        }
        let id = self.id_attribute(name, &options);
        let value = if SKIP_VALUE_TYPES.contains(&input_type) {
            value.map(ToString::to_string)
        } else {
            self.value_attribute(name, value)
        };

        options.set("type", input_type);
        if let Some(value) = value {
            options.set("value", value);
        }
        if let Some(id) = id {
            options.set("id", id);
        }
        HtmlString::new(format!("<input{}>", self.attributes(&options)))
    }

    fn select(
        &mut self,
        name: &str,
        list: &SelectList,
        selected: Option<&str>,
        mut select_attributes: Attributes,
        option_attributes: &OptionAttributes,
    ) -> HtmlString {
        let selected = self.selected_values(name, selected);
        if let Some(id) = self.id_attribute(name, &select_attributes) {
            select_attributes.set("id", id);
        }
        if !select_attributes.contains("name") {
            select_attributes.set("name", name);
        }

        let mut options = String::new();
        if let Some(placeholder) = select_attributes.remove("placeholder") {
            options.push_str(&select::placeholder_option(&placeholder, &selected));
        }
        options.push_str(&select::render_options(list, &selected, option_attributes));

        HtmlString::new(format!(
            "<select{}>{options}</select>",
            self.attributes(&select_attributes)
        ))
    }

    fn textarea(&mut self, name: &str, value: Option<&str>, mut options: Attributes) -> HtmlString {
        if !options.contains("name") {
            options.set("name", name);
        }
        if let Some(size) = options.remove("size") {
            if let Some((cols, rows)) = size.split_once('x') {
                options.set("cols", cols);
                options.set("rows", rows);
            }
        }
        if !options.contains("cols") {
            options.set("cols", "50");
        }
        if !options.contains("rows") {
            options.set("rows", "10");
        }
        if let Some(id) = self.id_attribute(name, &options) {
            options.set("id", id);
        }

        let content = self.value_attribute(name, value).unwrap_or_default();
        HtmlString::new(format!(
            "<textarea{}>{}</textarea>",
            self.attributes(&options),
            html_escape(&content)
        ))
    }

    fn checkbox(
        &mut self,
        name: &str,
        value: &str,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString {
        let checked = self.checkbox_checked(name, value, checked.unwrap_or(false));
        self.checkable("checkbox", name, value, checked, options)
    }

    fn radio(
        &mut self,
        name: &str,
        value: Option<&str>,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString {
        let value = value.unwrap_or(name).to_string();
        let checked = self.radio_checked(name, &value, checked.unwrap_or(false));
        self.checkable("radio", name, &value, checked, options)
    }

    fn button(&mut self, value: Option<&str>, mut options: Attributes) -> HtmlString {
        let button_type = options.remove("type").unwrap_or_else(|| "button".to_string());
        let text = value.unwrap_or_default().to_string();

        let mut button = html! { button.type_(#button_type) { #text } };
        for (key, value) in options.iter() {
            if is_valid_attribute_name(key) {
                button = button.attr(key.to_string(), value.unwrap_or(key));
            }
        }
        HtmlString::new(button.render())
    }
}

/// Turns `first_name` into `First Name`.
fn humanize(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder_with(session: FormSession) -> FormBuilder {
        FormBuilder::new().with_session(Arc::new(session))
    }

    #[test]
    fn test_input_attribute_order() {
        let mut form = FormBuilder::new();
        let html = form.input(
            "email",
            "email",
            Some("a@b.c"),
            Attributes::new().with("class", "wide"),
        );
        assert_eq!(
            html,
            r#"<input class="wide" name="email" type="email" value="a@b.c">"#
        );
    }

    #[test]
    fn test_old_input_wins() {
        let mut form = builder_with(FormSession::new().with_old("title", "Old title"));
        let html = form.input("text", "title", Some("New"), Attributes::new());
        assert!(html.as_str().contains(r#"value="Old title""#));
    }

    #[test]
    fn test_password_never_refilled() {
        let mut form = builder_with(FormSession::new().with_old("secret", "hunter2"));
        let html = form.input("password", "secret", None, Attributes::new());
        assert!(!html.as_str().contains("hunter2"));
    }

    #[test]
    fn test_label_sets_id_of_following_control() {
        let mut form = FormBuilder::new();
        let label = form.label("first_name", None, Attributes::new());
        assert!(label.as_str().contains("First Name"));
        assert!(label.as_str().contains("first_name"));

        let html = form.input("text", "first_name", None, Attributes::new());
        assert!(html.as_str().contains(r#"id="first_name""#));

        form.close();
        let html = form.input("text", "first_name", None, Attributes::new());
        assert!(!html.as_str().contains("id="));
    }

    #[test]
    fn test_textarea_size_and_escaping() {
        let mut form = FormBuilder::new();
        let html = form.textarea(
            "body",
            Some("<hi>"),
            Attributes::new().with("size", "30x5"),
        );
        assert_eq!(
            html,
            r#"<textarea name="body" cols="30" rows="5">&lt;hi&gt;</textarea>"#
        );
    }

    #[test]
    fn test_textarea_default_size() {
        let mut form = FormBuilder::new();
        let html = form.textarea("body", None, Attributes::new());
        assert!(html.as_str().contains(r#"cols="50" rows="10""#));
    }

    #[test]
    fn test_select_with_placeholder_and_old_input() {
        let mut form = builder_with(FormSession::new().with_old("size", "l"));
        let list: SelectList = [("s", "Small"), ("l", "Large")].into_iter().collect();
        let html = form.select(
            "size",
            &list,
            Some("s"),
            Attributes::new().with("placeholder", "Pick a size"),
            &OptionAttributes::new(),
        );
        assert_eq!(
            html,
            r#"<select name="size"><option value="">Pick a size</option><option value="s">Small</option><option value="l" selected="selected">Large</option></select>"#
        );
    }

    #[test]
    fn test_select_multiple_from_old_array() {
        let mut form = builder_with(FormSession::new().with_old("tags", json!(["a", "c"])));
        let list: SelectList = [("a", "A"), ("b", "B"), ("c", "C")].into_iter().collect();
        let html = form.select(
            "tags[]",
            &list,
            None,
            Attributes::new().with_flag("multiple"),
            &OptionAttributes::new(),
        );
        assert!(html.as_str().contains(r#"<option value="a" selected="selected">"#));
        assert!(html.as_str().contains(r#"<option value="b">"#));
        assert!(html.as_str().contains(r#"<option value="c" selected="selected">"#));
    }

    #[test]
    fn test_checkbox_default_checked_without_old_input() {
        let mut form = FormBuilder::new();
        let html = form.checkbox("remember", "1", Some(true), Attributes::new());
        assert_eq!(
            html,
            r#"<input checked="checked" name="remember" type="checkbox" value="1">"#
        );
    }

    #[test]
    fn test_checkbox_unchecked_when_form_was_submitted_without_it() {
        let mut form = builder_with(FormSession::new().with_old("email", "x@y.z"));
        let html = form.checkbox("remember", "1", Some(true), Attributes::new());
        assert!(!html.as_str().contains("checked"));
    }

    #[test]
    fn test_checkbox_array_old_input() {
        let mut form = builder_with(FormSession::new().with_old("roles", json!(["admin"])));
        let admin = form.checkbox("roles[]", "admin", None, Attributes::new());
        let staff = form.checkbox("roles[]", "staff", None, Attributes::new());
        assert!(admin.as_str().contains("checked"));
        assert!(!staff.as_str().contains("checked"));
    }

    #[test]
    fn test_radio_checked_state() {
        let mut form = builder_with(FormSession::new().with_old("plan", "pro"));
        let free = form.radio("plan", Some("free"), Some(true), Attributes::new());
        let pro = form.radio("plan", Some("pro"), None, Attributes::new());
        assert!(!free.as_str().contains("checked"));
        assert!(pro.as_str().contains("checked"));

        let mut form = FormBuilder::new();
        let html = form.radio("agree", None, None, Attributes::new());
        assert!(html.as_str().contains(r#"value="agree""#));
    }

    #[test]
    fn test_button_defaults_to_type_button() {
        let mut form = FormBuilder::new();
        let html = form.button(Some("Go"), Attributes::new().with("class", "btn"));
        assert!(html.as_str().contains(r#"type="button""#));
        assert!(html.as_str().contains(r#"class="btn""#));
        assert!(html.as_str().contains(">Go</button>"));
    }

    #[test]
    fn test_open_spoofs_method_and_adds_token() {
        let mut form = builder_with(FormSession::new().with_token("tok"))
            .with_url("http://localhost/posts/1");
        let html = form.open(FormOptions::new().method(FormMethod::Put).files());
        assert_eq!(
            html,
            concat!(
                r#"<form method="POST" action="http://localhost/posts/1" accept-charset="UTF-8" enctype="multipart/form-data">"#,
                r#"<input name="_method" type="hidden" value="PUT">"#,
                r#"<input name="_token" type="hidden" value="tok">"#,
            )
        );
        assert_eq!(form.close(), "</form>");
    }

    #[test]
    fn test_get_form_has_no_token() {
        let mut form = builder_with(FormSession::new().with_token("tok"));
        let html = form.open(FormOptions::new().method(FormMethod::Get).action("/search"));
        assert_eq!(
            html,
            r#"<form method="GET" action="/search" accept-charset="UTF-8">"#
        );
    }

    #[test]
    fn test_label_with_options() {
        let mut form = FormBuilder::new();
        let html = form.label(
            "q",
            Some("Query"),
            Attributes::new().with("class", "control-label").with_flag("hidden"),
        );
        assert!(html.as_str().contains(r#"for="q""#));
        assert!(html.as_str().contains(r#"class="control-label""#));
        assert!(html.as_str().contains("Query</label>"));
    }

    #[test]
    fn test_label_for_option_overrides_name() {
        let mut form = FormBuilder::new();
        let html = form.label("q", Some("Q"), Attributes::new().with("for", "other"));
        assert!(html.as_str().contains(r#"for="other""#));
        assert!(!html.as_str().contains(r#"for="q""#));
        assert_eq!(html.as_str().matches("for=").count(), 1);
    }

    #[test]
    fn test_button_with_options() {
        let mut form = FormBuilder::new();
        let html = form.button(
            Some("Send"),
            Attributes::new()
                .with("type", "submit")
                .with("name", "action")
                .with_flag("disabled"),
        );
        assert!(html.as_str().contains(r#"type="submit""#));
        assert!(html.as_str().contains(r#"name="action""#));
        assert!(html.as_str().contains("disabled"));
        assert_eq!(html.as_str().matches("type=").count(), 1);
        assert!(html.as_str().contains(">Send</button>"));
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("first_name"), "First Name");
        assert_eq!(humanize("email"), "Email");
    }
}
