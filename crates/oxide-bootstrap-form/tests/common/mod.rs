#![allow(dead_code)]

use std::sync::Arc;

use oxide_bootstrap_form::{
    Attributes, BootstrapFormBuilder, ErrorBag, FormBuilderConfig, FormRenderer, HtmlString,
    OptionAttributes, SelectList,
};

/// Renderer with fixed, easy to predict output.
#[derive(Debug, Default)]
pub struct StubRenderer {
    pub calls: Vec<String>,
}

impl FormRenderer for StubRenderer {
    fn label(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.calls.push(format!("label:{name}"));
        HtmlString::new(format!(
            r#"<label for="{name}"{}>{}</label>"#,
            options.to_html(),
            value.unwrap_or(name)
        ))
    }

    fn input(
        &mut self,
        input_type: &str,
        name: &str,
        value: Option<&str>,
        options: Attributes,
    ) -> HtmlString {
        self.calls.push(format!("input:{input_type}:{name}"));
        let value = value.map(|v| format!(r#" value="{v}""#)).unwrap_or_default();
        HtmlString::new(format!(
            r#"<input type="{input_type}" name="{name}"{value}{}>"#,
            options.to_html()
        ))
    }

    fn select(
        &mut self,
        name: &str,
        list: &SelectList,
        _selected: Option<&str>,
        select_attributes: Attributes,
        _option_attributes: &OptionAttributes,
    ) -> HtmlString {
        self.calls.push(format!("select:{name}"));
        HtmlString::new(format!(
            r#"<select name="{name}"{}>{} options</select>"#,
            select_attributes.to_html(),
            list.entries().len()
        ))
    }

    fn textarea(&mut self, name: &str, value: Option<&str>, options: Attributes) -> HtmlString {
        self.calls.push(format!("textarea:{name}"));
        HtmlString::new(format!(
            r#"<textarea name="{name}"{}>{}</textarea>"#,
            options.to_html(),
            value.unwrap_or_default()
        ))
    }

    fn checkbox(
        &mut self,
        name: &str,
        value: &str,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString {
        self.calls.push(format!("checkbox:{name}"));
        let checked = if checked.unwrap_or(false) { " checked" } else { "" };
        HtmlString::new(format!(
            r#"<input type="checkbox" name="{name}" value="{value}"{checked}{}>"#,
            options.to_html()
        ))
    }

    fn radio(
        &mut self,
        name: &str,
        value: Option<&str>,
        checked: Option<bool>,
        options: Attributes,
    ) -> HtmlString {
        self.calls.push(format!("radio:{name}"));
        let value = value.unwrap_or(name);
        let checked = if checked.unwrap_or(false) { " checked" } else { "" };
        HtmlString::new(format!(
            r#"<input type="radio" name="{name}" value="{value}"{checked}{}>"#,
            options.to_html()
        ))
    }

    fn button(&mut self, value: Option<&str>, options: Attributes) -> HtmlString {
        self.calls.push("button".to_string());
        HtmlString::new(format!(
            "<button{}>{}</button>",
            options.to_html(),
            value.unwrap_or_default()
        ))
    }
}

pub fn config() -> FormBuilderConfig {
    FormBuilderConfig::new()
        .group_class("form-group")
        .error_class("has-error")
        .control_class("form-control")
        .submit_class("btn btn-primary")
}

pub fn stub_form() -> BootstrapFormBuilder<StubRenderer> {
    BootstrapFormBuilder::new(StubRenderer::default(), Arc::new(config()))
}

pub fn stub_form_with_errors(errors: ErrorBag) -> BootstrapFormBuilder<StubRenderer> {
    stub_form().with_errors(Arc::new(errors))
}
