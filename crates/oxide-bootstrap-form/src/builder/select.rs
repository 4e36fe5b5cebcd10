//! Option lists for select boxes.

use std::collections::HashMap;

use crate::html::{html_escape, Attributes};

/// Extra attributes for individual options, keyed by option value.
pub type OptionAttributes = HashMap<String, Attributes>;

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEntry {
    /// A plain `<option>`.
    Option {
        /// Submitted value.
        value: String,
        /// Displayed text.
        display: String,
    },
    /// An `<optgroup>` of (value, display) options.
    Group {
        /// Group label.
        label: String,
        /// Options in the group.
        options: Vec<(String, String)>,
    },
}

/// The choices offered by a select box, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectList {
    entries: Vec<SelectEntry>,
}

impl SelectList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option.
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, display: impl Into<String>) -> Self {
        self.entries.push(SelectEntry::Option {
            value: value.into(),
            display: display.into(),
        });
        self
    }

    /// Adds an option group.
    #[must_use]
    pub fn group(
        mut self,
        label: impl Into<String>,
        options: Vec<(impl Into<String>, impl Into<String>)>,
    ) -> Self {
        self.entries.push(SelectEntry::Group {
            label: label.into(),
            options: options
                .into_iter()
                .map(|(v, d)| (v.into(), d.into()))
                .collect(),
        });
        self
    }

    /// Returns the entries.
    pub fn entries(&self) -> &[SelectEntry] {
        &self.entries
    }

    /// Returns whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Into<String>, D: Into<String>> FromIterator<(V, D)> for SelectList {
    fn from_iter<I: IntoIterator<Item = (V, D)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |list, (v, d)| list.option(v, d))
    }
}

/// Renders the placeholder option, selected when nothing else is.
pub(crate) fn placeholder_option(display: &str, selected: &[String]) -> String {
    let selected_attr = if selected.iter().all(String::is_empty) {
        r#" selected="selected""#
    } else {
        ""
    };
    format!(
        r#"<option value=""{selected_attr}>{}</option>"#,
        html_escape(display)
    )
}

/// Renders every entry of `list` as `<option>`/`<optgroup>` markup.
pub(crate) fn render_options(
    list: &SelectList,
    selected: &[String],
    option_attributes: &OptionAttributes,
) -> String {
    let mut html = String::new();
    for entry in list.entries() {
        match entry {
            SelectEntry::Option { value, display } => {
                html.push_str(&option(value, display, selected, option_attributes));
            }
            SelectEntry::Group { label, options } => {
                let inner: String = options
                    .iter()
                    .map(|(value, display)| option(value, display, selected, option_attributes))
                    .collect();
                html.push_str(&format!(
                    r#"<optgroup label="{}">{inner}</optgroup>"#,
                    html_escape(label)
                ));
            }
        }
    }
    html
}

fn option(
    value: &str,
    display: &str,
    selected: &[String],
    option_attributes: &OptionAttributes,
) -> String {
    let mut attrs = Attributes::new().with("value", value);
    if selected.iter().any(|s| s == value) {
        attrs.set("selected", "selected");
    }
    if let Some(extra) = option_attributes.get(value) {
        for (key, v) in extra.iter() {
            match v {
                Some(v) => attrs.set(key, v),
                None => attrs.flag(key),
            }
        }
    }
    format!("<option{}>{}</option>", attrs.to_html(), html_escape(display))
}
