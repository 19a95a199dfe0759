//! Per-field form markup
//!
//! Picks the field stub for a field's [`HtmlType`], fills the type-specific
//! tokens (`$INPUT_ARR$`, `$CHECKBOX_VALUE$`, `$RADIO_BUTTONS$`) and, for
//! select-from-table fields, registers the option variable with the
//! [`ViewDataRegistrar`]. Field name/title tokens and global variables are left
//! for the caller to fill.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::{
    error::{GenerationError, GenerationResult},
    inflector,
    models::{Field, HtmlType},
    templates::{tokens, TemplateStore, VariableMap},
    view_data::{ViewDataRegistrar, ViewVariable},
};

/// Suffix of localized stub variants
pub const LOCALE_SUFFIX: &str = "_locale";

/// Dotted name of a field stub, with the locale suffix when asked for
pub fn field_stub_name(stub: &str, localized: bool) -> String {
    format!(
        "scaffold.fields.{}{}",
        stub,
        if localized { LOCALE_SUFFIX } else { "" }
    )
}

/// Attribute string built from `min:`/`max:` validation rules
///
/// Each rule adds `,'minlength' => N` / `,'maxlength' => N`, or `,'min' => N` /
/// `,'max' => N` for number inputs, in rule order. The bound is whatever follows
/// the colon, trimmed. Repeated rules are all kept.
pub fn size_attributes(field: &Field) -> String {
    field
        .validations
        .split('|')
        .filter_map(|rule| {
            let caps = get_size_rule_regex().captures(rule.trim())?;
            let bound = caps.get(1)?.as_str();
            let size = caps.get(2)?.as_str().trim();
            if size.is_empty() {
                return None;
            }
            let attribute = match (field.html_type, bound) {
                (HtmlType::Number, _) => bound,
                (_, "min") => "minlength",
                _ => "maxlength",
            };
            Some(format!(",'{}' => {}", attribute, size))
        })
        .collect()
}

fn get_size_rule_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(min|max):(.*)$").expect("Invalid regex"))
}

/// `['label' => 'value', ...]` from `label:value` (or bare `value`) entries
pub fn key_value_options(values: &[String]) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    for entry in values.iter().map(String::as_str) {
        let (label, value) = entry.split_once(':').unwrap_or((entry, entry));
        match pairs.iter_mut().find(|(existing, _)| *existing == label) {
            Some(pair) => pair.1 = value,
            None => pairs.push((label, value)),
        }
    }

    let body = pairs
        .iter()
        .map(|(label, value)| format!("'{}' => '{}'", label, value))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", body)
}

/// Source of a select-from-table field's options
///
/// `html_values[0]` is `table[,Model]`, `html_values[1]` the column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectTableSource {
    /// Table the options come from
    pub table: String,
    /// Model used to query it, when given
    pub model: Option<String>,
    /// Columns to select, in order
    pub columns: Vec<String>,
}

impl SelectTableSource {
    /// Parse the source from a field's html values
    pub fn parse(field: &Field) -> GenerationResult<Self> {
        let source = field
            .html_values
            .first()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GenerationError::malformed_field(&field.name, "missing source table"))?;
        let columns = field
            .html_values
            .get(1)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GenerationError::malformed_field(&field.name, "missing column list"))?;

        let mut parts = source.split(',').map(str::trim);
        let table = parts.next().unwrap_or_default().to_string();
        let model = parts.next().filter(|m| !m.is_empty()).map(str::to_string);

        Ok(Self {
            table,
            model,
            columns: columns.split(',').map(|c| c.trim().to_string()).collect(),
        })
    }

    /// `'id','email'`
    pub fn quoted_columns(&self) -> String {
        self.columns
            .iter()
            .map(|column| format!("'{}'", column))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `users` → `userItems`
    pub fn variable_name(&self) -> String {
        format!("{}Items", inflector::singular(&self.table))
    }
}

/// Builds the form markup of single fields
pub struct FieldMarkupGenerator<'a> {
    store: &'a dyn TemplateStore,
    registrar: &'a dyn ViewDataRegistrar,
    template_set: &'a str,
}

impl<'a> FieldMarkupGenerator<'a> {
    /// Create a generator reading stubs from `template_set`
    pub fn new(
        store: &'a dyn TemplateStore,
        registrar: &'a dyn ViewDataRegistrar,
        template_set: &'a str,
    ) -> Self {
        Self {
            store,
            registrar,
            template_set,
        }
    }

    fn stub(&self, stub: &str, localized: bool) -> GenerationResult<String> {
        self.store
            .resolve(self.template_set, &field_stub_name(stub, localized))
    }

    /// Markup for one field, or empty text when its type has no stub
    ///
    /// `scope` is the view that select-from-table variables are registered for.
    pub fn generate(&self, field: &Field, localized: bool, scope: &str) -> GenerationResult<String> {
        debug!("Generating {} markup for field {}", field.html_type, field.name);

        match field.html_type {
            HtmlType::Text
            | HtmlType::Textarea
            | HtmlType::Email
            | HtmlType::Password
            | HtmlType::Number
            | HtmlType::Date
            | HtmlType::File => self.stub(field.html_type.as_str(), localized),
            HtmlType::Checkbox => self.checkable(field, "checkbox", localized),
            HtmlType::Boolean => self.checkable(field, "boolean", localized),
            HtmlType::ToggleSwitch => self.checkable(field, "toggle_switch", localized),
            HtmlType::Select | HtmlType::Enum => {
                let template = self.stub("select", localized)?;
                Ok(VariableMap::new()
                    .with(tokens::INPUT_ARR, key_value_options(&field.html_values))
                    .fill(&template))
            }
            HtmlType::Radio => self.radio_group(field, localized),
            HtmlType::SelectTable => self.select_table(field, localized, scope),
            HtmlType::Unsupported => Ok(String::new()),
        }
    }

    fn checkable(&self, field: &Field, stub: &str, localized: bool) -> GenerationResult<String> {
        let template = self.stub(stub, localized)?;
        let value = field.html_values.first().map(String::as_str).unwrap_or("1");
        Ok(VariableMap::new()
            .with(tokens::CHECKBOX_VALUE, value)
            .fill(&template))
    }

    fn radio_group(&self, field: &Field, localized: bool) -> GenerationResult<String> {
        let group = self.stub("radio_group", localized)?;
        let radio = self.stub("radio", false)?;

        let buttons = field
            .html_values
            .iter()
            .map(String::as_str)
            .map(|entry| {
                let (label, value) = entry.split_once(':').unwrap_or((entry, entry));
                VariableMap::new()
                    .with(tokens::LABEL, label)
                    .with(tokens::VALUE, value)
                    .fill(&radio)
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(VariableMap::new()
            .with(tokens::RADIO_BUTTONS, buttons)
            .fill(&group))
    }

    fn select_table(&self, field: &Field, localized: bool, scope: &str) -> GenerationResult<String> {
        let source = SelectTableSource::parse(field)?;
        let template = self.stub("select", localized)?;
        let variable = source.variable_name();

        self.registrar.register_view_variable(ViewVariable {
            scope: scope.to_string(),
            variable: variable.clone(),
            columns: source.quoted_columns(),
            source_table: source.table.clone(),
            model: source.model.clone(),
        })?;
        debug!("Registered ${} for {} from {}", variable, scope, source.table);

        Ok(VariableMap::new()
            .with(tokens::INPUT_ARR, format!("${}", variable))
            .fill(&template))
    }
}
