//! Placeholder substitution
//!
//! Substitution is literal: a [`VariableMap`] maps tokens such as
//! `$MODEL_NAME$` to replacement text and [`VariableMap::fill`] replaces them
//! in one left-to-right pass. At each position the longest matching token
//! wins, so a short token never eats the prefix of a longer one, and inserted
//! text is never scanned again.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::Field;
use crate::templates::tokens;

/// Ordered token → replacement map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableMap {
    values: BTreeMap<String, String>,
}

impl VariableMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this map with one more variable
    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(token, value);
        self
    }

    /// Add or replace a variable
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.values.insert(token.into(), value.into());
    }

    /// Add every variable of `other`, replacing existing ones
    pub fn extend(&mut self, other: &VariableMap) {
        self.values
            .extend(other.values.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Look up a variable
    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    /// Check whether a variable is present
    pub fn contains(&self, token: &str) -> bool {
        self.values.contains_key(token)
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate variables in token order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every known token in `text`
    ///
    /// Tokens not present in the map are left as they are.
    pub fn fill(&self, text: &str) -> String {
        let mut keys: Vec<&str> = self
            .values
            .keys()
            .map(String::as_str)
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            return text.to_string();
        }
        keys.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut pos = 0;

        while pos < text.len() {
            if !text.is_char_boundary(pos) {
                pos += 1;
                continue;
            }
            let rest = &text[pos..];
            match keys.iter().find(|key| rest.starts_with(**key)) {
                Some(key) => {
                    out.push_str(&text[copied..pos]);
                    out.push_str(&self.values[*key]);
                    pos += key.len();
                    copied = pos;
                }
                None => pos += 1,
            }
        }
        out.push_str(&text[copied..]);
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Field attribute a token can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAttribute {
    /// The raw field name
    Name,
    /// The display label
    Title,
}

impl FieldAttribute {
    /// Read this attribute from a field
    pub fn value_of<'f>(&self, field: &'f Field) -> Cow<'f, str> {
        match self {
            FieldAttribute::Name => Cow::Borrowed(field.name.as_str()),
            FieldAttribute::Title => field.title(),
        }
    }
}

/// Token → field attribute bindings used for per-field fills
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    bindings: Vec<(&'static str, FieldAttribute)>,
}

impl FieldBinding {
    /// Bind arbitrary tokens
    pub fn new(bindings: Vec<(&'static str, FieldAttribute)>) -> Self {
        Self { bindings }
    }

    /// `$FIELD_NAME_TITLE$` → title, `$FIELD_NAME$` → name
    pub fn standard() -> Self {
        Self::new(vec![
            (tokens::FIELD_NAME_TITLE, FieldAttribute::Title),
            (tokens::FIELD_NAME, FieldAttribute::Name),
        ])
    }

    fn tokens_for(&self, attribute: FieldAttribute) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, bound)| *bound == attribute)
            .map(|(token, _)| *token)
    }

    fn resolve(&self, field: &Field) -> VariableMap {
        self.bindings
            .iter()
            .map(|(token, attribute)| (*token, attribute.value_of(field)))
            .collect()
    }
}

/// Fill the bound field attributes, then the global variables
pub fn fill_with_field(
    vars: &VariableMap,
    binding: &FieldBinding,
    template: &str,
    field: &Field,
) -> String {
    let with_field = binding.resolve(field).fill(template);
    vars.fill(&with_field)
}

/// Localized per-field fill
///
/// Title tokens become a translation lookup keyed by model and field name.
/// Name-bound tokens such as `$FIELD_NAME$` are replaced with the literal name
/// before any title token is wrapped; global variables are filled last.
pub fn fill_with_field_locale(
    vars: &VariableMap,
    binding: &FieldBinding,
    template: &str,
    field: &Field,
) -> String {
    let named = binding
        .tokens_for(FieldAttribute::Name)
        .fold(template.to_string(), |text, token| {
            replace_token(&text, token, &field.name)
        });

    let lookup = locale_lookup(vars, &field.name);
    let titles: VariableMap = binding
        .tokens_for(FieldAttribute::Title)
        .map(|token| (token, lookup.as_str()))
        .collect();

    vars.fill(&titles.fill(&named))
}

/// Translation lookup expression for a field label
pub fn locale_lookup(vars: &VariableMap, field_name: &str) -> String {
    let model = vars.get(tokens::MODEL_NAME_PLURAL_CAMEL).unwrap_or_default();
    format!("@lang('models/{}.fields.{}')", model, field_name)
}

/// Replace a single token everywhere in `text`
pub fn replace_token(text: &str, token: &str, value: &str) -> String {
    VariableMap::new().with(token, value).fill(text)
}

/// Tokens still present in rendered text
///
/// Unfilled tokens are not errors; callers report them as warnings.
pub fn unresolved_tokens(text: &str) -> Vec<String> {
    let mut found: Vec<String> = get_token_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    found.sort();
    found.dedup();
    found
}

fn get_token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\$[A-Z][A-Z0-9_]*\$").expect("Invalid regex"))
}
