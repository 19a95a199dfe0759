//! Property-based tests for placeholder substitution
//!
//! Filling is literal, single pass and longest-match; unknown tokens and plain
//! text pass through untouched.

use proptest::prelude::*;
use viewsmith_generation::templates::{
    fill_with_field, fill_with_field_locale, tokens, unresolved_tokens, FieldBinding, VariableMap,
};
use viewsmith_generation::{Field, HtmlType};

/// Strategy for token names such as `$MODEL_NAME$`
fn token_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z_]{0,12}".prop_map(|name| format!("${}$", name))
}

/// Strategy for text that cannot contain a token
fn plain_text_strategy() -> impl Strategy<Value = String> {
    r"[a-zA-Z0-9 <>/{}=\-'\n]{0,60}"
}

/// Strategy for field names
fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,12}"
}

proptest! {
    /// Property: text without tokens is returned unchanged
    #[test]
    fn prop_fill_is_identity_without_tokens(
        text in plain_text_strategy(),
        token in token_strategy(),
        value in "[a-z]{0,10}",
    ) {
        let vars = VariableMap::new().with(token, value);
        prop_assert_eq!(vars.fill(&text), text);
    }

    /// Property: every occurrence of a known token is replaced
    #[test]
    fn prop_fill_replaces_every_occurrence(
        prefix in plain_text_strategy(),
        suffix in plain_text_strategy(),
        token in token_strategy(),
        value in "[a-z ]{0,10}",
    ) {
        let vars = VariableMap::new().with(token.as_str(), value.as_str());
        let text = format!("{}{}{}{}", prefix, token, suffix, token);

        let filled = vars.fill(&text);

        prop_assert_eq!(filled, format!("{}{}{}{}", prefix, value, suffix, value));
    }

    /// Property: inserted values are never scanned again
    #[test]
    fn prop_fill_does_not_recurse(token in token_strategy()) {
        let value = format!("[{}]", token);
        let vars = VariableMap::new().with(token.as_str(), value.as_str());

        prop_assert_eq!(vars.fill(&token), value);
    }

    /// Property: unknown tokens are left in place and reported
    #[test]
    fn prop_unknown_tokens_survive(
        known in token_strategy(),
        unknown in token_strategy(),
    ) {
        prop_assume!(!unknown.starts_with(known.trim_end_matches('$')));
        let vars = VariableMap::new().with(known.as_str(), "x");

        let filled = vars.fill(&unknown);

        prop_assert_eq!(&filled, &unknown);
        prop_assert_eq!(unresolved_tokens(&filled), vec![unknown]);
    }

    /// Property: the raw name token is filled with the field name
    #[test]
    fn prop_field_fill_uses_field_name(name in field_name_strategy()) {
        let field = Field::new(name.as_str(), HtmlType::Text);
        let binding = FieldBinding::new(vec![
            (tokens::FIELD_NAME, viewsmith_generation::FieldAttribute::Name),
        ]);

        let filled = fill_with_field(&VariableMap::new(), &binding, "$FIELD_NAME$ input", &field);

        prop_assert_eq!(filled, format!("{} input", name));
    }

    /// Property: locale fills keep the literal name next to the wrapped title
    #[test]
    fn prop_locale_fill_keeps_raw_name(name in field_name_strategy()) {
        let field = Field::new(name.as_str(), HtmlType::Text);
        let vars = VariableMap::new().with(tokens::MODEL_NAME_PLURAL_CAMEL, "posts");

        let filled = fill_with_field_locale(
            &vars,
            &FieldBinding::standard(),
            "<label for=\"$FIELD_NAME$\">$FIELD_NAME_TITLE$</label>",
            &field,
        );

        prop_assert_eq!(
            filled,
            format!(
                "<label for=\"{}\">@lang('models/posts.fields.{}')</label>",
                name, name
            )
        );
    }
}
