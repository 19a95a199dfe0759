//! Property-based tests for size constraint extraction

use proptest::prelude::*;
use viewsmith_generation::{size_attributes, Field, HtmlType};

/// Strategy for html types that render length attributes
fn text_like_strategy() -> impl Strategy<Value = HtmlType> {
    prop_oneof![
        Just(HtmlType::Text),
        Just(HtmlType::Textarea),
        Just(HtmlType::Email),
        Just(HtmlType::Password),
    ]
}

/// Strategy for rules that never yield a size
fn other_rule_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("required".to_string()),
        Just("nullable".to_string()),
        Just("string".to_string()),
        Just("between:1,5".to_string()),
        Just("minimum:3".to_string()),
    ]
}

proptest! {
    /// Property: text inputs get minlength/maxlength in rule order
    #[test]
    fn prop_text_sizes_in_rule_order(
        html_type in text_like_strategy(),
        min in 0u32..1000,
        max in 0u32..1000,
        leading in other_rule_strategy(),
    ) {
        let field = Field::new("title", html_type)
            .with_validations(format!("{}|min:{}|max:{}", leading, min, max));

        prop_assert_eq!(
            size_attributes(&field),
            format!(",'minlength' => {},'maxlength' => {}", min, max)
        );
    }

    /// Property: number inputs get min/max
    #[test]
    fn prop_number_sizes_use_min_max(min in 0u32..1000, max in 0u32..1000) {
        let field = Field::new("age", HtmlType::Number)
            .with_validations(format!("max:{}|required|min:{}", max, min));

        let size = size_attributes(&field);

        prop_assert_eq!(&size, &format!(",'max' => {},'min' => {}", max, min));
        prop_assert!(!size.contains("length"));
    }

    /// Property: signed bounds and padding after the colon are kept verbatim
    #[test]
    fn prop_signed_bounds_are_kept(min in -1000i32..0, max in 0i32..1000, pad in " {0,2}") {
        let field = Field::new("temperature", HtmlType::Number)
            .with_validations(format!("numeric|min:{}{}|max:{}{}", pad, min, pad, max));

        prop_assert_eq!(
            size_attributes(&field),
            format!(",'min' => {},'max' => {}", min, max)
        );
    }

    /// Property: rules without a size bound contribute nothing
    #[test]
    fn prop_other_rules_contribute_nothing(
        rules in prop::collection::vec(other_rule_strategy(), 0..5),
    ) {
        let field = Field::new("title", HtmlType::Text).with_validations(rules.join("|"));
        prop_assert_eq!(size_attributes(&field), "");
    }
}
