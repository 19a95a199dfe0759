//! Stub templates: lookup, token vocabulary and substitution

pub mod resolver;
pub mod store;
pub mod tokens;

// Re-export public API
pub use resolver::{
    fill_with_field, fill_with_field_locale, locale_lookup, replace_token, unresolved_tokens,
    FieldAttribute, FieldBinding, VariableMap,
};
pub use store::{
    stub_relative_path, DirectoryTemplateStore, InMemoryTemplateStore, TemplateStore,
    STUB_EXTENSION,
};
