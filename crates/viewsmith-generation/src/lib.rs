#![warn(missing_docs)]

//! View scaffolding for viewsmith
//!
//! Turns a model description (fields with input types, validation rules and
//! visibility flags) into a family of Blade views by resolving stub templates
//! from a themed template set and filling their `$TOKEN$` placeholders.
//! Also provides rollback of previously generated views.

pub mod config;
pub mod error;
pub mod field_markup;
pub mod inflector;
pub mod models;
pub mod output_writer;
pub mod templates;
pub mod view_assembler;
pub mod view_data;

// Re-export public API
pub use config::{
    EnvOverrides, GeneratorSettings, SettingsFormat, SettingsLoader, DEFAULT_TEMPLATE_SET,
    ENV_PREFIX,
};
pub use error::{GenerationError, GenerationResult};
pub use field_markup::{
    field_stub_name, key_value_options, size_attributes, FieldMarkupGenerator, SelectTableSource,
};
pub use models::{
    Field, GeneratedView, GenerationReport, GeneratorConfig, GeneratorOptions, HtmlType,
    Prefixes, RollbackReport, TableType, ViewFile, ViewKind,
};
pub use output_writer::{
    FileSystem, FileWriteResult, InMemoryFileSystem, OutputWriter, OutputWriterConfig,
};
pub use templates::{
    DirectoryTemplateStore, FieldAttribute, FieldBinding, InMemoryTemplateStore, TemplateStore,
    VariableMap,
};
pub use view_assembler::{nl_tab, plan_views, ViewAssembler};
pub use view_data::{CollectingRegistrar, ViewDataRegistrar, ViewVariable};
