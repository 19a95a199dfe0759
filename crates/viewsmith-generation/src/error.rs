//! Error types for view generation

use thiserror::Error;

/// Result alias used throughout the generation crate
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors that can occur during view generation
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Stub missing from the active template set
    #[error("Template not found: {name} (template set: {template_set})")]
    TemplateNotFound {
        /// Template set that was searched
        template_set: String,
        /// Dotted logical template name
        name: String,
    },

    /// Table rendering mode is not one of blade, datatables or livewire
    #[error("Invalid table type: {0}")]
    InvalidTableType(String),

    /// Field values could not be parsed for the field's html type
    #[error("Malformed config for field '{field}': {message}")]
    MalformedFieldConfig {
        /// Name of the offending field
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// Generator settings could not be loaded
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Write failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Rollback failed
    #[error("Rollback failed: {0}")]
    RollbackFailed(String),
}

impl GenerationError {
    /// Shorthand for a missing stub
    pub fn template_not_found(template_set: impl Into<String>, name: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            template_set: template_set.into(),
            name: name.into(),
        }
    }

    /// Shorthand for a field whose values cannot be parsed
    pub fn malformed_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedFieldConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}
