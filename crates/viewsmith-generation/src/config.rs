//! Generator settings
//!
//! Settings say where stubs come from and how output is written. They are
//! loaded from YAML or JSON (picked by file extension) and can be overridden
//! through `VIEWSMITH_*` environment variables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenerationError, GenerationResult};

/// Prefix of environment variables that override settings
pub const ENV_PREFIX: &str = "VIEWSMITH_";

/// Default template set
pub const DEFAULT_TEMPLATE_SET: &str = "adminlte-templates";

/// Settings shared by every generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Active template set (theme)
    #[serde(default = "default_template_set")]
    pub templates: String,
    /// Directory containing one subdirectory per template set
    #[serde(default = "default_templates_path")]
    pub templates_path: PathBuf,
    /// Directory of published stubs read before the template set
    #[serde(default)]
    pub published_path: Option<PathBuf>,
    /// Report writes and deletions without touching disk
    #[serde(default)]
    pub dry_run: bool,
}

fn default_template_set() -> String {
    DEFAULT_TEMPLATE_SET.to_string()
}

fn default_templates_path() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            templates: default_template_set(),
            templates_path: default_templates_path(),
            published_path: None,
            dry_run: false,
        }
    }
}

/// Supported settings file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl SettingsFormat {
    /// Detect format from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Some(SettingsFormat::Yaml),
            "json" => Some(SettingsFormat::Json),
            _ => None,
        }
    }
}

/// Loads [`GeneratorSettings`] from files and the environment
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a file, then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> GenerationResult<GeneratorSettings> {
        let mut settings = Self::load_from_file(path)?;
        EnvOverrides::apply(&mut settings);
        Ok(settings)
    }

    /// Load settings from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GenerationResult<GeneratorSettings> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                GenerationError::Config(format!("{} has no extension", path.display()))
            })?;

        let format = SettingsFormat::from_extension(extension).ok_or_else(|| {
            GenerationError::Config(format!("Unsupported settings format: {}", extension))
        })?;

        debug!("Loading generator settings from {}", path.display());
        Self::load_from_string(&content, format)
    }

    /// Parse settings text in the given format
    pub fn load_from_string(
        content: &str,
        format: SettingsFormat,
    ) -> GenerationResult<GeneratorSettings> {
        match format {
            SettingsFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| GenerationError::Config(format!("YAML: {}", e))),
            SettingsFormat::Json => serde_json::from_str(content)
                .map_err(|e| GenerationError::Config(format!("JSON: {}", e))),
        }
    }
}

/// Environment variable overrides
pub struct EnvOverrides;

impl EnvOverrides {
    /// Collect `VIEWSMITH_*` variables, keyed by the lowercased remainder
    pub fn parse() -> HashMap<String, String> {
        std::env::vars()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|rest| (rest.to_lowercase(), value))
            })
            .collect()
    }

    /// Apply the current environment to `settings`
    pub fn apply(settings: &mut GeneratorSettings) {
        let overrides = Self::parse();
        Self::apply_overrides(settings, &overrides);
    }

    /// Apply specific overrides; unknown keys are ignored
    pub fn apply_overrides(settings: &mut GeneratorSettings, overrides: &HashMap<String, String>) {
        for (key, value) in overrides {
            match key.as_str() {
                "templates" => settings.templates = value.clone(),
                "templates_path" => settings.templates_path = PathBuf::from(value),
                "published_path" | "override_path" => {
                    settings.published_path = Some(PathBuf::from(value))
                }
                "dry_run" => {
                    settings.dry_run = matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
                }
                _ => debug!("Ignoring unknown override {}{}", ENV_PREFIX, key.to_uppercase()),
            }
        }
    }
}
