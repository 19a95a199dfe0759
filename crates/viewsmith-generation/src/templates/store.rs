//! Stub lookup
//!
//! Stubs live in a themed directory tree:
//!
//! ```text
//! templates/
//! └── adminlte-templates/          # template set
//!     └── scaffold/
//!         ├── fields/text.stub     # scaffold.fields.text
//!         └── views/index.stub     # scaffold.views.index
//! ```
//!
//! A project may publish its own copies of stubs into a flat override
//! directory using the same relative layout; those are read first.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::GeneratorSettings;
use crate::error::{GenerationError, GenerationResult};

/// File extension of stub documents
pub const STUB_EXTENSION: &str = "stub";

/// Resolves a logical template name within a template set to raw stub text
pub trait TemplateStore {
    /// Look up a stub; no substitution happens here
    fn resolve(&self, template_set: &str, name: &str) -> GenerationResult<String>;
}

/// Relative path of a dotted template name: `scaffold.views.index` → `scaffold/views/index.stub`
pub fn stub_relative_path(name: &str) -> PathBuf {
    let mut path: PathBuf = name.split('.').collect();
    path.set_extension(STUB_EXTENSION);
    path
}

/// Template store backed by stub files on disk
#[derive(Debug, Clone)]
pub struct DirectoryTemplateStore {
    /// Directory holding one subdirectory per template set
    root: PathBuf,
    /// Directory of published stubs that take precedence over the set
    published: Option<PathBuf>,
}

impl DirectoryTemplateStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            published: None,
        }
    }

    /// Build a store from generator settings
    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        Self {
            root: settings.templates_path.clone(),
            published: settings.published_path.clone(),
        }
    }

    /// Consult `dir` before the template set
    pub fn with_published(mut self, dir: impl Into<PathBuf>) -> Self {
        self.published = Some(dir.into());
        self
    }

    /// Root directory of the template sets
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a stub is expected at inside a template set
    pub fn path_for(&self, template_set: &str, name: &str) -> PathBuf {
        self.root.join(template_set).join(stub_relative_path(name))
    }

    fn read_if_present(path: &Path) -> GenerationResult<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GenerationError::IoError(e)),
        }
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn resolve(&self, template_set: &str, name: &str) -> GenerationResult<String> {
        if let Some(published) = &self.published {
            let path = published.join(stub_relative_path(name));
            if let Some(content) = Self::read_if_present(&path)? {
                debug!("Using published stub {}", path.display());
                return Ok(content);
            }
        }

        let path = self.path_for(template_set, name);
        match Self::read_if_present(&path)? {
            Some(content) => {
                debug!("Resolved {} from {}", name, path.display());
                Ok(content)
            }
            None => Err(GenerationError::template_not_found(template_set, name)),
        }
    }
}

/// Template store holding stubs in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    templates: HashMap<(String, String), String>,
}

impl InMemoryTemplateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stub
    pub fn insert(
        &mut self,
        template_set: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) {
        self.templates
            .insert((template_set.into(), name.into()), content.into());
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(
        mut self,
        template_set: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.insert(template_set, name, content);
        self
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn resolve(&self, template_set: &str, name: &str) -> GenerationResult<String> {
        self.templates
            .get(&(template_set.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| GenerationError::template_not_found(template_set, name))
    }
}
