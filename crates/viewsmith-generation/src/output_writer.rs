//! Output writing
//!
//! Generation and rollback touch disk only through the [`FileSystem`] port.
//! [`OutputWriter`] is the real implementation, with a dry-run mode;
//! [`InMemoryFileSystem`] keeps files in memory.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{GenerationError, GenerationResult};

/// File system operations needed by the generator
pub trait FileSystem {
    /// Write `content` to `path`, replacing any existing file
    fn write(&self, path: &Path, content: &str) -> GenerationResult<()>;

    /// Delete `path`; returns whether a file was there
    fn delete(&self, path: &Path) -> GenerationResult<bool>;

    /// Whether `path` exists
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and all missing parents
    fn create_dir_all(&self, path: &Path) -> GenerationResult<()>;
}

/// Configuration for output writing
#[derive(Debug, Clone, Default)]
pub struct OutputWriterConfig {
    /// Log writes and deletions without performing them
    pub dry_run: bool,
}

/// Result of writing a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWriteResult {
    /// Path that was written
    pub path: PathBuf,
    /// Whether the file was actually written
    pub written: bool,
}

/// Writes generated views to disk
#[derive(Debug, Default)]
pub struct OutputWriter {
    config: OutputWriterConfig,
    results: RefCell<Vec<FileWriteResult>>,
}

impl OutputWriter {
    /// Create a writer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom configuration
    pub fn with_config(config: OutputWriterConfig) -> Self {
        Self {
            config,
            results: RefCell::new(Vec::new()),
        }
    }

    /// Create a writer that only logs
    pub fn dry_run() -> Self {
        Self::with_config(OutputWriterConfig { dry_run: true })
    }

    /// Whether this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.config.dry_run
    }

    /// Writes performed so far, in order
    pub fn results(&self) -> Vec<FileWriteResult> {
        self.results.borrow().clone()
    }
}

impl FileSystem for OutputWriter {
    fn write(&self, path: &Path, content: &str) -> GenerationResult<()> {
        if self.config.dry_run {
            info!("[dry-run] would write {}", path.display());
            self.results.borrow_mut().push(FileWriteResult {
                path: path.to_path_buf(),
                written: false,
            });
            return Ok(());
        }

        fs::write(path, content).map_err(|e| {
            GenerationError::WriteFailed(format!("Failed to write {}: {}", path.display(), e))
        })?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());

        self.results.borrow_mut().push(FileWriteResult {
            path: path.to_path_buf(),
            written: true,
        });
        Ok(())
    }

    fn delete(&self, path: &Path) -> GenerationResult<bool> {
        if !path.is_file() {
            return Ok(false);
        }
        if self.config.dry_run {
            info!("[dry-run] would delete {}", path.display());
            return Ok(true);
        }

        fs::remove_file(path).map_err(|e| {
            GenerationError::RollbackFailed(format!("Failed to remove {}: {}", path.display(), e))
        })?;
        Ok(true)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> GenerationResult<()> {
        if self.config.dry_run || path.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(path).map_err(|e| {
            GenerationError::WriteFailed(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// File system kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryFileSystem {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
}

impl InMemoryFileSystem {
    /// Create an empty file system
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a file, if present
    pub fn read(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// All file paths, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl FileSystem for InMemoryFileSystem {
    fn write(&self, path: &Path, content: &str) -> GenerationResult<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn delete(&self, path: &Path) -> GenerationResult<bool> {
        Ok(self.files.borrow_mut().remove(path).is_some())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> GenerationResult<()> {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let writer = OutputWriter::new();
        let path = temp_dir.path().join("index.blade.php");

        writer.write(&path, "<div></div>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<div></div>");
        assert_eq!(writer.results().len(), 1);
        assert!(writer.results()[0].written);
    }

    #[test]
    fn test_dry_run_mode() {
        let temp_dir = TempDir::new().unwrap();
        let writer = OutputWriter::dry_run();
        let dir = temp_dir.path().join("posts");
        let path = dir.join("index.blade.php");

        writer.create_dir_all(&dir).unwrap();
        writer.write(&path, "<div></div>").unwrap();

        assert!(!dir.exists());
        assert!(!path.exists());
        assert!(!writer.results()[0].written);
    }

    #[test]
    fn test_overwrite_leaves_no_backup() {
        let temp_dir = TempDir::new().unwrap();
        let writer = OutputWriter::new();
        let path = temp_dir.path().join("edit.blade.php");
        fs::write(&path, "old content").unwrap();

        writer.write(&path, "new content").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new content");
        assert!(!temp_dir.path().join("edit.blade.php.bak").exists());
    }

    #[test]
    fn test_delete_reports_presence() {
        let temp_dir = TempDir::new().unwrap();
        let writer = OutputWriter::new();
        let path = temp_dir.path().join("table.blade.php");
        fs::write(&path, "x").unwrap();

        assert!(writer.delete(&path).unwrap());
        assert!(!path.exists());
        assert!(!writer.delete(&path).unwrap());
    }

    #[test]
    fn test_create_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let writer = OutputWriter::new();
        let dir = temp_dir.path().join("resources/views/admin/posts");

        writer.create_dir_all(&dir).unwrap();
        assert!(writer.exists(&dir));
    }

    #[test]
    fn test_in_memory_file_system() {
        let fs = InMemoryFileSystem::new();
        let dir = Path::new("views/posts");
        let path = dir.join("index.blade.php");

        fs.create_dir_all(dir).unwrap();
        fs.write(&path, "content").unwrap();

        assert!(fs.exists(dir));
        assert_eq!(fs.read(&path).as_deref(), Some("content"));
        assert!(fs.delete(&path).unwrap());
        assert!(!fs.delete(&path).unwrap());
        assert!(fs.paths().is_empty());
    }
}
