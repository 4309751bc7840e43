//! Template folder fixtures

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::temp_dir_in_workspace;

/// A throwaway templates folder
///
/// ```rust
/// use tplkit_testkit::TemplateDir;
///
/// let dir = TemplateDir::new().with("hello", "Hi <!--[name]-->!");
/// assert!(dir.path().join("hello.tpl").is_file());
/// ```
pub struct TemplateDir {
    temp: TempDir,
}

impl TemplateDir {
    pub fn new() -> Self {
        Self {
            temp: temp_dir_in_workspace(),
        }
    }

    /// Add `<name>.tpl`
    pub fn with(self, name: &str, text: &str) -> Self {
        self.write(name, text);
        self
    }

    /// Write `<name>.tpl`, creating subdirectories for names with `/`
    pub fn write(&self, name: &str, text: &str) -> PathBuf {
        let path = self.path().join(format!("{}.tpl", name));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create template subdirectory");
        }
        std::fs::write(&path, text).expect("Failed to write template");
        path
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn cache_file(&self) -> PathBuf {
        self.path().join("cache").join("0.cobj")
    }

    /// Contents of the cache index, if written
    pub fn read_cache(&self) -> Option<String> {
        std::fs::read_to_string(self.cache_file()).ok()
    }
}

impl Default for TemplateDir {
    fn default() -> Self {
        Self::new()
    }
}
