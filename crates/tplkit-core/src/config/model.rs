use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::consts;
use crate::error::{Result, TplkitError};

/// tplkit.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    loader: LoaderConfig,
    #[serde(default)]
    cache: Option<CacheConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Templates folder; `$DOCUMENT_ROOT/tmpl/` when unset
    pub folder: Option<PathBuf>,
    pub extension: String,
    pub max_includes: usize,
    pub max_dimension: usize,
    pub max_template_bytes: u64,
    pub show_errors: bool,
    pub show_warnings: bool,
    #[serde(skip)]
    pub cache: CacheConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            folder: None,
            extension: consts::DEFAULT_EXTENSION.to_string(),
            max_includes: consts::include::MAX_PER_PASS,
            max_dimension: consts::include::MAX_DIMENSION,
            max_template_bytes: consts::MAX_TEMPLATE_BYTES,
            show_errors: false,
            show_warnings: true,
            cache: CacheConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub allow: bool,
    pub max_store_hours: u64,
    pub max_entries: usize,
    pub max_bytes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            allow: false,
            max_store_hours: consts::cache::MAX_STORE_HOURS,
            max_entries: consts::cache::MAX_ENTRIES,
            max_bytes: consts::MAX_TEMPLATE_BYTES,
        }
    }
}

impl LoaderConfig {
    /// Read a tplkit.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TplkitError::ConfigParseError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| TplkitError::ConfigParseError(e.to_string()))?;

        let mut config = file.loader;
        if let Some(cache) = file.cache {
            config.cache = cache;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.extension.starts_with('.') {
            return Err(invalid("loader.extension", "must start with '.'"));
        }
        if self.max_template_bytes == 0 {
            return Err(invalid("loader.max_template_bytes", "must be greater than 0"));
        }
        if self.cache.max_entries == 0 {
            return Err(invalid("cache.max_entries", "must be greater than 0"));
        }
        if self.cache.max_bytes == 0 {
            return Err(invalid("cache.max_bytes", "must be greater than 0"));
        }
        Ok(())
    }

    /// Templates folder, falling back to `$DOCUMENT_ROOT/tmpl/` (or `./tmpl/`)
    pub fn resolve_folder(&self) -> PathBuf {
        match &self.folder {
            Some(folder) => folder.clone(),
            None => {
                let root = std::env::var_os(consts::DOCUMENT_ROOT_ENV)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."));
                root.join(consts::TEMPLATES_SUBDIR)
            }
        }
    }
}

fn invalid(field: &str, reason: &str) -> TplkitError {
    TplkitError::ConfigInvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
