//! CLI command implementations

pub mod cache;
pub mod render;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tplkit_core::LoaderConfig;

/// Configuration from `--config` (or defaults), with `--folder` applied
pub(crate) fn load_config(config: Option<&Path>, folder: Option<PathBuf>) -> Result<LoaderConfig> {
    let mut loaded = match config {
        Some(path) => LoaderConfig::from_file(path)?,
        None => LoaderConfig::default(),
    };
    if folder.is_some() {
        loaded.folder = folder;
    }
    Ok(loaded)
}
