//! Cache command - list or clear cached renders

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tplkit_core::{CacheManager, FsStore};

use super::load_config;
use crate::output::{print_json, print_line};

#[derive(Serialize)]
struct EntryInfo<'a> {
    template_name: &'a str,
    mod_time: String,
    age_hours: u64,
    bytes: usize,
}

pub fn list(folder: Option<PathBuf>, json: bool, config: Option<&Path>) -> Result<()> {
    let config = load_config(config, folder)?;
    let store = FsStore::new(config.resolve_folder());
    let cache = CacheManager::new(&store, &config.cache);

    let now = Utc::now();
    let entries = cache.entries();
    let infos: Vec<EntryInfo> = entries
        .iter()
        .map(|entry| EntryInfo {
            template_name: &entry.template_name,
            mod_time: entry.mod_time.to_rfc3339(),
            age_hours: entry.age_hours(now),
            bytes: entry.template.len(),
        })
        .collect();

    if json {
        print_json(&infos)?;
        return Ok(());
    }

    if infos.is_empty() {
        print_line("No cached templates")?;
        return Ok(());
    }
    for info in &infos {
        print_line(&format!(
            "{}\t{}h\t{} bytes",
            info.template_name, info.age_hours, info.bytes
        ))?;
    }
    Ok(())
}

pub fn clear(folder: Option<PathBuf>, config: Option<&Path>) -> Result<()> {
    let config = load_config(config, folder)?;
    let store = FsStore::new(config.resolve_folder());
    CacheManager::new(&store, &config.cache).clear()?;
    print_line("Cache cleared")?;
    Ok(())
}
