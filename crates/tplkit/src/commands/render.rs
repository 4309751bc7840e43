//! Render command - load a template, apply parameters, write it to stdout

use anyhow::{Context, Result, anyhow, bail};
use std::io::{self, Write};
use std::path::Path;
use tplkit_core::template::{ForEachInput, Loader};

use super::load_config;
use crate::cli::RenderArgs;

pub fn run(args: RenderArgs, config: Option<&Path>) -> Result<()> {
    let mut config = load_config(config, args.folder)?;
    if args.cache {
        config.cache.allow = true;
    }
    if let Some(hours) = args.max_store_hours {
        config.cache.max_store_hours = hours;
    }
    if let Some(max) = args.max_includes {
        config.max_includes = max;
    }
    if args.show_errors {
        config.show_errors = true;
    }
    if args.no_warnings {
        config.show_warnings = false;
    }

    let mut template = Loader::with_config(&args.name, config).load()?;

    for pair in &args.sets {
        let (key, value) = split_pair(pair, "--set")?;
        template.set(key, value)?;
    }

    for pair in &args.fors {
        let (name, list) = split_pair(pair, "--for")?;
        let values: Vec<&str> = if list.is_empty() {
            Vec::new()
        } else {
            list.split(',').collect()
        };
        if !template.for_values(name, values) {
            tracing::debug!(block = name, "for block not applied");
        }
    }

    for pair in &args.for_eaches {
        let (name, json) = split_pair(pair, "--for-each")?;
        let value: serde_json::Value = serde_json::from_str(json)
            .with_context(|| format!("--for-each {}: invalid JSON", name))?;
        let input = ForEachInput::from_json(&value)?;
        if !template.for_each(name, input) {
            tracing::debug!(block = name, "forEach block not applied");
        }
    }

    let mut out = io::stdout().lock();
    template.render(&mut out, !args.keep_comments)?;
    out.flush()?;

    if let Some(error) = template.error() {
        return Err(anyhow!("{}", error));
    }
    Ok(())
}

fn split_pair<'a>(pair: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    match pair.split_once('=') {
        Some((key, value)) => Ok((key, value)),
        None => bail!("{} expects NAME=VALUE, got '{}'", flag, pair),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("a=b=c", "--set").unwrap(), ("a", "b=c"));
        assert_eq!(split_pair("a=", "--set").unwrap(), ("a", ""));
        assert!(split_pair("novalue", "--set").is_err());
    }
}
