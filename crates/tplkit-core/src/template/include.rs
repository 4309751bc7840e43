//! Include resolution
//!
//! `<!--include[name]-->` is replaced by the raw text of `name`. After every
//! successful splice the whole text is scanned again, up to `max_dimension`
//! times in total; directives still present after that stay as literal text.
//! The depth cap is the only guard against include cycles.

use super::grammar::INCLUDE_DIRECTIVE;
use crate::config::LoaderConfig;
use crate::error::{Result, TplkitError};
use crate::store::ResourceStore;

pub struct IncludeResolver<'a, S: ResourceStore> {
    store: &'a S,
    extension: &'a str,
    max_includes: usize,
    max_dimension: usize,
    max_template_bytes: u64,
    show_warnings: bool,
    dimension: usize,
}

impl<'a, S: ResourceStore> IncludeResolver<'a, S> {
    pub fn new(store: &'a S, config: &'a LoaderConfig) -> Self {
        Self {
            store,
            extension: &config.extension,
            max_includes: config.max_includes,
            max_dimension: config.max_dimension,
            max_template_bytes: config.max_template_bytes,
            show_warnings: config.show_warnings,
            dimension: 0,
        }
    }

    /// Recursive passes taken so far
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Expand include directives in `text`.
    ///
    /// Fails with [`TplkitError::TooManyIncludes`] when a single scan finds
    /// more than `max_includes` directives. Missing and oversized includes are
    /// reported in-band.
    pub fn resolve(&mut self, text: &mut String) -> Result<()> {
        let directives: Vec<(String, String)> = INCLUDE_DIRECTIVE
            .captures_iter(text)
            .map(|caps| (caps[0].to_string(), caps[1].to_string()))
            .collect();

        if directives.len() > self.max_includes {
            return Err(TplkitError::TooManyIncludes {
                limit: self.max_includes,
                found: directives.len(),
            });
        }

        for (directive, name) in directives {
            // an earlier splice or re-scan already replaced it
            if !text.contains(&directive) {
                continue;
            }

            let key = format!("{}{}", name, self.extension);
            if !self.store.exists(&key) {
                tracing::debug!(include = %name, "included template does not exist");
                if self.show_warnings {
                    let message = format!(
                        "<p>Could not include template \"{}\", because it does not exist</p>",
                        name
                    );
                    *text = text.replace(&directive, &message);
                }
                continue;
            }

            if self.store.size(&key)? > self.max_template_bytes {
                tracing::debug!(include = %name, "included template too large");
                let message = format!(
                    "<p>Could not include template \"{}\", because file size is more than {} bytes</p>",
                    name, self.max_template_bytes
                );
                *text = text.replace(&directive, &message);
                continue;
            }

            let included = self.store.read_to_string(&key)?;
            *text = text.replace(&directive, &included);
            tracing::debug!(include = %name, dimension = self.dimension, "template included");

            if self.dimension < self.max_dimension {
                self.dimension += 1;
                self.resolve(text)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn resolve_with(store: &MemoryStore, config: &LoaderConfig, text: &str) -> Result<String> {
        let mut text = text.to_string();
        IncludeResolver::new(store, config).resolve(&mut text)?;
        Ok(text)
    }

    #[test]
    fn test_splices_included_text() {
        let store = MemoryStore::new().with("header.tpl", "<header>H</header>");
        let out =
            resolve_with(&store, &LoaderConfig::default(), "<!--include[header]-->body").unwrap();
        assert_eq!(out, "<header>H</header>body");
    }

    #[test]
    fn test_nested_includes_resolved_by_rescan() {
        let store = MemoryStore::new()
            .with("layout.tpl", "[<!--include[nav]-->]")
            .with("nav.tpl", "nav");
        let out =
            resolve_with(&store, &LoaderConfig::default(), "<!--include[layout]-->").unwrap();
        assert_eq!(out, "[nav]");
    }

    #[test]
    fn test_repeated_directive_replaced_everywhere() {
        let store = MemoryStore::new().with("hr.tpl", "<hr>");
        let text = "<!--include[hr]-->a<!--include[hr]-->";
        let out = resolve_with(&store, &LoaderConfig::default(), text).unwrap();
        assert_eq!(out, "<hr>a<hr>");
    }

    #[test]
    fn test_missing_include_warning() {
        let store = MemoryStore::new();
        let out = resolve_with(&store, &LoaderConfig::default(), "<!--include[gone]-->").unwrap();
        assert_eq!(
            out,
            "<p>Could not include template \"gone\", because it does not exist</p>"
        );
    }

    #[test]
    fn test_missing_include_silent_without_warnings() {
        let store = MemoryStore::new();
        let config = LoaderConfig {
            show_warnings: false,
            ..LoaderConfig::default()
        };
        let out = resolve_with(&store, &config, "a<!--include[gone]-->b").unwrap();
        assert_eq!(out, "a<!--include[gone]-->b");
    }

    #[test]
    fn test_oversized_include_always_reported() {
        let store = MemoryStore::new().with("big.tpl", &"x".repeat(64));
        let config = LoaderConfig {
            max_template_bytes: 16,
            show_warnings: false,
            ..LoaderConfig::default()
        };
        let out = resolve_with(&store, &config, "<!--include[big]-->").unwrap();
        assert_eq!(
            out,
            "<p>Could not include template \"big\", because file size is more than 16 bytes</p>"
        );
    }

    #[test]
    fn test_too_many_includes_in_one_scan() {
        let store = MemoryStore::new();
        let text: String = (0..11).map(|i| format!("<!--include[t{}]-->", i)).collect();
        let result = resolve_with(&store, &LoaderConfig::default(), &text);
        assert!(matches!(
            result,
            Err(TplkitError::TooManyIncludes { limit: 10, found: 11 })
        ));
    }

    #[test]
    fn test_limit_is_per_scan_not_cumulative() {
        // four splices in total, never more than two directives per scan
        let store = MemoryStore::new()
            .with("a.tpl", "<!--include[c]-->")
            .with("b.tpl", "B")
            .with("c.tpl", "<!--include[d]-->")
            .with("d.tpl", "D");
        let config = LoaderConfig {
            max_includes: 2,
            ..LoaderConfig::default()
        };
        let out = resolve_with(&store, &config, "<!--include[a]--><!--include[b]-->").unwrap();
        assert_eq!(out, "DB");
    }

    #[test]
    fn test_cycle_terminates_at_depth_cap() {
        let store = MemoryStore::new().with("loop.tpl", "<!--include[loop]-->x");
        let config = LoaderConfig::default();
        let mut text = "<!--include[loop]-->".to_string();
        let mut resolver = IncludeResolver::new(&store, &config);

        resolver.resolve(&mut text).unwrap();

        assert_eq!(resolver.dimension(), 5);
        assert_eq!(text, format!("<!--include[loop]-->{}", "x".repeat(6)));
    }

    #[test]
    fn test_zero_dimension_splices_once() {
        let store = MemoryStore::new()
            .with("outer.tpl", "(<!--include[inner]-->)")
            .with("inner.tpl", "in");
        let config = LoaderConfig {
            max_dimension: 0,
            ..LoaderConfig::default()
        };
        let out = resolve_with(&store, &config, "<!--include[outer]-->").unwrap();
        assert_eq!(out, "(<!--include[inner]-->)");
    }

    #[test]
    fn test_custom_extension() {
        let store = MemoryStore::new().with("part.html", "P");
        let config = LoaderConfig {
            extension: ".html".to_string(),
            ..LoaderConfig::default()
        };
        let out = resolve_with(&store, &config, "<!--include[part]-->").unwrap();
        assert_eq!(out, "P");
    }
}
