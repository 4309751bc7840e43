//! Loader and the per-request template instance

use std::io::Write;
use std::path::PathBuf;

use super::engine::{self, ForEachInput};
use super::include::IncludeResolver;
use crate::cache::CacheManager;
use crate::config::{CacheConfig, LoaderConfig};
use crate::error::{Result, TplkitError};
use crate::store::{FsStore, ResourceStore};

/// Builder for a [`Template`]
pub struct Loader<S = FsStore> {
    name: String,
    config: LoaderConfig,
    store: S,
}

impl Loader<FsStore> {
    /// Loader with default configuration, reading from `$DOCUMENT_ROOT/tmpl/`
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, LoaderConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: LoaderConfig) -> Self {
        let store = FsStore::new(config.resolve_folder());
        Self {
            name: name.into(),
            config,
            store,
        }
    }

    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        let folder = folder.into();
        self.store = FsStore::new(&folder);
        self.config.folder = Some(folder);
        self
    }
}

impl<S: ResourceStore> Loader<S> {
    /// Read templates from another store
    pub fn store<T: ResourceStore>(self, store: T) -> Loader<T> {
        Loader {
            name: self.name,
            config: self.config,
            store,
        }
    }

    pub fn max_includes(mut self, max: usize) -> Self {
        self.config.max_includes = max;
        self
    }

    pub fn caching(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    pub fn show_errors(mut self, show: bool) -> Self {
        self.config.show_errors = show;
        self
    }

    pub fn show_warnings(mut self, show: bool) -> Self {
        self.config.show_warnings = show;
        self
    }

    /// Construct the template: cache lookup, then load and include resolution.
    ///
    /// A missing or oversized template is not an error here; it is recorded
    /// and surfaced through [`Template::error`] and at render time. Include
    /// fan-out over the limit and storage failures are returned.
    pub fn load(self) -> Result<Template<S>> {
        let Loader {
            name,
            config,
            store,
        } = self;

        store.ensure_directory("")?;

        let mut template = Template {
            name,
            config,
            store,
            text: String::new(),
            error: None,
            rendered: false,
            from_cache: false,
        };

        if template.config.cache.allow {
            let cache = CacheManager::new(&template.store, &template.config.cache);
            if let Some(text) = cache.load(&template.name) {
                template.text = text;
                template.from_cache = true;
                return Ok(template);
            }
        }

        template.load_source()?;
        Ok(template)
    }
}

/// One render request
///
/// Mutated in place by substitutions and finalized by [`Template::render`].
pub struct Template<S = FsStore> {
    name: String,
    config: LoaderConfig,
    store: S,
    text: String,
    error: Option<TplkitError>,
    rendered: bool,
    from_cache: bool,
}

impl<S: ResourceStore> Template<S> {
    fn load_source(&mut self) -> Result<()> {
        let key = format!("{}{}", self.name, self.config.extension);

        if !self.store.exists(&key) {
            self.record_error(TplkitError::TemplateNotFound(self.name.clone()));
            return Ok(());
        }
        if self.store.size(&key)? > self.config.max_template_bytes {
            self.record_error(TplkitError::TemplateTooLarge {
                name: self.name.clone(),
                max_bytes: self.config.max_template_bytes,
            });
            return Ok(());
        }

        let mut text = self.store.read_to_string(&key)?;
        IncludeResolver::new(&self.store, &self.config).resolve(&mut text)?;
        self.text = text;
        Ok(())
    }

    fn record_error(&mut self, error: TplkitError) {
        tracing::debug!(template = %self.name, %error, "template error recorded");
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Deferred load error, if any
    pub fn error(&self) -> Option<&TplkitError> {
        self.error.as_ref()
    }

    pub fn is_cache_hit(&self) -> bool {
        self.from_cache
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub fn set_show_errors(&mut self, show: bool) {
        self.config.show_errors = show;
    }

    /// Replace `<!--[name]-->` with the encoded value
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        if self.from_cache || name.is_empty() {
            return Ok(());
        }
        if self.rendered && self.config.show_errors {
            return Err(TplkitError::AlreadyRendered);
        }
        engine::set(&mut self.text, name, value)
    }

    /// Expand the `for` block `name`; `false` if it was not applied
    pub fn for_values<I>(&mut self, name: &str, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.from_cache {
            return false;
        }
        engine::for_values(&mut self.text, name, values)
    }

    /// Expand the `forEach` block `name`; `false` if it was not applied
    pub fn for_each(&mut self, name: &str, input: impl Into<ForEachInput>) -> bool {
        if self.from_cache {
            return false;
        }
        engine::for_each(&mut self.text, name, &input.into())
    }

    /// Emit the template to `out`.
    ///
    /// Writes the recorded error first when `show_errors` is on, optionally
    /// strips comments, stores the result in the cache when caching is
    /// allowed and this is not a cache hit, then writes the text.
    pub fn render<W: Write>(&mut self, out: &mut W, strip_comments: bool) -> Result<()> {
        if self.config.show_errors {
            if let Some(error) = &self.error {
                writeln!(out, "{}", error)?;
            }
        }

        if strip_comments {
            engine::strip_comments(&mut self.text);
        }

        if self.config.cache.allow && !self.from_cache && self.error.is_none() {
            let cache = CacheManager::new(&self.store, &self.config.cache);
            if let Err(e) = cache.store(&self.name, &self.text) {
                tracing::warn!(template = %self.name, error = %e, "unable to cache template");
            }
        }

        out.write_all(self.text.as_bytes())?;
        self.rendered = true;
        Ok(())
    }

    pub fn render_to_string(&mut self, strip_comments: bool) -> Result<String> {
        let mut out = Vec::new();
        self.render(&mut out, strip_comments)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
