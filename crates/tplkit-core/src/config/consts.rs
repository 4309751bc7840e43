//! Limits and well-known names shared across the loader

/// Largest template (and cache index) accepted, in bytes. 1MB
pub const MAX_TEMPLATE_BYTES: u64 = 1024 * 1024;

/// Suffix appended to a template name to form its resource key
pub const DEFAULT_EXTENSION: &str = ".tpl";

/// Folder under the document root holding templates
pub const TEMPLATES_SUBDIR: &str = "tmpl";

/// Environment variable naming the document root
pub const DOCUMENT_ROOT_ENV: &str = "DOCUMENT_ROOT";

/// Cache directory, relative to the templates folder
pub const CACHE_DIR: &str = "cache";

/// Cache index resource, relative to the templates folder
pub const CACHE_FILE: &str = "cache/0.cobj";

/// Include limits
pub mod include {
    /// Maximum directives found in a single scan before the render is aborted
    pub const MAX_PER_PASS: usize = 10;

    /// Maximum number of recursive re-scans after a splice
    pub const MAX_DIMENSION: usize = 5;
}

/// Cache limits
pub mod cache {
    /// Hours a cached render stays valid
    pub const MAX_STORE_HOURS: u64 = 24;

    /// Maximum entries in the cache index before it is reset
    pub const MAX_ENTRIES: usize = 200;
}
