//! Loader configuration
//!
//! `LoaderConfig` carries everything a [`crate::template::Loader`] needs besides
//! the template name. It can be built in code or read from a `tplkit.toml`:
//!
//! ```toml
//! [loader]
//! folder = "site/tmpl"
//! max_includes = 10
//! show_errors = true
//!
//! [cache]
//! allow = true
//! max_store_hours = 24
//! ```

pub mod consts;
mod model;

pub use model::{CacheConfig, LoaderConfig};
