//! Template module - comment-marker template loader
//!
//! A template is a text file in the templates folder (`<name>.tpl`) with
//! comment-shaped markers. Loading resolves includes; the caller then fills
//! scalars and repeated blocks and renders.
//!
//! ## Pipeline
//!
//! ```text
//! Loader::load ──> cache hit? ──yes──────────────────────────┐
//!                     │ no                                   │
//!                     v                                      v
//!                read <name>.tpl ──> resolve includes ──> set / for / forEach ──> render
//! ```
//!
//! A cache hit is emitted verbatim; substitution calls on it are no-ops.
//!
//! ## Example
//!
//! ```no_run
//! use tplkit_core::template::Loader;
//!
//! # fn main() -> tplkit_core::Result<()> {
//! let mut page = Loader::new("hello").folder("site/tmpl").load()?;
//! page.set("name", "<b>")?;
//! print!("{}", page.render_to_string(true)?);
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod grammar;
pub mod include;
mod loader;

pub use engine::{FieldValue, ForEachInput, IndexBase, Row};
pub use include::IncludeResolver;
pub use loader::{Loader, Template};
