// Core modules
pub mod cache;
pub mod config;
pub mod error;
pub mod lock;
pub mod store;
pub mod template;

// Re-export commonly used types
pub use cache::{CacheEntry, CacheManager};
pub use config::{CacheConfig, LoaderConfig};
pub use error::{Result, TplkitError};
pub use store::{FsStore, MemoryStore, ResourceStore};
pub use template::{Loader, Template};
