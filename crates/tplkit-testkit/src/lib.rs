//! Test utilities for tplkit
//!
//! This crate provides shared testing utilities used across the tplkit workspace.

mod fixtures;

pub use fixtures::TemplateDir;

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// All test files end up in one gitignored location that is easy to clean up
/// by hand. The directory is removed when the returned `TempDir` drops.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot be
/// created.
///
/// # Examples
///
/// ```rust
/// use tplkit_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// std::fs::write(temp.path().join("page.tpl"), "<p>hi</p>").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");
    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}
