//! Tests for the substitution engine
//!
//! Organized by operation, the way the engine is driven by a page.

use super::*;

// Test helper functions
mod helpers;

// Scalar substitution
mod set;
