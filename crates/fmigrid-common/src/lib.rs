//! fmigrid-common — Shared types, errors, and file helpers used across all fmigrid crates.

pub mod entities;
pub mod error;
pub mod fs;

// Re-export commonly used types
pub use entities::{GeneRecord, Log2Fc};
pub use error::{FmigridError, Result};
