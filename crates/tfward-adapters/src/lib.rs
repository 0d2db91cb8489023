//! Infrastructure adapters for tfward.
//!
//! This crate implements the ports defined in `tfward-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod configuration;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use configuration::LayeredConfiguration;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::TokioProcessRunner;
