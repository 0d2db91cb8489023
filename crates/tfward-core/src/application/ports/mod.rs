//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `tfward-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ProcessRunner`: Spawning `terraform`
//!   - `ConfigurationReader`: Layered configuration lookups
//!   - `Filesystem`: Removing generated files and directories

pub mod output;

pub use output::{ConfigurationReader, Filesystem, ProcessRunner};

#[cfg(test)]
pub use output::{MockFilesystem, MockProcessRunner};
