//! Filesystem objects for agerotate
//!
//! This crate provides:
//! - `File` / `Files`: files selected by a path pattern, aged by mtime
//! - The line-oriented rotation config parser

pub mod config;
pub mod file;

// Re-exports
pub use config::{Config, ConfigError};
pub use file::{File, Files};
