//! Workflow integration tests
//!
//! End-to-end runs of the `agerotate` binary against real directories.

pub mod config_errors;
