//! CLI command implementations

pub mod check;
pub mod format;
pub mod run;
