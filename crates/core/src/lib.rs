//! Age-based retention for timestamped objects
//!
//! This crate provides:
//! - Ranges (an age band plus the interval to keep within it)
//! - The `Object` / `ObjectSource` capabilities
//! - Buckets and the greedy retention sweep
//! - The `cleanup` orchestrator

pub mod bucket;
pub mod cleanup;
pub mod error;
pub mod object;
pub mod range;


// Re-exports
pub use bucket::Bucket;
pub use cleanup::{cleanup, CleanupReport};
pub use error::CleanupError;
pub use object::{age_since, DryRun, DryRunObject, Object, ObjectError, ObjectSource};
pub use range::{is_strictly_ascending, sort_by_age, Range};
