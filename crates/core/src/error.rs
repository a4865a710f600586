//! Cleanup errors

use crate::object::ObjectError;
use thiserror::Error;

/// Failure of a cleanup run
///
/// Deletions completed before the failure stay completed.
#[derive(Debug, Error)]
pub enum CleanupError {
    /// The object source could not enumerate its objects
    #[error("failed to list objects from {source_id}")]
    List {
        source_id: String,
        #[source]
        source: ObjectError,
    },

    /// A single object could not be deleted
    #[error("failed to delete {id}")]
    Delete {
        id: String,
        #[source]
        source: ObjectError,
    },
}
