//! Object capabilities
//!
//! Anything with a timestamp that can be deleted can be rotated: files today,
//! snapshots or backups tomorrow. Implement `Object` for the item and
//! `ObjectSource` for whatever enumerates them.

use std::time::{Duration, SystemTime};
use tracing::info;

/// Error returned by object and source implementations
pub type ObjectError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A timestamped, deletable object
pub trait Object {
    /// Age of the object relative to `now`
    fn age(&self, now: SystemTime) -> Duration;

    /// Remove the object
    ///
    /// Must succeed if the object is already gone.
    fn delete(&self) -> Result<(), ObjectError>;

    /// Identifier used in logs and errors
    fn id(&self) -> String;
}

/// A collection of objects that can be enumerated in one pass
pub trait ObjectSource {
    type Object: Object;

    /// Identifier used in logs and errors
    fn id(&self) -> String;

    /// List every object currently in the collection
    fn list(&self) -> Result<Vec<Self::Object>, ObjectError>;
}

/// Age of something stamped at `timestamp`, seen from `now`
///
/// Timestamps after `now` count as age zero.
pub fn age_since(timestamp: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(timestamp).unwrap_or(Duration::ZERO)
}

/// Source adaptor whose objects log instead of deleting
#[derive(Debug, Clone)]
pub struct DryRun<S> {
    inner: S,
}

impl<S> DryRun<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ObjectSource> ObjectSource for DryRun<S> {
    type Object = DryRunObject<S::Object>;

    fn id(&self) -> String {
        self.inner.id()
    }

    fn list(&self) -> Result<Vec<Self::Object>, ObjectError> {
        let objects = self.inner.list()?;
        Ok(objects.into_iter().map(|inner| DryRunObject { inner }).collect())
    }
}

/// Object wrapper produced by [`DryRun`]
#[derive(Debug, Clone)]
pub struct DryRunObject<O> {
    inner: O,
}

impl<O: Object> Object for DryRunObject<O> {
    fn age(&self, now: SystemTime) -> Duration {
        self.inner.age(now)
    }

    fn delete(&self) -> Result<(), ObjectError> {
        info!(id = %self.inner.id(), "dry run, would delete");
        Ok(())
    }

    fn id(&self) -> String {
        self.inner.id()
    }
}
