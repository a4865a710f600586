//! Cleanup orchestration
//!
//! A run builds one bucket per range, lists the source once, assigns each
//! object to the first range it is young enough for, sweeps every bucket in
//! range order and finally deletes everything older than the last range.

use crate::bucket::Bucket;
use crate::error::CleanupError;
use crate::object::{Object, ObjectSource};
use crate::range::{self, Range};
use serde::Serialize;
use std::time::SystemTime;
use tracing::{debug, info};

/// Counts gathered during a cleanup run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Objects returned by the source
    pub listed: usize,
    /// Objects kept by bucket sweeps
    pub retained: usize,
    /// Objects deleted by bucket sweeps
    pub swept: usize,
    /// Objects deleted for being older than every range
    pub overflow: usize,
}

impl CleanupReport {
    /// Total objects deleted
    pub fn deleted(&self) -> usize {
        self.swept + self.overflow
    }
}

/// Apply a retention schedule to every object in `source`
///
/// `ranges` must already be sorted strictly ascending by age; they are not
/// re-validated. Ages are measured from `now`, once per object.
///
/// Stops at the first failure. All bucket sweeps run before any overflow
/// deletion, so a failed sweep leaves the overflow untouched.
pub fn cleanup<S: ObjectSource>(
    ranges: &[Range],
    source: &S,
    now: SystemTime,
) -> Result<CleanupReport, CleanupError> {
    debug_assert!(
        range::is_strictly_ascending(ranges),
        "ranges must be strictly ascending by age"
    );

    let source_id = source.id();
    info!(source = %source_id, ranges = ranges.len(), "Starting cleanup");

    let mut buckets = make_buckets(ranges);
    let objects = source.list().map_err(|source| CleanupError::List {
        source_id: source_id.clone(),
        source,
    })?;

    let mut report = CleanupReport {
        listed: objects.len(),
        ..CleanupReport::default()
    };

    let overflow = assign(objects, &mut buckets, now);
    sweep_buckets(&mut buckets, &mut report)?;
    delete_overflow(overflow, &mut report)?;

    info!(
        source = %source_id,
        listed = report.listed,
        retained = report.retained,
        deleted = report.deleted(),
        "Cleanup complete"
    );
    Ok(report)
}

fn make_buckets<O: Object>(ranges: &[Range]) -> Vec<Bucket<O>> {
    ranges.iter().copied().map(Bucket::new).collect()
}

/// Place each object in the first bucket whose range admits its age
///
/// Returns the objects no range admits.
fn assign<O: Object>(objects: Vec<O>, buckets: &mut [Bucket<O>], now: SystemTime) -> Vec<O> {
    let mut overflow = Vec::new();

    for object in objects {
        let age = object.age(now);
        match buckets.iter_mut().find(|b| b.range().admits(age)) {
            Some(bucket) => bucket.add(age, object),
            None => {
                debug!(id = %object.id(), age = ?age, "overflow");
                overflow.push(object);
            }
        }
    }

    overflow
}

fn sweep_buckets<O: Object>(
    buckets: &mut [Bucket<O>],
    report: &mut CleanupReport,
) -> Result<(), CleanupError> {
    for bucket in buckets.iter_mut() {
        debug!(range = %bucket.range(), objects = bucket.len(), "Sweeping bucket");
        bucket.sweep(report)?;
    }
    Ok(())
}

fn delete_overflow<O: Object>(
    overflow: Vec<O>,
    report: &mut CleanupReport,
) -> Result<(), CleanupError> {
    for object in overflow {
        object.delete().map_err(|source| CleanupError::Delete {
            id: object.id(),
            source,
        })?;
        report.overflow += 1;
    }
    Ok(())
}
