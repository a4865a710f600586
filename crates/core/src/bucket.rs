//! Buckets and the retention sweep

use crate::cleanup::CleanupReport;
use crate::error::CleanupError;
use crate::object::Object;
use crate::range::Range;
use std::time::Duration;
use tracing::debug;

/// Objects assigned to one range during a single cleanup run
///
/// Ages are computed once, when the object is added, so every decision in a
/// run is made against the same reference instant.
pub struct Bucket<O> {
    range: Range,
    entries: Vec<Entry<O>>,
}

struct Entry<O> {
    age: Duration,
    object: O,
}

impl<O: Object> Bucket<O> {
    /// Create an empty bucket for a range
    pub fn new(range: Range) -> Self {
        Self {
            range,
            entries: Vec::new(),
        }
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    /// Add an object with its precomputed age
    pub fn add(&mut self, age: Duration, object: O) {
        self.entries.push(Entry { age, object });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Objects still held by the bucket, with their ages
    ///
    /// After a successful sweep these are exactly the survivors, youngest first.
    pub fn retained(&self) -> impl Iterator<Item = (Duration, &O)> + '_ {
        self.entries.iter().map(|e| (e.age, &e.object))
    }

    /// Decide which objects survive and delete the rest
    ///
    /// Objects are visited youngest first. The youngest always survives and
    /// becomes the baseline. Each later object is deleted if it is less than
    /// `interval` older than the baseline; otherwise it survives and becomes
    /// the new baseline. Deleted objects never move the baseline.
    ///
    /// A failed delete stops the sweep. Objects not yet visited stay in the
    /// bucket untouched.
    pub fn sweep(&mut self, report: &mut CleanupReport) -> Result<(), CleanupError> {
        if self.entries.len() < 2 {
            report.retained += self.entries.len();
            return Ok(());
        }

        self.entries.sort_by_key(|e| e.age);

        let mut pending = std::mem::take(&mut self.entries).into_iter();
        let Some(first) = pending.next() else {
            return Ok(());
        };
        let mut baseline = first.age;
        self.entries.push(first);
        report.retained += 1;

        let mut failure = None;
        for entry in pending.by_ref() {
            let gap = entry.age.saturating_sub(baseline);

            if gap >= self.range.interval {
                debug!(id = %entry.object.id(), age = ?entry.age, gap = ?gap, "keep");
                baseline = entry.age;
                self.entries.push(entry);
                report.retained += 1;
                continue;
            }

            debug!(id = %entry.object.id(), age = ?entry.age, gap = ?gap, "delete");
            match entry.object.delete() {
                Ok(()) => report.swept += 1,
                Err(source) => {
                    failure = Some(CleanupError::Delete {
                        id: entry.object.id(),
                        source,
                    });
                    self.entries.push(entry);
                    break;
                }
            }
        }

        match failure {
            Some(err) => {
                self.entries.extend(pending);
                Err(err)
            }
            None => Ok(()),
        }
    }
}
