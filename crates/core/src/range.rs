//! Age ranges

use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

/// One band of a retention schedule
///
/// An object belongs to the first range (in ascending `age` order) whose
/// `age` is strictly greater than the object's age. Within that range, kept
/// objects are at least `interval` apart.
///
/// No validation happens here; the config loader rejects negative or
/// non-ascending values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Exclusive upper bound on the age of objects in this range
    pub age: Duration,
    /// Minimum age gap between two kept objects
    pub interval: Duration,
}

impl Range {
    /// Create a new range
    pub const fn new(age: Duration, interval: Duration) -> Self {
        Self { age, interval }
    }

    /// Whether an object of the given age is young enough for this range
    ///
    /// The boundary belongs to the next range: an object exactly `age` old
    /// does not qualify.
    pub fn admits(&self, age: Duration) -> bool {
        age < self.age
    }

    /// Order two ranges by `age` alone
    pub fn cmp_age(&self, other: &Range) -> Ordering {
        self.age.cmp(&other.age)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "For objects younger than {}, keep one every {}",
            humantime::format_duration(self.age),
            humantime::format_duration(self.interval)
        )
    }
}

/// Sort ranges ascending by age
pub fn sort_by_age(ranges: &mut [Range]) {
    ranges.sort_by(Range::cmp_age);
}

/// Check that every range is strictly older than the one before it
pub fn is_strictly_ascending(ranges: &[Range]) -> bool {
    ranges.windows(2).all(|pair| pair[0].age < pair[1].age)
}
