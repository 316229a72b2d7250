//! Timestamp value object for immutable points in time.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Optionality (a session without an end date, an entity not yet persisted)
/// is always expressed as `Option<Timestamp>`, never as a zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Drops any sub-second component.
    ///
    /// The storage layout carries second precision only; comparing a stored
    /// value against an in-memory one is exact at this granularity.
    pub fn truncated_to_seconds(&self) -> Self {
        Self(self.0.trunc_subsecs(0))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
