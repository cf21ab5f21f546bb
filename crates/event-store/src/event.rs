use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of an event stream, used for optimistic concurrency control.
///
/// A stream's version is the index of its last event: the first event has
/// version 0, and each subsequent event increments it by 1. A stream with
/// no events has the sentinel version [`Version::none`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Creates a version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The version of a stream that has no events yet.
    pub fn none() -> Self {
        Self(-1)
    }

    /// The version assigned to a stream's first event (0).
    pub fn first() -> Self {
        Self(0)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns true if this is the empty-stream sentinel.
    ///
    /// Only the sentinel value itself (-1) qualifies; other negative
    /// values are out-of-domain and never match a stream.
    pub fn is_none(&self) -> bool {
        self.0 == -1
    }

    /// Returns the raw version value (-1 for the empty-stream sentinel).
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "none")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Version> for i64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// A stored event along with the metadata the store assigned at append time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent<E> {
    /// The stream version this event was appended at.
    pub version: Version,

    /// When the store recorded the event.
    pub recorded_at: DateTime<Utc>,

    /// The event itself.
    pub event: E,
}

impl<E> RecordedEvent<E> {
    /// Records an event at the given version, stamped with the current time.
    pub fn new(event: E, version: Version) -> Self {
        Self {
            version,
            recorded_at: Utc::now(),
            event,
        }
    }
}
