use async_trait::async_trait;
pub use nonempty::NonEmpty;

use crate::{AggregateId, Result, Version};

/// Core trait for event store implementations.
///
/// An event store persists per-stream, ordered, append-only sequences of
/// events keyed by aggregate ID. All implementations must be thread-safe
/// (Send + Sync), and the version check inside `append_to_stream` must be
/// atomic with the write relative to other appends on the same stream.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// The event type this store persists.
    type Event: Clone + Send + Sync;

    /// Appends a batch of events to the stream identified by `aggregate_id`.
    ///
    /// `expected_version` is the stream version the caller last observed:
    /// `Version::none()` to create the stream, otherwise the version of the
    /// stream's last event. The append is all-or-nothing: either every event
    /// in the batch is added in order at contiguous versions starting at
    /// `expected_version + 1`, or the stream is left untouched.
    ///
    /// Fails with `AggregateNotFound` when the stream does not exist and
    /// `expected_version` is not the empty-stream sentinel, and with
    /// `ConcurrencyError` when another writer has already advanced the
    /// stream past `expected_version`.
    async fn append_to_stream(
        &self,
        aggregate_id: AggregateId,
        expected_version: Version,
        events: NonEmpty<Self::Event>,
    ) -> Result<()>;

    /// Reads the full event stream for `aggregate_id`, oldest first.
    ///
    /// A stream that does not exist reads as empty; absence is not an
    /// error on this path.
    async fn read_from_stream(&self, aggregate_id: AggregateId) -> Result<Vec<Self::Event>>;
}
