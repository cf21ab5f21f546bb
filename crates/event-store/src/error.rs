use thiserror::Error;

use crate::{AggregateId, Version};

/// Errors that can occur when interacting with the event store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventStoreError {
    /// The expected version did not match the stream's actual version:
    /// another writer appended first.
    #[error(
        "concurrency conflict on stream {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyError {
        aggregate_id: AggregateId,
        expected: Version,
        actual: Version,
    },

    /// An append expected an existing stream, but none exists.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(AggregateId),
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, EventStoreError>;
