use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use nonempty::NonEmpty;
use tokio::sync::RwLock;

use crate::{AggregateId, EventStoreError, RecordedEvent, Result, Version, store::EventStore};

/// In-memory event store keeping one append-only ledger per stream.
///
/// Reference implementation of the store contract. Appends hold the write
/// guard across the whole version check and write, so concurrent appends to
/// the same stream serialize and at most one writer per expected version
/// succeeds. Clones share the underlying ledger.
pub struct InMemoryEventStore<E> {
    streams: Arc<RwLock<HashMap<AggregateId, Vec<RecordedEvent<E>>>>>,
}

impl<E> InMemoryEventStore<E> {
    /// Creates a new empty in-memory event store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of events across all streams.
    pub async fn event_count(&self) -> usize {
        self.streams.read().await.values().map(Vec::len).sum()
    }

    /// Returns the current version of a stream, the empty-stream sentinel
    /// if no events have been appended to it.
    pub async fn current_version(&self, aggregate_id: AggregateId) -> Version {
        self.streams
            .read()
            .await
            .get(&aggregate_id)
            .and_then(|stream| stream.iter().map(|recorded| recorded.version).max())
            .unwrap_or_default()
    }

    /// Returns a stream's ledger entries with their assigned versions and
    /// record timestamps.
    pub async fn recorded_events(&self, aggregate_id: AggregateId) -> Vec<RecordedEvent<E>>
    where
        E: Clone,
    {
        self.streams
            .read()
            .await
            .get(&aggregate_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drops every stream.
    pub async fn clear(&self) {
        self.streams.write().await.clear();
    }
}

impl<E> Default for InMemoryEventStore<E> {
    fn default() -> Self {
        Self {
            streams: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<E> Clone for InMemoryEventStore<E> {
    fn clone(&self) -> Self {
        Self {
            streams: Arc::clone(&self.streams),
        }
    }
}

/// Stamps each event in the batch with its position after `expected_version`.
fn record_batch<E>(events: NonEmpty<E>, expected_version: Version) -> Vec<RecordedEvent<E>> {
    events
        .into_iter()
        .enumerate()
        .map(|(index, event)| {
            let version = Version::new(expected_version.as_i64() + 1 + index as i64);
            RecordedEvent::new(event, version)
        })
        .collect()
}

#[async_trait]
impl<E> EventStore for InMemoryEventStore<E>
where
    E: Clone + Send + Sync,
{
    type Event = E;

    async fn append_to_stream(
        &self,
        aggregate_id: AggregateId,
        expected_version: Version,
        events: NonEmpty<E>,
    ) -> Result<()> {
        // The write guard covers lookup, version check, and write, which is
        // what makes the check-and-append atomic per stream.
        let mut streams = self.streams.write().await;

        match streams.get_mut(&aggregate_id) {
            None => {
                if !expected_version.is_none() {
                    tracing::warn!(%aggregate_id, %expected_version, "append to missing stream");
                    return Err(EventStoreError::AggregateNotFound(aggregate_id));
                }
                let recorded = record_batch(events, expected_version);
                tracing::debug!(%aggregate_id, count = recorded.len(), "stream created");
                streams.insert(aggregate_id, recorded);
                Ok(())
            }
            Some(stream) => {
                let actual = stream
                    .iter()
                    .map(|recorded| recorded.version)
                    .max()
                    .unwrap_or_default();
                if actual != expected_version {
                    tracing::warn!(
                        %aggregate_id, %expected_version, %actual,
                        "concurrency conflict on append"
                    );
                    return Err(EventStoreError::ConcurrencyError {
                        aggregate_id,
                        expected: expected_version,
                        actual,
                    });
                }
                let recorded = record_batch(events, expected_version);
                tracing::debug!(%aggregate_id, count = recorded.len(), "events appended");
                stream.extend(recorded);
                Ok(())
            }
        }
    }

    async fn read_from_stream(&self, aggregate_id: AggregateId) -> Result<Vec<E>> {
        let streams = self.streams.read().await;
        let events = streams
            .get(&aggregate_id)
            .map(|stream| stream.iter().map(|recorded| recorded.event.clone()).collect())
            .unwrap_or_default();
        Ok(events)
    }
}
