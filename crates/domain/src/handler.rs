//! Command handling infrastructure.

use common::AggregateId;
use event_store::{EventStore, Version};

use crate::decider::Decider;
use crate::error::HandlerError;

/// Executes commands against aggregate streams.
///
/// One handler serves every stream of its decider's aggregate type. Each
/// call to [`CommandHandler::handle`] runs the full cycle: read the stream,
/// replay it into the current state, ask the decider to accept or reject,
/// and append the accepted events at the version the replay observed. If a
/// concurrent writer advanced the stream in between, the append fails and
/// the conflict is surfaced unretried; retrying with a fresh read is the
/// caller's policy, not the handler's.
pub struct CommandHandler<S, D>
where
    D: Decider,
    S: EventStore<Event = D::Event>,
{
    store: S,
    decider: D,
}

impl<S, D> CommandHandler<S, D>
where
    D: Decider,
    D::Error: std::fmt::Display,
    S: EventStore<Event = D::Event>,
{
    /// Creates a handler over the given store and decider.
    pub fn new(store: S, decider: D) -> Self {
        Self { store, decider }
    }

    /// Returns a reference to the underlying event store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the decider.
    pub fn decider(&self) -> &D {
        &self.decider
    }

    /// Reads a stream and replays it into its current state and version.
    ///
    /// A missing stream replays to the initial state at `Version::none()`.
    pub async fn current_state(
        &self,
        aggregate_id: AggregateId,
    ) -> Result<(D::State, Version), HandlerError<D::Error>> {
        let events = self.store.read_from_stream(aggregate_id).await?;
        Ok(self.decider.replay(events))
    }

    /// Runs the read-decide-append cycle for one command.
    ///
    /// A rejection comes back as `HandlerError::Rejected` with the store
    /// untouched; a concurrent append on the same stream comes back as
    /// `HandlerError::Store` carrying the version conflict.
    #[tracing::instrument(skip(self, command))]
    pub async fn handle(
        &self,
        aggregate_id: AggregateId,
        command: D::Command,
    ) -> Result<(), HandlerError<D::Error>> {
        metrics::counter!("commands_handled_total").increment(1);

        let events = self.store.read_from_stream(aggregate_id).await?;
        let (state, version) = self.decider.replay(events);

        match self.decider.decide(command, &state) {
            Ok(new_events) => {
                let count = new_events.len();
                match self
                    .store
                    .append_to_stream(aggregate_id, version, new_events)
                    .await
                {
                    Ok(()) => {
                        metrics::counter!("commands_accepted_total").increment(1);
                        tracing::debug!(%aggregate_id, events = count, "command accepted");
                        Ok(())
                    }
                    Err(err) => {
                        metrics::counter!("commands_failed_total").increment(1);
                        tracing::warn!(%aggregate_id, error = %err, "append failed");
                        Err(err.into())
                    }
                }
            }
            Err(errors) => {
                metrics::counter!("commands_rejected_total").increment(1);
                tracing::debug!(%aggregate_id, reasons = errors.len(), "command rejected");
                Err(HandlerError::Rejected(errors))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use event_store::{EventStoreError, InMemoryEventStore, NonEmpty};
    use nonempty::nonempty;

    use super::*;
    use crate::decider::{Decision, accept, reject};

    struct TallyDecider;

    #[derive(Debug, Clone, PartialEq)]
    enum TallyEvent {
        Added(i64),
    }

    enum TallyCommand {
        Add(i64),
        AddSplit(i64, i64),
    }

    #[derive(Debug, Clone, PartialEq, thiserror::Error)]
    enum TallyError {
        #[error("amount must be positive")]
        NotPositive,
    }

    impl Decider for TallyDecider {
        type State = i64;
        type Command = TallyCommand;
        type Event = TallyEvent;
        type Error = TallyError;

        fn initial(&self) -> i64 {
            0
        }

        fn apply(&self, state: i64, event: TallyEvent) -> i64 {
            match event {
                TallyEvent::Added(n) => state + n,
            }
        }

        fn decide(&self, command: TallyCommand, _state: &i64) -> Decision<TallyEvent, TallyError> {
            match command {
                TallyCommand::Add(n) if n <= 0 => reject(TallyError::NotPositive),
                TallyCommand::Add(n) => accept(TallyEvent::Added(n)),
                TallyCommand::AddSplit(a, b) if a <= 0 || b <= 0 => {
                    reject(TallyError::NotPositive)
                }
                TallyCommand::AddSplit(a, b) => {
                    Ok(nonempty![TallyEvent::Added(a), TallyEvent::Added(b)])
                }
            }
        }
    }

    fn handler_over(
        store: InMemoryEventStore<TallyEvent>,
    ) -> CommandHandler<InMemoryEventStore<TallyEvent>, TallyDecider> {
        CommandHandler::new(store, TallyDecider)
    }

    #[tokio::test]
    async fn test_first_accepted_command_creates_the_stream() {
        let store = InMemoryEventStore::new();
        let handler = handler_over(store.clone());
        let id = AggregateId::new();

        handler.handle(id, TallyCommand::Add(5)).await.unwrap();

        assert_eq!(
            store.read_from_stream(id).await.unwrap(),
            vec![TallyEvent::Added(5)]
        );
        assert_eq!(store.current_version(id).await, Version::first());
    }

    #[tokio::test]
    async fn test_each_command_appends_at_the_replayed_version() {
        let store = InMemoryEventStore::new();
        let handler = handler_over(store.clone());
        let id = AggregateId::new();

        handler.handle(id, TallyCommand::Add(1)).await.unwrap();
        handler.handle(id, TallyCommand::Add(2)).await.unwrap();
        handler.handle(id, TallyCommand::Add(3)).await.unwrap();

        let versions: Vec<i64> = store
            .recorded_events(id)
            .await
            .iter()
            .map(|recorded| recorded.version.as_i64())
            .collect();
        assert_eq!(versions, vec![0, 1, 2]);

        let (state, version) = handler.current_state(id).await.unwrap();
        assert_eq!(state, 6);
        assert_eq!(version, Version::new(2));
    }

    #[tokio::test]
    async fn test_multi_event_decisions_append_as_one_batch() {
        let store = InMemoryEventStore::new();
        let handler = handler_over(store.clone());
        let id = AggregateId::new();

        handler
            .handle(id, TallyCommand::AddSplit(4, 6))
            .await
            .unwrap();

        assert_eq!(
            store.read_from_stream(id).await.unwrap(),
            vec![TallyEvent::Added(4), TallyEvent::Added(6)]
        );
        assert_eq!(store.current_version(id).await, Version::new(1));
    }

    #[tokio::test]
    async fn test_rejection_reaches_the_caller_and_stores_nothing() {
        let store = InMemoryEventStore::new();
        let handler = handler_over(store.clone());
        let id = AggregateId::new();

        let result = handler.handle(id, TallyCommand::Add(-1)).await;

        assert!(matches!(
            result,
            Err(HandlerError::Rejected(reasons))
                if reasons == NonEmpty::new(TallyError::NotPositive)
        ));
        assert_eq!(store.event_count().await, 0);
    }

    #[tokio::test]
    async fn test_current_state_of_a_missing_stream_is_initial() {
        let handler = handler_over(InMemoryEventStore::new());

        let (state, version) = handler.current_state(AggregateId::new()).await.unwrap();

        assert_eq!(state, 0);
        assert_eq!(version, Version::none());
    }

    /// Store wrapper whose reads hide the newest event, standing in for a
    /// reader that raced a concurrent writer.
    struct StaleReadStore {
        inner: InMemoryEventStore<TallyEvent>,
    }

    #[async_trait]
    impl EventStore for StaleReadStore {
        type Event = TallyEvent;

        async fn append_to_stream(
            &self,
            aggregate_id: AggregateId,
            expected_version: Version,
            events: NonEmpty<TallyEvent>,
        ) -> event_store::Result<()> {
            self.inner
                .append_to_stream(aggregate_id, expected_version, events)
                .await
        }

        async fn read_from_stream(
            &self,
            aggregate_id: AggregateId,
        ) -> event_store::Result<Vec<TallyEvent>> {
            let mut events = self.inner.read_from_stream(aggregate_id).await?;
            events.pop();
            Ok(events)
        }
    }

    #[tokio::test]
    async fn test_conflicting_append_surfaces_unretried() {
        let inner = InMemoryEventStore::new();
        let id = AggregateId::new();

        let seeding = handler_over(inner.clone());
        seeding.handle(id, TallyCommand::Add(1)).await.unwrap();
        seeding.handle(id, TallyCommand::Add(2)).await.unwrap();

        // This handler replays a stale view one event behind the store.
        let handler = CommandHandler::new(StaleReadStore { inner: inner.clone() }, TallyDecider);
        let result = handler.handle(id, TallyCommand::Add(3)).await;

        assert!(matches!(
            result,
            Err(HandlerError::Store(EventStoreError::ConcurrencyError {
                expected,
                actual,
                ..
            })) if expected == Version::first() && actual == Version::new(1)
        ));

        // The losing command left no trace.
        assert_eq!(inner.read_from_stream(id).await.unwrap().len(), 2);
    }
}
