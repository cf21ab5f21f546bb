//! Core decider abstraction.

use event_store::Version;
use nonempty::NonEmpty;

/// Outcome of a decision: one-or-more events recording the accepted change,
/// or one-or-more reasons the command was rejected.
pub type Decision<E, Err> = Result<NonEmpty<E>, NonEmpty<Err>>;

/// Builds an accepting decision carrying a single event.
pub fn accept<E, Err>(event: E) -> Decision<E, Err> {
    Ok(NonEmpty::new(event))
}

/// Builds a rejecting decision carrying a single error.
pub fn reject<E, Err>(error: Err) -> Decision<E, Err> {
    Err(NonEmpty::new(error))
}

/// Trait for deciders in an event-sourced system.
///
/// A decider is a pure state machine: it folds events into state and turns
/// commands into events. It holds no state of its own, so one decider value
/// serves every stream of its aggregate type.
///
/// Deciders:
/// - rebuild state by replaying events from the initial value
/// - accept or reject commands against the replayed state
/// - never perform I/O and never mutate the state they are given
pub trait Decider: Send + Sync {
    /// State reconstructed by folding events.
    type State;

    /// Commands this decider accepts or rejects.
    type Command;

    /// Events this decider emits and folds.
    type Event;

    /// Rejection reasons produced by `decide`.
    type Error;

    /// The state of a stream before any event has been applied.
    fn initial(&self) -> Self::State;

    /// Folds one event into the state, producing the next state.
    ///
    /// Must be pure and total: the same state and event always produce the
    /// same result, and an event that cannot occur in the given state
    /// returns the state unchanged rather than failing. Replay can then
    /// never crash, whatever history it is given.
    fn apply(&self, state: Self::State, event: Self::Event) -> Self::State;

    /// Decides whether `command` may happen in `state`.
    ///
    /// Returns the events that record the accepted change, or every rule
    /// the command violates. Inspects the state without mutating it.
    fn decide(
        &self,
        command: Self::Command,
        state: &Self::State,
    ) -> Decision<Self::Event, Self::Error>;

    /// Replays an ordered event sequence from the initial state.
    ///
    /// Returns the final state together with the version of the last event
    /// applied, `Version::none()` when the sequence is empty.
    fn replay<I>(&self, events: I) -> (Self::State, Version)
    where
        I: IntoIterator<Item = Self::Event>,
    {
        events.into_iter().fold(
            (self.initial(), Version::none()),
            |(state, version), event| (self.apply(state, event), version.next()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CounterDecider;

    #[derive(Debug, Clone, PartialEq)]
    enum CounterEvent {
        Incremented(i64),
        Reset,
    }

    enum CounterCommand {
        Increment(i64),
        Reset,
    }

    #[derive(Debug, PartialEq)]
    enum CounterError {
        NotPositive,
    }

    impl Decider for CounterDecider {
        type State = i64;
        type Command = CounterCommand;
        type Event = CounterEvent;
        type Error = CounterError;

        fn initial(&self) -> i64 {
            0
        }

        fn apply(&self, state: i64, event: CounterEvent) -> i64 {
            match event {
                CounterEvent::Incremented(n) => state + n,
                CounterEvent::Reset => 0,
            }
        }

        fn decide(
            &self,
            command: CounterCommand,
            _state: &i64,
        ) -> Decision<CounterEvent, CounterError> {
            match command {
                CounterCommand::Increment(n) if n <= 0 => reject(CounterError::NotPositive),
                CounterCommand::Increment(n) => accept(CounterEvent::Incremented(n)),
                CounterCommand::Reset => accept(CounterEvent::Reset),
            }
        }
    }

    #[test]
    fn test_replay_folds_events_in_order() {
        let events = vec![
            CounterEvent::Incremented(2),
            CounterEvent::Incremented(3),
            CounterEvent::Reset,
            CounterEvent::Incremented(7),
        ];

        let (state, version) = CounterDecider.replay(events);

        assert_eq!(state, 7);
        assert_eq!(version, Version::new(3));
    }

    #[test]
    fn test_replay_of_nothing_is_the_initial_state() {
        let (state, version) = CounterDecider.replay(Vec::<CounterEvent>::new());
        assert_eq!(state, 0);
        assert_eq!(version, Version::none());
    }

    #[test]
    fn test_replay_is_deterministic() {
        let events = vec![CounterEvent::Incremented(1), CounterEvent::Incremented(2)];

        let first = CounterDecider.replay(events.clone());
        let second = CounterDecider.replay(events);

        assert_eq!(first, second);
    }

    #[test]
    fn test_accept_and_reject_build_single_element_decisions() {
        let ok: Decision<CounterEvent, CounterError> = accept(CounterEvent::Reset);
        assert_eq!(ok, Ok(NonEmpty::new(CounterEvent::Reset)));

        let err: Decision<CounterEvent, CounterError> = reject(CounterError::NotPositive);
        assert_eq!(err, Err(NonEmpty::new(CounterError::NotPositive)));
    }

    #[test]
    fn test_decide_rejects_without_producing_events() {
        let decision = CounterDecider.decide(CounterCommand::Increment(0), &5);
        assert_eq!(decision, Err(NonEmpty::new(CounterError::NotPositive)));
    }

    #[test]
    fn test_version_after_replay_indexes_the_last_event() {
        let single = vec![CounterEvent::Incremented(1)];
        let (_, version) = CounterDecider.replay(single);
        assert_eq!(version, Version::first());
    }
}
