//! Domain error types.

use std::fmt::Display;

use event_store::EventStoreError;
use nonempty::NonEmpty;
use thiserror::Error;

/// Failures surfaced by the command handling cycle.
///
/// `E` is the decider's own error type, so every aggregate reports
/// rejections in its own vocabulary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandlerError<E>
where
    E: Display,
{
    /// The decider turned the command down.
    #[error("command rejected: {}", join_reasons(.0))]
    Rejected(NonEmpty<E>),

    /// Reading or appending the stream failed.
    #[error("event store error: {0}")]
    Store(#[from] EventStoreError),
}

impl<E> HandlerError<E>
where
    E: Display,
{
    /// Returns the rejection reasons, if this is a rejection.
    pub fn rejection_reasons(&self) -> Option<&NonEmpty<E>> {
        match self {
            Self::Rejected(reasons) => Some(reasons),
            Self::Store(_) => None,
        }
    }
}

fn join_reasons<E: Display>(reasons: &NonEmpty<E>) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
