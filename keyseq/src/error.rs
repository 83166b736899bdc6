//! [`Error`] and [`Result`].

/// Errors returned when building or driving a [`Sequence`](crate::Sequence).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is neither a collection nor a producer of one.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },
    /// A required-result operation found no elements at all.
    #[error("sequence is empty")]
    EmptySequence,
    /// A required-result operation found no element satisfying its predicate.
    #[error("no element matches the predicate")]
    NoMatch,
    /// A single-pass source was traversed a second time.
    #[error("single-pass source cannot be traversed again")]
    NotRewindable,
    /// A fallible producer failed to provide its input.
    #[error("producer failed: {0}")]
    Producer(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Creates an [`Error::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Wraps a producer failure as an [`Error::Producer`].
    pub fn producer(err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self::Producer(err.into())
    }
}

/// Result alias for this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
