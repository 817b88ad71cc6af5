use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by the execution-stream pipeline (C3–C5, C11).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// A [`ChainedStream`](crate::adapter::chained::ChainedStream) boundary's next upstream
    /// started with a timestamp earlier than the last element of the previous upstream.
    #[error("order violation at chain boundary: next element at {next} precedes previous element at {previous}")]
    OrderViolation {
        previous: DateTime<Utc>,
        next: DateTime<Utc>,
    },

    /// A warm-up queue operation (`get`/`dispose`) targeted a client id with no subscriber
    /// queue.
    #[error("unknown warm-up queue client: {0}")]
    UnknownClient(String),
}
