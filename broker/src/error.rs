use thiserror::Error;
use tucano_integration::error::SocketError;
use tucano_model::ModelError;

/// Error taxonomy for the broker control loop (§7).
#[derive(Debug, Error)]
pub enum BrokerError {
    /// HTTP 5xx, or a confirmation that is not yet visible. Retried forever with
    /// `time_wait_retrying` backoff, never surfaced past the retry wrapper.
    #[error("transient broker condition, will retry")]
    Transient,

    /// HTTP 429. Retried forever with the longer `time_wait_429_suspends` backoff.
    #[error("rate limited, will retry")]
    RateLimited,

    /// HTTP 200 with a body that doesn't match the expected schema, or an empty body on order
    /// submission. Fatal to the current trader task; the restarter replaces it.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The trader task was cancelled mid-flight (restarter preemption, or shutdown).
    #[error("broker task cancelled")]
    Cancelled,

    #[error("transport error: {0}")]
    Transport(#[from] SocketError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
