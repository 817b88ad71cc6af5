use thiserror::Error;

/// Transport-level errors raised by the REST and WebSocket protocol helpers in this crate.
///
/// Distinct from the exchange-semantic error taxonomy (`BrokerError`'s `Transient` /
/// `RateLimited` / `UnexpectedResponse` split) one layer up in `tucano-broker`: this enum only
/// ever talks about the wire, never about what an exchange's response body meant.
#[derive(Debug, Error)]
pub enum SocketError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("failed to serialise request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to deserialise response: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("failed to sign request: {0}")]
    Sign(String),

    #[error("subscription rejected: {0}")]
    Subscribe(String),

    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}
