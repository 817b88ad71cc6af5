use thiserror::Error;

/// Aggregates every crate-level error this binary can encounter, mirroring how
/// `tucano-core::error::ToucanError` aggregates its own subsystem errors.
#[derive(Debug, Error)]
pub enum TucanoError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Model(#[from] tucano_model::ModelError),

    #[error(transparent)]
    Stream(#[from] tucano_streams::StreamError),

    #[error(transparent)]
    Broker(#[from] tucano_broker::BrokerError),

    #[error(transparent)]
    Socket(#[from] tucano_integration::error::SocketError),

    #[error("websocket subscription closed before the pipeline could start")]
    FeedClosed,
}
