/// Historical sources: ordered row-store files named by [`tucano_model::Chunk`], and compressed
/// columnar objects whose key encodes (symbol, exchange, channel, version, first_datetime).
pub mod historical;

/// Realtime websocket source yielding executions plus the warm-up boundary marker.
pub mod realtime;
