use async_trait::async_trait;

pub mod chained;
pub mod drop_while;
pub mod new_prices;
pub mod ohlc;
pub mod synchronized;

pub use chained::ChainedStream;
pub use drop_while::DropWhileStream;
pub use new_prices::NewPricesStream;
pub use ohlc::OHLCStream;
pub use synchronized::SynchronizedStream;

/// A lazy, single-consumer asynchronous sequence. Suspension points are only at element
/// acquisition from an upstream — there is no inheritance beyond this contract, only
/// composition by holding an upstream that implements the same trait (§9 Design Notes:
/// "async iteration as pipeline glue").
#[async_trait]
pub trait ExecutionStream: Send {
    type Item: Send;

    /// Pull the next element, or `None` once the upstream is exhausted.
    async fn next(&mut self) -> Option<Self::Item>;
}
