#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms
)]
#![allow(clippy::type_complexity, clippy::too_many_arguments)]

//! # Streams
//!
//! The execution-stream pipeline: [`adapter`] transformers ([`adapter::ChainedStream`],
//! [`adapter::DropWhileStream`], [`adapter::NewPricesStream`], [`adapter::OHLCStream`],
//! [`adapter::SynchronizedStream`]), the [`warmup::WarmUpQueue`] (time-window warm-up, C5),
//! [`source`]s (realtime websocket, historical row store / columnar objects), and the
//! [`writer::ExecutionWriter`] (C11).

pub mod adapter;
pub mod error;
pub mod source;
pub mod warmup;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::ExecutionStream;
pub use error::StreamError;
pub use warmup::WarmUpQueue;
pub use writer::{ExecutionWriter, RowStore};
