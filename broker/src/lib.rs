//! # Broker
//!
//! The declarative bitFlyer broker control loop (C1, C2, C9): a signed [`client::bitflyer`]
//! REST client and the observer/trader/restarter [`supervisor`] that idempotently cancels,
//! diffs, and re-orders the exchange's book to match the newest desired position.
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub mod client;
pub mod error;
pub mod retry;
pub mod supervisor;

pub use error::BrokerError;
pub use retry::RetryConfig;
pub use supervisor::reconcile::{Reconciler, ReconcilerConfig};
pub use supervisor::Supervisor;
