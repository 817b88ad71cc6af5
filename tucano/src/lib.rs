//! # Tucano
//!
//! The bitFlyer trading pipeline binary: wires the realtime feed, the time-window warm-up
//! queue (C5), a [`tucano_strategy::Strategy`] and its [`tucano_strategy::PositionSynthesizer`]
//! (C7), and the declarative broker [`tucano_broker::Supervisor`] (C9) into one running process.
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::TucanoError;
