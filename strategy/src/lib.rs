//! # Strategy
//!
//! The strategy contract (C6) — a single pure `execution -> signal` operation — and position
//! synthesis (C7), which turns a strategy's signals into desired-position snapshots on the
//! coalescing LIFO queue the broker consumes.
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub mod contract;
pub mod random;
pub mod synthesis;

pub use contract::Strategy;
pub use random::RandomStrategy;
pub use synthesis::PositionSynthesizer;
