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

//! # Model - Core Data Types
//!
//! Defines the data that flows through the Tucano execution pipeline:
//! [`Symbol`]/[`Exchange`] identifiers, [`Side`], [`Execution`]/[`SynchronizedCompanion`],
//! [`Signal`], [`Position`]/[`Positions`], and the [`Chunk`] identity of a historical
//! execution file.
//!
//! All price/size arithmetic in this crate and its consumers uses [`rust_decimal::Decimal`]
//! exclusively; nothing here ever round-trips a price or size through `f64`.

/// [`Side`] and its total `counter_side` operation.
pub mod side;

/// [`Symbol`] and [`Exchange`] closed identifier enums.
pub mod symbol;

/// [`Execution`], its synchronised companion, and the switched-to-realtime marker.
pub mod execution;

/// [`Signal`], the pure output of a strategy evaluation.
pub mod signal;

/// [`Position`]/[`Positions`] and the position algebra (subtraction, VWAP normalisation).
pub mod position;

/// [`Chunk`] identity of a historical execution file, and its filename codec.
pub mod chunk;

/// All errors raised by this crate.
pub mod error;

pub use error::ModelError;
pub use execution::{Execution, SwitchedToRealtime, SynchronizedCompanion};
pub use position::{NormalizedPositions, Position, Positions};
pub use side::Side;
pub use signal::Signal;
pub use symbol::{Exchange, Symbol};
