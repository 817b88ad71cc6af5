use crate::{side::Side, symbol::Symbol};
use thiserror::Error;

/// Errors raised while building or combining [`crate::position`] data.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ModelError {
    /// A bag of raw [`crate::position::Position`]s contained the same symbol on both
    /// [`Side::Buy`] and [`Side::Sell`], so VWAP normalisation could not pick a side.
    #[error("ambiguous side for symbol {symbol}: appears as both buy and sell")]
    AmbiguousSide { symbol: Symbol },

    /// Position subtraction was attempted across two different symbols.
    #[error("cannot combine positions for different symbols: {lhs} != {rhs}")]
    SymbolMismatch { lhs: Symbol, rhs: Symbol },

    /// A [`crate::position::Position`] was constructed or combined with a side other than
    /// [`Side::Buy`]/[`Side::Sell`].
    #[error("position side must be Buy or Sell, got {side}")]
    InvalidPositionSide { side: Side },

    /// A [`crate::position::Position`] was constructed with a negative size.
    #[error("position size must be >= 0, got {size}")]
    NegativeSize { size: rust_decimal::Decimal },
}
