use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of an [`crate::execution::Execution`], [`crate::signal::Signal`], or
/// [`crate::position::Position`].
///
/// [`Side::Continue`] only ever appears on a [`crate::signal::Signal`] — it means "no change
/// to the current stance" and is rejected anywhere a [`crate::position::Position`] side is
/// required.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "NOTHING")]
    Nothing,
    #[serde(rename = "HOLDING")]
    Continue,
}

impl Side {
    /// The opposite trading side. Defined only on [`Side::Buy`]/[`Side::Sell`]; any other
    /// variant has no counter-side.
    pub fn counter(self) -> Option<Side> {
        match self {
            Side::Buy => Some(Side::Sell),
            Side::Sell => Some(Side::Buy),
            Side::Nothing | Side::Continue => None,
        }
    }

    pub fn is_tradeable(self) -> bool {
        matches!(self, Side::Buy | Side::Sell)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
            Side::Nothing => write!(f, "NOTHING"),
            Side::Continue => write!(f, "HOLDING"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_total_on_buy_sell() {
        assert_eq!(Side::Buy.counter(), Some(Side::Sell));
        assert_eq!(Side::Sell.counter(), Some(Side::Buy));
    }

    #[test]
    fn counter_is_none_off_buy_sell() {
        assert_eq!(Side::Nothing.counter(), None);
        assert_eq!(Side::Continue.counter(), None);
    }
}
