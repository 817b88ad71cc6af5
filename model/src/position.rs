use crate::{error::ModelError, side::Side, symbol::Symbol};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::ops::Sub;

/// An open exposure in a symbol. `side` is always [`Side::Buy`] or [`Side::Sell`]; `size` is
/// always `>= 0` (a zero-size position is legal and means "flat").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub symbol: Symbol,
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
}

impl Position {
    pub fn new(symbol: Symbol, side: Side, price: Decimal, size: Decimal) -> Result<Self, ModelError> {
        if !side.is_tradeable() {
            return Err(ModelError::InvalidPositionSide { side });
        }
        if size < Decimal::ZERO {
            return Err(ModelError::NegativeSize { size });
        }
        Ok(Self {
            symbol,
            side,
            price,
            size,
        })
    }

    fn require_same_symbol(&self, other: &Position) -> Result<(), ModelError> {
        if self.symbol != other.symbol {
            return Err(ModelError::SymbolMismatch {
                lhs: self.symbol,
                rhs: other.symbol,
            });
        }
        Ok(())
    }

    /// `self - other`: "the additional order to place on `self`'s side to move from `other` to
    /// `self`", normalised to `self`'s price. `self` is the desired position, `other` the
    /// current one.
    ///
    /// - Same side: `s = self.size - (other.price / self.price) * other.size`. If `s >= 0` the
    ///   result stays on `self.side`; if `s < 0` the result flips to the counter side with
    ///   magnitude `-s`.
    /// - Different sides: the two positions add, normalised to `self`'s price, staying on
    ///   `self.side`.
    pub fn subtract(&self, other: &Position) -> Result<Position, ModelError> {
        self.require_same_symbol(other)?;

        let other_volume_at_self_price = (other.price / self.price) * other.size;

        if self.side == other.side {
            let size_insufficient = self.size - other_volume_at_self_price;
            if size_insufficient >= Decimal::ZERO {
                Position::new(self.symbol, self.side, self.price, size_insufficient)
            } else {
                let side = self.side.counter().expect("tradeable side has a counter");
                Position::new(self.symbol, side, self.price, -size_insufficient)
            }
        } else {
            Position::new(
                self.symbol,
                self.side,
                self.price,
                self.size + other_volume_at_self_price,
            )
        }
    }
}

impl Sub for &Position {
    type Output = Result<Position, ModelError>;

    fn sub(self, rhs: &Position) -> Self::Output {
        self.subtract(rhs)
    }
}

/// A bag of raw [`Position`]s that may contain duplicate/opposing entries for the same symbol,
/// awaiting VWAP normalisation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Positions(pub Vec<Position>);

impl Positions {
    pub fn new(positions: Vec<Position>) -> Self {
        Self(positions)
    }

    /// Group by `(symbol, side)`, failing if a symbol appears on both sides, then
    /// volume-weighted-average the price within each group.
    pub fn normalize(&self) -> Result<NormalizedPositions, ModelError> {
        struct Total {
            size: Decimal,
            amount: Decimal,
        }

        let mut totals: BTreeMap<(Symbol, Side), Total> = BTreeMap::new();

        for p in &self.0 {
            let key = (p.symbol, p.side);
            if let Some(total) = totals.get_mut(&key) {
                total.size += p.size;
                total.amount += p.size * p.price;
                continue;
            }

            let counter_key = p
                .side
                .counter()
                .map(|counter| (p.symbol, counter));
            if let Some(counter_key) = counter_key {
                if totals.contains_key(&counter_key) {
                    return Err(ModelError::AmbiguousSide { symbol: p.symbol });
                }
            }

            totals.insert(
                key,
                Total {
                    size: p.size,
                    amount: p.size * p.price,
                },
            );
        }

        let mut normalized = NormalizedPositions::default();
        for ((symbol, side), total) in totals {
            let price = if total.size.is_zero() {
                Decimal::ZERO
            } else {
                total.amount / total.size
            };
            normalized
                .0
                .insert(symbol, Position::new(symbol, side, price, total.size)?);
        }
        Ok(normalized)
    }
}

/// A VWAP-normalised mapping `symbol -> Position`, with at most one entry per symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPositions(pub BTreeMap<Symbol, Position>);

impl NormalizedPositions {
    pub fn get(&self, symbol: Symbol) -> Option<&Position> {
        self.0.get(&symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-flatten into a raw bag; `normalize` on the result is idempotent (invariant 7).
    pub fn into_positions(self) -> Positions {
        Positions(self.0.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pos(symbol: Symbol, side: Side, price: i64, size: &str) -> Position {
        Position::new(symbol, side, Decimal::new(price, 0), size.parse().unwrap()).unwrap()
    }

    #[test]
    fn self_subtract_same_everything_yields_zero_size() {
        let a = pos(Symbol::FxBtcJpy, Side::Buy, 100, "1");
        let result = a.subtract(&a).unwrap();
        assert_eq!(result.side, Side::Buy);
        assert_eq!(result.price, a.price);
        assert_eq!(result.size, Decimal::ZERO);
    }

    #[test]
    fn opposite_sides_add_at_self_price() {
        let a = pos(Symbol::FxBtcJpy, Side::Buy, 100, "1");
        let b = pos(Symbol::FxBtcJpy, Side::Sell, 50, "2");
        let result = a.subtract(&b).unwrap();
        // (50/100)*2 = 1, so 1 + 1 = 2
        assert_eq!(result.side, Side::Buy);
        assert_eq!(result.size, Decimal::new(2, 0));
    }

    #[test]
    fn same_side_insufficient_flips_counter_side() {
        let a = pos(Symbol::FxBtcJpy, Side::Buy, 100, "1");
        let b = pos(Symbol::FxBtcJpy, Side::Buy, 100, "3");
        let result = a.subtract(&b).unwrap();
        assert_eq!(result.side, Side::Sell);
        assert_eq!(result.size, Decimal::new(2, 0));
    }

    #[test]
    fn different_symbols_is_rejected() {
        let a = pos(Symbol::FxBtcJpy, Side::Buy, 100, "1");
        let b = pos(Symbol::BtcJpy, Side::Sell, 50, "2");
        assert!(matches!(
            a.subtract(&b),
            Err(ModelError::SymbolMismatch { .. })
        ));
    }

    #[test]
    fn seed_scenario_s6_exact_decimal() {
        let a = Position::new(Symbol::FxBtcJpy, Side::Sell, dec!(993083.0), dec!(0.01)).unwrap();
        let b = Position::new(Symbol::FxBtcJpy, Side::Sell, dec!(992600.0), dec!(0.009)).unwrap();
        let result = a.subtract(&b).unwrap();
        assert_eq!(result.side, Side::Sell);
        assert_eq!(result.price, dec!(993083.0));
        assert_eq!(
            result.size,
            dec!(0.001004377277629362299022337508)
        );
    }

    #[test]
    fn normalize_fails_on_ambiguous_side() {
        let bag = Positions::new(vec![
            pos(Symbol::FxBtcJpy, Side::Buy, 100, "1"),
            pos(Symbol::FxBtcJpy, Side::Sell, 100, "1"),
        ]);
        assert!(matches!(
            bag.normalize(),
            Err(ModelError::AmbiguousSide { .. })
        ));
    }

    #[test]
    fn normalize_is_vwap_weighted() {
        let bag = Positions::new(vec![
            pos(Symbol::FxBtcJpy, Side::Buy, 100, "1"),
            pos(Symbol::FxBtcJpy, Side::Buy, 200, "1"),
        ]);
        let normalized = bag.normalize().unwrap();
        let p = normalized.get(Symbol::FxBtcJpy).unwrap();
        assert_eq!(p.price, Decimal::new(150, 0));
        assert_eq!(p.size, Decimal::new(2, 0));
    }

    #[test]
    fn normalize_then_renormalize_is_idempotent() {
        let bag = Positions::new(vec![
            pos(Symbol::FxBtcJpy, Side::Buy, 100, "1"),
            pos(Symbol::FxBtcJpy, Side::Buy, 200, "1"),
        ]);
        let once = bag.normalize().unwrap();
        let twice = once.clone().into_positions().normalize().unwrap();
        assert_eq!(once, twice);
    }
}
