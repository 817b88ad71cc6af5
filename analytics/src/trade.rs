use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use tucano_model::Side;

/// A closed round-trip P&L record (§3 Trade). Grounded on the reference `Asset.close_position`,
/// which assembles exactly these fields on every close — but this type only documents the
/// shape; it computes nothing. Monotonic cumulative fields (`cumulative_profit`,
/// `cumulative_roc`) are set once by the caller at construction and never recomputed here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    /// Timestamp of the execution that originated the closing decision.
    pub origin_timestamp: DateTime<Utc>,
    /// Timestamp the closing decision was made.
    pub decision_timestamp: DateTime<Utc>,
    /// Side of the position that was closed.
    pub side: Side,
    pub entry: Decimal,
    pub exit: Decimal,
    pub profit: Decimal,
    pub cumulative_profit: Decimal,
    pub cumulative_roc: Decimal,
    pub trade_roc: Decimal,
    pub drawdown_roc: Decimal,
    pub profit_factor: Decimal,
    pub win_probability: Decimal,
    pub holding_time: TimeDelta,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin_timestamp: DateTime<Utc>,
        decision_timestamp: DateTime<Utc>,
        side: Side,
        entry: Decimal,
        exit: Decimal,
        profit: Decimal,
        cumulative_profit: Decimal,
        cumulative_roc: Decimal,
        trade_roc: Decimal,
        drawdown_roc: Decimal,
        profit_factor: Decimal,
        win_probability: Decimal,
        holding_time: TimeDelta,
    ) -> Self {
        Self {
            origin_timestamp,
            decision_timestamp,
            side,
            entry,
            exit,
            profit,
            cumulative_profit,
            cumulative_roc,
            trade_roc,
            drawdown_roc,
            profit_factor,
            win_probability,
            holding_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn constructs_with_all_documented_fields() {
        let now = Utc::now();
        let trade = Trade::new(
            now,
            now,
            Side::Buy,
            dec!(100),
            dec!(110),
            dec!(10),
            dec!(10),
            dec!(0.1),
            dec!(0.1),
            dec!(0),
            dec!(1.0),
            dec!(1.0),
            TimeDelta::minutes(5),
        );
        assert_eq!(trade.profit, dec!(10));
        assert_eq!(trade.holding_time, TimeDelta::minutes(5));
    }
}
