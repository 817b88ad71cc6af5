use crate::contract::Strategy;
use chrono::TimeDelta;
use rand::Rng;
use tucano_model::{Execution, Side, Signal, Symbol};

/// A strategy that alternates randomly between BUY and SELL once per `time_window`, holding
/// (`CONTINUE`) within a window. Grounded on `RandomDotenStrategy` — the reference
/// implementation's own test/reference strategy, kept here for the same purpose: exercising the
/// pipeline end to end without encoding real trading logic.
#[derive(Debug)]
pub struct RandomStrategy {
    primary: Symbol,
    time_window: TimeDelta,
    previous: Option<Execution>,
    previous_2_ago: Option<Execution>,
    current_window: Option<i64>,
}

impl RandomStrategy {
    pub fn new(primary: Symbol, time_window: TimeDelta) -> Self {
        Self {
            primary,
            time_window,
            previous: None,
            previous_2_ago: None,
            current_window: None,
        }
    }

    fn window_index(&self, execution: &Execution) -> i64 {
        execution.timestamp.timestamp_nanos_opt().unwrap_or(0) / self.time_window.num_nanoseconds().unwrap_or(1).max(1)
    }
}

impl Strategy for RandomStrategy {
    fn on_execution(&mut self, execution: &Execution) -> Signal {
        if execution.symbol != self.primary {
            return Signal::new(
                Side::Nothing,
                execution.price,
                execution.timestamp,
                execution.timestamp,
                "ignoring, not the primary symbol",
            );
        }

        self.previous_2_ago = self.previous.take();
        self.previous = Some(execution.clone());

        let Some(previous_2_ago) = &self.previous_2_ago else {
            return Signal::new(
                Side::Nothing,
                execution.price,
                execution.timestamp,
                execution.timestamp,
                "insufficient history: first execution",
            );
        };
        let _ = previous_2_ago;

        let window = self.window_index(execution);
        if self.current_window == Some(window) {
            return Signal::new(
                Side::Continue,
                execution.price,
                execution.timestamp,
                self.previous.as_ref().expect("just set").timestamp,
                "same time window",
            );
        }

        self.current_window = Some(window);
        let side = if rand::rng().random_bool(0.5) { Side::Buy } else { Side::Sell };
        Signal::new(
            side,
            execution.price,
            execution.timestamp,
            self.previous.as_ref().expect("just set").timestamp,
            "chosen randomly",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rust_decimal_macros::dec;

    fn execution_at(symbol: Symbol, seconds: i64) -> Execution {
        let base: DateTime<Utc> = "2000-01-01T00:00:00Z".parse().unwrap();
        Execution::new(
            symbol,
            Some(1),
            base + TimeDelta::seconds(seconds),
            Side::Nothing,
            dec!(100),
            dec!(1),
            "buy",
            "sell",
        )
    }

    #[test]
    fn ignores_non_primary_symbols() {
        let mut strategy = RandomStrategy::new(Symbol::FxBtcJpy, TimeDelta::minutes(1));
        let signal = strategy.on_execution(&execution_at(Symbol::BtcJpy, 0));
        assert_eq!(signal.side, Side::Nothing);
    }

    #[test]
    fn first_execution_is_insufficient_history() {
        let mut strategy = RandomStrategy::new(Symbol::FxBtcJpy, TimeDelta::minutes(1));
        let signal = strategy.on_execution(&execution_at(Symbol::FxBtcJpy, 0));
        assert_eq!(signal.side, Side::Nothing);
    }

    #[test]
    fn holds_within_the_same_time_window() {
        let mut strategy = RandomStrategy::new(Symbol::FxBtcJpy, TimeDelta::minutes(1));
        strategy.on_execution(&execution_at(Symbol::FxBtcJpy, 0));
        let decided = strategy.on_execution(&execution_at(Symbol::FxBtcJpy, 1));
        let held = strategy.on_execution(&execution_at(Symbol::FxBtcJpy, 2));
        assert!(matches!(decided.side, Side::Buy | Side::Sell));
        assert_eq!(held.side, Side::Continue);
    }

    #[test]
    fn decides_again_in_a_new_time_window() {
        let mut strategy = RandomStrategy::new(Symbol::FxBtcJpy, TimeDelta::minutes(1));
        strategy.on_execution(&execution_at(Symbol::FxBtcJpy, 0));
        strategy.on_execution(&execution_at(Symbol::FxBtcJpy, 1));
        let next_window = strategy.on_execution(&execution_at(Symbol::FxBtcJpy, 61));
        assert!(matches!(next_window.side, Side::Buy | Side::Sell));
    }
}
