use rust_decimal::Decimal;
use std::sync::Arc;
use tucano_integration::collection::ClearableLifoQueue;
use tucano_model::{ModelError, Position, Side, Signal, Symbol};

/// Combines a strategy's [`Signal`]s into desired [`Position`] snapshots and publishes them onto
/// the coalescing LIFO queue the broker's observer consumes (§3: "Positions flow from
/// synthesiser to broker via a LIFO queue with coalescing").
///
/// `NOTHING` synthesises a flat (zero-size) position on the last traded side; `CONTINUE`
/// publishes nothing — the broker keeps driving toward whatever was last desired.
#[derive(Debug)]
pub struct PositionSynthesizer {
    symbol: Symbol,
    order_size: Decimal,
    last_side: Side,
    target: Arc<ClearableLifoQueue<Position>>,
}

impl PositionSynthesizer {
    pub fn new(symbol: Symbol, order_size: Decimal, target: Arc<ClearableLifoQueue<Position>>) -> Self {
        Self {
            symbol,
            order_size,
            last_side: Side::Buy,
            target,
        }
    }

    /// Turns `signal` into a desired position and publishes it, unless the signal is
    /// `CONTINUE`. Returns the published position, if any.
    pub async fn synthesize(&mut self, signal: &Signal) -> Result<Option<Position>, ModelError> {
        let position = match signal.side {
            Side::Buy | Side::Sell => {
                self.last_side = signal.side;
                Position::new(self.symbol, signal.side, signal.price, self.order_size)?
            }
            Side::Nothing => Position::new(self.symbol, self.last_side, signal.price, Decimal::ZERO)?,
            Side::Continue => return Ok(None),
        };

        self.target.push(position).await;
        Ok(Some(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn signal(side: Side, price: Decimal) -> Signal {
        let now = Utc::now();
        Signal::new(side, price, now, now, "test")
    }

    #[tokio::test]
    async fn buy_signal_publishes_a_sized_long_position() {
        let queue = ClearableLifoQueue::new();
        let mut synthesizer = PositionSynthesizer::new(Symbol::FxBtcJpy, dec!(1), Arc::clone(&queue));
        synthesizer.synthesize(&signal(Side::Buy, dec!(100))).await.unwrap();
        let position = queue.pop().await;
        assert_eq!(position.side, Side::Buy);
        assert_eq!(position.size, dec!(1));
    }

    #[tokio::test]
    async fn nothing_signal_publishes_flat_on_last_side() {
        let queue = ClearableLifoQueue::new();
        let mut synthesizer = PositionSynthesizer::new(Symbol::FxBtcJpy, dec!(1), Arc::clone(&queue));
        synthesizer.synthesize(&signal(Side::Sell, dec!(100))).await.unwrap();
        queue.pop().await;
        synthesizer.synthesize(&signal(Side::Nothing, dec!(100))).await.unwrap();
        let position = queue.pop().await;
        assert_eq!(position.side, Side::Sell);
        assert_eq!(position.size, Decimal::ZERO);
    }

    #[tokio::test]
    async fn continue_signal_publishes_nothing() {
        let queue = ClearableLifoQueue::new();
        let mut synthesizer = PositionSynthesizer::new(Symbol::FxBtcJpy, dec!(1), Arc::clone(&queue));
        let result = synthesizer.synthesize(&signal(Side::Continue, dec!(100))).await.unwrap();
        assert!(result.is_none());
        assert!(queue.is_empty().await);
    }
}
