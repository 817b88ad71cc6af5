use crate::{side::Side, symbol::Symbol};
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use smol_str::SmolStr;

/// An observation of a trade that occurred on an exchange.
///
/// Immutable once constructed: published by exactly one source, consumed by zero or more
/// subscribers, and never mutated in place (adapters that need to change a field build a new
/// `Execution` via [`Execution::with_companion`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub symbol: Symbol,
    /// Exchange-assigned id, monotonically increasing per symbol. Absent for synthetic entries
    /// (e.g. rows reconstructed without an upstream id).
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub buy_acceptance_id: SmolStr,
    pub sell_acceptance_id: SmolStr,
    /// The nearest-prior event on a secondary symbol, attached by a
    /// [`crate`]-level synchroniser. `None` until a synchroniser runs.
    pub companion: Option<SynchronizedCompanion>,
}

impl Execution {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Symbol,
        id: Option<i64>,
        timestamp: DateTime<Utc>,
        side: Side,
        price: Decimal,
        size: Decimal,
        buy_acceptance_id: impl Into<SmolStr>,
        sell_acceptance_id: impl Into<SmolStr>,
    ) -> Self {
        Self {
            symbol,
            id,
            timestamp,
            side,
            price,
            size,
            buy_acceptance_id: buy_acceptance_id.into(),
            sell_acceptance_id: sell_acceptance_id.into(),
            companion: None,
        }
    }

    /// Attach a synchronised companion execution, deriving the price-deviation and time-delta
    /// fields once (they are never recomputed after this).
    ///
    /// # Panics
    /// Panics in debug builds if `companion.timestamp > self.timestamp` — the synchroniser
    /// invariant (§3) that callers must uphold.
    pub fn with_companion(mut self, companion: Option<SynchronizedCompanion>) -> Self {
        debug_assert!(
            match &companion {
                Some(c) => c.timestamp <= self.timestamp,
                None => true,
            },
            "companion must not be newer than the primary execution"
        );
        self.companion = companion;
        self
    }

    /// `(self.price - companion.price) / self.price`, or `None` if there is no companion.
    pub fn companion_price_deviation(&self) -> Option<Decimal> {
        self.companion
            .as_ref()
            .map(|c| (self.price - c.price) / self.price)
    }

    /// `companion.timestamp - self.timestamp` (non-positive), or `None` if there is no companion.
    pub fn companion_time_delta(&self) -> Option<TimeDelta> {
        self.companion.as_ref().map(|c| c.timestamp - self.timestamp)
    }
}

/// The secondary-symbol execution nearest in time, at or before, a primary [`Execution`].
///
/// A structural subset of [`Execution`] (no companion-of-a-companion) produced by the
/// two-stream synchroniser.
#[derive(Debug, Clone, PartialEq)]
pub struct SynchronizedCompanion {
    pub symbol: Symbol,
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub buy_acceptance_id: SmolStr,
    pub sell_acceptance_id: SmolStr,
}

impl From<&Execution> for SynchronizedCompanion {
    fn from(e: &Execution) -> Self {
        Self {
            symbol: e.symbol,
            id: e.id,
            timestamp: e.timestamp,
            side: e.side,
            price: e.price,
            size: e.size,
            buy_acceptance_id: e.buy_acceptance_id.clone(),
            sell_acceptance_id: e.sell_acceptance_id.clone(),
        }
    }
}

/// Marks the boundary between warm-up replay and live feed for one subscriber of the
/// time-window warm-up queue. Appears at most once per subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchedToRealtime {
    pub symbol: Symbol,
    pub timestamp: DateTime<Utc>,
}

/// An item yielded by a warm-up-queue subscriber: either historical/live [`Execution`]s, or the
/// one-shot realtime boundary marker.
#[derive(Debug, Clone, PartialEq)]
pub enum WarmUpItem {
    Execution(Execution),
    SwitchedToRealtime(SwitchedToRealtime),
}

impl WarmUpItem {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            WarmUpItem::Execution(e) => e.timestamp,
            WarmUpItem::SwitchedToRealtime(s) => s.timestamp,
        }
    }
}
