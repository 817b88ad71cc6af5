use crate::side::Side;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// The verdict a [strategy](crate) reaches about one [`crate::execution::Execution`].
///
/// Produced by a single pure `execution -> signal` operation (C6); lives only for the duration
/// of one synthesis step and is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub side: Side,
    pub price: Decimal,
    /// When the strategy reached this verdict.
    pub decision_timestamp: DateTime<Utc>,
    /// The timestamp of the execution that triggered this verdict.
    pub origin_timestamp: DateTime<Utc>,
    pub reason: String,
    /// Free-form strategy-specific extras, e.g. indicator values used in the decision.
    pub extras: BTreeMap<String, String>,
}

impl Signal {
    pub fn new(
        side: Side,
        price: Decimal,
        decision_timestamp: DateTime<Utc>,
        origin_timestamp: DateTime<Utc>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            side,
            price,
            decision_timestamp,
            origin_timestamp,
            reason: reason.into(),
            extras: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}
