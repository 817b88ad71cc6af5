use super::shared::Shared;
use crate::client::bitflyer::model::{ChildOrderState, OrderSide};
use crate::client::bitflyer::BitflyerClient;
use crate::error::BrokerError;
use crate::retry::{with_retry, RetryConfig};
use rust_decimal::Decimal;
use std::time::Duration;
use tucano_model::{Position, Positions, Side, Symbol};

/// Fixed per-reconciliation parameters that don't change between requests: the symbol this
/// broker instance trades, exchange tick sizes, and the settlement/retry timings from
/// [`crate::Config`].
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    pub symbol: Symbol,
    pub size_tick: Decimal,
    pub minute_to_expire: u32,
    pub time_in_force: &'static str,
    pub settlement_delay: Option<Duration>,
    pub retry: RetryConfig,
}

/// The three reconciliation phases under one request id (§4.5).
pub struct Reconciler {
    client: BitflyerClient,
    config: ReconcilerConfig,
}

struct PlannedOrder {
    side: OrderSide,
    size: Decimal,
    price: Decimal,
}

fn to_order_side(side: Side) -> Result<OrderSide, BrokerError> {
    match side {
        Side::Buy => Ok(OrderSide::Buy),
        Side::Sell => Ok(OrderSide::Sell),
        other => Err(BrokerError::UnexpectedResponse(format!(
            "delta has non-tradeable side {other}"
        ))),
    }
}

fn from_order_side(side: OrderSide) -> Side {
    match side {
        OrderSide::Buy => Side::Buy,
        OrderSide::Sell => Side::Sell,
    }
}

impl Reconciler {
    pub fn new(client: BitflyerClient, config: ReconcilerConfig) -> Self {
        Self { client, config }
    }

    /// Phase 1 — cancel every LIMIT order this broker owns, then confirm the cancellation took,
    /// retrying the *verification* (not the cancel) forever on `Transient`.
    async fn clear_stale_orders(&self) -> Result<(), BrokerError> {
        let active = self.client.active_limit_orders().await?;
        for order in &active {
            self.client.cancel_order(&order.child_order_id).await?;
        }
        if let Some(delay) = self.config.settlement_delay {
            tokio::time::sleep(delay).await;
        }
        with_retry(self.config.retry, || async {
            let remaining = self.client.active_limit_orders().await?;
            if remaining.is_empty() {
                Ok(())
            } else {
                tracing::debug!(remaining = remaining.len(), "orders still active after cancel");
                Err(BrokerError::Transient)
            }
        })
        .await
    }

    /// Phase 2 — diff `desired` against the exchange's actual positions (§4.4) and quantise the
    /// result to a placeable order. Returns `None` when the delta is already flat.
    async fn compute_order(&self, desired: &Position) -> Result<Option<PlannedOrder>, BrokerError> {
        let rows = self.client.positions().await?;
        let raw = rows
            .into_iter()
            .map(|row| Position::new(self.config.symbol, from_order_side(row.side), row.price, row.size))
            .collect::<Result<Vec<_>, _>>()?;
        let actual = Positions::new(raw).normalize()?;

        let current = match actual.get(self.config.symbol) {
            Some(position) => *position,
            None => Position::new(self.config.symbol, desired.side, desired.price, Decimal::ZERO)?,
        };

        let delta = desired.subtract(&current)?;
        if delta.size.is_zero() {
            return Ok(None);
        }

        let ticks = (delta.size / self.config.size_tick).trunc();
        let size = ticks * self.config.size_tick;
        if size.is_zero() {
            return Ok(None);
        }

        Ok(Some(PlannedOrder {
            side: to_order_side(delta.side)?,
            size,
            price: delta.price.trunc(),
        }))
    }

    /// Phase 3 — submit the order under the exclusive region `S`, then confirm it landed,
    /// retrying forever on `Transient`.
    async fn submit_order(&self, shared: &Shared, planned: PlannedOrder) -> Result<(), BrokerError> {
        let acceptance_id = {
            let _exclusive = shared.exclusive.lock().await;
            self.client
                .send_order(
                    planned.side,
                    planned.size,
                    planned.price,
                    self.config.minute_to_expire,
                    self.config.time_in_force,
                )
                .await?
        };

        if let Some(delay) = self.config.settlement_delay {
            tokio::time::sleep(delay).await;
        }

        with_retry(self.config.retry, || async {
            if self
                .client
                .order_by_acceptance(&acceptance_id, ChildOrderState::Completed)
                .await?
                .is_some()
            {
                return Ok(());
            }
            if self
                .client
                .order_by_acceptance(&acceptance_id, ChildOrderState::Active)
                .await?
                .is_some()
            {
                return Ok(());
            }
            Err(BrokerError::Transient)
        })
        .await
    }

    /// Runs the full cancel → diff → order reconciliation for one desired snapshot.
    pub async fn reconcile(&self, shared: &Shared, request_id: &str, desired: &Position) -> Result<(), BrokerError> {
        tracing::info!(request_id, symbol = %desired.symbol, "reconciliation starting");
        self.clear_stale_orders().await?;

        match self.compute_order(desired).await? {
            None => {
                tracing::debug!(request_id, "already at desired position, nothing to order");
            }
            Some(planned) => {
                self.submit_order(shared, planned).await?;
            }
        }

        tracing::info!(request_id, "reconciliation complete");
        Ok(())
    }
}
