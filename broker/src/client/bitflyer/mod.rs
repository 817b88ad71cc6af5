pub mod model;
pub mod request;
pub mod signer;

use crate::error::BrokerError;
use crate::retry::{with_retry, RetryConfig};
use model::{ChildOrder, ChildOrderState, OrderSide, PositionRow};
use request::{CancelChildOrder, GetChildOrders, GetPositions, SendChildOrder};
use rust_decimal::Decimal;
use signer::BitflyerRequestSigner;
use std::time::Duration;
use tucano_integration::{error::SocketError, protocol::http::rest::RestClient};

/// Classifies a transport failure into the broker's retry taxonomy (§7): a 429 is
/// [`BrokerError::RateLimited`], a 5xx is [`BrokerError::Transient`], anything else unexpected
/// is fatal.
fn classify(err: SocketError) -> BrokerError {
    match err {
        SocketError::UnexpectedStatus { status: 429, .. } => BrokerError::RateLimited,
        SocketError::UnexpectedStatus { status, body } if (500..600).contains(&status) => {
            tracing::debug!(status, %body, "transient exchange error");
            BrokerError::Transient
        }
        SocketError::UnexpectedStatus { status, body } => {
            BrokerError::UnexpectedResponse(format!("HTTP {status}: {body}"))
        }
        SocketError::Deserialize(e) => BrokerError::UnexpectedResponse(e.to_string()),
        other => BrokerError::Transport(other),
    }
}

/// bitFlyer REST client (C1/C2): signs, sends and maps the four endpoints this broker uses.
///
/// Every call is wrapped in [`with_retry`] — a transient 5xx or 429 from any endpoint (the
/// initial `GET childorders`, a `POST cancelchildorder`, `GET positions`, or the `POST
/// sendchildorder` submission itself) is retried forever here, never propagated to the caller
/// as a fatal error. Grounded on `original_source/trade/broker/httpclient/__init__.py`, whose
/// `@retry`-decorated `send_request` wraps every outgoing call the same way, not just
/// confirmation polls.
pub struct BitflyerClient {
    rest: RestClient<BitflyerRequestSigner>,
    product_code: &'static str,
    retry: RetryConfig,
}

impl BitflyerClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        product_code: &'static str,
        timeout: Duration,
        retry: RetryConfig,
    ) -> Result<Self, BrokerError> {
        let rest = RestClient::new(base_url, BitflyerRequestSigner::new(api_key, api_secret), timeout)
            .map_err(classify)?;
        Ok(Self { rest, product_code, retry })
    }

    pub async fn active_limit_orders(&self) -> Result<Vec<ChildOrder>, BrokerError> {
        let orders = with_retry(self.retry, || async {
            self.rest
                .execute(GetChildOrders {
                    product_code: self.product_code,
                    state: "ACTIVE",
                    child_order_acceptance_id: None,
                })
                .await
                .map_err(classify)
        })
        .await?;
        Ok(orders
            .into_iter()
            .filter(|o| matches!(o.child_order_type, model::ChildOrderType::Limit))
            .collect())
    }

    pub async fn cancel_order(&self, child_order_id: &str) -> Result<(), BrokerError> {
        with_retry(self.retry, || async {
            self.rest
                .execute(CancelChildOrder {
                    product_code: self.product_code,
                    child_order_id: child_order_id.to_string(),
                })
                .await
                .map(|_: serde_json::Value| ())
                .map_err(classify)
        })
        .await
    }

    pub async fn positions(&self) -> Result<Vec<PositionRow>, BrokerError> {
        with_retry(self.retry, || async {
            self.rest
                .execute(GetPositions {
                    product_code: self.product_code,
                })
                .await
                .map_err(classify)
        })
        .await
    }

    pub async fn send_order(
        &self,
        side: OrderSide,
        size: Decimal,
        price: Decimal,
        minute_to_expire: u32,
        time_in_force: &'static str,
    ) -> Result<String, BrokerError> {
        let response = with_retry(self.retry, || async {
            self.rest
                .execute(SendChildOrder {
                    product_code: self.product_code,
                    side,
                    size,
                    price,
                    minute_to_expire,
                    time_in_force,
                })
                .await
                .map_err(classify)
        })
        .await?;

        if response.child_order_acceptance_id.is_empty() {
            return Err(BrokerError::UnexpectedResponse(
                "sendchildorder returned an empty acceptance id".to_string(),
            ));
        }
        Ok(response.child_order_acceptance_id)
    }

    pub async fn order_by_acceptance(
        &self,
        acceptance_id: &str,
        state: ChildOrderState,
    ) -> Result<Option<ChildOrder>, BrokerError> {
        let state_str = match state {
            ChildOrderState::Active => "ACTIVE",
            ChildOrderState::Completed => "COMPLETED",
            ChildOrderState::Cancelled => "CANCELLED",
            ChildOrderState::Expired => "EXPIRED",
            ChildOrderState::Rejected => "REJECTED",
        };
        let orders = with_retry(self.retry, || async {
            self.rest
                .execute(GetChildOrders {
                    product_code: self.product_code,
                    state: state_str,
                    child_order_acceptance_id: Some(acceptance_id.to_string()),
                })
                .await
                .map_err(classify)
        })
        .await?;
        Ok(orders.into_iter().next())
    }
}
