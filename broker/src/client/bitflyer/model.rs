use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChildOrderState {
    Active,
    Completed,
    Cancelled,
    Expired,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChildOrderType {
    Limit,
    Market,
    Stop,
    StopLimit,
    Trail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// One row of `GET /v1/me/getchildorders`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildOrder {
    pub id: i64,
    pub child_order_id: String,
    pub child_order_acceptance_id: String,
    pub product_code: String,
    pub side: OrderSide,
    pub child_order_type: ChildOrderType,
    pub price: Decimal,
    pub size: Decimal,
    pub child_order_state: ChildOrderState,
}

/// One row of `GET /v1/me/getpositions`.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionRow {
    pub product_code: String,
    pub side: OrderSide,
    pub price: Decimal,
    pub size: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendChildOrderResponse {
    pub child_order_acceptance_id: String,
}
