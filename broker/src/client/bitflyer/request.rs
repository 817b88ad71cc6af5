use super::model::{ChildOrder, ChildOrderType, OrderSide, PositionRow, SendChildOrderResponse};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use tucano_integration::{error::SocketError, protocol::http::rest::RestRequest};

/// `GET /v1/me/getchildorders`.
pub struct GetChildOrders {
    pub product_code: &'static str,
    pub state: &'static str,
    pub child_order_acceptance_id: Option<String>,
}

impl RestRequest for GetChildOrders {
    type Response = Vec<ChildOrder>;

    fn method() -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/v1/me/getchildorders".to_string()
    }

    fn query(&self) -> Option<String> {
        let mut query = format!("?product_code={}&child_order_state={}", self.product_code, self.state);
        if let Some(acceptance_id) = &self.child_order_acceptance_id {
            query.push_str(&format!("&child_order_acceptance_id={acceptance_id}"));
        }
        Some(query)
    }
}

/// `POST /v1/me/cancelchildorder`.
pub struct CancelChildOrder {
    pub product_code: &'static str,
    pub child_order_id: String,
}

#[derive(Serialize)]
struct CancelChildOrderBody<'a> {
    product_code: &'a str,
    child_order_id: &'a str,
}

impl RestRequest for CancelChildOrder {
    type Response = serde_json::Value;

    fn method() -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/v1/me/cancelchildorder".to_string()
    }

    fn body(&self) -> Result<Option<String>, SocketError> {
        serde_json::to_string(&CancelChildOrderBody {
            product_code: self.product_code,
            child_order_id: &self.child_order_id,
        })
        .map(Some)
        .map_err(SocketError::Serialize)
    }
}

/// `POST /v1/me/sendchildorder`.
pub struct SendChildOrder {
    pub product_code: &'static str,
    pub side: OrderSide,
    pub size: Decimal,
    pub price: Decimal,
    pub minute_to_expire: u32,
    pub time_in_force: &'static str,
}

#[derive(Serialize)]
struct SendChildOrderBody<'a> {
    product_code: &'a str,
    child_order_type: ChildOrderType,
    side: OrderSide,
    price: Decimal,
    size: Decimal,
    minute_to_expire: u32,
    time_in_force: &'a str,
}

impl RestRequest for SendChildOrder {
    type Response = SendChildOrderResponse;

    fn method() -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/v1/me/sendchildorder".to_string()
    }

    fn body(&self) -> Result<Option<String>, SocketError> {
        serde_json::to_string(&SendChildOrderBody {
            product_code: self.product_code,
            child_order_type: ChildOrderType::Limit,
            side: self.side,
            price: self.price,
            size: self.size,
            minute_to_expire: self.minute_to_expire,
            time_in_force: self.time_in_force,
        })
        .map(Some)
        .map_err(SocketError::Serialize)
    }
}

/// `GET /v1/me/getpositions`.
pub struct GetPositions {
    pub product_code: &'static str,
}

impl RestRequest for GetPositions {
    type Response = Vec<PositionRow>;

    fn method() -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/v1/me/getpositions".to_string()
    }

    fn query(&self) -> Option<String> {
        Some(format!("?product_code={}", self.product_code))
    }
}
