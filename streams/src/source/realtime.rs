use crate::adapter::ExecutionStream;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tucano_integration::error::SocketError;
use tucano_model::{Execution, WarmUpItem};

/// One frame of the realtime feed: `{channel, message: [...]}`, or the string
/// `"SwitchedToRealtime"` boundary marker (§6).
#[derive(Debug, Deserialize)]
struct ExecutionFrame {
    #[allow(dead_code)]
    channel: String,
    message: Vec<ExecutionRecord>,
}

#[derive(Debug, Deserialize)]
struct ExecutionRecord {
    id: Option<i64>,
    exec_date: chrono::DateTime<chrono::Utc>,
    side: tucano_model::Side,
    price: rust_decimal::Decimal,
    size: rust_decimal::Decimal,
    buy_child_order_acceptance_id: String,
    sell_child_order_acceptance_id: String,
}

impl ExecutionRecord {
    fn into_execution(self, symbol: tucano_model::Symbol) -> Execution {
        Execution::new(
            symbol,
            self.id,
            self.exec_date,
            self.side,
            self.price,
            self.size,
            self.buy_child_order_acceptance_id,
            self.sell_child_order_acceptance_id,
        )
    }
}

/// Websocket execution source. Yields [`WarmUpItem::Execution`]s, and a synthetic
/// [`WarmUpItem::SwitchedToRealtime`] the moment the `"SwitchedToRealtime"` frame arrives.
pub struct RealtimeSource {
    symbol: tucano_model::Symbol,
    socket: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
    pending: std::collections::VecDeque<Execution>,
}

impl RealtimeSource {
    pub async fn connect(url: &str, symbol: tucano_model::Symbol) -> Result<Self, SocketError> {
        let (socket, _) = connect_async(url).await.map_err(SocketError::WebSocket)?;
        Ok(Self {
            symbol,
            socket,
            pending: std::collections::VecDeque::new(),
        })
    }

    pub async fn subscribe(&mut self, channel: &str) -> Result<(), SocketError> {
        let subscribe = serde_json::json!({"method": "subscribe", "params": {"channel": channel}});
        self.socket
            .send(Message::Text(subscribe.to_string().into()))
            .await
            .map_err(SocketError::WebSocket)
    }
}

#[async_trait]
impl ExecutionStream for RealtimeSource {
    type Item = WarmUpItem;

    async fn next(&mut self) -> Option<WarmUpItem> {
        loop {
            if let Some(execution) = self.pending.pop_front() {
                return Some(WarmUpItem::Execution(execution));
            }

            let message = self.socket.next().await?.ok()?;
            match message {
                Message::Text(text) if text.starts_with("SwitchedToRealtime") => {
                    return Some(WarmUpItem::SwitchedToRealtime(
                        tucano_model::SwitchedToRealtime {
                            symbol: self.symbol,
                            timestamp: chrono::Utc::now(),
                        },
                    ));
                }
                Message::Text(text) => {
                    if let Ok(frame) = serde_json::from_str::<ExecutionFrame>(&text) {
                        self.pending.extend(
                            frame
                                .message
                                .into_iter()
                                .map(|record| record.into_execution(self.symbol)),
                        );
                    }
                }
                _ => continue,
            }
        }
    }
}
