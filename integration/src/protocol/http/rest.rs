use crate::{error::SocketError, protocol::http::private::RequestSigner};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// One REST endpoint this pipeline calls. Implementors describe the wire shape; [`RestClient`]
/// owns signing, sending, and deserialising.
pub trait RestRequest {
    type Response: DeserializeOwned;

    fn method() -> Method;

    /// Path relative to the exchange base url, e.g. `/v1/me/sendchildorder`.
    fn path(&self) -> String;

    /// Body to sign and send, pre-serialised as compact JSON. `None` for endpoints with no body
    /// (e.g. a GET with only query parameters).
    fn body(&self) -> Result<Option<String>, SocketError> {
        Ok(None)
    }

    fn query(&self) -> Option<String> {
        None
    }
}

/// Thin wrapper over [`reqwest::Client`] that signs every outgoing request with a
/// [`RequestSigner`] before sending it.
#[derive(Debug, Clone)]
pub struct RestClient<S> {
    http: reqwest::Client,
    base_url: String,
    signer: S,
}

impl<S> RestClient<S>
where
    S: RequestSigner,
{
    pub fn new(base_url: impl Into<String>, signer: S, timeout: Duration) -> Result<Self, SocketError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SocketError::Http)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            signer,
        })
    }

    pub async fn execute<R>(&self, request: R) -> Result<R::Response, SocketError>
    where
        R: RestRequest,
    {
        let path = request.path();
        let query = request.query().unwrap_or_default();
        let body_json = request.body()?;

        let signed_path = format!("{path}{query}");
        let signed = self
            .signer
            .sign(R::method(), &signed_path, body_json.as_deref())
            .map_err(SocketError::Sign)?;

        let url = format!("{}{signed_path}", self.base_url);
        let mut builder = self.http.request(R::method(), url);
        for (name, value) in signed.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body_json {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(SocketError::Http)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(SocketError::Http)?;

        if !status.is_success() {
            return Err(SocketError::UnexpectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        serde_json::from_slice(&bytes).map_err(SocketError::Deserialize)
    }
}

/// Helper for request bodies that don't need a custom [`RestRequest::body`] implementation.
#[derive(Debug, Clone, Serialize)]
pub struct JsonBody<T>(pub T);
