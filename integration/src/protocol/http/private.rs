use reqwest::Method;

/// One signed HTTP header, e.g. `ACCESS-SIGN`.
pub struct SignedHeader {
    pub name: &'static str,
    pub value: String,
}

pub struct SignedRequest {
    pub headers: Vec<(&'static str, String)>,
}

/// Authenticates an outgoing REST request. Implemented per-exchange (bitFlyer's
/// `ACCESS-KEY`/`ACCESS-TIMESTAMP`/`ACCESS-SIGN` HMAC-SHA256 envelope lives in `tucano-broker`).
pub trait RequestSigner {
    fn sign(&self, method: Method, path: &str, body: Option<&str>) -> Result<SignedRequest, String>;
}
