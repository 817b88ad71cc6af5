use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tucano_broker::RetryConfig;

/// API credentials. Never derives `Debug`/`Serialize` with the secret in view — see the
/// redacted [`fmt::Debug`] impl below.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("key", &"<redacted>").field("secret", &"<redacted>").finish()
    }
}

/// The whole pipeline's configuration (§9.3), deserialised from a TOML file and overridable by
/// the `TUCANO_API_KEY`/`TUCANO_API_SECRET` environment variables — credential parsing itself
/// stays out of scope, this only defines the shape a caller populates.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub credentials: Credentials,
    pub base_url: String,
    #[serde(with = "symbol_as_str")]
    pub product_code: tucano_model::Symbol,
    pub order_size: rust_decimal::Decimal,
    pub size_tick: rust_decimal::Decimal,
    pub minute_to_expire: u32,
    pub time_in_force: TimeInForce,
    pub request_timeout_secs: u64,
    pub time_wait_retrying_secs: u64,
    pub time_wait_429_suspends_secs: u64,
    pub settlement_delay_secs: Option<u64>,
    pub warm_up_window_secs: i64,
    pub websocket_url: String,
    pub websocket_channel: String,
}

/// bitFlyer's `time_in_force` enumeration. Kept closed to the values the reference broker
/// actually sends (`GTC`); the exchange rejects anything else.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum TimeInForce {
    #[serde(rename = "GTC")]
    GoodTilCancel,
}

impl TimeInForce {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeInForce::GoodTilCancel => "GTC",
        }
    }
}

impl Config {
    /// Loads the TOML file at `path`, then applies any `TUCANO_API_KEY`/`TUCANO_API_SECRET`
    /// environment overrides on top.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let mut config: Config = toml::from_str(&raw).map_err(ConfigError::Parse)?;

        if let Ok(key) = std::env::var("TUCANO_API_KEY") {
            config.credentials.key = key;
        }
        if let Ok(secret) = std::env::var("TUCANO_API_SECRET") {
            config.credentials.secret = secret;
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn settlement_delay(&self) -> Option<Duration> {
        self.settlement_delay_secs.map(Duration::from_secs)
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            time_wait_retrying: Duration::from_secs(self.time_wait_retrying_secs),
            time_wait_429_suspends: Duration::from_secs(self.time_wait_429_suspends_secs),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(toml::de::Error),
}

mod symbol_as_str {
    use serde::{de::Error, Deserialize, Deserializer};
    use std::str::FromStr;
    use tucano_model::Symbol;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Symbol, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Symbol::from_str(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        base_url = "https://api.bitflyer.com"
        product_code = "FXBTCJPY"
        order_size = "0.01"
        size_tick = "0.001"
        minute_to_expire = 1
        time_in_force = "GTC"
        request_timeout_secs = 10
        time_wait_retrying_secs = 1
        time_wait_429_suspends_secs = 30
        warm_up_window_secs = 3600
        websocket_url = "wss://ws.lightstream.bitflyer.com/json-rpc"
        websocket_channel = "lightning_executions_FX_BTC_JPY"

        [credentials]
        key = "my-api-key"
        secret = "hunter2hunter2"
    "#;

    #[test]
    fn parses_a_complete_config() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.product_code, tucano_model::Symbol::FxBtcJpy);
        assert_eq!(config.time_in_force.as_str(), "GTC");
    }

    #[test]
    fn debug_never_prints_the_secret() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let rendered = format!("{:?}", config.credentials);
        assert!(!rendered.contains("hunter2hunter2"));
        assert!(!rendered.contains("my-api-key"));
        assert!(rendered.contains("redacted"));
    }
}
