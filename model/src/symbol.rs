use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed universe of symbols this pipeline understands, grounded on the bitFlyer products
/// the reference broker trades plus a handful of sibling markets used by the stream adapters'
/// tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "FXBTCJPY")]
    FxBtcJpy,
    #[serde(rename = "BTCJPY")]
    BtcJpy,
    #[serde(rename = "BCHBTC")]
    BchBtc,
    #[serde(rename = "ETHJPY")]
    EthJpy,
    #[serde(rename = "ETHUSD")]
    EthUsd,
    #[serde(rename = "ETHBTC")]
    EthBtc,
    #[serde(rename = "XBTUSD")]
    XbtUsd,
}

impl Symbol {
    /// Exchange-side product code, e.g. bitFlyer's `product_code` query parameter.
    pub fn product_code(self) -> &'static str {
        match self {
            Symbol::FxBtcJpy => "FX_BTC_JPY",
            Symbol::BtcJpy => "BTC_JPY",
            Symbol::BchBtc => "BCH_BTC",
            Symbol::EthJpy => "ETH_JPY",
            Symbol::EthUsd => "ETH_USD",
            Symbol::EthBtc => "ETH_BTC",
            Symbol::XbtUsd => "XBT_USD",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::FxBtcJpy => "FXBTCJPY",
            Symbol::BtcJpy => "BTCJPY",
            Symbol::BchBtc => "BCHBTC",
            Symbol::EthJpy => "ETHJPY",
            Symbol::EthUsd => "ETHUSD",
            Symbol::EthBtc => "ETHBTC",
            Symbol::XbtUsd => "XBTUSD",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FXBTCJPY" => Ok(Symbol::FxBtcJpy),
            "BTCJPY" => Ok(Symbol::BtcJpy),
            "BCHBTC" => Ok(Symbol::BchBtc),
            "ETHJPY" => Ok(Symbol::EthJpy),
            "ETHUSD" => Ok(Symbol::EthUsd),
            "ETHBTC" => Ok(Symbol::EthBtc),
            "XBTUSD" => Ok(Symbol::XbtUsd),
            other => Err(format!("unknown symbol: {other}")),
        }
    }
}

/// Identifies the venue a [`Symbol`] is traded on. Closed to a single variant end-to-end, but
/// kept as an enum rather than a unit type so the pipeline is not hard-wired to one exchange
/// at the type level (this is not a multi-exchange abstraction, see spec Non-goals).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Exchange {
    #[serde(rename = "bitFlyer")]
    BitFlyer,
}

impl Exchange {
    pub fn as_str(self) -> &'static str {
        match self {
            Exchange::BitFlyer => "bitFlyer",
        }
    }

    /// Case-insensitive lookup, mirroring the reference `normalize_exchange_name`.
    pub fn normalize(name: &str) -> Result<Self, String> {
        if name.eq_ignore_ascii_case("bitflyer") {
            Ok(Exchange::BitFlyer)
        } else {
            Err(format!("unexpected exchange name: {name}"))
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(Exchange::normalize("bitFlyer"), Ok(Exchange::BitFlyer));
        assert_eq!(Exchange::normalize("BITFLYER"), Ok(Exchange::BitFlyer));
        assert!(Exchange::normalize("coinbase").is_err());
    }

    #[test]
    fn symbol_round_trips_through_str() {
        for s in [Symbol::FxBtcJpy, Symbol::BtcJpy, Symbol::XbtUsd] {
            assert_eq!(s.as_str().parse::<Symbol>().unwrap(), s);
        }
    }
}
