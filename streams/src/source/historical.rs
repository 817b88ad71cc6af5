use chrono::{DateTime, Utc};
use thiserror::Error;
use tucano_model::{Exchange, Symbol};

/// Identity of a compressed columnar historical object, parsed from its storage key:
/// `<symbol>/<exchange>/<channel>/v<version>/<first_datetime>`.
///
/// Only the key is modelled — decompression and schema are out of scope (§1, §10.1); this lets
/// a historical source at least enumerate and order candidate objects before reading one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    pub symbol: Symbol,
    pub exchange: Exchange,
    pub channel: String,
    pub version: u32,
    pub first_datetime: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectKeyError {
    #[error("malformed object key: {0}")]
    Malformed(String),
}

impl ObjectKey {
    pub fn parse(key: &str) -> Result<Self, ObjectKeyError> {
        let parts: Vec<&str> = key.split('/').collect();
        let [symbol, exchange, channel, version, first_datetime] = parts.as_slice() else {
            return Err(ObjectKeyError::Malformed(key.to_string()));
        };

        let version = version
            .strip_prefix('v')
            .ok_or_else(|| ObjectKeyError::Malformed(key.to_string()))?
            .parse::<u32>()
            .map_err(|_| ObjectKeyError::Malformed(key.to_string()))?;

        Ok(Self {
            symbol: symbol
                .parse::<Symbol>()
                .map_err(|_| ObjectKeyError::Malformed(key.to_string()))?,
            exchange: Exchange::normalize(exchange)
                .map_err(|_| ObjectKeyError::Malformed(key.to_string()))?,
            channel: (*channel).to_string(),
            version,
            first_datetime: DateTime::parse_from_rfc3339(first_datetime)
                .map_err(|_| ObjectKeyError::Malformed(key.to_string()))?
                .with_timezone(&Utc),
        })
    }

    pub fn key(&self) -> String {
        format!(
            "{}/{}/{}/v{}/{}",
            self.symbol,
            self.exchange,
            self.channel,
            self.version,
            self.first_datetime.to_rfc3339(),
        )
    }
}

/// Orders a batch of object keys by `first_datetime`, the order a historical replay must read
/// them in.
pub fn sort_by_first_datetime(mut keys: Vec<ObjectKey>) -> Vec<ObjectKey> {
    keys.sort_by_key(|k| k.first_datetime);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips() {
        let key = ObjectKey {
            symbol: Symbol::FxBtcJpy,
            exchange: Exchange::BitFlyer,
            channel: "executions".to_string(),
            version: 1,
            first_datetime: DateTime::parse_from_rfc3339("2019-07-07T08:59:58Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let parsed = ObjectKey::parse(&key.key()).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn sorts_oldest_first() {
        let older = ObjectKey::parse("FXBTCJPY/bitFlyer/executions/v1/2019-01-01T00:00:00Z").unwrap();
        let newer = ObjectKey::parse("FXBTCJPY/bitFlyer/executions/v1/2019-02-01T00:00:00Z").unwrap();
        let sorted = sort_by_first_datetime(vec![newer.clone(), older.clone()]);
        assert_eq!(sorted, vec![older, newer]);
    }
}
