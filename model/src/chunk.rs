use crate::symbol::{Exchange, Symbol};
use chrono::{DateTime, Utc};
use std::fmt;

/// Identity of a historical execution file.
///
/// Serialisable to a filename of the shape
/// `<exchange>_<symbol>_<first_id>-<first_ts>_<last_id>-<last_ts>.sqlite3`; parse/unparse is
/// bijective modulo the char-safe timestamp encoding (`:` is stripped from the RFC3339
/// timestamp so it is filesystem-safe, then reinserted on parse).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub exchange: Exchange,
    pub symbol: Symbol,
    pub first_id: i64,
    pub first_timestamp: DateTime<Utc>,
    pub last_id: i64,
    pub last_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkFileNameError {
    #[error("malformed chunk filename: {0}")]
    Malformed(String),
    #[error("unknown exchange in chunk filename: {0}")]
    UnknownExchange(String),
    #[error("unknown symbol in chunk filename: {0}")]
    UnknownSymbol(String),
    #[error("malformed timestamp in chunk filename: {0}")]
    MalformedTimestamp(String),
}

impl Chunk {
    /// Encode the RFC3339 timestamp so it is safe to embed in a filename: strip the `:`
    /// separators between hour/minute/second.
    fn encode_safe_timestamp(ts: DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
            .replace(':', "")
    }

    /// Inverse of [`Self::encode_safe_timestamp`]: reinsert `:` between each pair of digits in
    /// the time-of-day portion.
    fn decode_safe_timestamp(s: &str) -> Result<DateTime<Utc>, ChunkFileNameError> {
        let (date, time) = s
            .split_once('T')
            .ok_or_else(|| ChunkFileNameError::MalformedTimestamp(s.to_string()))?;

        let mut rebuilt = String::with_capacity(time.len() + 2);
        let mut digits_since_colon = 0;
        for ch in time.chars() {
            if ch.is_ascii_digit() && digits_since_colon == 2 && rebuilt.ends_with(|c: char| c.is_ascii_digit()) {
                rebuilt.push(':');
                digits_since_colon = 0;
            }
            if ch.is_ascii_digit() {
                digits_since_colon += 1;
            } else {
                digits_since_colon = 0;
            }
            rebuilt.push(ch);
        }

        let full = format!("{date}T{rebuilt}");
        DateTime::parse_from_rfc3339(&full)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ChunkFileNameError::MalformedTimestamp(s.to_string()))
    }

    pub fn filename(&self) -> String {
        format!(
            "{}_{}_{}-{}_{}-{}.sqlite3",
            self.exchange,
            self.symbol,
            self.first_id,
            Self::encode_safe_timestamp(self.first_timestamp),
            self.last_id,
            Self::encode_safe_timestamp(self.last_timestamp),
        )
    }

    pub fn parse_filename(filename: &str) -> Result<Self, ChunkFileNameError> {
        let stem = filename.trim_end_matches(".sqlite3");
        let parts: Vec<&str> = stem.split('_').collect();
        if parts.len() != 4 {
            return Err(ChunkFileNameError::Malformed(filename.to_string()));
        }

        let exchange = Exchange::normalize(parts[0])
            .map_err(|_| ChunkFileNameError::UnknownExchange(parts[0].to_string()))?;
        let symbol = parts[1]
            .parse::<Symbol>()
            .map_err(|_| ChunkFileNameError::UnknownSymbol(parts[1].to_string()))?;

        let (first_id, first_ts) = parts[2]
            .split_once('-')
            .ok_or_else(|| ChunkFileNameError::Malformed(filename.to_string()))?;
        let (last_id, last_ts) = parts[3]
            .split_once('-')
            .ok_or_else(|| ChunkFileNameError::Malformed(filename.to_string()))?;

        Ok(Chunk {
            exchange,
            symbol,
            first_id: first_id
                .parse()
                .map_err(|_| ChunkFileNameError::Malformed(filename.to_string()))?,
            first_timestamp: Self::decode_safe_timestamp(first_ts)?,
            last_id: last_id
                .parse()
                .map_err(|_| ChunkFileNameError::Malformed(filename.to_string()))?,
            last_timestamp: Self::decode_safe_timestamp(last_ts)?,
        })
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_round_trips() {
        let chunk = Chunk {
            exchange: Exchange::BitFlyer,
            symbol: Symbol::FxBtcJpy,
            first_id: 1_146_957_467,
            first_timestamp: Utc.with_ymd_and_hms(2019, 7, 7, 8, 59, 58).unwrap()
                + chrono::Duration::nanoseconds(877_569_400),
            last_id: 1_147_008_386,
            last_timestamp: Utc.with_ymd_and_hms(2019, 7, 7, 10, 2, 59).unwrap()
                + chrono::Duration::nanoseconds(385_583_600),
        };

        let filename = chunk.filename();
        let parsed = Chunk::parse_filename(&filename).unwrap();
        assert_eq!(parsed, chunk);
    }

    #[test]
    fn rejects_malformed_filename() {
        assert!(Chunk::parse_filename("not_a_valid_chunk").is_err());
    }
}
