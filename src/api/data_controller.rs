use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::Candle;
use crate::core::primitives::{decimal_to_f64, unix_millis_to_datetime};
use crate::error::{ChartError, ChartResult};

/// Loosely typed numeric field: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn resolve(&self, field_name: &str) -> ChartResult<f64> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => {
                let text = text.trim();
                if let Ok(decimal) = text.parse::<Decimal>() {
                    return decimal_to_f64(decimal, field_name);
                }
                text.parse::<f64>().map_err(|_| {
                    ChartError::InvalidData(format!("{field_name} `{text}` is not numeric"))
                })
            }
        }
    }
}

/// Loosely typed timestamp: unix milliseconds or a date/time string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    UnixMillis(i64),
    Text(String),
}

impl RawTime {
    fn resolve(&self) -> ChartResult<DateTime<Utc>> {
        match self {
            Self::UnixMillis(millis) => unix_millis_to_datetime(*millis),
            Self::Text(text) => parse_time_text(text.trim()),
        }
    }
}

/// Candle record as delivered by the data-fetch collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCandle {
    pub time: RawTime,
    pub open: RawNumber,
    pub high: RawNumber,
    pub low: RawNumber,
    pub close: RawNumber,
    pub volume: RawNumber,
}

impl RawCandle {
    /// Converts into a validated candle.
    pub fn normalize(&self) -> ChartResult<Candle> {
        Candle::new(
            self.time.resolve()?,
            self.open.resolve("open")?,
            self.high.resolve("high")?,
            self.low.resolve("low")?,
            self.close.resolve("close")?,
            self.volume.resolve("volume")?,
        )
    }
}

/// Parses a candle payload: a bare array, or an object holding a `candles`
/// or `rows` array.
///
/// Records that fail to parse or validate are dropped. An unrecognized
/// payload shape yields an empty sequence; malformed JSON is an error.
pub fn candles_from_json_str(input: &str) -> ChartResult<Vec<Candle>> {
    let payload: Value = serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse candle payload: {e}")))?;

    let records = match &payload {
        Value::Array(records) => records.as_slice(),
        Value::Object(object) => match ["candles", "rows"]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_array))
        {
            Some(records) => records.as_slice(),
            None => {
                warn!("candle payload has no `candles` or `rows` array");
                return Ok(Vec::new());
            }
        },
        _ => {
            warn!("candle payload is neither an array nor an object");
            return Ok(Vec::new());
        }
    };

    let candles: Vec<Candle> = records
        .iter()
        .filter_map(|record| {
            serde_json::from_value::<RawCandle>(record.clone())
                .map_err(|e| ChartError::InvalidData(e.to_string()))
                .and_then(|raw| raw.normalize())
                .map_err(|err| debug!(error = %err, "dropped candle record"))
                .ok()
        })
        .collect();

    debug!(
        raw_count = records.len(),
        kept = candles.len(),
        "parsed candle payload"
    );
    if candles.is_empty() && !records.is_empty() {
        warn!(raw_count = records.len(), "no valid candles after normalization");
    }
    Ok(candles)
}

fn parse_time_text(text: &str) -> ChartResult<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Ok(time.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Ok(naive.and_utc());
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }
    if let Ok(millis) = text.parse::<i64>() {
        return unix_millis_to_datetime(millis);
    }
    Err(ChartError::InvalidData(format!(
        "time `{text}` is not a recognized timestamp"
    )))
}
