use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Converts unix milliseconds into a UTC instant.
pub fn unix_millis_to_datetime(millis: i64) -> ChartResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ChartError::InvalidData(format!("timestamp {millis} is out of range")))
}

/// Finite, non-negative float check used by every candle field validation.
#[must_use]
pub fn is_finite_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
