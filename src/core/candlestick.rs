use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::CoordinateSpace;
use crate::core::primitives::{decimal_to_f64, is_finite_non_negative};
use crate::error::{ChartError, ChartResult};

/// One OHLCV record for a single time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Builds a validated candle.
    ///
    /// Invariants:
    /// - all prices and the volume are finite
    /// - `low <= min(open, close) <= max(open, close) <= high`
    /// - `volume >= 0`
    pub fn new(
        time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> ChartResult<Self> {
        let candle = Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        };
        candle.validate()?;
        Ok(candle)
    }

    /// Converts decimal prices/volume into a validated candle.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            time,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            decimal_to_f64(volume, "volume")?,
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.open.is_finite()
            || !self.high.is_finite()
            || !self.low.is_finite()
            || !self.close.is_finite()
        {
            return Err(ChartError::InvalidData(
                "candle prices must be finite".to_owned(),
            ));
        }
        if !is_finite_non_negative(self.volume) {
            return Err(ChartError::InvalidData(
                "candle volume must be finite and >= 0".to_owned(),
            ));
        }
        if self.low > self.high {
            return Err(ChartError::InvalidData(
                "candle low must be <= high".to_owned(),
            ));
        }
        if self.open < self.low
            || self.open > self.high
            || self.close < self.low
            || self.close > self.high
        {
            return Err(ChartError::InvalidData(
                "candle open/close must be within low/high range".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Drops candles with non-finite fields or invalid high/low ordering.
///
/// Order is preserved; no other validation or deduplication is performed.
#[must_use]
pub fn sanitize_candles(candles: Vec<Candle>) -> Vec<Candle> {
    let original_count = candles.len();
    let sanitized: Vec<Candle> = candles.into_iter().filter(Candle::is_valid).collect();
    if sanitized.len() != original_count {
        debug!(
            original_count,
            kept = sanitized.len(),
            "dropped invalid candles"
        );
    }
    sanitized
}

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub index: usize,
    pub center_x: f64,
    pub body_left: f64,
    pub body_right: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

impl CandleGeometry {
    #[must_use]
    pub fn body_height(&self) -> f64 {
        self.body_bottom - self.body_top
    }
}

/// Projects a contiguous candle run starting at `first_index`.
pub fn project_candles(
    candles: &[Candle],
    first_index: usize,
    space: CoordinateSpace,
    body_width_px: f64,
) -> ChartResult<Vec<CandleGeometry>> {
    if !body_width_px.is_finite() || body_width_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "body width must be finite and > 0".to_owned(),
        ));
    }

    #[cfg(feature = "parallel-projection")]
    {
        Ok(candles
            .par_iter()
            .enumerate()
            .map(|(offset, candle)| {
                project_single_candle(candle, first_index + offset, space, body_width_px)
            })
            .collect())
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        Ok(candles
            .iter()
            .enumerate()
            .map(|(offset, candle)| {
                project_single_candle(candle, first_index + offset, space, body_width_px)
            })
            .collect())
    }
}

fn project_single_candle(
    candle: &Candle,
    index: usize,
    space: CoordinateSpace,
    body_width_px: f64,
) -> CandleGeometry {
    let half = body_width_px / 2.0;
    let center_x = space.candle_center_x(index);
    let open_y = space.price_to_y(candle.open);
    let close_y = space.price_to_y(candle.close);

    CandleGeometry {
        index,
        center_x,
        body_left: center_x - half,
        body_right: center_x + half,
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_top: space.price_to_y(candle.high),
        wick_bottom: space.price_to_y(candle.low),
        is_bullish: candle.is_bullish(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Candle, sanitize_candles};
    use chrono::{TimeZone, Utc};

    #[test]
    fn invalid_candles_are_dropped_in_order() {
        let time = Utc.timestamp_opt(1_700_000_000, 0).single().expect("time");
        let valid = Candle::new(time, 10.0, 12.0, 9.0, 11.0, 3.0).expect("valid");
        let nan_close = Candle {
            close: f64::NAN,
            ..valid
        };
        let inverted = Candle {
            low: 13.0,
            ..valid
        };
        let negative_volume = Candle {
            volume: -1.0,
            ..valid
        };
        let kept = sanitize_candles(vec![valid, nan_close, inverted, negative_volume, valid]);
        assert_eq!(kept, vec![valid, valid]);
    }
}
