use crate::core::{Candle, CoordinateSpace};
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Deterministic OHLC bar geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub center_x: f64,
    pub high_y: f64,
    pub low_y: f64,
    pub open_y: f64,
    pub close_y: f64,
    pub open_x: f64,
    pub close_x: f64,
    pub is_bullish: bool,
}

/// Projects candles into bar-series geometry.
///
/// The open tick extends left of the stem, the close tick extends right;
/// each tick is `tick_width_px / 2` long.
pub fn project_bars(
    candles: &[Candle],
    first_index: usize,
    space: CoordinateSpace,
    tick_width_px: f64,
) -> ChartResult<Vec<BarGeometry>> {
    if !tick_width_px.is_finite() || tick_width_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "tick width must be finite and > 0".to_owned(),
        ));
    }

    let half = tick_width_px * 0.5;
    Ok(candles
        .iter()
        .enumerate()
        .map(|(offset, candle)| {
            let center_x = space.candle_center_x(first_index + offset);
            BarGeometry {
                center_x,
                high_y: space.price_to_y(candle.high),
                low_y: space.price_to_y(candle.low),
                open_y: space.price_to_y(candle.open),
                close_y: space.price_to_y(candle.close),
                open_x: center_x - half,
                close_x: center_x + half,
                is_bullish: candle.is_bullish(),
            }
        })
        .collect())
}
