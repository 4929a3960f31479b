use crate::core::{Candle, CoordinateSpace, PriceBand};
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Deterministic bar geometry for the volume histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBar {
    pub x_center: f64,
    pub x_left: f64,
    pub x_right: f64,
    pub y_top: f64,
    pub y_bottom: f64,
}

/// Projects candle volumes into bars growing up from `pane.bottom`.
///
/// Bars are scaled so `max_volume` fills the pane height. Candles with zero
/// volume produce no bar.
pub fn project_volume_bars(
    candles: &[Candle],
    first_index: usize,
    space: CoordinateSpace,
    pane: PriceBand,
    bar_width_px: f64,
    max_volume: f64,
) -> ChartResult<Vec<HistogramBar>> {
    if !bar_width_px.is_finite() || bar_width_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "histogram bar width must be finite and > 0".to_owned(),
        ));
    }
    if !max_volume.is_finite() || max_volume <= 0.0 {
        return Ok(Vec::new());
    }

    let half_width = bar_width_px * 0.5;
    let pane_height = pane.height().max(0.0);
    Ok(candles
        .iter()
        .enumerate()
        .filter(|(_, candle)| candle.volume > 0.0)
        .map(|(offset, candle)| {
            let x_center = space.candle_center_x(first_index + offset);
            let height = (candle.volume / max_volume).min(1.0) * pane_height;
            HistogramBar {
                x_center,
                x_left: x_center - half_width,
                x_right: x_center + half_width,
                y_top: pane.bottom - height,
                y_bottom: pane.bottom,
            }
        })
        .collect())
}
