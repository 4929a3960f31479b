use crate::core::{Candle, CoordinateSpace};
use serde::{Deserialize, Serialize};

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projects candle closes into adjacent line segments.
#[must_use]
pub fn project_close_line(
    candles: &[Candle],
    first_index: usize,
    space: CoordinateSpace,
) -> Vec<LineSegment> {
    if candles.len() < 2 {
        return Vec::new();
    }

    let mapped: Vec<(f64, f64)> = candles
        .iter()
        .enumerate()
        .map(|(offset, candle)| {
            (
                space.candle_center_x(first_index + offset),
                space.price_to_y(candle.close),
            )
        })
        .collect();

    mapped
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        })
        .collect()
}
