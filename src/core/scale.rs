//! Coordinate mapping between data space (candle index, price) and pixels.
//!
//! All functions are pure. Index space is continuous: candle `i` occupies
//! the slot `[i, i + 1)` and its centre sits at `i + 0.5`.

use serde::{Deserialize, Serialize};

use crate::core::{PlotSpan, PriceBand, PriceRange, ViewWindow};

/// Maps a (possibly fractional) candle index into pixel X.
#[must_use]
pub fn index_to_x(index: f64, window: ViewWindow, plot: PlotSpan) -> f64 {
    let visible = window.len().max(1) as f64;
    let normalized = (index - window.from as f64) / visible;
    plot.offset_x + normalized * plot.width
}

/// Inverse of [`index_to_x`], floored to the candle slot under `x`.
///
/// The result is not clamped; callers clamp to `[0, candle_count)` when needed.
#[must_use]
pub fn x_to_index(x: f64, window: ViewWindow, plot: PlotSpan) -> i64 {
    if !x.is_finite() || !plot.width.is_finite() || plot.width <= 0.0 {
        return window.from as i64;
    }
    let visible = window.len().max(1) as f64;
    let normalized = (x - plot.offset_x) / plot.width;
    (window.from as f64 + normalized * visible).floor() as i64
}

/// Maps a price into pixel Y; higher prices map to smaller Y.
///
/// A degenerate `range` is replaced by the unit range `[0, 1]`.
#[must_use]
pub fn price_to_y(price: f64, range: PriceRange, band: PriceBand) -> f64 {
    let range = range.or_unit();
    let normalized = (price - range.min) / range.span();
    band.bottom - normalized * band.height()
}

/// Inverse of [`price_to_y`].
#[must_use]
pub fn y_to_price(y: f64, range: PriceRange, band: PriceBand) -> f64 {
    let range = range.or_unit();
    let height = band.height();
    if !height.is_finite() || height == 0.0 {
        return range.min;
    }
    let normalized = (band.bottom - y) / height;
    range.min + normalized * range.span()
}

/// Bundles the mapping inputs of one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpace {
    pub window: ViewWindow,
    pub plot: PlotSpan,
    pub prices: PriceRange,
    pub band: PriceBand,
}

impl CoordinateSpace {
    #[must_use]
    pub fn new(window: ViewWindow, plot: PlotSpan, prices: PriceRange, band: PriceBand) -> Self {
        Self {
            window,
            plot,
            prices: prices.or_unit(),
            band,
        }
    }

    #[must_use]
    pub fn index_to_x(&self, index: f64) -> f64 {
        index_to_x(index, self.window, self.plot)
    }

    #[must_use]
    pub fn x_to_index(&self, x: f64) -> i64 {
        x_to_index(x, self.window, self.plot)
    }

    /// Pixel X of the centre of candle slot `index`.
    #[must_use]
    pub fn candle_center_x(&self, index: usize) -> f64 {
        self.index_to_x(index as f64 + 0.5)
    }

    /// Width of one candle slot in pixels.
    #[must_use]
    pub fn slot_width(&self) -> f64 {
        self.plot.width / self.window.len().max(1) as f64
    }

    #[must_use]
    pub fn price_to_y(&self, price: f64) -> f64 {
        price_to_y(price, self.prices, self.band)
    }

    #[must_use]
    pub fn y_to_price(&self, y: f64) -> f64 {
        y_to_price(y, self.prices, self.band)
    }
}
