use crate::core::{Candle, PriceRange, ViewWindow};

/// Returns the candles inside `[from, to)`, clamped to the slice bounds.
#[must_use]
pub fn candles_in_index_range(candles: &[Candle], from: usize, to: usize) -> &[Candle] {
    let end = to.min(candles.len());
    let start = from.min(end);
    &candles[start..end]
}

/// Returns the candles covered by a view window.
#[must_use]
pub fn candles_in_window(candles: &[Candle], window: ViewWindow) -> &[Candle] {
    candles_in_index_range(candles, window.from, window.to)
}

/// Returns the trailing `count` candles (at least one when any exist).
#[must_use]
pub fn last_n_candles(candles: &[Candle], count: usize) -> &[Candle] {
    let count = count.max(1).min(candles.len());
    &candles[candles.len() - count..]
}

/// Low/high envelope of a candle subset.
///
/// Returns `None` for an empty subset or a zero-height envelope.
#[must_use]
pub fn price_envelope(candles: &[Candle]) -> Option<PriceRange> {
    let (min, max) = candles
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), candle| {
            (min.min(candle.low), max.max(candle.high))
        });
    let range = PriceRange::new(min, max);
    range.is_valid().then_some(range)
}

/// Largest volume in the subset, or `0.0` when empty.
#[must_use]
pub fn max_volume(candles: &[Candle]) -> f64 {
    candles
        .iter()
        .map(|candle| candle.volume)
        .fold(0.0, f64::max)
}
