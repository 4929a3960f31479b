use serde::{Deserialize, Serialize};

/// Visible index range `[from, to)` into the candle sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewWindow {
    pub from: usize,
    pub to: usize,
}

impl ViewWindow {
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.to.saturating_sub(self.from)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        index >= self.from && index < self.to
    }

    /// Repairs the window so it satisfies every invariant for `candle_count`.
    ///
    /// Returns `None` when there are no candles to show.
    #[must_use]
    pub fn clamped_to(self, candle_count: usize, behavior: ViewportBehavior) -> Option<Self> {
        if candle_count == 0 {
            return None;
        }
        let floor = minimum_window_len(candle_count, behavior);
        let len = self.len().clamp(floor, candle_count);
        let from = self.from.min(candle_count - len);
        Some(Self::new(from, from + len))
    }
}

/// Wheel direction resolved from the raw wheel delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Positive deltas zoom out, negative deltas zoom in, zero is ignored.
    #[must_use]
    pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
        if !delta_y.is_finite() || delta_y == 0.0 {
            None
        } else if delta_y > 0.0 {
            Some(Self::Out)
        } else {
            Some(Self::In)
        }
    }
}

/// Tuning for the pan/zoom window model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBehavior {
    /// Number of trailing candles shown after a new sequence arrives.
    pub default_window_size: usize,
    /// Smallest window the user can zoom into.
    pub minimum_window: usize,
    /// Window span multiplier applied when zooming in (`< 1`).
    pub zoom_in_factor: f64,
    /// Window span multiplier applied when zooming out (`> 1`).
    pub zoom_out_factor: f64,
}

impl Default for ViewportBehavior {
    fn default() -> Self {
        Self {
            default_window_size: 200,
            minimum_window: 10,
            zoom_in_factor: 0.9,
            zoom_out_factor: 1.1,
        }
    }
}

impl ViewportBehavior {
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.default_window_size > 0
            && self.minimum_window > 0
            && self.zoom_in_factor.is_finite()
            && self.zoom_in_factor > 0.0
            && self.zoom_in_factor < 1.0
            && self.zoom_out_factor.is_finite()
            && self.zoom_out_factor > 1.0
    }

    #[must_use]
    pub fn factor(self, direction: ZoomDirection) -> f64 {
        match direction {
            ZoomDirection::In => self.zoom_in_factor,
            ZoomDirection::Out => self.zoom_out_factor,
        }
    }
}

/// Effective window floor: the configured minimum, capped by the candle count.
#[must_use]
pub fn minimum_window_len(candle_count: usize, behavior: ViewportBehavior) -> usize {
    behavior.minimum_window.max(1).min(candle_count.max(1))
}

/// Window shown when a candle sequence is (re)delivered: the trailing
/// `min(default_window_size, candle_count)` candles.
///
/// This is the single rule for re-deriving the window on data replacement.
#[must_use]
pub fn initial_window(candle_count: usize, behavior: ViewportBehavior) -> Option<ViewWindow> {
    if candle_count == 0 {
        return None;
    }
    let len = behavior
        .default_window_size
        .max(minimum_window_len(candle_count, behavior))
        .min(candle_count);
    Some(ViewWindow::new(candle_count - len, candle_count))
}

/// Zooms one step in `direction` keeping the candle under `cursor_index` fixed.
#[must_use]
pub fn zoom_window(
    window: ViewWindow,
    cursor_index: i64,
    direction: ZoomDirection,
    candle_count: usize,
    behavior: ViewportBehavior,
) -> ViewWindow {
    zoom_window_by_factor(
        window,
        cursor_index,
        behavior.factor(direction),
        candle_count,
        behavior,
    )
}

/// Rescales the window span by `factor` around `cursor_index`.
///
/// The result never leaves `[0, candle_count]` and never shrinks below the
/// window floor; out-of-range requests are clamped, not rejected.
#[must_use]
pub fn zoom_window_by_factor(
    window: ViewWindow,
    cursor_index: i64,
    factor: f64,
    candle_count: usize,
    behavior: ViewportBehavior,
) -> ViewWindow {
    let Some(window) = window.clamped_to(candle_count, behavior) else {
        return window;
    };
    if !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
        return window;
    }

    let span = window.len();
    let floor = minimum_window_len(candle_count, behavior);
    let scaled = (span as f64 * factor).round().min(candle_count as f64).max(0.0) as usize;
    // Always move at least one candle so repeated small steps make progress.
    let target = if factor > 1.0 {
        scaled.max(span + 1)
    } else {
        scaled.min(span.saturating_sub(1))
    }
    .clamp(floor, candle_count);

    let cursor = cursor_index.clamp(window.from as i64, window.to as i64) as f64;
    let ratio = (cursor - window.from as f64) / span as f64;
    let from = (cursor - ratio * target as f64).round().max(0.0) as usize;
    let from = from.min(candle_count - target);
    ViewWindow::new(from, from + target)
}

/// Shifts both bounds by `delta_index`, clamped to `[0, candle_count]`.
///
/// The window size is preserved; only an edge clamp can stop the motion.
#[must_use]
pub fn pan_window(
    window: ViewWindow,
    delta_index: i64,
    candle_count: usize,
    behavior: ViewportBehavior,
) -> ViewWindow {
    let Some(window) = window.clamped_to(candle_count, behavior) else {
        return window;
    };
    let max_from = (candle_count - window.len()) as i64;
    let from = (window.from as i64).saturating_add(delta_index).clamp(0, max_from) as usize;
    ViewWindow::new(from, from + window.len())
}

#[cfg(test)]
mod tests {
    use super::{
        ViewWindow, ViewportBehavior, ZoomDirection, initial_window, pan_window, zoom_window,
    };

    #[test]
    fn initial_window_shows_trailing_candles() {
        let behavior = ViewportBehavior::default();
        assert_eq!(initial_window(500, behavior), Some(ViewWindow::new(300, 500)));
        assert_eq!(initial_window(50, behavior), Some(ViewWindow::new(0, 50)));
        assert_eq!(initial_window(0, behavior), None);
    }

    #[test]
    fn zoom_in_is_floored_at_minimum_window() {
        let behavior = ViewportBehavior::default();
        let mut window = ViewWindow::new(100, 130);
        for _ in 0..50 {
            window = zoom_window(window, 115, ZoomDirection::In, 1_000, behavior);
        }
        assert_eq!(window.len(), behavior.minimum_window);
        assert!(window.contains(115));
    }

    #[test]
    fn zoom_out_is_capped_at_candle_count() {
        let behavior = ViewportBehavior::default();
        let mut window = ViewWindow::new(40, 60);
        for _ in 0..100 {
            window = zoom_window(window, 50, ZoomDirection::Out, 120, behavior);
        }
        assert_eq!(window, ViewWindow::new(0, 120));
    }

    #[test]
    fn pan_keeps_size_and_clamps_at_edges() {
        let behavior = ViewportBehavior::default();
        let window = ViewWindow::new(10, 60);
        assert_eq!(pan_window(window, -25, 100, behavior), ViewWindow::new(0, 50));
        assert_eq!(pan_window(window, 500, 100, behavior), ViewWindow::new(50, 100));
        assert_eq!(pan_window(window, 5, 100, behavior), ViewWindow::new(15, 65));
    }
}
