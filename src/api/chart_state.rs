use tracing::debug;

use crate::core::{
    PinnedRange, PinnedRangeId, PinnedRangeManager, SurfaceSize, ViewWindow, ViewportBehavior,
    initial_window, x_to_index,
};
use crate::error::ChartResult;
use crate::interaction::InteractionState;

use super::validation::{
    sanitize_layout_metrics, sanitize_pinned_range_behavior, sanitize_time_axis_label_config,
    sanitize_viewport_behavior, validate_surface,
};
use super::{
    ChartEngineConfig, ChartLayout, LayoutMetrics, PinnedRangeBehavior, TimeAxisLabelConfig,
};

/// Single state object owned by one chart instance.
///
/// Candles are not stored here; each render cycle borrows them from the host
/// and the state only tracks how many there are.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    surface: SurfaceSize,
    layout_metrics: LayoutMetrics,
    viewport_behavior: ViewportBehavior,
    pinned_range_behavior: PinnedRangeBehavior,
    time_axis_label_config: TimeAxisLabelConfig,
    candle_count: usize,
    window: Option<ViewWindow>,
    pub(super) interaction: InteractionState,
    pub(super) pinned: PinnedRangeManager,
}

impl ChartState {
    pub fn new(config: ChartEngineConfig) -> ChartResult<Self> {
        let surface = validate_surface(config.surface)?;
        let pinned_range_behavior = sanitize_pinned_range_behavior(config.pinned_range_behavior);
        Ok(Self {
            surface,
            layout_metrics: sanitize_layout_metrics(config.layout_metrics),
            viewport_behavior: sanitize_viewport_behavior(config.viewport_behavior),
            pinned_range_behavior,
            time_axis_label_config: sanitize_time_axis_label_config(config.time_axis_label_config),
            candle_count: 0,
            window: None,
            interaction: InteractionState::default(),
            pinned: PinnedRangeManager::new(pinned_range_behavior.min_span),
        })
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        ChartLayout::resolve(self.surface, self.layout_metrics)
    }

    #[must_use]
    pub fn layout_metrics(&self) -> LayoutMetrics {
        self.layout_metrics
    }

    #[must_use]
    pub fn viewport_behavior(&self) -> ViewportBehavior {
        self.viewport_behavior
    }

    #[must_use]
    pub fn pinned_range_behavior(&self) -> PinnedRangeBehavior {
        self.pinned_range_behavior
    }

    #[must_use]
    pub fn time_axis_label_config(&self) -> TimeAxisLabelConfig {
        self.time_axis_label_config
    }

    pub fn set_time_axis_label_config(&mut self, config: TimeAxisLabelConfig) {
        self.time_axis_label_config = sanitize_time_axis_label_config(config);
    }

    #[must_use]
    pub fn candle_count(&self) -> usize {
        self.candle_count
    }

    /// Visible window; `None` while there are no candles.
    #[must_use]
    pub fn window(&self) -> Option<ViewWindow> {
        self.window
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn pinned_ranges(&self) -> &PinnedRangeManager {
        &self.pinned
    }

    pub fn add_pinned_range(&mut self, from_index: usize, to_index: usize) -> Option<PinnedRangeId> {
        if to_index.max(from_index) > self.candle_count {
            debug!(
                from_index,
                to_index,
                candle_count = self.candle_count,
                "rejected pinned range past the candle sequence"
            );
            return None;
        }
        self.pinned.add(from_index, to_index)
    }

    pub fn remove_pinned_range(&mut self, id: PinnedRangeId) -> Option<PinnedRange> {
        self.pinned.remove(id)
    }

    pub fn clear_pinned_ranges(&mut self) {
        self.pinned.clear();
    }

    /// Re-derives state after the host delivered a new candle sequence.
    ///
    /// The window is recreated from scratch, pinned ranges that no longer fit
    /// are dropped and any gesture in progress is cancelled.
    pub fn on_candles_replaced(&mut self, candle_count: usize) {
        let previous_window = self.window;
        self.candle_count = candle_count;
        self.window = initial_window(candle_count, self.viewport_behavior);
        self.pinned.retain_within(candle_count);
        self.interaction.reset();
        debug!(
            candle_count,
            ?previous_window,
            window = ?self.window,
            pinned_count = self.pinned.len(),
            "candle sequence replaced"
        );
    }

    /// Applies a new surface size; returns `false` for an empty size.
    pub fn set_surface(&mut self, surface: SurfaceSize) -> bool {
        if !surface.is_valid() {
            return false;
        }
        self.surface = surface;
        true
    }

    pub(super) fn set_window(&mut self, window: ViewWindow) {
        self.window = Some(window);
    }

    /// Candle index under surface pixel `x`, clamped into `[0, candle_count)`.
    #[must_use]
    pub fn candle_index_at(&self, x: f64) -> Option<usize> {
        let window = self.window?;
        let raw = x_to_index(x, window, self.layout().plot);
        let last = self.candle_count.checked_sub(1)?;
        Some(raw.clamp(0, last as i64) as usize)
    }
}
