use serde::{Deserialize, Serialize};

/// Pinned-range creation and display limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinnedRangeBehavior {
    /// Narrowest accepted range, in candles.
    pub min_span: usize,
    /// Pinned rectangles narrower than this on screen are not drawn.
    pub min_width_px: f64,
}

impl Default for PinnedRangeBehavior {
    fn default() -> Self {
        Self {
            min_span: 2,
            min_width_px: 20.0,
        }
    }
}

impl PinnedRangeBehavior {
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.min_span >= 1 && self.min_width_px.is_finite() && self.min_width_px >= 0.0
    }
}

/// Fixed pixel metrics of the chart surface regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub price_axis_width_px: f64,
    pub time_axis_height_px: f64,
    pub profile_width_px: f64,
    pub profile_right_margin_px: f64,
    /// Share of the surface height given to the volume pane and time axis.
    pub volume_pane_ratio: f64,
    /// Vertical inset applied to both ends of the price band.
    pub price_inset_px: f64,
    pub min_plot_width_px: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            price_axis_width_px: 60.0,
            time_axis_height_px: 24.0,
            profile_width_px: 120.0,
            profile_right_margin_px: 14.0,
            volume_pane_ratio: 0.22,
            price_inset_px: 5.0,
            min_plot_width_px: 10.0,
        }
    }
}

impl LayoutMetrics {
    #[must_use]
    pub fn is_valid(self) -> bool {
        let non_negative = |value: f64| value.is_finite() && value >= 0.0;
        non_negative(self.price_axis_width_px)
            && non_negative(self.time_axis_height_px)
            && non_negative(self.profile_width_px)
            && non_negative(self.profile_right_margin_px)
            && non_negative(self.price_inset_px)
            && self.min_plot_width_px.is_finite()
            && self.min_plot_width_px > 0.0
            && self.volume_pane_ratio.is_finite()
            && (0.0..1.0).contains(&self.volume_pane_ratio)
    }
}
