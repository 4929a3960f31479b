use serde::{Deserialize, Serialize};

use crate::core::{PlotSpan, PriceBand, SurfaceSize};

use super::LayoutMetrics;

/// Pixel regions of one chart surface.
///
/// ```text
/// +---------------------------+------------+----------------+--+
/// | plot (price pane)         | price axis | profile column |  |
/// +---------------------------+            |                |  |
/// | plot (volume pane)        |            |                |  |
/// +---------------------------+------------+----------------+--+
/// | time axis                                                  |
/// +------------------------------------------------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub surface: SurfaceSize,
    pub plot: PlotSpan,
    /// Bottom edge of the price pane; the volume pane starts here.
    pub chart_pane_bottom: f64,
    /// Vertical band prices are mapped into (price pane minus insets).
    pub price_band: PriceBand,
    pub volume_pane: PriceBand,
    pub time_axis_top: f64,
    pub price_axis_left: f64,
    pub profile_right: f64,
    pub profile_width: f64,
}

impl ChartLayout {
    #[must_use]
    pub fn resolve(surface: SurfaceSize, metrics: LayoutMetrics) -> Self {
        let width = surface.width_px();
        let height = surface.height_px();

        let chart_pane_bottom = (height * (1.0 - metrics.volume_pane_ratio)).floor();
        let time_axis_top = (height - metrics.time_axis_height_px).max(chart_pane_bottom);
        let volume_height = (time_axis_top - chart_pane_bottom).max(metrics.min_plot_width_px);

        let plot_right = width
            - metrics.price_axis_width_px
            - metrics.profile_width_px
            - metrics.profile_right_margin_px;
        let plot = PlotSpan::new(0.0, plot_right.max(metrics.min_plot_width_px));

        let inset = metrics.price_inset_px.min(chart_pane_bottom * 0.5);
        Self {
            surface,
            plot,
            chart_pane_bottom,
            price_band: PriceBand::new(inset, chart_pane_bottom - inset),
            volume_pane: PriceBand::new(time_axis_top - volume_height, time_axis_top),
            time_axis_top,
            price_axis_left: plot.right(),
            profile_right: width - metrics.profile_right_margin_px,
            profile_width: metrics.profile_width_px,
        }
    }
}
