use serde::{Deserialize, Serialize};

use crate::core::{SurfaceSize, ViewportBehavior};
use crate::error::{ChartError, ChartResult};

use super::{LayoutMetrics, PinnedRangeBehavior, TimeAxisLabelConfig};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    /// Initial drawing-surface size in device pixels.
    pub surface: SurfaceSize,
    #[serde(default = "default_viewport_behavior")]
    pub viewport_behavior: ViewportBehavior,
    #[serde(default = "default_pinned_range_behavior")]
    pub pinned_range_behavior: PinnedRangeBehavior,
    #[serde(default = "default_time_axis_label_config")]
    pub time_axis_label_config: TimeAxisLabelConfig,
    #[serde(default = "default_layout_metrics")]
    pub layout_metrics: LayoutMetrics,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            viewport_behavior: default_viewport_behavior(),
            pinned_range_behavior: default_pinned_range_behavior(),
            time_axis_label_config: default_time_axis_label_config(),
            layout_metrics: default_layout_metrics(),
        }
    }

    /// Sets pan/zoom window limits.
    #[must_use]
    pub fn with_viewport_behavior(mut self, behavior: ViewportBehavior) -> Self {
        self.viewport_behavior = behavior;
        self
    }

    /// Sets pinned-range span and visibility limits.
    #[must_use]
    pub fn with_pinned_range_behavior(mut self, behavior: PinnedRangeBehavior) -> Self {
        self.pinned_range_behavior = behavior;
        self
    }

    /// Sets time-label formatter config.
    #[must_use]
    pub fn with_time_axis_label_config(mut self, config: TimeAxisLabelConfig) -> Self {
        self.time_axis_label_config = config;
        self
    }

    #[must_use]
    pub fn with_layout_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.layout_metrics = metrics;
        self
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_viewport_behavior() -> ViewportBehavior {
    ViewportBehavior::default()
}

fn default_pinned_range_behavior() -> PinnedRangeBehavior {
    PinnedRangeBehavior::default()
}

fn default_time_axis_label_config() -> TimeAxisLabelConfig {
    TimeAxisLabelConfig::default()
}

fn default_layout_metrics() -> LayoutMetrics {
    LayoutMetrics::default()
}
