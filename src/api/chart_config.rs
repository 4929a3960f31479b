use serde::{Deserialize, Serialize};

use crate::core::{Candle, ProfileSettings};

pub const DEFAULT_LAST_N: usize = 100;

/// Price series drawing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Candles,
    Bars,
    Line,
}

/// Candle subset feeding the main volume profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileMode {
    /// Candles inside the visible window.
    #[default]
    Visible,
    /// The entire candle sequence.
    All,
    /// The trailing `ChartConfig::last_n` candles.
    LastN,
    /// Drag-selection mode: the main profile follows the in-progress
    /// selection and completed selections become pinned ranges.
    Selection,
}

/// Per-cycle presentation inputs supplied by the host.
///
/// The chart keeps no memory of a previous cycle's config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub profile_mode: ProfileMode,
    #[serde(default)]
    pub profile_settings: ProfileSettings,
    #[serde(default = "default_last_n")]
    pub last_n: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            profile_mode: ProfileMode::default(),
            profile_settings: ProfileSettings::default(),
            last_n: DEFAULT_LAST_N,
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    #[must_use]
    pub fn with_profile_mode(mut self, profile_mode: ProfileMode) -> Self {
        self.profile_mode = profile_mode;
        self
    }

    #[must_use]
    pub fn with_profile_settings(mut self, profile_settings: ProfileSettings) -> Self {
        self.profile_settings = profile_settings;
        self
    }

    #[must_use]
    pub fn with_last_n(mut self, last_n: usize) -> Self {
        self.last_n = last_n;
        self
    }

    #[must_use]
    pub fn is_selection_mode(&self) -> bool {
        self.profile_mode == ProfileMode::Selection
    }
}

fn default_last_n() -> usize {
    DEFAULT_LAST_N
}

/// Borrowed inputs of one render cycle.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub candles: &'a [Candle],
    pub config: ChartConfig,
}

impl<'a> FrameInputs<'a> {
    #[must_use]
    pub fn new(candles: &'a [Candle], config: ChartConfig) -> Self {
        Self { candles, config }
    }
}
