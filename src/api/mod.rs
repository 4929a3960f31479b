mod axis_config;
mod axis_label_format;
mod behavior;
mod chart_config;
mod chart_state;
mod crosshair_render_frame_builder;
mod data_controller;
mod engine;
mod engine_config;
mod interaction_coordinator;
mod layout;
mod layout_helpers;
mod profile_render_frame_builder;
mod render_frame_builder;
mod render_style;
mod validation;

pub use axis_config::{DAILY_INTERVAL_MINUTES, TimeAxisLabelConfig, TimeAxisLabelPolicy};
pub use behavior::{LayoutMetrics, PinnedRangeBehavior};
pub use chart_config::{ChartConfig, ChartType, DEFAULT_LAST_N, FrameInputs, ProfileMode};
pub use chart_state::ChartState;
pub use data_controller::{RawCandle, RawNumber, RawTime, candles_from_json_str};
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use layout::ChartLayout;
pub use profile_render_frame_builder::NO_PROFILE_TEXT;
pub use render_frame_builder::{NO_DATA_TEXT, build_render_frame};
pub use render_style::RenderStyle;
