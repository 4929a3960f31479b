//! volume-profile-chart: a backend-agnostic candlestick chart core with
//! volume profiles.
//!
//! The crate is split the same way at every level:
//! - `core`: pure data-space math (coordinate mapping, viewport window,
//!   volume profile binning, pinned ranges, series projection)
//! - `interaction`: gesture state machine types
//! - `render`: ordered draw commands and the `Renderer` backend contract
//! - `api`: chart state, event handling and render-frame building
//!
//! Hosts own the candle sequence and the per-cycle [`api::ChartConfig`]; the
//! chart borrows both for each render pass and emits a [`render::RenderFrame`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{
    ChartConfig, ChartEngine, ChartEngineConfig, ChartState, ChartType, ProfileMode,
    build_render_frame,
};
pub use error::{ChartError, ChartResult};
