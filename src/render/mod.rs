mod frame;
mod layer_stack;
mod layered_frame;
mod null_renderer;
mod primitives;

pub use frame::{DrawCommand, RenderFrame};
pub use layer_stack::{CanvasLayerKind, LayerStack};
pub use layered_frame::{LayerCommands, LayeredRenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, LineStrokeStyle, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, ordered `RenderFrame` so drawing
/// code stays isolated from chart state and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
