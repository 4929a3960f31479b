use tracing::debug;

use crate::core::Candle;
use crate::error::ChartResult;
use crate::interaction::ChartEvent;
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::build_render_frame;
use super::{ChartConfig, ChartEngineConfig, ChartState, FrameInputs, RenderStyle};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// The host calls [`ChartEngine::handle_event`] for every input event and
/// [`ChartEngine::replace_candles`] whenever a new sequence arrives, then
/// [`ChartEngine::render`] with the current candles and config. Candles and
/// config are borrowed per call and never retained.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    state: ChartState,
    style: RenderStyle,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let state = ChartState::new(config)?;
        debug!(
            width = config.surface.width,
            height = config.surface.height,
            "chart engine initialized"
        );
        Ok(Self {
            renderer,
            state,
            style: RenderStyle::default(),
        })
    }

    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ChartState {
        &mut self.state
    }

    #[must_use]
    pub fn render_style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn set_render_style(&mut self, style: RenderStyle) -> ChartResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    /// Forwards one input event; returns `true` when a redraw is needed.
    pub fn handle_event(&mut self, event: ChartEvent, config: &ChartConfig) -> bool {
        self.state.handle_event(event, config)
    }

    /// Announces a new candle sequence and re-derives the visible window.
    pub fn replace_candles(&mut self, candles: &[Candle]) {
        self.state.on_candles_replaced(candles.len());
    }

    /// Builds the draw list for the current state without rendering it.
    pub fn build_render_frame(
        &self,
        candles: &[Candle],
        config: ChartConfig,
    ) -> ChartResult<RenderFrame> {
        build_render_frame(&self.state, &FrameInputs::new(candles, config), &self.style)
    }

    pub fn render(&mut self, candles: &[Candle], config: ChartConfig) -> ChartResult<()> {
        let frame = self.build_render_frame(candles, config)?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        candles: &[Candle],
        config: ChartConfig,
    ) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame(candles, config)?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
