use tracing::trace;

use crate::core::{
    Candle, CoordinateSpace, PriceRange, ViewWindow, candles_in_window, max_volume,
    price_envelope, project_bars, project_candles, project_close_line, project_volume_bars,
};
use crate::error::ChartResult;
use crate::render::{
    CanvasLayerKind, LayeredRenderFrame, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive, TextVAlign,
};

use super::axis_label_format::{format_price_label, format_time_axis_label, format_volume_label};
use super::crosshair_render_frame_builder::append_crosshair;
use super::profile_render_frame_builder::{
    append_main_profile, append_pinned_profiles, append_selection,
};
use super::validation::sanitize_chart_config;
use super::{ChartConfig, ChartLayout, ChartState, ChartType, FrameInputs, RenderStyle};

pub const NO_DATA_TEXT: &str = "No data";

/// Everything the layer builders of one frame read.
pub(super) struct FrameContext<'a> {
    pub state: &'a ChartState,
    pub style: &'a RenderStyle,
    pub config: ChartConfig,
    pub layout: ChartLayout,
    pub candles: &'a [Candle],
    pub visible: &'a [Candle],
    pub window: ViewWindow,
    pub space: CoordinateSpace,
}

/// Builds the ordered draw list for one render cycle.
///
/// Pure with respect to `state`: it only reads the snapshot it is given.
/// `inputs.candles` must be the sequence last announced through
/// [`ChartState::on_candles_replaced`]; a shorter sequence is tolerated by
/// clamping the window.
pub fn build_render_frame(
    state: &ChartState,
    inputs: &FrameInputs<'_>,
    style: &RenderStyle,
) -> ChartResult<RenderFrame> {
    style.validate()?;
    let surface = state.surface();
    let layout = state.layout();
    let mut layered = LayeredRenderFrame::canonical(surface);

    layered.push(
        CanvasLayerKind::Background,
        RectPrimitive::new(
            0.0,
            0.0,
            surface.width_px(),
            surface.height_px(),
            style.background_color,
        ),
    );

    let window = state
        .window()
        .and_then(|window| window.clamped_to(inputs.candles.len(), state.viewport_behavior()));
    let Some(window) = window else {
        layered.push(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                NO_DATA_TEXT,
                12.0,
                8.0,
                style.axis_label_font_size_px,
                style.placeholder_color,
                TextHAlign::Left,
            ),
        );
        trace!("rendered empty chart placeholder");
        return Ok(layered.flatten());
    };

    let visible = candles_in_window(inputs.candles, window);
    let prices = price_envelope(visible).unwrap_or_else(PriceRange::unit);
    let ctx = FrameContext {
        state,
        style,
        config: sanitize_chart_config(inputs.config),
        layout,
        candles: inputs.candles,
        visible,
        window,
        space: CoordinateSpace::new(window, layout.plot, prices, layout.price_band),
    };

    append_grid(&ctx, &mut layered);
    append_series(&ctx, &mut layered)?;
    append_volume(&ctx, &mut layered)?;
    append_main_profile(&ctx, &mut layered);
    append_pinned_profiles(&ctx, &mut layered);
    append_selection(&ctx, &mut layered);
    append_axis_labels(&ctx, &mut layered);
    append_crosshair(&ctx, &mut layered);

    let frame = layered.flatten();
    trace!(
        command_count = frame.len(),
        from = window.from,
        to = window.to,
        "built render frame"
    );
    Ok(frame)
}

impl<'a> FrameContext<'a> {
    /// Candle body / volume bar width for the current zoom.
    pub(super) fn body_width(&self) -> f64 {
        (self.space.slot_width() * self.style.candle_body_ratio)
            .max(self.style.candle_min_body_width_px)
    }

    fn grid_fraction(&self, step: usize) -> f64 {
        step as f64 / self.style.grid_line_count as f64
    }
}

fn append_grid(ctx: &FrameContext<'_>, layered: &mut LayeredRenderFrame) {
    let style = ctx.style;
    let plot = ctx.layout.plot;
    let band = ctx.layout.price_band;

    for step in 0..=style.grid_line_count {
        let y = band.bottom - ctx.grid_fraction(step) * band.height();
        layered.push(
            CanvasLayerKind::Grid,
            LinePrimitive::new(
                plot.offset_x,
                y,
                plot.right(),
                y,
                style.grid_line_width,
                style.grid_line_color,
            ),
        );
    }

    for step in 0..=style.grid_line_count {
        let index = ctx.window.from as f64 + ctx.grid_fraction(step) * ctx.window.len() as f64;
        let x = ctx.space.index_to_x(index);
        layered.push(
            CanvasLayerKind::Grid,
            LinePrimitive::new(
                x,
                0.0,
                x,
                ctx.layout.chart_pane_bottom,
                style.grid_line_width,
                style.grid_line_color,
            ),
        );
    }
}

fn append_series(ctx: &FrameContext<'_>, layered: &mut LayeredRenderFrame) -> ChartResult<()> {
    let style = ctx.style;
    let candle_color = |is_bullish: bool| {
        if is_bullish {
            style.candle_up_color
        } else {
            style.candle_down_color
        }
    };

    match ctx.config.chart_type {
        ChartType::Candles => {
            for candle in project_candles(ctx.visible, ctx.window.from, ctx.space, ctx.body_width())? {
                let color = candle_color(candle.is_bullish);
                layered.push(
                    CanvasLayerKind::Series,
                    LinePrimitive::new(
                        candle.center_x,
                        candle.wick_top,
                        candle.center_x,
                        candle.wick_bottom,
                        1.0,
                        color,
                    ),
                );
                if candle.body_height() < 1.5 {
                    layered.push(
                        CanvasLayerKind::Series,
                        LinePrimitive::new(
                            candle.body_left,
                            candle.body_top,
                            candle.body_right,
                            candle.body_bottom,
                            1.0,
                            color,
                        ),
                    );
                } else {
                    layered.push(
                        CanvasLayerKind::Series,
                        RectPrimitive::new(
                            candle.body_left,
                            candle.body_top,
                            candle.body_right - candle.body_left,
                            candle.body_height(),
                            color,
                        ),
                    );
                }
            }
        }
        ChartType::Bars => {
            for bar in project_bars(ctx.visible, ctx.window.from, ctx.space, ctx.body_width())? {
                let color = candle_color(bar.is_bullish);
                for (x1, y1, x2, y2) in [
                    (bar.center_x, bar.high_y, bar.center_x, bar.low_y),
                    (bar.open_x, bar.open_y, bar.center_x, bar.open_y),
                    (bar.center_x, bar.close_y, bar.close_x, bar.close_y),
                ] {
                    layered.push(
                        CanvasLayerKind::Series,
                        LinePrimitive::new(x1, y1, x2, y2, 1.0, color),
                    );
                }
            }
        }
        ChartType::Line => {
            for segment in project_close_line(ctx.visible, ctx.window.from, ctx.space) {
                layered.push(
                    CanvasLayerKind::Series,
                    LinePrimitive::new(
                        segment.x1,
                        segment.y1,
                        segment.x2,
                        segment.y2,
                        style.line_series_width,
                        style.line_series_color,
                    ),
                );
            }
        }
    }
    Ok(())
}

fn append_volume(ctx: &FrameContext<'_>, layered: &mut LayeredRenderFrame) -> ChartResult<()> {
    let style = ctx.style;
    let scale_volume = max_volume(ctx.visible).max(1.0);
    let bars = project_volume_bars(
        ctx.visible,
        ctx.window.from,
        ctx.space,
        ctx.layout.volume_pane,
        ctx.body_width(),
        scale_volume,
    )?;
    for bar in bars {
        layered.push(
            CanvasLayerKind::Volume,
            RectPrimitive::new(
                bar.x_left,
                bar.y_top,
                bar.x_right - bar.x_left,
                bar.y_bottom - bar.y_top,
                style.volume_color,
            ),
        );
    }

    layered.push(
        CanvasLayerKind::Axis,
        TextPrimitive::new(
            format_volume_label(scale_volume),
            ctx.layout.plot.right() - 4.0,
            ctx.layout.volume_pane.bottom - 2.0,
            style.axis_label_font_size_px,
            style.axis_label_color,
            TextHAlign::Right,
        )
        .with_v_align(TextVAlign::Bottom),
    );
    Ok(())
}

fn append_axis_labels(ctx: &FrameContext<'_>, layered: &mut LayeredRenderFrame) {
    let style = ctx.style;
    let band = ctx.layout.price_band;
    let prices = ctx.space.prices;

    for step in 0..=style.grid_line_count {
        let fraction = ctx.grid_fraction(step);
        let label = format_price_label(prices.min + fraction * prices.span());
        if label.is_empty() {
            continue;
        }
        layered.push(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                label,
                ctx.layout.price_axis_left + 4.0,
                band.bottom - fraction * band.height(),
                style.axis_label_font_size_px,
                style.axis_label_color,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Middle),
        );
    }

    let time_config = ctx.state.time_axis_label_config();
    let last_offset = ctx.window.len().saturating_sub(1) as f64;
    let mut previous_index = None;
    for step in 0..=style.grid_line_count {
        let index =
            (ctx.window.from as f64 + ctx.grid_fraction(step) * last_offset).round() as usize;
        if previous_index == Some(index) || !ctx.window.contains(index) {
            continue;
        }
        previous_index = Some(index);
        let Some(candle) = ctx.candles.get(index) else {
            continue;
        };
        layered.push(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                format_time_axis_label(candle.time, time_config),
                ctx.space.candle_center_x(index),
                ctx.layout.time_axis_top + 4.0,
                style.axis_label_font_size_px,
                style.axis_label_color,
                TextHAlign::Center,
            ),
        );
    }
}
