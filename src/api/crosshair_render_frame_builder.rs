use crate::render::{
    CanvasLayerKind, LayeredRenderFrame, LinePrimitive, LineStrokeStyle, RectPrimitive, TextHAlign,
    TextPrimitive, TextVAlign,
};

use super::axis_label_format::{format_crosshair_time_label, format_price_label};
use super::layout_helpers::{clamp_box_left, estimate_label_text_width_px};
use super::render_frame_builder::FrameContext;

/// Crosshair guide lines plus price and time label boxes.
///
/// Drawn only while the crosshair is active over a visible candle.
pub(super) fn append_crosshair(ctx: &FrameContext<'_>, layered: &mut LayeredRenderFrame) {
    let crosshair = ctx.state.interaction().crosshair();
    if !crosshair.active {
        return;
    }
    let Some(index) = crosshair.candle_index else {
        return;
    };
    if !ctx.window.contains(index) {
        return;
    }
    let Some(candle) = ctx.candles.get(index) else {
        return;
    };

    let style = ctx.style;
    let layout = ctx.layout;
    let x = ctx.space.candle_center_x(index);
    let price = ctx.space.y_to_price(crosshair.y);
    let y = ctx.space.price_to_y(price);

    layered.push(
        CanvasLayerKind::Crosshair,
        LinePrimitive::new(x, 0.0, x, layout.volume_pane.bottom, 1.0, style.crosshair_line_color)
            .with_stroke_style(style.crosshair_line_style.clone()),
    );
    layered.push(
        CanvasLayerKind::Crosshair,
        LinePrimitive::new(
            layout.plot.offset_x,
            y,
            layout.plot.right(),
            y,
            1.0,
            style.crosshair_line_color,
        )
        .with_stroke_style(style.crosshair_line_style.clone()),
    );

    let box_height = style.crosshair_label_box_height_px;
    let padding = style.crosshair_label_padding_x_px;
    let font_size = style.axis_label_font_size_px;

    let price_text = format_price_label(price);
    if !price_text.is_empty() {
        let box_width = estimate_label_text_width_px(&price_text, font_size) + 2.0 * padding;
        let box_left = layout.price_axis_left + 2.0;
        push_label_box(ctx, layered, box_left, y - box_height * 0.5, box_width);
        layered.push(
            CanvasLayerKind::Crosshair,
            TextPrimitive::new(
                price_text,
                box_left + padding,
                y,
                font_size,
                style.crosshair_label_text_color,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Middle),
        );
    }

    let time_text = format_crosshair_time_label(candle.time, ctx.state.time_axis_label_config());
    let box_width = estimate_label_text_width_px(&time_text, font_size) + 2.0 * padding;
    let box_left = clamp_box_left(
        x,
        box_width,
        layout.plot.offset_x + 2.0,
        layout.plot.right() - 2.0,
    );
    let box_top = layout.time_axis_top - box_height - 2.0;
    push_label_box(ctx, layered, box_left, box_top, box_width);
    layered.push(
        CanvasLayerKind::Crosshair,
        TextPrimitive::new(
            time_text,
            box_left + box_width * 0.5,
            box_top + box_height * 0.5,
            font_size,
            style.crosshair_label_text_color,
            TextHAlign::Center,
        )
        .with_v_align(TextVAlign::Middle),
    );
}

fn push_label_box(
    ctx: &FrameContext<'_>,
    layered: &mut LayeredRenderFrame,
    left: f64,
    top: f64,
    width: f64,
) {
    let style = ctx.style;
    layered.push(
        CanvasLayerKind::Crosshair,
        RectPrimitive::new(
            left,
            top,
            width,
            style.crosshair_label_box_height_px,
            style.crosshair_label_box_color,
        )
        .with_corner_radius(style.crosshair_label_corner_radius_px)
        .with_border(
            1.0,
            style.crosshair_label_border_color,
            LineStrokeStyle::Solid,
        ),
    );
}
