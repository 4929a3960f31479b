use tracing::trace;

use crate::core::{
    Candle, ProfileBin, VolumeProfile, candles_in_index_range, compute_profile, last_n_candles,
    x_to_index,
};
use crate::render::{
    CanvasLayerKind, Color, LayeredRenderFrame, LinePrimitive, RectPrimitive, TextHAlign,
    TextPrimitive, TextVAlign,
};

use super::ProfileMode;
use super::render_frame_builder::FrameContext;

pub const NO_PROFILE_TEXT: &str = "No profile";

/// Candle index span `[from, to)` of the in-progress selection, if any.
pub(super) fn selection_index_span(ctx: &FrameContext<'_>) -> Option<(usize, usize)> {
    if !ctx.config.is_selection_mode() {
        return None;
    }
    let selection = ctx.state.interaction().selection()?;
    let max_index = ctx.candles.len() as i64;
    let to_index = |x: f64| x_to_index(x, ctx.window, ctx.layout.plot).clamp(0, max_index) as usize;
    let start = to_index(selection.start_x);
    let end = to_index(selection.end_x);
    Some((start.min(end), start.max(end)))
}

fn main_profile_candles<'a>(ctx: &FrameContext<'a>) -> &'a [Candle] {
    match ctx.config.profile_mode {
        ProfileMode::Visible => ctx.visible,
        ProfileMode::All => ctx.candles,
        ProfileMode::LastN => last_n_candles(ctx.candles, ctx.config.last_n),
        ProfileMode::Selection => match selection_index_span(ctx) {
            Some((from, to)) => candles_in_index_range(ctx.candles, from, to),
            None => &[],
        },
    }
}

/// Main profile, right-aligned in the profile column with POC/VAH/VAL levels.
pub(super) fn append_main_profile(ctx: &FrameContext<'_>, layered: &mut LayeredRenderFrame) {
    let style = ctx.style;
    let layout = ctx.layout;
    let subset = main_profile_candles(ctx);
    let profile = compute_profile(subset, ctx.space.prices, ctx.config.profile_settings);

    if profile.is_empty() {
        trace!(
            mode = ?ctx.config.profile_mode,
            subset_len = subset.len(),
            "main profile unavailable"
        );
        layered.push(
            CanvasLayerKind::Profile,
            TextPrimitive::new(
                NO_PROFILE_TEXT,
                layout.profile_right - layout.profile_width * 0.5,
                layout.price_band.top + layout.price_band.height() * 0.5,
                style.axis_label_font_size_px,
                style.placeholder_color,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle),
        );
        return;
    }

    let max_width = (layout.profile_width - style.profile_bar_inset_px).max(1.0);
    let bar_color = |index: usize| {
        if profile.poc_index == Some(index) {
            style.poc_color
        } else if profile
            .value_area
            .is_some_and(|value_area| value_area.contains_bin(index))
        {
            style.value_area_color
        } else {
            style.main_profile_color
        }
    };
    append_profile_bars(
        ctx,
        layered,
        CanvasLayerKind::Profile,
        &profile,
        layout.profile_right,
        max_width,
        bar_color,
    );

    let Some(value_area) = profile.value_area else {
        return;
    };
    for (label, price, color) in [
        ("VAH", value_area.high, style.value_area_color),
        ("VAL", value_area.low, style.value_area_color),
        ("POC", value_area.poc_price, style.poc_color),
    ] {
        let y = ctx.space.price_to_y(price);
        layered.push(
            CanvasLayerKind::Profile,
            LinePrimitive::new(layout.plot.offset_x, y, layout.profile_right, y, 1.0, color)
                .with_stroke_style(style.profile_level_line_style.clone()),
        );
        layered.push(
            CanvasLayerKind::Profile,
            TextPrimitive::new(
                label,
                layout.plot.right() - 4.0,
                y - 2.0,
                style.axis_label_font_size_px,
                color,
                TextHAlign::Right,
            )
            .with_v_align(TextVAlign::Bottom),
        );
    }
}

/// One independent profile per pinned range, in insertion order.
pub(super) fn append_pinned_profiles(ctx: &FrameContext<'_>, layered: &mut LayeredRenderFrame) {
    for (id, range) in ctx.state.pinned_ranges().iter() {
        if !append_range_profile(
            ctx,
            layered,
            CanvasLayerKind::PinnedProfiles,
            range.from_index,
            range.to_index,
        ) {
            trace!(id = id.raw(), ?range, "pinned range not drawn");
        }
    }
}

/// Provisional rectangle and profile of the in-progress selection.
pub(super) fn append_selection(ctx: &FrameContext<'_>, layered: &mut LayeredRenderFrame) {
    if let Some((from, to)) = selection_index_span(ctx) {
        append_range_profile(ctx, layered, CanvasLayerKind::Selection, from, to);
    }
}

/// Draws a dashed range rectangle with its own right-aligned profile.
///
/// Returns `false` when the range is off-screen or too narrow to draw.
fn append_range_profile(
    ctx: &FrameContext<'_>,
    layered: &mut LayeredRenderFrame,
    layer: CanvasLayerKind,
    from_index: usize,
    to_index: usize,
) -> bool {
    let style = ctx.style;
    let plot = ctx.layout.plot;
    if to_index <= from_index
        || to_index.min(ctx.window.to) <= from_index.max(ctx.window.from)
    {
        return false;
    }

    let left = ctx.space.index_to_x(from_index as f64).max(plot.offset_x);
    let right = ctx.space.index_to_x(to_index as f64).min(plot.right());
    let width = right - left;
    if width < ctx.state.pinned_range_behavior().min_width_px {
        return false;
    }

    layered.push(
        layer,
        RectPrimitive::new(
            left,
            0.0,
            width,
            ctx.layout.chart_pane_bottom,
            style.pinned_rect_fill_color,
        )
        .with_border(
            1.0,
            style.pinned_border_color,
            style.pinned_border_style.clone(),
        ),
    );

    let subset = candles_in_index_range(ctx.candles, from_index, to_index);
    let profile = compute_profile(subset, ctx.space.prices, ctx.config.profile_settings);
    if profile.is_empty() {
        return true;
    }
    let max_width = style.pinned_profile_max_width_px.min(width - 8.0);
    if max_width > 0.0 {
        append_profile_bars(ctx, layered, layer, &profile, right - 4.0, max_width, |_| {
            style.pinned_profile_color
        });
    }
    true
}

fn append_profile_bars(
    ctx: &FrameContext<'_>,
    layered: &mut LayeredRenderFrame,
    layer: CanvasLayerKind,
    profile: &VolumeProfile,
    x_right: f64,
    max_width: f64,
    color_for: impl Fn(usize) -> Color,
) {
    let max_volume = profile.max_bin_volume();
    if max_volume <= 0.0 {
        return;
    }
    for (index, bin) in profile.bins.iter().enumerate() {
        if bin.volume <= 0.0 {
            continue;
        }
        let bar_width = bin.volume / max_volume * max_width;
        let (top, height) = bin_vertical_extent(ctx, bin);
        layered.push(
            layer,
            RectPrimitive::new(x_right - bar_width, top, bar_width, height, color_for(index)),
        );
    }
}

fn bin_vertical_extent(ctx: &FrameContext<'_>, bin: &ProfileBin) -> (f64, f64) {
    let top = ctx.space.price_to_y(bin.price_high);
    let bottom = ctx.space.price_to_y(bin.price_low);
    (top, (bottom - top).max(1.0))
}
