use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle};

/// Style contract for the current render frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub background_color: Color,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    /// Number of intervals in each grid direction.
    pub grid_line_count: usize,
    pub axis_label_color: Color,
    pub axis_label_font_size_px: f64,
    pub placeholder_color: Color,

    pub candle_up_color: Color,
    pub candle_down_color: Color,
    pub candle_body_ratio: f64,
    pub candle_min_body_width_px: f64,
    pub line_series_color: Color,
    pub line_series_width: f64,
    pub volume_color: Color,

    pub main_profile_color: Color,
    pub value_area_color: Color,
    pub poc_color: Color,
    pub profile_level_line_style: LineStrokeStyle,
    pub profile_bar_inset_px: f64,
    pub pinned_rect_fill_color: Color,
    pub pinned_border_color: Color,
    pub pinned_border_style: LineStrokeStyle,
    pub pinned_profile_color: Color,
    pub pinned_profile_max_width_px: f64,

    pub crosshair_line_color: Color,
    pub crosshair_line_style: LineStrokeStyle,
    pub crosshair_label_box_color: Color,
    pub crosshair_label_border_color: Color,
    pub crosshair_label_text_color: Color,
    pub crosshair_label_box_height_px: f64,
    pub crosshair_label_padding_x_px: f64,
    pub crosshair_label_corner_radius_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgb8(0x0b, 0x11, 0x20),
            grid_line_color: Color::from_rgb8(0x1e, 0x29, 0x3b),
            grid_line_width: 1.0,
            grid_line_count: 8,
            axis_label_color: Color::from_rgb8(0x94, 0xa3, 0xb8),
            axis_label_font_size_px: 11.0,
            placeholder_color: Color::from_rgb8(0x64, 0x74, 0x8b),

            candle_up_color: Color::from_rgb8(0x22, 0xc5, 0x5e),
            candle_down_color: Color::from_rgb8(0xef, 0x44, 0x44),
            candle_body_ratio: 0.7,
            candle_min_body_width_px: 2.0,
            line_series_color: Color::from_rgb8(0x38, 0xbd, 0xf8),
            line_series_width: 1.4,
            volume_color: Color::from_rgb8(0x60, 0xa5, 0xfa),

            main_profile_color: Color::from_rgba8(96, 165, 250, 0.35),
            value_area_color: Color::from_rgba8(100, 149, 237, 0.6),
            poc_color: Color::from_rgba8(255, 140, 0, 0.9),
            profile_level_line_style: LineStrokeStyle::dashed(6.0, 3.0),
            profile_bar_inset_px: 8.0,
            pinned_rect_fill_color: Color::from_rgba8(216, 180, 254, 0.25),
            pinned_border_color: Color::from_rgba8(168, 85, 247, 0.8),
            pinned_border_style: LineStrokeStyle::dashed(6.0, 4.0),
            pinned_profile_color: Color::from_rgba8(232, 121, 249, 0.85),
            pinned_profile_max_width_px: 100.0,

            crosshair_line_color: Color::from_rgba8(148, 163, 184, 0.9),
            crosshair_line_style: LineStrokeStyle::dashed(4.0, 4.0),
            crosshair_label_box_color: Color::from_rgb8(0x02, 0x06, 0x17),
            crosshair_label_border_color: Color::from_rgb8(0x64, 0x74, 0x8b),
            crosshair_label_text_color: Color::from_rgb8(0xe5, 0xe7, 0xeb),
            crosshair_label_box_height_px: 16.0,
            crosshair_label_padding_x_px: 4.0,
            crosshair_label_corner_radius_px: 2.0,
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background_color,
            self.grid_line_color,
            self.axis_label_color,
            self.placeholder_color,
            self.candle_up_color,
            self.candle_down_color,
            self.line_series_color,
            self.volume_color,
            self.main_profile_color,
            self.value_area_color,
            self.poc_color,
            self.pinned_rect_fill_color,
            self.pinned_border_color,
            self.pinned_profile_color,
            self.crosshair_line_color,
            self.crosshair_label_box_color,
            self.crosshair_label_border_color,
            self.crosshair_label_text_color,
        ] {
            color.validate()?;
        }

        for (name, value) in [
            ("grid_line_width", self.grid_line_width),
            ("axis_label_font_size_px", self.axis_label_font_size_px),
            ("candle_body_ratio", self.candle_body_ratio),
            ("candle_min_body_width_px", self.candle_min_body_width_px),
            ("line_series_width", self.line_series_width),
            ("pinned_profile_max_width_px", self.pinned_profile_max_width_px),
            ("crosshair_label_box_height_px", self.crosshair_label_box_height_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "render style `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("profile_bar_inset_px", self.profile_bar_inset_px),
            ("crosshair_label_padding_x_px", self.crosshair_label_padding_x_px),
            (
                "crosshair_label_corner_radius_px",
                self.crosshair_label_corner_radius_px,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "render style `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.grid_line_count == 0 {
            return Err(ChartError::InvalidConfig(
                "render style `grid_line_count` must be > 0".to_owned(),
            ));
        }
        Ok(())
    }
}
