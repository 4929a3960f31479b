use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels and a normalized alpha.
    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba8(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Stroke pattern shared by lines and rectangle borders.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    /// Alternating on/off segment lengths in pixels.
    Dashed(SmallVec<[f64; 4]>),
}

impl LineStrokeStyle {
    #[must_use]
    pub fn dashed(on: f64, off: f64) -> Self {
        Self::Dashed(SmallVec::from_slice(&[on, off]))
    }

    #[must_use]
    pub fn dash_pattern(&self) -> &[f64] {
        match self {
            Self::Solid => &[],
            Self::Dashed(pattern) => pattern,
        }
    }

    fn validate(&self) -> ChartResult<()> {
        let pattern = self.dash_pattern();
        if pattern
            .iter()
            .any(|segment| !segment.is_finite() || *segment < 0.0)
        {
            return Err(ChartError::InvalidData(
                "dash segments must be finite and >= 0".to_owned(),
            ));
        }
        if matches!(self, Self::Dashed(_)) && pattern.iter().all(|segment| *segment == 0.0) {
            return Err(ChartError::InvalidData(
                "dash pattern must contain a visible segment".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.stroke_style.validate()?;
        self.color.validate()
    }
}

/// Draw command for one filled (optionally bordered) rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub border_style: LineStrokeStyle,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_color: fill_color,
            border_width: 0.0,
            border_style: LineStrokeStyle::Solid,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub fn with_border(mut self, width: f64, color: Color, style: LineStrokeStyle) -> Self {
        self.border_width = width;
        self.border_color = color;
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.border_style.validate()?;
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            v_align: TextVAlign::Top,
        }
    }

    #[must_use]
    pub fn with_v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, LinePrimitive, LineStrokeStyle, RectPrimitive};

    #[test]
    fn rgb8_channels_are_normalized() {
        let color = Color::from_rgb8(255, 0, 51);
        assert_eq!(color.red, 1.0);
        assert_eq!(color.green, 0.0);
        assert!((color.blue - 0.2).abs() < 1e-12);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn dashed_line_rejects_invisible_pattern() {
        let line = LinePrimitive::new(0.0, 0.0, 10.0, 0.0, 1.0, Color::rgb(0.5, 0.5, 0.5))
            .with_stroke_style(LineStrokeStyle::dashed(0.0, 0.0));
        assert!(line.validate().is_err());
    }

    #[test]
    fn rect_rejects_negative_size() {
        let rect = RectPrimitive::new(0.0, 0.0, -1.0, 4.0, Color::rgb(0.1, 0.1, 0.1));
        assert!(rect.validate().is_err());
    }
}
