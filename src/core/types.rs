use serde::{Deserialize, Serialize};

/// Drawing-surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Converts a logical (CSS-like) size into device pixels.
    ///
    /// Returns `None` when any input is non-finite or the resulting size is empty.
    #[must_use]
    pub fn from_logical(width: f64, height: f64, device_pixel_ratio: f64) -> Option<Self> {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        if !width.is_finite() || !height.is_finite() {
            return None;
        }
        let device_width = (width * ratio).round();
        let device_height = (height * ratio).round();
        if device_width < 1.0 || device_height < 1.0 {
            return None;
        }
        if device_width > f64::from(u32::MAX) || device_height > f64::from(u32::MAX) {
            return None;
        }
        Some(Self::new(device_width as u32, device_height as u32))
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

/// Horizontal extent of the candle plot in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSpan {
    pub offset_x: f64,
    pub width: f64,
}

impl PlotSpan {
    #[must_use]
    pub fn new(offset_x: f64, width: f64) -> Self {
        Self { offset_x, width }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.offset_x + self.width
    }
}

/// Vertical extent used for price mapping; `top` maps to the range maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub top: f64,
    pub bottom: f64,
}

impl PriceBand {
    #[must_use]
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}

/// Closed price interval shared by the price axis and every profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    /// Returns `self` when usable for mapping, otherwise the unit range `[0, 1]`.
    #[must_use]
    pub fn or_unit(self) -> Self {
        if self.is_valid() { self } else { Self::unit() }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}
