pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Keep this estimate deterministic and backend-independent.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Left edge of a box of `width` centred on `center_x`, kept inside `[min_x, max_x]`.
pub(super) fn clamp_box_left(center_x: f64, width: f64, min_x: f64, max_x: f64) -> f64 {
    let preferred = center_x - width * 0.5;
    let max_left = (max_x - width).max(min_x);
    preferred.clamp(min_x, max_left)
}

#[cfg(test)]
mod tests {
    use super::{clamp_box_left, estimate_label_text_width_px};

    #[test]
    fn text_width_is_at_least_font_size() {
        assert_eq!(estimate_label_text_width_px("", 11.0), 11.0);
        assert!(estimate_label_text_width_px("101.50", 11.0) > 30.0);
    }

    #[test]
    fn boxes_stay_inside_bounds() {
        assert_eq!(clamp_box_left(5.0, 40.0, 2.0, 300.0), 2.0);
        assert_eq!(clamp_box_left(295.0, 40.0, 2.0, 300.0), 260.0);
        assert_eq!(clamp_box_left(100.0, 40.0, 2.0, 300.0), 80.0);
    }
}
