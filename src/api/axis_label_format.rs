use chrono::{DateTime, FixedOffset, Offset, Utc};

use super::{TimeAxisLabelConfig, TimeAxisLabelPolicy};

pub(super) fn format_price_label(price: f64) -> String {
    if price.is_finite() {
        format!("{price:.2}")
    } else {
        String::new()
    }
}

pub(super) fn format_time_axis_label(time: DateTime<Utc>, config: TimeAxisLabelConfig) -> String {
    let local = to_label_timezone(time, config);
    match config.policy() {
        TimeAxisLabelPolicy::DayMonth => local.format("%d.%m").to_string(),
        TimeAxisLabelPolicy::MonthYear => local.format("%b %y").to_string(),
    }
}

pub(super) fn format_crosshair_time_label(
    time: DateTime<Utc>,
    config: TimeAxisLabelConfig,
) -> String {
    to_label_timezone(time, config)
        .format("%d.%m.%y %H:%M")
        .to_string()
}

/// Compact volume label: one decimal with `K`/`M` suffix above a thousand.
pub(super) fn format_volume_label(volume: f64) -> String {
    if !volume.is_finite() {
        return String::new();
    }
    if volume >= 1e6 {
        format!("{:.1}M", volume / 1e6)
    } else if volume >= 1e3 {
        format!("{:.1}K", volume / 1e3)
    } else {
        format!("{}", volume.round())
    }
}

fn to_label_timezone(time: DateTime<Utc>, config: TimeAxisLabelConfig) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(i32::from(config.timezone_offset_minutes) * 60)
        .unwrap_or_else(|| Utc.fix());
    time.with_timezone(&offset)
}
