use tracing::warn;

use crate::core::{SurfaceSize, ViewportBehavior};
use crate::error::{ChartError, ChartResult};

use super::{ChartConfig, LayoutMetrics, PinnedRangeBehavior, TimeAxisLabelConfig};

const MAX_TIMEZONE_OFFSET_MINUTES: i16 = 14 * 60;

pub(super) fn validate_surface(surface: SurfaceSize) -> ChartResult<SurfaceSize> {
    if !surface.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: surface.width,
            height: surface.height,
        });
    }
    Ok(surface)
}

pub(super) fn sanitize_viewport_behavior(behavior: ViewportBehavior) -> ViewportBehavior {
    if behavior.is_valid() {
        return behavior;
    }
    warn!(?behavior, "invalid viewport behavior, falling back to defaults");
    ViewportBehavior::default()
}

pub(super) fn sanitize_pinned_range_behavior(behavior: PinnedRangeBehavior) -> PinnedRangeBehavior {
    if behavior.is_valid() {
        return behavior;
    }
    warn!(?behavior, "invalid pinned range behavior, falling back to defaults");
    PinnedRangeBehavior::default()
}

pub(super) fn sanitize_time_axis_label_config(config: TimeAxisLabelConfig) -> TimeAxisLabelConfig {
    let defaults = TimeAxisLabelConfig::default();
    let mut sanitized = config;
    if config.interval_minutes == 0 {
        warn!("time-axis interval must be > 0 minutes, using default");
        sanitized.interval_minutes = defaults.interval_minutes;
    }
    if !(-MAX_TIMEZONE_OFFSET_MINUTES..=MAX_TIMEZONE_OFFSET_MINUTES)
        .contains(&config.timezone_offset_minutes)
    {
        warn!(
            offset_minutes = config.timezone_offset_minutes,
            "time-axis timezone offset must be between -840 and 840 minutes, using UTC"
        );
        sanitized.timezone_offset_minutes = defaults.timezone_offset_minutes;
    }
    sanitized
}

pub(super) fn sanitize_layout_metrics(metrics: LayoutMetrics) -> LayoutMetrics {
    if metrics.is_valid() {
        return metrics;
    }
    warn!(?metrics, "invalid layout metrics, falling back to defaults");
    LayoutMetrics::default()
}

/// Per-cycle config with unusable values replaced by defaults.
pub(super) fn sanitize_chart_config(config: ChartConfig) -> ChartConfig {
    let profile_settings = config.profile_settings.sanitized();
    if profile_settings != config.profile_settings {
        warn!(
            requested = ?config.profile_settings,
            resolved = ?profile_settings,
            "profile settings out of range, substituted defaults"
        );
    }
    ChartConfig {
        profile_settings,
        last_n: config.last_n.max(1),
        ..config
    }
}

#[cfg(test)]
mod tests {
    use super::{
        sanitize_chart_config, sanitize_pinned_range_behavior, sanitize_time_axis_label_config,
        sanitize_viewport_behavior, validate_surface,
    };
    use crate::api::{ChartConfig, PinnedRangeBehavior, TimeAxisLabelConfig};
    use crate::core::{ProfileSettings, SurfaceSize, ViewportBehavior};

    #[test]
    fn zero_surface_is_rejected() {
        assert!(validate_surface(SurfaceSize::new(0, 300)).is_err());
        assert!(validate_surface(SurfaceSize::new(800, 600)).is_ok());
    }

    #[test]
    fn invalid_behaviors_fall_back_to_defaults() {
        let viewport = ViewportBehavior {
            zoom_in_factor: 1.5,
            ..ViewportBehavior::default()
        };
        assert_eq!(
            sanitize_viewport_behavior(viewport),
            ViewportBehavior::default()
        );

        let pinned = PinnedRangeBehavior {
            min_span: 0,
            min_width_px: 20.0,
        };
        assert_eq!(
            sanitize_pinned_range_behavior(pinned),
            PinnedRangeBehavior::default()
        );
    }

    #[test]
    fn timezone_offset_out_of_range_resets_to_utc() {
        let config = TimeAxisLabelConfig {
            interval_minutes: 15,
            timezone_offset_minutes: 2_000,
        };
        let sanitized = sanitize_time_axis_label_config(config);
        assert_eq!(sanitized.interval_minutes, 15);
        assert_eq!(sanitized.timezone_offset_minutes, 0);
    }

    #[test]
    fn chart_config_settings_are_sanitized() {
        let config = ChartConfig::default()
            .with_last_n(0)
            .with_profile_settings(ProfileSettings {
                target_bins: 0,
                min_bins: 50,
                max_bins: 10,
                value_area_percent: f64::NAN,
            });
        let sanitized = sanitize_chart_config(config);
        assert_eq!(sanitized.last_n, 1);
        assert_eq!(sanitized.profile_settings.target_bins, 40);
        assert_eq!(sanitized.profile_settings.min_bins, 10);
        assert_eq!(sanitized.profile_settings.max_bins, 50);
        assert_eq!(sanitized.profile_settings.value_area_percent, 0.7);
    }
}
