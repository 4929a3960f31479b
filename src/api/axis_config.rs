use serde::{Deserialize, Serialize};

/// Candle interval at and above which time labels switch to month granularity.
pub const DAILY_INTERVAL_MINUTES: u32 = 1_440;

/// Granularity of time-axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeAxisLabelPolicy {
    /// `dd.mm`
    DayMonth,
    /// Abbreviated month and two-digit year.
    MonthYear,
}

/// Runtime formatter configuration for time labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeAxisLabelConfig {
    /// Candle interval in minutes; selects the axis label policy.
    pub interval_minutes: u32,
    /// Fixed offset applied to UTC candle times before formatting.
    pub timezone_offset_minutes: i16,
}

impl Default for TimeAxisLabelConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 60,
            timezone_offset_minutes: 0,
        }
    }
}

impl TimeAxisLabelConfig {
    #[must_use]
    pub fn policy(self) -> TimeAxisLabelPolicy {
        if self.interval_minutes >= DAILY_INTERVAL_MINUTES {
            TimeAxisLabelPolicy::MonthYear
        } else {
            TimeAxisLabelPolicy::DayMonth
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeAxisLabelConfig, TimeAxisLabelPolicy};

    #[test]
    fn daily_and_longer_intervals_label_months() {
        let hourly = TimeAxisLabelConfig::default();
        assert_eq!(hourly.policy(), TimeAxisLabelPolicy::DayMonth);
        let daily = TimeAxisLabelConfig {
            interval_minutes: 1_440,
            ..hourly
        };
        assert_eq!(daily.policy(), TimeAxisLabelPolicy::MonthYear);
    }
}
