//! Volume-by-price profile computation.
//!
//! A profile partitions a price range into contiguous bins and spreads each
//! candle's volume uniformly across every bin its clipped `[low, high]`
//! range touches. Only OHLC data is available, so uniform participation over
//! the traded range is used instead of assigning volume to a single price.

use std::collections::BTreeSet;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Candle, PriceRange};

pub const DEFAULT_TARGET_BINS: usize = 40;
pub const DEFAULT_MIN_BINS: usize = 20;
pub const DEFAULT_MAX_BINS: usize = 200;
pub const DEFAULT_VALUE_AREA_PERCENT: f64 = 0.7;

/// Binning and value-area controls supplied by the host each render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    /// Bin count used when no natural tick size can be detected.
    pub target_bins: usize,
    pub min_bins: usize,
    pub max_bins: usize,
    /// Fraction of total volume the value area must contain, in `(0, 1)`.
    pub value_area_percent: f64,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        ProfileDensity::Medium.settings(DEFAULT_VALUE_AREA_PERCENT)
    }
}

impl ProfileSettings {
    #[must_use]
    pub fn is_valid(self) -> bool {
        self == self.sanitized()
    }

    /// Replaces unusable values with the documented defaults.
    ///
    /// Zero bin counts fall back per field, an inverted `min_bins`/`max_bins`
    /// pair is swapped and a value-area percent outside `(0, 1)` becomes `0.7`.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let target_bins = if self.target_bins == 0 {
            DEFAULT_TARGET_BINS
        } else {
            self.target_bins
        };
        let min_bins = if self.min_bins == 0 {
            DEFAULT_MIN_BINS
        } else {
            self.min_bins
        };
        let max_bins = if self.max_bins == 0 {
            DEFAULT_MAX_BINS
        } else {
            self.max_bins
        };
        let (min_bins, max_bins) = if min_bins > max_bins {
            (max_bins, min_bins)
        } else {
            (min_bins, max_bins)
        };
        let value_area_percent = if self.value_area_percent.is_finite()
            && self.value_area_percent > 0.0
            && self.value_area_percent < 1.0
        {
            self.value_area_percent
        } else {
            DEFAULT_VALUE_AREA_PERCENT
        };

        Self {
            target_bins,
            min_bins,
            max_bins,
            value_area_percent,
        }
    }
}

/// Bin-density presets offered by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProfileDensity {
    Low,
    #[default]
    Medium,
    High,
}

impl ProfileDensity {
    #[must_use]
    pub fn settings(self, value_area_percent: f64) -> ProfileSettings {
        let (target_bins, min_bins, max_bins) = match self {
            Self::Low => (25, 10, 120),
            Self::Medium => (DEFAULT_TARGET_BINS, DEFAULT_MIN_BINS, DEFAULT_MAX_BINS),
            Self::High => (80, 40, 300),
        };
        ProfileSettings {
            target_bins,
            min_bins,
            max_bins,
            value_area_percent,
        }
        .sanitized()
    }
}

/// One price bucket of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileBin {
    pub price_low: f64,
    pub price_high: f64,
    pub volume: f64,
}

impl ProfileBin {
    #[must_use]
    pub fn mid_price(&self) -> f64 {
        (self.price_low + self.price_high) * 0.5
    }
}

/// Contiguous price band around the POC holding the target volume share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueArea {
    pub low: f64,
    pub high: f64,
    pub poc_price: f64,
    /// Leftmost bin index included in the value area.
    pub low_bin: usize,
    /// Rightmost bin index included in the value area.
    pub high_bin: usize,
    pub volume: f64,
}

impl ValueArea {
    #[must_use]
    pub fn contains_bin(&self, index: usize) -> bool {
        index >= self.low_bin && index <= self.high_bin
    }
}

/// Result of [`compute_profile`]; empty when the input is degenerate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeProfile {
    pub bins: Vec<ProfileBin>,
    pub poc_index: Option<usize>,
    pub value_area: Option<ValueArea>,
    pub total_volume: f64,
}

impl VolumeProfile {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    #[must_use]
    pub fn poc_bin(&self) -> Option<&ProfileBin> {
        self.poc_index.and_then(|index| self.bins.get(index))
    }

    #[must_use]
    pub fn max_bin_volume(&self) -> f64 {
        self.poc_bin().map_or(0.0, |bin| bin.volume)
    }
}

/// Smallest positive difference between distinct finite close prices.
#[must_use]
pub fn detect_tick_size(candles: &[Candle]) -> Option<f64> {
    let closes: BTreeSet<OrderedFloat<f64>> = candles
        .iter()
        .map(|candle| candle.close)
        .filter(|close| close.is_finite())
        .map(OrderedFloat)
        .collect();

    closes
        .iter()
        .zip(closes.iter().skip(1))
        .map(|(lower, upper)| upper.0 - lower.0)
        .filter(|diff| diff.is_finite() && *diff > 0.0)
        .min_by_key(|diff| OrderedFloat(*diff))
}

/// Number of bins for a subset: `round(span / tick)` when a tick is detected,
/// otherwise `target_bins`, clamped to `[min_bins, max_bins]`.
#[must_use]
pub fn resolve_bin_count(candles: &[Candle], range: PriceRange, settings: ProfileSettings) -> usize {
    let settings = settings.sanitized();
    let raw = detect_tick_size(candles)
        .map(|tick| (range.span() / tick).round())
        .filter(|count| count.is_finite() && *count >= 1.0)
        .map_or(settings.target_bins, |count| count.min(usize::MAX as f64) as usize);
    raw.clamp(settings.min_bins, settings.max_bins)
}

/// Computes the volume profile of `candles` over `range`.
///
/// Never fails: an empty subset, an invalid range or a non-positive total
/// volume yield [`VolumeProfile::empty`].
#[must_use]
pub fn compute_profile(
    candles: &[Candle],
    range: PriceRange,
    settings: ProfileSettings,
) -> VolumeProfile {
    if candles.is_empty() || !range.is_valid() {
        return VolumeProfile::empty();
    }

    let settings = settings.sanitized();
    let bin_count = resolve_bin_count(candles, range, settings);
    let mut bins = build_bins(range, bin_count);
    distribute_volume(&mut bins, candles, range);

    let total_volume: f64 = bins.iter().map(|bin| bin.volume).sum();
    if !total_volume.is_finite() || total_volume <= 0.0 {
        return VolumeProfile::empty();
    }

    let poc_index = find_poc(&bins);
    let value_area = expand_value_area(&bins, poc_index, total_volume * settings.value_area_percent);

    VolumeProfile {
        bins,
        poc_index: Some(poc_index),
        value_area: Some(value_area),
        total_volume,
    }
}

fn build_bins(range: PriceRange, bin_count: usize) -> Vec<ProfileBin> {
    let step = range.span() / bin_count as f64;
    let edge = |index: usize| {
        if index == bin_count {
            range.max
        } else {
            range.min + index as f64 * step
        }
    };
    (0..bin_count)
        .map(|index| ProfileBin {
            price_low: edge(index),
            price_high: edge(index + 1),
            volume: 0.0,
        })
        .collect()
}

fn distribute_volume(bins: &mut [ProfileBin], candles: &[Candle], range: PriceRange) {
    let bin_count = bins.len();
    let last = bin_count - 1;
    let scale = bin_count as f64 / range.span();

    for candle in candles {
        // Validate before clipping: `f64::max`/`min` swallow a NaN operand.
        if !candle.is_valid() || candle.volume <= 0.0 {
            continue;
        }
        let low = candle.low.max(range.min);
        let high = candle.high.min(range.max);
        if high < low {
            continue;
        }

        let start = (((low - range.min) * scale).floor().max(0.0) as usize).min(last);
        // A high sitting exactly on a bin edge does not reach into the next bin.
        let end = ((((high - range.min) * scale).ceil() - 1.0).max(0.0) as usize)
            .min(last)
            .max(start);
        let per_bin = candle.volume / (end - start + 1) as f64;
        for bin in &mut bins[start..=end] {
            bin.volume += per_bin;
        }
    }
}

fn find_poc(bins: &[ProfileBin]) -> usize {
    let mut poc = 0;
    for (index, bin) in bins.iter().enumerate().skip(1) {
        if bin.volume > bins[poc].volume {
            poc = index;
        }
    }
    poc
}

fn expand_value_area(bins: &[ProfileBin], poc_index: usize, target_volume: f64) -> ValueArea {
    let mut left = poc_index;
    let mut right = poc_index;
    let mut accumulated = bins[poc_index].volume;

    while accumulated < target_volume {
        let left_volume = left.checked_sub(1).map(|index| bins[index].volume);
        let right_volume = bins.get(right + 1).map(|bin| bin.volume);
        match (left_volume, right_volume) {
            (None, None) => break,
            (Some(left_vol), Some(right_vol)) if left_vol > right_vol => {
                left -= 1;
                accumulated += left_vol;
            }
            (Some(left_vol), None) => {
                left -= 1;
                accumulated += left_vol;
            }
            (_, Some(right_vol)) => {
                right += 1;
                accumulated += right_vol;
            }
        }
    }

    ValueArea {
        low: bins[left].price_low,
        high: bins[right].price_high,
        poc_price: bins[poc_index].mid_price(),
        low_bin: left,
        high_bin: right,
        volume: accumulated,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ProfileBin, ProfileDensity, ProfileSettings, compute_profile, detect_tick_size,
        expand_value_area, find_poc,
    };
    use crate::core::{Candle, PriceRange};
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn candle(low: f64, high: f64, close: f64, volume: f64) -> Candle {
        let time = Utc.timestamp_opt(1_700_000_000, 0).single().expect("time");
        Candle::new(time, close, high, low, close, volume).expect("valid candle")
    }

    fn bins_with(volumes: &[f64]) -> Vec<ProfileBin> {
        volumes
            .iter()
            .enumerate()
            .map(|(index, volume)| ProfileBin {
                price_low: index as f64,
                price_high: index as f64 + 1.0,
                volume: *volume,
            })
            .collect()
    }

    #[test]
    fn tick_size_is_smallest_distinct_close_gap() {
        let candles = [
            candle(9.0, 11.0, 10.0, 1.0),
            candle(9.0, 11.0, 10.5, 1.0),
            candle(9.0, 11.0, 10.5, 1.0),
            candle(9.0, 11.0, 10.75, 1.0),
        ];
        assert_eq!(detect_tick_size(&candles), Some(0.25));
        assert_eq!(detect_tick_size(&candles[..1]), None);
    }

    #[test]
    fn detected_tick_drives_bin_count() {
        let candles = [candle(10.0, 20.0, 15.0, 10.0), candle(10.0, 20.0, 15.5, 10.0)];
        let settings = ProfileSettings {
            target_bins: 5,
            min_bins: 1,
            max_bins: 100,
            value_area_percent: 0.7,
        };
        let profile = compute_profile(&candles, PriceRange::new(10.0, 20.0), settings);
        assert_eq!(profile.bins.len(), 20);
    }

    #[test]
    fn bin_count_is_clamped_to_settings() {
        let candles = [candle(10.0, 20.0, 15.0, 10.0), candle(10.0, 20.0, 15.001, 10.0)];
        let profile = compute_profile(
            &candles,
            PriceRange::new(10.0, 20.0),
            ProfileSettings::default(),
        );
        assert_eq!(profile.bins.len(), 200);
    }

    #[test]
    fn poc_ties_resolve_to_lowest_index() {
        assert_eq!(find_poc(&bins_with(&[1.0, 5.0, 2.0, 5.0])), 1);
    }

    #[test]
    fn value_area_prefers_larger_neighbour_then_right_on_ties() {
        let bins = bins_with(&[3.0, 1.0, 10.0, 1.0, 3.0]);
        let area = expand_value_area(&bins, 2, 10.5);
        assert_eq!((area.low_bin, area.high_bin), (2, 3));

        let bins = bins_with(&[1.0, 4.0, 10.0, 2.0, 1.0]);
        let area = expand_value_area(&bins, 2, 13.0);
        assert_eq!((area.low_bin, area.high_bin), (1, 2));
        assert_relative_eq!(area.volume, 14.0);
    }

    #[test]
    fn value_area_stops_when_neighbours_are_exhausted() {
        let bins = bins_with(&[1.0, 2.0]);
        let area = expand_value_area(&bins, 1, 10.0);
        assert_eq!((area.low_bin, area.high_bin), (0, 1));
        assert_eq!(area.low, 0.0);
        assert_eq!(area.high, 2.0);
    }

    #[test]
    fn candles_outside_the_range_are_skipped() {
        let candles = [candle(1.0, 2.0, 1.5, 50.0), candle(10.0, 12.0, 11.0, 30.0)];
        let settings = ProfileDensity::Low.settings(0.7);
        let profile = compute_profile(&candles, PriceRange::new(10.0, 12.0), settings);
        assert_relative_eq!(profile.total_volume, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn non_finite_candles_are_skipped_before_clipping() {
        let good = candle(10.0, 20.0, 15.0, 10.0);
        let nan_low = Candle {
            low: f64::NAN,
            volume: 90.0,
            ..good
        };
        let infinite_high = Candle {
            high: f64::INFINITY,
            volume: 40.0,
            ..good
        };
        let settings = ProfileDensity::Low.settings(0.7);
        let profile = compute_profile(
            &[good, nan_low, infinite_high],
            PriceRange::new(10.0, 20.0),
            settings,
        );
        assert_relative_eq!(profile.total_volume, 10.0, epsilon = 1e-9);

        let only_broken = compute_profile(&[nan_low], PriceRange::new(10.0, 20.0), settings);
        assert!(only_broken.is_empty());
    }

    #[test]
    fn degenerate_inputs_return_empty_profile() {
        let settings = ProfileSettings::default();
        assert!(compute_profile(&[], PriceRange::new(0.0, 1.0), settings).is_empty());
        let candles = [candle(1.0, 2.0, 1.5, 5.0)];
        assert!(compute_profile(&candles, PriceRange::new(2.0, 2.0), settings).is_empty());
        let zero_volume = [candle(1.0, 2.0, 1.5, 0.0)];
        let profile = compute_profile(&zero_volume, PriceRange::new(1.0, 2.0), settings);
        assert!(profile.is_empty());
        assert_eq!(profile.poc_index, None);
        assert_eq!(profile.value_area, None);
    }

    #[test]
    fn invalid_settings_fall_back_to_defaults() {
        let settings = ProfileSettings {
            target_bins: 0,
            min_bins: 300,
            max_bins: 10,
            value_area_percent: f64::NAN,
        }
        .sanitized();
        assert_eq!(settings.target_bins, 40);
        assert_eq!((settings.min_bins, settings.max_bins), (10, 300));
        assert_eq!(settings.value_area_percent, 0.7);
    }
}
