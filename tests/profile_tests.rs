use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use volume_profile_chart::core::{
    Candle, PriceRange, ProfileDensity, ProfileSettings, compute_profile, price_envelope,
    resolve_bin_count,
};

fn candle(low: f64, high: f64, close: f64, volume: f64) -> Candle {
    let time = Utc
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("valid timestamp");
    Candle::new(time, close, high, low, close, volume).expect("valid candle")
}

fn three_bin_settings() -> ProfileSettings {
    ProfileSettings {
        target_bins: 3,
        min_bins: 1,
        max_bins: 200,
        value_area_percent: 0.7,
    }
}

#[test]
fn overlapping_candles_spread_volume_over_touched_bins() {
    // Equal closes leave no tick to detect, so the target bin count applies.
    let candles = [candle(10.0, 20.0, 18.0, 100.0), candle(15.0, 25.0, 18.0, 50.0)];
    let profile = compute_profile(&candles, PriceRange::new(10.0, 25.0), three_bin_settings());

    assert_eq!(profile.bins.len(), 3);
    for (index, bin) in profile.bins.iter().enumerate() {
        assert_relative_eq!(bin.price_low, 10.0 + 5.0 * index as f64, epsilon = 1e-9);
        assert_relative_eq!(bin.price_high - bin.price_low, 5.0, epsilon = 1e-9);
    }

    let volumes: Vec<f64> = profile.bins.iter().map(|bin| bin.volume).collect();
    assert_relative_eq!(volumes[0], 50.0, epsilon = 1e-9);
    assert_relative_eq!(volumes[1], 75.0, epsilon = 1e-9);
    assert_relative_eq!(volumes[2], 25.0, epsilon = 1e-9);
    assert_relative_eq!(volumes.iter().sum::<f64>(), 150.0, epsilon = 1e-9);
    assert_relative_eq!(profile.total_volume, 150.0, epsilon = 1e-9);
    assert_eq!(profile.poc_index, Some(1));
}

#[test]
fn value_area_grows_from_poc_towards_larger_neighbour() {
    let candles = [candle(10.0, 20.0, 18.0, 100.0), candle(15.0, 25.0, 18.0, 50.0)];
    let profile = compute_profile(&candles, PriceRange::new(10.0, 25.0), three_bin_settings());
    let value_area = profile.value_area.expect("value area");

    // 70% of 150 is 105: POC (75) plus the left bin (50) reaches it.
    assert_eq!((value_area.low_bin, value_area.high_bin), (0, 1));
    assert_relative_eq!(value_area.low, 10.0, epsilon = 1e-9);
    assert_relative_eq!(value_area.high, 20.0, epsilon = 1e-9);
    assert_relative_eq!(value_area.poc_price, 17.5, epsilon = 1e-9);
    assert_relative_eq!(value_area.volume, 125.0, epsilon = 1e-9);
}

#[test]
fn point_candle_lands_in_a_single_bin() {
    let candles = [candle(12.0, 12.0, 12.0, 40.0), candle(10.0, 20.0, 12.0, 10.0)];
    let profile = compute_profile(&candles, PriceRange::new(10.0, 20.0), ProfileSettings {
        target_bins: 10,
        min_bins: 1,
        max_bins: 10,
        value_area_percent: 0.7,
    });
    assert_eq!(profile.bins.len(), 10);
    assert_eq!(profile.poc_index, Some(2));
    assert_relative_eq!(profile.total_volume, 50.0, epsilon = 1e-9);
}

#[test]
fn density_presets_order_bin_counts() {
    let candles = [candle(0.0, 100.0, 50.0, 1.0)];
    let range = PriceRange::new(0.0, 100.0);
    let low = resolve_bin_count(&candles, range, ProfileDensity::Low.settings(0.7));
    let medium = resolve_bin_count(&candles, range, ProfileDensity::Medium.settings(0.7));
    let high = resolve_bin_count(&candles, range, ProfileDensity::High.settings(0.7));
    assert!(low < medium && medium < high);
}

fn arb_candles() -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec(
        (
            0.0f64..1_000.0,
            0.0f64..50.0,
            0.0f64..=1.0,
            0.0f64..10_000.0,
        ),
        1..80,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(low, span, close_factor, volume)| {
                let high = low + span;
                candle(low, high, low + close_factor * span, volume)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn profile_partitions_range_and_conserves_volume(candles in arb_candles()) {
        let Some(range) = price_envelope(&candles) else {
            return Ok(());
        };
        let profile = compute_profile(&candles, range, ProfileSettings::default());
        let expected_volume: f64 = candles.iter().map(|candle| candle.volume).sum();

        if expected_volume <= 0.0 {
            prop_assert!(profile.is_empty());
            return Ok(());
        }

        prop_assert!(!profile.bins.is_empty());
        prop_assert_eq!(profile.bins[0].price_low, range.min);
        prop_assert_eq!(profile.bins[profile.bins.len() - 1].price_high, range.max);
        for pair in profile.bins.windows(2) {
            prop_assert_eq!(pair[0].price_high, pair[1].price_low);
        }

        let binned: f64 = profile.bins.iter().map(|bin| bin.volume).sum();
        prop_assert!((binned - expected_volume).abs() <= expected_volume * 1e-9 + 1e-9);
        prop_assert!((profile.total_volume - expected_volume).abs() <= expected_volume * 1e-9 + 1e-9);
    }

    #[test]
    fn poc_is_lowest_index_maximum(candles in arb_candles()) {
        let Some(range) = price_envelope(&candles) else {
            return Ok(());
        };
        let profile = compute_profile(&candles, range, ProfileSettings::default());
        let Some(poc) = profile.poc_index else {
            return Ok(());
        };
        let poc_volume = profile.bins[poc].volume;
        for (index, bin) in profile.bins.iter().enumerate() {
            prop_assert!(bin.volume <= poc_volume);
            if index < poc {
                prop_assert!(bin.volume < poc_volume);
            }
        }
    }

    #[test]
    fn value_area_is_contiguous_around_poc_and_reaches_target(
        candles in arb_candles(),
        percent in 0.05f64..0.95
    ) {
        let Some(range) = price_envelope(&candles) else {
            return Ok(());
        };
        let settings = ProfileSettings::default();
        let settings = ProfileSettings { value_area_percent: percent, ..settings };
        let profile = compute_profile(&candles, range, settings);
        let (Some(poc), Some(value_area)) = (profile.poc_index, profile.value_area) else {
            return Ok(());
        };

        prop_assert!(value_area.low_bin <= poc && poc <= value_area.high_bin);
        prop_assert!(value_area.low <= value_area.poc_price);
        prop_assert!(value_area.poc_price <= value_area.high);

        let inside: f64 = profile.bins[value_area.low_bin..=value_area.high_bin]
            .iter()
            .map(|bin| bin.volume)
            .sum();
        prop_assert!((inside - value_area.volume).abs() <= inside * 1e-9 + 1e-9);
        let covers_everything = value_area.low_bin == 0 && value_area.high_bin == profile.bins.len() - 1;
        prop_assert!(
            covers_everything
                || value_area.volume >= profile.total_volume * percent * (1.0 - 1e-12)
        );
    }
}
