use approx::assert_relative_eq;
use volume_profile_chart::core::{
    CoordinateSpace, PlotSpan, PriceBand, PriceRange, ViewWindow, index_to_x, price_to_y,
    x_to_index, y_to_price,
};

fn space() -> CoordinateSpace {
    CoordinateSpace::new(
        ViewWindow::new(0, 100),
        PlotSpan::new(0.0, 800.0),
        PriceRange::new(100.0, 200.0),
        PriceBand::new(10.0, 410.0),
    )
}

#[test]
fn index_maps_linearly_across_plot() {
    let window = ViewWindow::new(0, 100);
    let plot = PlotSpan::new(0.0, 800.0);
    assert_relative_eq!(index_to_x(0.0, window, plot), 0.0, epsilon = 1e-9);
    assert_relative_eq!(index_to_x(10.0, window, plot), 80.0, epsilon = 1e-9);
    assert_relative_eq!(index_to_x(100.0, window, plot), 800.0, epsilon = 1e-9);
}

#[test]
fn candle_centre_sits_in_middle_of_slot() {
    let space = space();
    assert_relative_eq!(space.slot_width(), 8.0, epsilon = 1e-9);
    assert_relative_eq!(space.candle_center_x(10), 84.0, epsilon = 1e-9);
    assert_eq!(space.x_to_index(84.0), 10);
}

#[test]
fn x_to_index_floors_and_honours_offset() {
    let window = ViewWindow::new(50, 150);
    let plot = PlotSpan::new(40.0, 800.0);
    assert_eq!(x_to_index(40.0, window, plot), 50);
    assert_eq!(x_to_index(47.9, window, plot), 50);
    assert_eq!(x_to_index(48.0, window, plot), 51);
    assert_eq!(x_to_index(0.0, window, plot), 45);
}

#[test]
fn higher_prices_map_to_smaller_y() {
    let range = PriceRange::new(100.0, 200.0);
    let band = PriceBand::new(10.0, 410.0);
    assert_relative_eq!(price_to_y(100.0, range, band), 410.0, epsilon = 1e-9);
    assert_relative_eq!(price_to_y(200.0, range, band), 10.0, epsilon = 1e-9);
    assert_relative_eq!(price_to_y(150.0, range, band), 210.0, epsilon = 1e-9);
    assert_relative_eq!(y_to_price(210.0, range, band), 150.0, epsilon = 1e-9);
}

#[test]
fn degenerate_price_range_falls_back_to_unit_range() {
    let band = PriceBand::new(0.0, 100.0);
    let flat = PriceRange::new(5.0, 5.0);
    let y = price_to_y(0.5, flat, band);
    assert!(y.is_finite());
    assert_relative_eq!(y, 50.0, epsilon = 1e-9);
}

#[test]
fn non_finite_pointer_resolves_to_window_start() {
    let window = ViewWindow::new(30, 60);
    let plot = PlotSpan::new(0.0, 300.0);
    assert_eq!(x_to_index(f64::NAN, window, plot), 30);
}
