pub mod bar_series;
pub mod candlestick;
pub mod histogram_series;
pub mod line_series;
pub mod pinned;
pub mod primitives;
pub mod profile;
pub mod scale;
pub mod types;
pub mod viewport;
pub mod windowing;

pub use bar_series::{BarGeometry, project_bars};
pub use candlestick::{Candle, CandleGeometry, project_candles, sanitize_candles};
pub use histogram_series::{HistogramBar, project_volume_bars};
pub use line_series::{LineSegment, project_close_line};
pub use pinned::{PinnedRange, PinnedRangeId, PinnedRangeManager};
pub use profile::{
    ProfileBin, ProfileDensity, ProfileSettings, ValueArea, VolumeProfile, compute_profile,
    detect_tick_size, resolve_bin_count,
};
pub use scale::{CoordinateSpace, index_to_x, price_to_y, x_to_index, y_to_price};
pub use types::{PlotSpan, PriceBand, PriceRange, SurfaceSize};
pub use viewport::{
    ViewWindow, ViewportBehavior, ZoomDirection, initial_window, minimum_window_len, pan_window,
    zoom_window, zoom_window_by_factor,
};
pub use windowing::{
    candles_in_index_range, candles_in_window, last_n_candles, max_volume, price_envelope,
};
