use volume_profile_chart::api::{ChartConfig, ChartEngineConfig, ChartState, ProfileMode};
use volume_profile_chart::core::{SurfaceSize, ViewWindow};
use volume_profile_chart::interaction::{ChartEvent, InteractionMode, PointerButton};

// 1000x500 surface: plot spans x in [0, 806).
fn state_with_candles(count: usize) -> ChartState {
    let mut state =
        ChartState::new(ChartEngineConfig::new(SurfaceSize::new(1000, 500))).expect("state");
    state.on_candles_replaced(count);
    state
}

fn selection_config() -> ChartConfig {
    ChartConfig::default().with_profile_mode(ProfileMode::Selection)
}

fn down(button: PointerButton, x: f64) -> ChartEvent {
    ChartEvent::PointerDown { button, x, y: 120.0 }
}

fn up(button: PointerButton, x: f64) -> ChartEvent {
    ChartEvent::PointerUp { button, x, y: 120.0 }
}

#[test]
fn secondary_click_inside_pinned_range_removes_it() {
    let config = selection_config();
    let mut state = state_with_candles(200);
    state.add_pinned_range(20, 80).expect("pinned range");

    // x = 200 resolves to candle 49.
    assert!(state.handle_event(down(PointerButton::Secondary, 200.0), &config));
    assert!(state.pinned_ranges().is_empty());
    assert_eq!(state.interaction().mode(), InteractionMode::Idle);
    assert!(state.interaction().selection().is_none());

    assert!(!state.handle_event(up(PointerButton::Secondary, 200.0), &config));
    assert!(state.pinned_ranges().is_empty());
}

#[test]
fn secondary_click_outside_pinned_ranges_starts_selection() {
    let config = selection_config();
    let mut state = state_with_candles(200);
    state.add_pinned_range(20, 80).expect("pinned range");

    assert!(state.handle_event(down(PointerButton::Secondary, 500.0), &config));
    assert_eq!(state.interaction().mode(), InteractionMode::Selecting);
    assert_eq!(state.pinned_ranges().len(), 1);
}

#[test]
fn short_selection_is_discarded() {
    let config = selection_config();
    let mut state = state_with_candles(200);
    state.handle_event(down(PointerButton::Secondary, 100.0), &config);
    state.handle_event(up(PointerButton::Secondary, 102.0), &config);
    assert!(state.pinned_ranges().is_empty());
    assert_eq!(state.interaction().mode(), InteractionMode::Idle);
}

#[test]
fn leftward_selection_commits_normalized_range() {
    let config = selection_config();
    let mut state = state_with_candles(200);
    state.handle_event(down(PointerButton::Secondary, 300.0), &config);
    state.handle_event(ChartEvent::PointerMove { x: 100.0, y: 80.0 }, &config);
    state.handle_event(up(PointerButton::Secondary, 100.0), &config);

    let (_, range) = state.pinned_ranges().iter().next().expect("pinned range");
    assert_eq!((range.from_index, range.to_index), (24, 74));
}

#[test]
fn selection_dragged_past_plot_is_clamped_to_sequence() {
    let config = selection_config();
    let mut state = state_with_candles(200);
    state.handle_event(down(PointerButton::Secondary, 700.0), &config);
    state.handle_event(up(PointerButton::Secondary, 990.0), &config);

    let (_, range) = state.pinned_ranges().iter().next().expect("pinned range");
    assert_eq!(range.to_index, 200);
}

#[test]
fn selection_is_not_committed_after_leaving_selection_mode() {
    let mut state = state_with_candles(200);
    state.handle_event(down(PointerButton::Secondary, 100.0), &selection_config());
    state.handle_event(up(PointerButton::Secondary, 300.0), &ChartConfig::default());
    assert!(state.pinned_ranges().is_empty());
    assert_eq!(state.interaction().mode(), InteractionMode::Idle);
}

#[test]
fn second_button_during_pan_is_ignored() {
    let config = selection_config();
    let mut state = state_with_candles(1_000);
    state.handle_event(down(PointerButton::Primary, 400.0), &config);
    assert!(!state.handle_event(down(PointerButton::Secondary, 400.0), &config));
    assert!(!state.handle_event(down(PointerButton::Crosshair, 400.0), &config));
    assert_eq!(state.interaction().mode(), InteractionMode::Panning);
}

#[test]
fn mismatched_button_release_keeps_gesture() {
    let config = ChartConfig::default();
    let mut state = state_with_candles(1_000);
    state.handle_event(down(PointerButton::Primary, 400.0), &config);
    assert!(!state.handle_event(up(PointerButton::Crosshair, 400.0), &config));
    assert_eq!(state.interaction().mode(), InteractionMode::Panning);
}

#[test]
fn pan_past_the_start_clamps_at_zero() {
    let config = ChartConfig::default();
    let mut state = state_with_candles(300);
    assert_eq!(state.window(), Some(ViewWindow::new(100, 300)));

    state.handle_event(down(PointerButton::Primary, 0.0), &config);
    state.handle_event(ChartEvent::PointerMove { x: 806.0, y: 0.0 }, &config);
    assert_eq!(state.window(), Some(ViewWindow::new(0, 200)));
}

#[test]
fn wheel_zoom_during_pan_survives_next_move() {
    let config = ChartConfig::default();
    let mut state = state_with_candles(1_000);
    state.handle_event(down(PointerButton::Primary, 403.0), &config);
    assert!(state.handle_event(
        ChartEvent::Wheel {
            x: 403.0,
            y: 120.0,
            delta_y: -120.0,
        },
        &config,
    ));
    let zoomed = state.window().expect("window");
    assert_eq!(zoomed.len(), 180);
    assert_eq!(state.interaction().mode(), InteractionMode::Panning);

    // 4 px at 180 candles over 806 px rounds to one candle.
    state.handle_event(ChartEvent::PointerMove { x: 407.0, y: 120.0 }, &config);
    let panned = state.window().expect("window");
    assert_eq!(panned.len(), 180);
    assert_eq!(panned.from, zoomed.from - 1);
}

#[test]
fn crosshair_follows_pointer_and_clamps_index() {
    let config = ChartConfig::default();
    let mut state = state_with_candles(200);
    state.handle_event(down(PointerButton::Crosshair, 100.0), &config);
    assert_eq!(state.interaction().mode(), InteractionMode::CrosshairActive);

    state.handle_event(ChartEvent::PointerMove { x: 950.0, y: 60.0 }, &config);
    let crosshair = state.interaction().crosshair();
    assert!(crosshair.active);
    assert_eq!(crosshair.candle_index, Some(199));
    assert_eq!((crosshair.x, crosshair.y), (950.0, 60.0));

    assert!(state.handle_event(up(PointerButton::Crosshair, 950.0), &config));
    assert!(!state.interaction().crosshair().active);
}

#[test]
fn replacing_candles_cancels_gesture_and_resets_window() {
    let config = ChartConfig::default();
    let mut state = state_with_candles(1_000);
    state.handle_event(down(PointerButton::Primary, 400.0), &config);
    state.handle_event(ChartEvent::PointerMove { x: 800.0, y: 0.0 }, &config);
    assert_ne!(state.window(), Some(ViewWindow::new(800, 1_000)));

    state.on_candles_replaced(1_000);
    assert_eq!(state.window(), Some(ViewWindow::new(800, 1_000)));
    assert_eq!(state.interaction().mode(), InteractionMode::Idle);
}

#[test]
fn events_without_candles_change_nothing() {
    let config = selection_config();
    let mut state = state_with_candles(0);
    assert!(!state.handle_event(down(PointerButton::Primary, 100.0), &config));
    assert!(!state.handle_event(
        ChartEvent::Wheel {
            x: 100.0,
            y: 0.0,
            delta_y: -1.0,
        },
        &config,
    ));
    assert_eq!(state.window(), None);
    assert_eq!(state.interaction().mode(), InteractionMode::Idle);
}

#[test]
fn button_indices_map_to_roles() {
    assert_eq!(PointerButton::from_button_index(0), Some(PointerButton::Primary));
    assert_eq!(PointerButton::from_button_index(1), Some(PointerButton::Crosshair));
    assert_eq!(PointerButton::from_button_index(2), Some(PointerButton::Secondary));
    assert_eq!(PointerButton::from_button_index(3), None);
}
