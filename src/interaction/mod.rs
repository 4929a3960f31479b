use serde::{Deserialize, Serialize};

use crate::core::ViewWindow;

/// Gesture state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
    CrosshairActive,
    Selecting,
}

/// Pointer buttons the chart reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    /// Drag-to-pan button (usually left).
    Primary,
    /// Hold-to-inspect button (usually middle).
    Crosshair,
    /// Drag-to-select button (usually right).
    Secondary,
}

impl PointerButton {
    /// Maps DOM-style button numbers (`0` left, `1` middle, `2` right).
    #[must_use]
    pub fn from_button_index(index: u16) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Crosshair),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Raw input delivered by the host. Pointer coordinates are surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    PointerDown { button: PointerButton, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { button: PointerButton, x: f64, y: f64 },
    PointerLeave,
    Wheel { x: f64, y: f64, delta_y: f64 },
    /// Logical size plus device pixel ratio of the drawing surface.
    Resize {
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    },
}

/// Crosshair overlay state; only meaningful while `active`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairState {
    pub active: bool,
    pub x: f64,
    pub y: f64,
    pub candle_index: Option<usize>,
}

/// Drag selection in progress, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub start_x: f64,
    pub end_x: f64,
}

/// Pan gesture anchor captured at pointer-down.
///
/// The plot width is frozen here so pixel deltas convert to index deltas
/// with the same ratio for the whole gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanAnchor {
    pub start_x: f64,
    pub start_window: ViewWindow,
    pub plot_width: f64,
}

impl PanAnchor {
    /// Index delta for a pointer at `x`; dragging right reveals older candles.
    #[must_use]
    pub fn delta_index(&self, x: f64) -> i64 {
        if !x.is_finite() || !self.plot_width.is_finite() || self.plot_width <= 0.0 {
            return 0;
        }
        let candles_per_px = self.start_window.len() as f64 / self.plot_width;
        -((x - self.start_x) * candles_per_px).round() as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    crosshair: CrosshairState,
    selection: Option<SelectionState>,
    pan_anchor: Option<PanAnchor>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn crosshair(&self) -> CrosshairState {
        self.crosshair
    }

    #[must_use]
    pub fn selection(&self) -> Option<SelectionState> {
        self.selection
    }

    #[must_use]
    pub fn pan_anchor(&self) -> Option<PanAnchor> {
        self.pan_anchor
    }

    pub fn on_pan_start(&mut self, anchor: PanAnchor) {
        self.mode = InteractionMode::Panning;
        self.pan_anchor = Some(anchor);
    }

    /// Restarts an active pan from `window` at pointer `x`, keeping the frozen plot width.
    pub fn rebase_pan(&mut self, x: f64, window: ViewWindow) {
        if let Some(anchor) = self.pan_anchor.as_mut() {
            anchor.start_x = x;
            anchor.start_window = window;
        }
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
        self.pan_anchor = None;
    }

    pub fn on_crosshair_start(&mut self, x: f64, y: f64, candle_index: Option<usize>) {
        self.mode = InteractionMode::CrosshairActive;
        self.crosshair = CrosshairState {
            active: true,
            x,
            y,
            candle_index,
        };
    }

    pub fn on_crosshair_move(&mut self, x: f64, y: f64, candle_index: Option<usize>) {
        if !self.crosshair.active {
            return;
        }
        self.crosshair.x = x;
        self.crosshair.y = y;
        self.crosshair.candle_index = candle_index;
    }

    pub fn on_crosshair_end(&mut self) {
        self.mode = InteractionMode::Idle;
        self.crosshair = CrosshairState::default();
    }

    pub fn on_selection_start(&mut self, x: f64) {
        self.mode = InteractionMode::Selecting;
        self.selection = Some(SelectionState {
            start_x: x,
            end_x: x,
        });
    }

    pub fn on_selection_move(&mut self, x: f64) {
        if let Some(selection) = &mut self.selection {
            selection.end_x = x;
        }
    }

    /// Ends the selection gesture and hands back the final selection.
    pub fn take_selection(&mut self) -> Option<SelectionState> {
        self.mode = InteractionMode::Idle;
        self.selection.take()
    }

    /// Abandons whatever gesture is in progress.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionMode, InteractionState, PanAnchor};
    use crate::core::ViewWindow;

    #[test]
    fn pan_anchor_converts_pixels_with_frozen_width() {
        let anchor = PanAnchor {
            start_x: 500.0,
            start_window: ViewWindow::new(100, 200),
            plot_width: 1000.0,
        };
        assert_eq!(anchor.delta_index(600.0), -10);
        assert_eq!(anchor.delta_index(450.0), 5);
        assert_eq!(anchor.delta_index(500.0), 0);
    }

    #[test]
    fn crosshair_is_cleared_when_gesture_ends() {
        let mut state = InteractionState::default();
        state.on_crosshair_start(10.0, 20.0, Some(3));
        assert_eq!(state.mode(), InteractionMode::CrosshairActive);
        state.on_crosshair_end();
        assert_eq!(state.mode(), InteractionMode::Idle);
        assert!(!state.crosshair().active);
        assert_eq!(state.crosshair().candle_index, None);
    }

    #[test]
    fn selection_is_handed_back_once() {
        let mut state = InteractionState::default();
        state.on_selection_start(40.0);
        state.on_selection_move(90.0);
        let selection = state.take_selection().expect("selection");
        assert_eq!((selection.start_x, selection.end_x), (40.0, 90.0));
        assert!(state.take_selection().is_none());
        assert_eq!(state.mode(), InteractionMode::Idle);
    }
}
