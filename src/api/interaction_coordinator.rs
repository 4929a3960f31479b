use tracing::{debug, trace, warn};

use crate::core::{SurfaceSize, ZoomDirection, pan_window, x_to_index, zoom_window};
use crate::interaction::{ChartEvent, InteractionMode, PanAnchor, PointerButton};

use super::{ChartConfig, ChartState};

impl ChartState {
    /// Applies one input event to the state machine.
    ///
    /// Returns `true` when anything visible changed and the host should
    /// render again. `config` is the host's current per-cycle config; only
    /// its profile mode is consulted (selection gestures require
    /// `ProfileMode::Selection`).
    pub fn handle_event(&mut self, event: ChartEvent, config: &ChartConfig) -> bool {
        match event {
            ChartEvent::Resize {
                width,
                height,
                device_pixel_ratio,
            } => self.handle_resize(width, height, device_pixel_ratio),
            ChartEvent::PointerLeave => self.handle_pointer_leave(),
            ChartEvent::Wheel { x, delta_y, .. } => self.handle_wheel(x, delta_y),
            ChartEvent::PointerDown { button, x, y } => {
                self.handle_pointer_down(button, x, y, config)
            }
            ChartEvent::PointerMove { x, y } => self.handle_pointer_move(x, y),
            ChartEvent::PointerUp { button, x, .. } => self.handle_pointer_up(button, x, config),
        }
    }

    fn handle_resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> bool {
        let Some(surface) = SurfaceSize::from_logical(width, height, device_pixel_ratio) else {
            warn!(width, height, device_pixel_ratio, "ignored invalid resize event");
            return false;
        };
        if surface == self.surface() {
            return false;
        }
        debug!(
            width = surface.width,
            height = surface.height,
            device_pixel_ratio,
            "surface resized"
        );
        self.set_surface(surface)
    }

    fn handle_pointer_leave(&mut self) -> bool {
        let interaction = self.interaction();
        if interaction.mode() == InteractionMode::Idle && !interaction.crosshair().active {
            return false;
        }
        trace!(mode = ?interaction.mode(), "pointer left surface, gesture cancelled");
        self.interaction.reset();
        true
    }

    fn handle_wheel(&mut self, x: f64, delta_y: f64) -> bool {
        let Some(window) = self.window() else {
            return false;
        };
        let Some(direction) = ZoomDirection::from_wheel_delta(delta_y) else {
            return false;
        };
        let cursor_index = x_to_index(x, window, self.layout().plot);
        let zoomed = zoom_window(
            window,
            cursor_index,
            direction,
            self.candle_count(),
            self.viewport_behavior(),
        );
        if zoomed == window {
            return false;
        }
        trace!(?direction, cursor_index, ?window, ?zoomed, "zoomed window");
        self.set_window(zoomed);
        if self.interaction().mode() == InteractionMode::Panning {
            self.interaction.rebase_pan(x, zoomed);
        }
        true
    }

    fn handle_pointer_down(
        &mut self,
        button: PointerButton,
        x: f64,
        y: f64,
        config: &ChartConfig,
    ) -> bool {
        if self.interaction().mode() != InteractionMode::Idle {
            return false;
        }
        let Some(window) = self.window() else {
            return false;
        };

        match button {
            PointerButton::Primary => {
                self.interaction.on_pan_start(PanAnchor {
                    start_x: x,
                    start_window: window,
                    plot_width: self.layout().plot.width,
                });
                trace!(x, ?window, "pan started");
                false
            }
            PointerButton::Crosshair => {
                let candle_index = self.candle_index_at(x);
                self.interaction.on_crosshair_start(x, y, candle_index);
                true
            }
            PointerButton::Secondary => {
                if !config.is_selection_mode() {
                    return false;
                }
                if let Some(id) = self
                    .candle_index_at(x)
                    .and_then(|index| self.pinned.hit_test(index))
                {
                    self.pinned.remove(id);
                    return true;
                }
                self.interaction.on_selection_start(x);
                trace!(x, "selection started");
                true
            }
        }
    }

    fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        match self.interaction().mode() {
            InteractionMode::Idle => false,
            InteractionMode::Panning => {
                let Some(anchor) = self.interaction().pan_anchor() else {
                    return false;
                };
                let panned = pan_window(
                    anchor.start_window,
                    anchor.delta_index(x),
                    self.candle_count(),
                    self.viewport_behavior(),
                );
                if self.window() == Some(panned) {
                    return false;
                }
                self.set_window(panned);
                true
            }
            InteractionMode::CrosshairActive => {
                let candle_index = self.candle_index_at(x);
                self.interaction.on_crosshair_move(x, y, candle_index);
                true
            }
            InteractionMode::Selecting => {
                self.interaction.on_selection_move(x);
                true
            }
        }
    }

    fn handle_pointer_up(&mut self, button: PointerButton, x: f64, config: &ChartConfig) -> bool {
        match (self.interaction().mode(), button) {
            (InteractionMode::Panning, PointerButton::Primary) => {
                self.interaction.on_pan_end();
                trace!(window = ?self.window(), "pan ended");
                false
            }
            (InteractionMode::CrosshairActive, PointerButton::Crosshair) => {
                self.interaction.on_crosshair_end();
                true
            }
            (InteractionMode::Selecting, PointerButton::Secondary) => {
                self.interaction.on_selection_move(x);
                let Some(selection) = self.interaction.take_selection() else {
                    return true;
                };
                if config.is_selection_mode() {
                    self.commit_selection(selection.start_x, selection.end_x);
                }
                true
            }
            _ => false,
        }
    }

    fn commit_selection(&mut self, start_x: f64, end_x: f64) {
        let Some(window) = self.window() else {
            return;
        };
        let plot = self.layout().plot;
        let max_index = self.candle_count() as i64;
        let start = x_to_index(start_x, window, plot).clamp(0, max_index) as usize;
        let end = x_to_index(end_x, window, plot).clamp(0, max_index) as usize;
        if self.add_pinned_range(start, end).is_none() {
            debug!(start, end, "selection discarded");
        }
    }
}
