//! Pan/zoom state for interactive charts.
//!
//! The visible window lives in data units: x is the label index (label `i` sits at
//! `x = i`), y is the count axis. Zoom and pan act on x only; y keeps the default
//! extent so counts stay comparable while scrolling through time.
//!
//! State machine: `{Default, Transformed} × {WheelOff, WheelOn}`, starting at
//! `Default × WheelOff`. Gestures can only move towards `Transformed`, `reset` returns
//! to `Default` keeping the wheel flag, `toggle_wheel_zoom` flips the wheel flag keeping
//! the window.

use super::spec::{Modifiers, PanZoomOptions};
use crate::viz::types::RenderKind;

/// Zoom factor per wheel notch.
pub const WHEEL_STEP: f64 = 0.1;
/// Narrowest visible x span, in label intervals.
pub const MIN_X_SPAN: f64 = 1.0;
/// Widest visible x span, as a multiple of the default span.
pub const MAX_ZOOM_OUT: f64 = 10.0;

/// Visible extent of a chart in data units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewWindow {
    /// Fully zoomed-out window for `n_labels` labels whose largest value is `max_value`.
    pub fn full_extent(kind: RenderKind, n_labels: usize, max_value: f64) -> Self {
        let (x_min, x_max) = match (kind, n_labels) {
            (_, 0) => (0.0, 1.0),
            (RenderKind::Line, 1) => (-0.5, 0.5),
            (RenderKind::Line, n) => (0.0, (n - 1) as f64),
            (RenderKind::Bar, n) => (-0.5, n as f64 - 0.5),
        };
        let y_max = if max_value > 0.0 { max_value * 1.05 } else { 1.0 };
        Self {
            x_min,
            x_max,
            y_min: 0.0,
            y_max,
        }
    }

    pub fn x_span(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn is_finite(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Inclusive range of label indices at least partially visible.
    pub fn visible_indices(&self, n_labels: usize) -> Option<(usize, usize)> {
        if n_labels == 0 {
            return None;
        }
        let last = (n_labels - 1) as f64;
        let lo = self.x_min.ceil().max(0.0);
        let hi = self.x_max.floor().min(last);
        if lo > hi {
            None
        } else {
            Some((lo as usize, hi as usize))
        }
    }

    fn zoom_x(&self, factor: f64, anchor: f64, max_span: f64) -> Self {
        let span = self.x_span();
        let new_span = (span / factor).max(MIN_X_SPAN.min(span)).min(max_span);
        let anchor = anchor.clamp(0.0, 1.0);
        let pivot = self.x_min + anchor * span;
        let x_min = pivot - anchor * new_span;
        Self {
            x_min,
            x_max: x_min + new_span,
            ..*self
        }
    }

    /// Shift by `dx` spans, keeping at least one point of `bounds` in view.
    fn pan_x(&self, dx: f64, bounds: &ViewWindow) -> Self {
        let span = self.x_span();
        let x_min = (self.x_min - dx * span).clamp(bounds.x_min - span, bounds.x_max);
        Self {
            x_min,
            x_max: x_min + span,
            ..*self
        }
    }
}

/// Whether a pan/zoom offset is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisState {
    Default,
    Transformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelState {
    Off,
    On,
}

/// User input on a chart surface. Positions and distances are fractions of the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Drag by `dx` (positive = towards the right) with the given modifiers held.
    Pan { dx: f64, modifiers: Modifiers },
    /// Mouse wheel; positive `delta` zooms in around `anchor` (0 = left edge, 1 = right edge).
    Wheel { delta: f64, anchor: f64 },
    /// Touch pinch; `scale > 1` zooms in around `anchor`.
    Pinch { scale: f64, anchor: f64 },
    /// Drag-to-zoom box between two x positions.
    DragSelect { from: f64, to: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    options: PanZoomOptions,
    wheel_zoom_enabled: bool,
    window: ViewWindow,
    default_window: ViewWindow,
}

impl InteractionState {
    /// Initial state: default window, wheel zoom off.
    pub fn new(options: PanZoomOptions, default_window: ViewWindow) -> Self {
        Self {
            options,
            wheel_zoom_enabled: false,
            window: default_window,
            default_window,
        }
    }

    pub fn options(&self) -> &PanZoomOptions {
        &self.options
    }

    pub fn wheel_zoom_enabled(&self) -> bool {
        self.wheel_zoom_enabled
    }

    pub fn window(&self) -> ViewWindow {
        self.window
    }

    pub fn default_window(&self) -> ViewWindow {
        self.default_window
    }

    pub fn axis_state(&self) -> AxisState {
        if self.window == self.default_window {
            AxisState::Default
        } else {
            AxisState::Transformed
        }
    }

    pub fn wheel_state(&self) -> WheelState {
        if self.wheel_zoom_enabled {
            WheelState::On
        } else {
            WheelState::Off
        }
    }

    /// Flip wheel zoom. The window is untouched. Returns the new flag.
    pub fn toggle_wheel_zoom(&mut self) -> bool {
        self.wheel_zoom_enabled = !self.wheel_zoom_enabled;
        self.wheel_zoom_enabled
    }

    /// Back to the default window; the wheel flag is untouched.
    /// Returns `true` when the window actually changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.window != self.default_window;
        self.window = self.default_window;
        changed
    }

    fn max_x_span(&self) -> f64 {
        self.default_window.x_span() * MAX_ZOOM_OUT
    }

    /// Apply a gesture. Gestures the profile does not allow are ignored.
    /// Returns `true` when the window changed.
    pub fn apply(&mut self, gesture: Gesture) -> bool {
        let next = match gesture {
            Gesture::Pan { dx, modifiers } => {
                let allowed = self
                    .options
                    .pan_modifier
                    .is_none_or(|m| modifiers.holds(m));
                if !allowed || !dx.is_finite() {
                    return false;
                }
                self.window.pan_x(dx, &self.default_window)
            }
            Gesture::Wheel { delta, anchor } => {
                if !self.wheel_zoom_enabled || !delta.is_finite() {
                    return false;
                }
                self.window
                    .zoom_x((1.0 + WHEEL_STEP).powf(delta), anchor, self.max_x_span())
            }
            Gesture::Pinch { scale, anchor } => {
                if !self.options.pinch || !scale.is_finite() || scale <= 0.0 {
                    return false;
                }
                self.window.zoom_x(scale, anchor, self.max_x_span())
            }
            Gesture::DragSelect { from, to } => {
                if !self.options.drag_select || !from.is_finite() || !to.is_finite() {
                    return false;
                }
                let (a, b) = (from.min(to).clamp(0.0, 1.0), from.max(to).clamp(0.0, 1.0));
                if b <= a {
                    return false;
                }
                let span = self.window.x_span();
                let x_min = self.window.x_min + a * span;
                let mut x_max = self.window.x_min + b * span;
                if x_max - x_min < MIN_X_SPAN.min(span) {
                    x_max = x_min + MIN_X_SPAN.min(span);
                }
                ViewWindow {
                    x_min,
                    x_max,
                    ..self.window
                }
            }
        };
        if next == self.window || !next.is_finite() || next.x_span() <= 0.0 {
            return false;
        }
        log::debug!("window {:?} -> {:?}", self.window, next);
        self.window = next;
        true
    }
}
