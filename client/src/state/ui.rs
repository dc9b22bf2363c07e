//! Local UI chrome state (panel split, drag gesture, last send result).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the persisted preferences
//! and the message log. Nothing here survives a reload.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::net::router::SendOutcome;

pub const PANEL_RATIO_MIN: f64 = 10.0;
pub const PANEL_RATIO_MAX: f64 = 90.0;
/// Frame pane share of the container width, in percent.
pub const PANEL_RATIO_DEFAULT: f64 = 80.0;

/// UI state for the split layout and compose feedback.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Percentage of the container given to the frame pane.
    pub panel_ratio: f64,
    /// True while a divider drag gesture is active.
    pub dragging: bool,
    /// Result of the most recent send, shown under the compose box.
    pub last_send: Option<SendOutcome>,
}

impl Default for UiState {
    fn default() -> Self {
        Self { panel_ratio: PANEL_RATIO_DEFAULT, dragging: false, last_send: None }
    }
}

impl UiState {
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Move the divider to `pointer_x` (viewport coordinates) within a
    /// container starting at `container_left` with `container_width`.
    ///
    /// Ignored unless a drag is active. Returns `true` if the ratio changed.
    pub fn drag_to(&mut self, pointer_x: f64, container_left: f64, container_width: f64) -> bool {
        if !self.dragging {
            return false;
        }
        let Some(next) = ratio_from_pointer(pointer_x, container_left, container_width) else {
            return false;
        };
        if (next - self.panel_ratio).abs() < f64::EPSILON {
            return false;
        }
        self.panel_ratio = next;
        true
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Inline grid style for the split container.
    #[must_use]
    pub fn split_style(&self) -> String {
        format!("grid-template-columns: {:.2}% auto minmax(0, 1fr);", self.panel_ratio)
    }
}

/// Clamp a ratio into the allowed split range.
#[must_use]
pub fn clamp_panel_ratio(value: f64) -> f64 {
    value.clamp(PANEL_RATIO_MIN, PANEL_RATIO_MAX)
}

/// Convert a pointer position into a clamped split ratio.
///
/// Returns `None` for non-finite input or a container with no width.
#[must_use]
pub fn ratio_from_pointer(pointer_x: f64, container_left: f64, container_width: f64) -> Option<f64> {
    if !pointer_x.is_finite() || !container_left.is_finite() || !container_width.is_finite() {
        return None;
    }
    if container_width <= 0.0 {
        return None;
    }
    let raw = (pointer_x - container_left) * 100.0 / container_width;
    if raw.is_nan() {
        return None;
    }
    Some(clamp_panel_ratio(raw))
}
