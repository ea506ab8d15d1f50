// src/ui/controls.rs
//! The on-canvas control row and click routing.
//!
//! Geometry is a pure function of the canvas size, shared by drawing and
//! hit-testing, so what is clicked is always what was drawn.

use ratatui::style::Color;

use crate::app::transport::TransportAction;
use crate::visual::{Canvas, CanvasSize};

/// Side length of a button, in canvas units.
pub const BUTTON_SIZE: f64 = 25.0;
/// Distance between the left edges of neighbouring buttons.
pub const BUTTON_SPACING: f64 = 40.0;
/// Local x of the first button's left edge.
const FIRST_BUTTON_X: f64 = -60.0;
/// Distance of the control row's anchor above the bottom edge.
const ANCHOR_RISE: f64 = 30.0;
const LABEL_COLOR: Color = Color::Rgb(180, 180, 180);

/// Buttons in display and hit-test order.
pub const CONTROL_ORDER: [TransportAction; 4] = [
    TransportAction::Play,
    TransportAction::Pause,
    TransportAction::Refresh,
    TransportAction::Mute,
];

/// Rectangle relative to the control row's anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    /// Inclusive on every edge.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlButton {
    pub id: TransportAction,
    pub label: &'static str,
    pub bounds: Bounds,
}

/// Glyph for a control. The mute button offers "unmute" while muted.
pub fn control_label(id: TransportAction, muted: bool) -> &'static str {
    match id {
        TransportAction::Play => "▶",
        TransportAction::Pause => "⏸",
        TransportAction::Refresh => "⟳",
        TransportAction::Mute if muted => "🔊",
        TransportAction::Mute => "🔇",
    }
}

/// Anchor of the control row: horizontally centered, near the bottom.
pub fn anchor(size: CanvasSize) -> (f64, f64) {
    (size.width / 2.0, size.height - ANCHOR_RISE)
}

/// The four buttons, positioned relative to the anchor.
pub fn control_row(muted: bool) -> [ControlButton; 4] {
    let mut left = FIRST_BUTTON_X;
    CONTROL_ORDER.map(|id| {
        let bounds = Bounds {
            x: left,
            y: 0.0,
            w: BUTTON_SIZE,
            h: BUTTON_SIZE,
        };
        left += BUTTON_SPACING;
        ControlButton {
            id,
            label: control_label(id, muted),
            bounds,
        }
    })
}

/// Route a click at canvas coordinates to the first control it lands on.
pub fn hit_test(size: CanvasSize, x: f64, y: f64) -> Option<TransportAction> {
    let (ax, ay) = anchor(size);
    let (local_x, local_y) = (x - ax, y - ay);
    control_row(false)
        .into_iter()
        .find(|button| button.bounds.contains(local_x, local_y))
        .map(|button| button.id)
}

/// Paint the control labels onto the canvas, last so they sit on top.
pub fn draw_controls(canvas: &mut Canvas, muted: bool) {
    let (ax, ay) = anchor(canvas.size());
    for button in control_row(muted) {
        let b = button.bounds;
        canvas.label(
            ax + b.x + b.w / 2.0,
            ay + b.y + b.h / 2.0 + 1.0,
            button.label,
            LABEL_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: CanvasSize = CanvasSize::DEFAULT;

    #[test]
    fn test_row_layout() {
        let row = control_row(false);
        let xs: Vec<f64> = row.iter().map(|b| b.bounds.x).collect();
        assert_eq!(xs, vec![-60.0, -20.0, 20.0, 60.0]);
        assert!(row.iter().all(|b| b.bounds.w == 25.0 && b.bounds.h == 25.0));
        assert_eq!(anchor(SIZE), (450.0, 420.0));
    }

    #[test]
    fn test_hit_each_button() {
        assert_eq!(hit_test(SIZE, 390.0, 420.0), Some(TransportAction::Play));
        assert_eq!(hit_test(SIZE, 440.0, 430.0), Some(TransportAction::Pause));
        assert_eq!(hit_test(SIZE, 482.5, 432.5), Some(TransportAction::Refresh));
        assert_eq!(hit_test(SIZE, 535.0, 445.0), Some(TransportAction::Mute));
    }

    #[test]
    fn test_gaps_and_outside_are_misses() {
        // between Play and Pause
        assert_eq!(hit_test(SIZE, 420.0, 430.0), None);
        // above the row
        assert_eq!(hit_test(SIZE, 400.0, 419.0), None);
        assert_eq!(hit_test(SIZE, 450.0, 225.0), None);
        assert_eq!(hit_test(SIZE, 0.0, 0.0), None);
    }

    #[test]
    fn test_mute_label_flips() {
        assert_eq!(control_row(false)[3].label, "🔇");
        assert_eq!(control_row(true)[3].label, "🔊");
        assert_eq!(control_row(true)[0].label, control_row(false)[0].label);
    }

    #[test]
    fn test_labels_drawn_in_order() {
        let mut canvas = Canvas::new(SIZE, 90, 45);
        draw_controls(&mut canvas, true);
        let labels: Vec<&str> = canvas.labels().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(labels, vec!["▶", "⏸", "⟳", "🔊"]);
        assert_eq!(canvas.labels()[0].x, 402.5);
    }
}
