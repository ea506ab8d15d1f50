// src/visual/layers/glow.rs
//! The "sun": a pulsing disc that appears a few seconds into the track.

use std::time::Duration;

use super::warm_hue;
use crate::visual::canvas::Canvas;
use crate::visual::color::{map_range, vivid};
use crate::visual::scene::{FrameInput, Layer};

/// Playback position before which the glow stays hidden.
pub const GLOW_DELAY: Duration = Duration::from_secs(5);
/// Hue of the glow's outline.
const OUTLINE_HUE: f64 = 55.0;

/// Diameter of the glow for a given phase angle.
pub fn glow_diameter(angle: f64) -> f64 {
    map_range(angle.sin(), -1.0, 1.0, 0.0, 200.0) * 1.5
}

pub struct GlowLayer;

impl Layer for GlowLayer {
    fn name(&self) -> &'static str {
        "glow"
    }

    fn draw(&self, canvas: &mut Canvas, frame: &FrameInput) {
        if frame.elapsed < GLOW_DELAY {
            return;
        }
        let (cx, cy) = canvas.size().center();
        let angle = frame.phase.angle;
        let d = glow_diameter(angle);

        canvas.fill_ellipse(cx, cy, d, d, vivid(warm_hue(angle)));
        canvas.stroke_ellipse(cx, cy, d, d, vivid(OUTLINE_HUE));
    }
}
