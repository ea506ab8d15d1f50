// src/visual/layers/spirograph.rs
//! Radial line pattern whose spread follows the bass, mid and high-mid energies.

use std::f64::consts::{PI, TAU};

use crate::audio::SpectrumSample;
use crate::visual::canvas::Canvas;
use crate::visual::color::{map_range, vivid};
use crate::visual::scene::{FrameInput, Layer};

/// Number of rotated copies around the center.
pub const PIECES: usize = 16;
/// Distance from the center where every segment ends.
pub const RADIUS: f64 = 32.0;
const STROKE_HUE: f64 = 55.0;

/// A line in coordinates relative to the canvas center, y down.
pub type Segment = ((f64, f64), (f64, f64));

/// The six segments of one piece, before rotation.
pub fn piece_segments(spectrum: &SpectrumSample) -> [Segment; 6] {
    let bass = map_range(spectrum.bass.trunc() as f64, 0.0, 255.0, -15.0, 15.0);
    let mid = map_range(spectrum.mid.trunc() as f64, 0.0, 255.0, -150.0, 150.0);
    let high = spectrum.high_mid.trunc() as f64 / 1.5;
    let tip = (0.0, RADIUS);

    [
        ((-bass, bass / 1.5), tip),
        ((bass, bass / 1.5), tip),
        ((-mid, RADIUS / PI), tip),
        ((mid, RADIUS / PI), tip),
        ((high, high), tip),
        ((-high, high), tip),
    ]
}

/// Rotate a point about the origin (clockwise on screen, since y points down).
fn rotate((x, y): (f64, f64), theta: f64) -> (f64, f64) {
    let (sin, cos) = theta.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

/// All segments of the pattern, still relative to the center.
pub fn spirograph_segments(spectrum: &SpectrumSample) -> Vec<Segment> {
    let piece = piece_segments(spectrum);
    (1..=PIECES)
        .flat_map(|i| {
            let theta = i as f64 * TAU / PIECES as f64;
            piece.map(|(a, b)| (rotate(a, theta), rotate(b, theta)))
        })
        .collect()
}

pub struct Spirograph;

impl Layer for Spirograph {
    fn name(&self) -> &'static str {
        "spirograph"
    }

    fn draw(&self, canvas: &mut Canvas, frame: &FrameInput) {
        let (cx, cy) = canvas.size().center();
        let color = vivid(STROKE_HUE);
        for ((x0, y0), (x1, y1)) in spirograph_segments(&frame.spectrum) {
            canvas.line(cx + x0, cy + y0, cx + x1, cy + y1, color);
        }
    }
}
