// src/visual/layers/rings.rs
//! Three concentric ellipses: a calm outer pulse and two volume-reactive inner pulses.

use std::f64::consts::PI;

use crate::visual::canvas::Canvas;
use crate::visual::color::vivid;
use crate::visual::scene::{FrameInput, Layer};

/// Hue added to the base for the third ring.
const THIRD_RING_HUE_OFFSET: f64 = 45.0;
/// Scale of the amplitude term in the inner pulses.
const AMPLITUDE_GAIN: f64 = 10.0;

/// Width and height of each ring, outermost first.
pub fn ring_extents(angle: f64, amplitude: f64, usable_height: f64) -> [(f64, f64); 3] {
    let swing = usable_height / PI;
    let d1 = 50.0 + angle.sin() * swing;
    let d2 = AMPLITUDE_GAIN * amplitude + (-2.0 * angle).sin() * swing;
    // The third ring is stretched between the outer and inner pulses
    [(d1, d1), (d2, d2), (d1, d2)]
}

/// Hue of each ring, in the same order as [`ring_extents`].
pub fn ring_hues(base_hue: f64, amplitude: f64) -> [f64; 3] {
    [base_hue, base_hue * amplitude, base_hue + THIRD_RING_HUE_OFFSET]
}

pub struct PulsingRings {
    base_hue: f64,
}

impl PulsingRings {
    pub fn new(base_hue: f64) -> Self {
        Self { base_hue }
    }
}

impl Layer for PulsingRings {
    fn name(&self) -> &'static str {
        "rings"
    }

    fn draw(&self, canvas: &mut Canvas, frame: &FrameInput) {
        let size = canvas.size();
        let (cx, cy) = size.center();
        let amplitude = frame.spectrum.amplitude as f64;

        let extents = ring_extents(frame.phase.angle, amplitude, size.usable_height());
        let hues = ring_hues(self.base_hue, amplitude);
        for ((w, h), hue) in extents.into_iter().zip(hues) {
            canvas.fill_ellipse(cx, cy, w, h, vivid(hue));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_collapses_to_base_pulse() {
        for angle in [0.0, 0.3, 1.0, 2.5, 4.0] {
            let [outer, inner, third] = ring_extents(angle, 0.0, 430.0);
            let swing = 430.0 / PI;
            assert_eq!(outer, (50.0 + f64::sin(angle) * swing, 50.0 + f64::sin(angle) * swing));
            assert_eq!(inner.0, f64::sin(-2.0 * angle) * swing);
            assert_eq!(third, (outer.0, inner.1));
        }
    }

    #[test]
    fn test_amplitude_only_shifts_inner_rings() {
        let quiet = ring_extents(0.8, 0.0, 430.0);
        let loud = ring_extents(0.8, 1.0, 430.0);
        assert_eq!(quiet[0], loud[0]);
        assert!((loud[1].0 - quiet[1].0 - 10.0).abs() < 1e-9);
        assert_eq!(loud[2].1, loud[1].1);
        assert_eq!(quiet[2].0, loud[2].0);
    }

    #[test]
    fn test_third_ring_height_follows_inner_pulse() {
        let swing = 430.0 / PI;
        let d1 = 50.0 + f64::sin(0.4) * swing;
        let d2 = 5.0 + f64::sin(-0.8) * swing;
        let [_, _, third] = ring_extents(0.4, 0.5, 430.0);
        assert!((third.0 - d1).abs() < 1e-9);
        assert!((third.1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_hue_offsets() {
        assert_eq!(ring_hues(100.0, 0.5), [100.0, 50.0, 145.0]);
        assert_eq!(ring_hues(0.0, 0.9), [0.0, 0.0, 45.0]);
    }

    #[test]
    fn test_draws_at_center() {
        let mut canvas = Canvas::new(crate::visual::canvas::CanvasSize::DEFAULT, 90, 45);
        let frame = FrameInput {
            phase: crate::visual::clock::AnimationPhase {
                angle: 1.0,
                wave_offset: 0.0,
            },
            ..FrameInput::default()
        };
        PulsingRings::new(0.0).draw(&mut canvas, &frame);
        assert!(canvas.is_lit(450.0, 225.0));
    }
}
