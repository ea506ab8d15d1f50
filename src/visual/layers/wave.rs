// src/visual/layers/wave.rs
//! The reactive "sea": a noise-shaped filled band along the bottom edge.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::visual::canvas::{Canvas, CanvasSize};
use crate::visual::color::{map_range, vivid};
use crate::visual::scene::{FrameInput, Layer};

/// Horizontal distance between profile vertices.
const X_STEP: f64 = 10.0;
/// Noise-space advance per vertex.
const NOISE_STEP: f64 = 0.05;
/// Screen-y range the noise output maps onto (crest to trough).
const CREST_Y: f64 = 300.0;
const TROUGH_Y: f64 = 450.0;

/// Coherent noise remapped to `[0, 1]`.
pub struct WaveNoise {
    fbm: Fbm<Perlin>,
}

impl WaveNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            fbm: Fbm::<Perlin>::new(seed).set_octaves(4).set_persistence(0.5),
        }
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        ((self.fbm.get([x, y]) + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

/// Top edge of the wave, left to right. Louder audio stretches the noise
/// sampling, which makes the surface choppier.
pub fn wave_profile(
    noise: &WaveNoise,
    wave_offset: f64,
    amplitude: f64,
    size: CanvasSize,
) -> Vec<(f64, f64)> {
    let steps = (size.width / X_STEP) as usize;
    (0..=steps)
        .map(|i| {
            let counter = i as f64 * NOISE_STEP;
            let n = noise.sample(
                counter + counter * amplitude * 0.003,
                wave_offset + counter * amplitude * 0.03,
            );
            (i as f64 * X_STEP, map_range(n, 0.0, 1.0, CREST_Y, TROUGH_Y))
        })
        .collect()
}

/// Fill hue: sweeps between 240 and 180 with the phase angle.
pub fn water_hue(angle: f64) -> f64 {
    map_range(angle.sin(), -1.0, 1.0, 240.0, 180.0)
}

pub struct ReactiveWave {
    noise: WaveNoise,
}

impl ReactiveWave {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: WaveNoise::new(seed),
        }
    }
}

impl Layer for ReactiveWave {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn draw(&self, canvas: &mut Canvas, frame: &FrameInput) {
        let size = canvas.size();
        let mut outline = wave_profile(
            &self.noise,
            frame.phase.wave_offset,
            frame.spectrum.amplitude as f64,
            size,
        );
        outline.push((size.width, size.height));
        outline.push((0.0, size.height));

        canvas.fill_polygon(&outline, vivid(water_hue(frame.phase.angle)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_spans_width_within_band() {
        let noise = WaveNoise::new(3);
        let profile = wave_profile(&noise, 1.7, 0.6, CanvasSize::DEFAULT);
        assert_eq!(profile.len(), 91);
        assert_eq!(profile.first().map(|p| p.0), Some(0.0));
        assert_eq!(profile.last().map(|p| p.0), Some(900.0));
        assert!(profile.iter().all(|&(_, y)| (CREST_Y..=TROUGH_Y).contains(&y)));
    }

    #[test]
    fn test_silence_samples_unstretched_noise() {
        let noise = WaveNoise::new(11);
        let profile = wave_profile(&noise, 0.42, 0.0, CanvasSize::DEFAULT);
        for (i, &(_, y)) in profile.iter().enumerate() {
            let counter = i as f64 * NOISE_STEP;
            let expected = map_range(noise.sample(counter, 0.42), 0.0, 1.0, CREST_Y, TROUGH_Y);
            assert_eq!(y, expected);
        }
    }

    #[test]
    fn test_amplitude_changes_the_surface() {
        let noise = WaveNoise::new(5);
        let quiet = wave_profile(&noise, 0.3, 0.0, CanvasSize::DEFAULT);
        let loud = wave_profile(&noise, 0.3, 1.0, CanvasSize::DEFAULT);
        // first vertex samples the same point either way
        assert_eq!(quiet[0], loud[0]);
        assert!(quiet.iter().zip(&loud).any(|(a, b)| a.1 != b.1));
    }

    #[test]
    fn test_water_hue_range() {
        let mut angle = 0.0;
        while angle < 7.0 {
            let hue = water_hue(angle);
            assert!((180.0 - 1e-9..=240.0 + 1e-9).contains(&hue));
            angle += 0.05;
        }
    }

    #[test]
    fn test_fills_bottom_edge() {
        let mut canvas = Canvas::new(CanvasSize::DEFAULT, 90, 45);
        ReactiveWave::new(1).draw(&mut canvas, &FrameInput::default());
        assert!(canvas.is_lit(450.0, 449.0));
        assert!(!canvas.is_lit(450.0, 100.0));
    }
}
