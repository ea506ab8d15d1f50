// src/visual/scene.rs
//! Per-frame inputs and the fixed layer order.

use std::time::Duration;

use rand::Rng;

use super::canvas::{Canvas, CanvasSize};
use super::clock::AnimationPhase;
use super::layers::{GlowLayer, PulsingRings, ReactiveWave, SparkleLayer, Spirograph};
use crate::audio::SpectrumSample;

/// Upper bound on a sparkle's diameter.
pub const SPARKLE_MAX_SIZE: f64 = 4.0;

/// The one sparkle drawn this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sparkle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Sparkle {
    /// Uniformly placed over the canvas, diameter in `[0, SPARKLE_MAX_SIZE)`.
    pub fn random<R: Rng>(rng: &mut R, size: CanvasSize) -> Self {
        Self {
            x: rng.random_range(0.0..size.width),
            y: rng.random_range(0.0..size.height),
            size: rng.random_range(0.0..SPARKLE_MAX_SIZE),
        }
    }
}

/// Everything sampled for one frame. Rendering is a pure function of this,
/// so a frozen frame can be redrawn identically.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub phase: AnimationPhase,
    pub spectrum: SpectrumSample,
    /// Playback position within the current loop.
    pub elapsed: Duration,
    pub sparkle: Sparkle,
}

/// A drawing routine run once per frame.
pub trait Layer {
    fn name(&self) -> &'static str;
    fn draw(&self, canvas: &mut Canvas, frame: &FrameInput);
}

/// Layer settings fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct SceneConfig {
    pub base_hue: f64,
    pub noise_seed: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            base_hue: 0.0,
            noise_seed: 0,
        }
    }
}

/// The visual layers in paint order: later layers cover earlier ones.
pub struct Scene {
    layers: Vec<Box<dyn Layer>>,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            layers: vec![
                Box::new(GlowLayer),
                Box::new(PulsingRings::new(config.base_hue)),
                Box::new(SparkleLayer),
                Box::new(ReactiveWave::new(config.noise_seed)),
                Box::new(Spirograph),
            ],
        }
    }

    /// Clear the canvas and paint every layer.
    pub fn render(&self, canvas: &mut Canvas, frame: &FrameInput) {
        canvas.clear();
        for layer in &self.layers {
            layer.draw(canvas, frame);
        }
    }

    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_layer_order() {
        let scene = Scene::new(SceneConfig::default());
        assert_eq!(
            scene.layer_names(),
            vec!["glow", "rings", "sparkles", "wave", "spirograph"]
        );
    }

    #[test]
    fn test_sparkle_stays_on_canvas() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let s = Sparkle::random(&mut rng, CanvasSize::DEFAULT);
            assert!((0.0..900.0).contains(&s.x));
            assert!((0.0..450.0).contains(&s.y));
            assert!((0.0..SPARKLE_MAX_SIZE).contains(&s.size));
        }
    }

    #[test]
    fn test_render_is_repeatable_for_the_same_frame() {
        let scene = Scene::new(SceneConfig::default());
        let frame = FrameInput {
            phase: AnimationPhase {
                angle: 1.3,
                wave_offset: 0.7,
            },
            spectrum: SpectrumSample {
                amplitude: 0.4,
                bass: 180.0,
                mid: 90.0,
                high_mid: 40.0,
            },
            elapsed: Duration::from_secs(8),
            sparkle: Sparkle {
                x: 100.0,
                y: 50.0,
                size: 3.0,
            },
        };

        let mut a = Canvas::new(CanvasSize::DEFAULT, 120, 40);
        let mut b = Canvas::new(CanvasSize::DEFAULT, 120, 40);
        scene.render(&mut a, &frame);
        scene.render(&mut b, &frame);
        scene.render(&mut b, &frame);

        assert!(a.lit_dots() > 0);
        for row in 0..40 {
            for col in 0..120 {
                assert_eq!(a.cell(col, row), b.cell(col, row));
            }
        }
    }
}
