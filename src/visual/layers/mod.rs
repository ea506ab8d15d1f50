// src/visual/layers/mod.rs
//! The five audio-reactive layers.

pub mod glow;
pub mod rings;
pub mod sparkles;
pub mod spirograph;
pub mod wave;

pub use glow::GlowLayer;
pub use rings::PulsingRings;
pub use sparkles::SparkleLayer;
pub use spirograph::Spirograph;
pub use wave::ReactiveWave;

use super::color::map_range;

/// Hue shared by the glow and the sparkles: `sin(angle)` onto `[-5, 55]`.
pub fn warm_hue(angle: f64) -> f64 {
    map_range(angle.sin(), -1.0, 1.0, -5.0, 55.0)
}
