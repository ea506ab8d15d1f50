// src/visual/mod.rs
//! Visual module - animation clock, canvas, and the audio-reactive layers.

pub mod canvas;
pub mod clock;
pub mod color;
pub mod layers;
pub mod scene;

pub use canvas::{Canvas, CanvasSize};
pub use clock::{AnimationClock, AnimationPhase};
pub use scene::{FrameInput, Layer, Scene, SceneConfig, Sparkle};
