// src/audio/mod.rs
//! Audio module - asset loading, looping playback, and analysis.

pub mod analyzer;
pub mod asset;
pub mod player;
pub mod sample_capture;

// Re-export commonly used types
pub use analyzer::{Band, SpectrumAnalyzer, SpectrumSample};
pub use asset::{AudioAsset, TrackMetadata};
pub use player::{AudioTransport, MusicPlayer};
pub use sample_capture::{CaptureBuffer, SampleCapture};
