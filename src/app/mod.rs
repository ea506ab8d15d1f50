// src/app/mod.rs
//! Application module - session state and transport control.

pub mod state;
pub mod transport;

// Re-export the App struct
pub use state::App;
pub use transport::{FrameLoop, PlaybackState, TransportAction, TransportController, TransportState};
