// src/ui/widgets/mod.rs
//! Custom widgets for the songreader UI.

pub mod visualizer;

pub use visualizer::{cell_to_canvas, render_canvas};
