// src/ui/mod.rs
//! UI module - terminal rendering, on-canvas controls, and input.

pub mod controls;
pub mod keybindings;
pub mod tui;
pub mod widgets;

// Re-export main entry point
pub use tui::run;
