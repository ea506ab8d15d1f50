// src/lib.rs
//! Songreader - an audio-reactive terminal visualizer.
//!
//! A looping audio track drives five animated layers drawn on a braille
//! canvas, with on-canvas play, pause, refresh and mute controls.

pub mod app;
pub mod audio;
pub mod config;
pub mod fs;
pub mod logging;
pub mod ui;
pub mod visual;
