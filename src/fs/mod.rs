// src/fs/mod.rs
//! Filesystem module - file type detection for the audio asset.

pub mod detection;

pub use detection::{detect_file_type, FileCategory, FileType};
