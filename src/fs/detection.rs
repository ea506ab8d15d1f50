// src/fs/detection.rs
//! File type detection using magic numbers and extension-based fallback.

use std::{fmt, path::Path};

use anyhow::{Context, Result};
use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

/// High-level file categories.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileCategory {
    Audio,
    Image,
    Video,
    Document,
    Binary,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Audio => "audio",
            FileCategory::Image => "image",
            FileCategory::Video => "video",
            FileCategory::Document => "document",
            FileCategory::Binary => "binary",
        };
        write!(f, "{}", s)
    }
}

/// Holds a detected MIME type + category.
#[derive(Debug, Clone)]
pub struct FileType {
    pub mime: String,
    pub category: FileCategory,
}

/// Detect MIME type & category for a given file path.
pub fn detect_file_type(path: &Path) -> Result<FileType> {
    // Magic numbers win over the extension
    let sniffed = Infer::new()
        .get_from_path(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    if let Some(kind) = sniffed {
        let category = match kind.matcher_type() {
            MatcherType::Audio => FileCategory::Audio,
            MatcherType::Image => FileCategory::Image,
            MatcherType::Video => FileCategory::Video,
            _ => FileCategory::Binary,
        };
        return Ok(FileType {
            mime: kind.mime_type().to_string(),
            category,
        });
    }

    let mime = MimeGuess::from_path(path).first_or_octet_stream().to_string();
    Ok(FileType {
        category: category_for_mime(&mime),
        mime,
    })
}

/// Map a MIME type's top-level part to a category.
fn category_for_mime(mime: &str) -> FileCategory {
    match mime.split('/').next().unwrap_or("application") {
        "audio" => FileCategory::Audio,
        "image" => FileCategory::Image,
        "video" => FileCategory::Video,
        "text" => FileCategory::Document,
        _ => FileCategory::Binary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_category_for_mime() {
        assert_eq!(category_for_mime("audio/mpeg"), FileCategory::Audio);
        assert_eq!(category_for_mime("text/plain"), FileCategory::Document);
        assert_eq!(category_for_mime("application/octet-stream"), FileCategory::Binary);
    }

    #[test]
    fn test_wav_header_is_sniffed_as_audio() {
        let path = std::env::temp_dir().join(format!("songreader-detect-{}.bin", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"RIFF\x24\x00\x00\x00WAVEfmt ").unwrap();
        drop(file);

        let detected = detect_file_type(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(detected.category, FileCategory::Audio);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(detect_file_type(Path::new("/definitely/not/here.mp3")).is_err());
    }
}
