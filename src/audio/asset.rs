// src/audio/asset.rs
//! Loading the single audio asset that drives the visualization.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use log::{info, warn};
use rodio::Decoder;

use crate::fs::{detect_file_type, FileCategory};

/// Track details read from the asset's tags, if any.
#[derive(Debug, Clone, Default)]
pub struct TrackMetadata {
    /// Title from the primary tag.
    pub title: Option<String>,
    /// Total track length.
    pub duration: Option<Duration>,
}

/// An audio file held in memory, verified to be decodable.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    path: PathBuf,
    bytes: Arc<[u8]>,
    pub metadata: TrackMetadata,
}

impl AudioAsset {
    /// Read and validate the asset at `path`.
    ///
    /// Any failure here is fatal for the program: there is nothing to
    /// visualize without audio.
    pub fn load(path: &Path) -> Result<Self> {
        let file_type = detect_file_type(path)
            .with_context(|| format!("failed to load audio asset {}", path.display()))?;
        if file_type.category != FileCategory::Audio {
            bail!(
                "{} is not an audio file (detected {} as {})",
                path.display(),
                file_type.mime,
                file_type.category
            );
        }

        let bytes: Arc<[u8]> = std::fs::read(path)
            .with_context(|| format!("failed to read audio asset {}", path.display()))?
            .into();

        Decoder::new(Cursor::new(bytes.clone()))
            .with_context(|| format!("cannot decode audio asset {}", path.display()))?;

        let metadata = match load_metadata(path) {
            Ok(meta) => meta,
            Err(e) => {
                warn!("no tag metadata for {}: {e:#}", path.display());
                TrackMetadata::default()
            }
        };

        info!(
            "loaded {} ({} bytes, {}, duration {:?})",
            path.display(),
            bytes.len(),
            file_type.mime,
            metadata.duration
        );

        Ok(Self {
            path: path.to_path_buf(),
            bytes,
            metadata,
        })
    }

    /// A fresh reader over the asset's bytes.
    pub fn reader(&self) -> Cursor<Arc<[u8]>> {
        Cursor::new(self.bytes.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Title for display: tag title, falling back to the file stem.
    pub fn display_name(&self) -> String {
        self.metadata.title.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }
}

/// Probe the file with Lofty for its title and duration.
fn load_metadata(path: &Path) -> Result<TrackMetadata> {
    let tagged_file = Probe::open(path)?.read()?;

    let title = tagged_file
        .primary_tag()
        .and_then(|tag| tag.title().map(|t| t.into_owned()));

    let duration = tagged_file.properties().duration();
    let duration = (!duration.is_zero()).then_some(duration);

    Ok(TrackMetadata { title, duration })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_fails_with_path_in_message() {
        let err = AudioAsset::load(Path::new("/no/such/dir/love-is-darkness.mp3")).unwrap_err();
        assert!(format!("{err:#}").contains("love-is-darkness.mp3"));
    }

    #[test]
    fn test_non_audio_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("songreader-asset-{}.txt", std::process::id()));
        std::fs::write(&path, "just some words").unwrap();
        let err = AudioAsset::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{err:#}").contains("not an audio file"));
    }
}
