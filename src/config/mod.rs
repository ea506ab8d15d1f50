// src/config/mod.rs
//! Startup configuration parsed from the command line.

use std::path::PathBuf;

use clap::Parser;

/// Default asset loaded when no path is given.
pub const DEFAULT_AUDIO_PATH: &str = "Audio/love-is-darkness.mp3";

/// Audio-reactive terminal visualizer.
#[derive(Parser, Debug, Clone)]
#[command(name = "songreader", version, about)]
pub struct Config {
    /// Audio file to visualize (played in a loop)
    #[arg(default_value = DEFAULT_AUDIO_PATH)]
    pub audio: PathBuf,

    /// Frames rendered per second while playing
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Log file (the terminal is taken over by the UI)
    #[arg(long, default_value = "songreader.log")]
    pub log_file: PathBuf,

    /// Seed for sparkle placement and wave noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Base hue of the pulsing rings, in degrees
    #[arg(long, default_value_t = 0.0)]
    pub base_hue: f64,
}

impl Config {
    /// Resolve the seed, drawing a random one if none was supplied.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio: PathBuf::from(DEFAULT_AUDIO_PATH),
            fps: 60,
            log_file: PathBuf::from("songreader.log"),
            seed: None,
            base_hue: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parsed_empty_args() {
        let parsed = Config::try_parse_from(["songreader"]).unwrap();
        let default = Config::default();
        assert_eq!(parsed.audio, default.audio);
        assert_eq!(parsed.fps, default.fps);
        assert_eq!(parsed.log_file, default.log_file);
        assert_eq!(parsed.seed, None);
    }

    #[test]
    fn test_fps_out_of_range_is_rejected() {
        assert!(Config::try_parse_from(["songreader", "--fps", "0"]).is_err());
        assert!(Config::try_parse_from(["songreader", "--fps", "1000"]).is_err());
    }

    #[test]
    fn test_explicit_seed_is_kept() {
        let parsed = Config::try_parse_from(["songreader", "song.ogg", "--seed", "7"]).unwrap();
        assert_eq!(parsed.audio, PathBuf::from("song.ogg"));
        assert_eq!(parsed.resolved_seed(), 7);
    }
}
