// src/logging.rs
//! File-backed logger; the terminal itself belongs to the UI.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use env_logger::{Env, Target};

/// Route `log` output to `path`, filtered by `RUST_LOG` (default `info`).
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("symphonia", log::LevelFilter::Warn)
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}
