use anyhow::Result;
use clap::Parser;
use log::info;

use songreader::{config::Config, logging, ui};

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(&config.log_file)?;

    info!(
        "starting songreader v{} with {}",
        env!("CARGO_PKG_VERSION"),
        config.audio.display()
    );

    ui::run(config)
}
