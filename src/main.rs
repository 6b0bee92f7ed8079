mod budget;
mod config;
mod error;
mod import;
mod logging;
mod models;
mod money;
mod run;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    logging::init(logging::is_tui(&args));

    let (config, source) = config::load().context("Failed to load budget config")?;
    tracing::debug!(%source, "Using budget config");

    if args.len() > 1 {
        run::as_cli(&args, config, source)
    } else {
        run::as_tui(ui::app::App::with_samples(config))
    }
}
