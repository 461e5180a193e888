#![windows_subsystem = "windows"]

use anyhow::Result;
use swapfees::{config::Config, gui};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Environment first; the GUI layers saved user settings on top
    let config = Config::from_env();
    gui::launch(config)?;

    Ok(())
}
