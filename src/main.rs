//! src/main.rs
//!
//! Entrypoint: parse arguments, set up logging, delegate to `app::run()`.

use std::fs::File;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use vj_console::app;
use vj_console::config::Args;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // The terminal belongs to the UI, so logs go to a file.
    let log_file = File::create(&args.log_file)
        .wrap_err_with(|| format!("creating log file {}", args.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    app::run(args)
}
