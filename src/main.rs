mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use std::{env, io};

use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

use handlers::console::Console;
use service::NoteService;

const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log setup, stderr keeps the console output clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let (filter, filter_handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    // Load config
    let cfg = config::load_config()?;
    if env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        filter_handle.reload(EnvFilter::try_new(&cfg.log_level)?)?;
    }
    tracing::info!("Using notes file {}", cfg.notes_file.display());

    // Service creation
    let service = NoteService::from_config(&cfg);

    // Console loop
    let stdin = io::stdin();
    Console::new(service, stdin.lock(), io::stdout().lock()).run()?;

    Ok(())
}
