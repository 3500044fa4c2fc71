pub mod cli;
pub mod commands;
pub mod error;
pub mod loader;
pub mod render;
pub mod schema;
pub mod source;
pub mod station;
pub mod summary;
pub mod table;
pub mod vehicles;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("ev_stations", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Clean(args) => commands::clean(&args),
        Commands::Provinces(args) => commands::provinces(&args),
        Commands::Districts(args) => commands::districts(&args),
        Commands::Filter(args) => commands::filter(&args),
        Commands::Summarize(args) => commands::summarize(&args),
        Commands::Vehicles(args) => commands::vehicles(&args),
    }
}
