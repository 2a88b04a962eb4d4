pub mod augment;
pub mod check;
pub mod cli;
pub mod error;
pub mod io_utils;
pub mod loader;
pub mod pipeline;
pub mod schema;
pub mod schema_cmd;
pub mod sql;
pub mod statement;

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
            builder.filter_module("employee_sync", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => pipeline::execute(&args),
        Commands::Augment(args) => augment::execute(&args),
        Commands::Check(args) => check::execute(&args),
        Commands::Schema(args) => schema_cmd::execute(&args),
    }
}
