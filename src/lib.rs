//! rStoryline library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Project { .. } => cli::commands::project::handle(&cli.command, cfg),
        Commands::Event { .. } => cli::commands::event::handle(&cli.command, cfg),
        Commands::Timeline { .. } => cli::commands::timeline::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `config` must still work on a broken file, so it can be fixed.
    let is_config_cmd = matches!(cli.command, Commands::Config { .. });

    // Test runs never read the user's config file.
    let mut cfg = if cli.test {
        Config::default()
    } else {
        match Config::load() {
            Ok(cfg) => cfg,
            Err(e) if is_config_cmd => {
                ui::messages::warning(format!("{e} (showing defaults)"));
                Config::default()
            }
            Err(e) => return Err(e),
        }
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_to_string(custom_db);
    }

    if !is_config_cmd {
        cfg.validate()?;
    }

    dispatch(&cli, &cfg)
}
