//! `grocery` command-line entry point.

mod cli;
mod commands;
mod render;
mod shell;

use anyhow::{Context as _, Result};
use clap::Parser;
use cli::{Cli, Command};
use commands::Context;
use grocery_core::{core_version, init_logging, AppConfig, TodoStore};
use log::info;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut out = io::stdout().lock();
    if let Command::Version = cli.command {
        return commands::print_version(&mut out);
    }

    let config = AppConfig::from_env()?.with_overrides(
        cli.db,
        cli.log_level.as_deref(),
        cli.log_dir,
    )?;
    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(config.log_level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={} db_path={}",
        core_version(),
        config.db_path.display()
    );

    let store = TodoStore::open(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    commands::execute(cli.command, &Context::new(store)?, &mut out)
}
