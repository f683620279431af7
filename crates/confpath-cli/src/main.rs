//! confpath CLI
//!
//! Flattens device configurations to CwP-text, searches them by path and
//! applies edit scripts.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = context::resolve_settings(&cli.settings)?;
    execute_command(cli.command, settings)
}

fn execute_command(cmd: Commands, settings: confpath_core::EditSettings) -> Result<()> {
    match cmd {
        Commands::Flatten { file } => commands::run_flatten(&file, settings),
        Commands::Search {
            file,
            path,
            value,
            regex,
            json,
        } => commands::run_search(&file, &path, &value, regex, json, settings),
        Commands::Check { file, block, regex } => {
            commands::run_check(&file, &block, regex, settings)
        }
        Commands::Apply {
            file,
            script,
            output,
        } => commands::run_apply(&file, &script, output.as_deref(), settings),
    }
}
