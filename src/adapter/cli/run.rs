//! Entry point for the CLI: resolve configuration and dispatch.

use std::io::IsTerminal;

use super::command::{CheckCommand, Cli, ColorChoice, Commands};
use super::output::{self, OutputConfig};
use super::{add, balances, check, hedge, settle, stats};
use crate::adapter::store::JsonStore;
use crate::application::LedgerService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Translate global flags into output settings.
pub fn output_config(cli: &Cli) -> OutputConfig {
    let color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    };
    OutputConfig::new(cli.json, cli.quiet, color && !cli.json)
}

/// Log level implied by `-v` flags, if any.
fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Load configuration, initialize logging and run the selected command.
pub fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(level) = verbosity_level(cli.verbose) {
        config.logging.level = level.to_string();
    }
    if let Some(path) = &cli.ledger {
        config.ledger.path.clone_from(path);
    }
    config.init_logging();

    let store = JsonStore::open(config.ledger.path.clone());

    match &cli.command {
        Commands::Stats(args) => stats::execute(&LedgerService::new(store), args),
        Commands::Balances => balances::execute(&LedgerService::new(store)),
        Commands::Hedge(args) => hedge::execute(args, config.hedge.default_commission_pct),
        Commands::Add(command) => add::execute(&LedgerService::new(store), command),
        Commands::Settle(args) => settle::execute(&LedgerService::new(store), args),
        Commands::Check(CheckCommand::Config) => check::execute_config(&cli.config, &config, &store),
    }
}

/// Report a failed command and exit with a non-zero status.
pub fn fail(err: &crate::error::Error) -> ! {
    output::error(&err.to_string());
    std::process::exit(1);
}
