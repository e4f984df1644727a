//! Configuration and ledger validation.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::adapter::store::JsonStore;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration and the ledger file it points at.
///
/// A configuration that failed to parse never reaches this handler; the
/// error is reported by the entry point.
pub fn execute_config(config_path: &Path, config: &Config, store: &JsonStore) -> Result<()> {
    let document = store.load()?;
    let pending = document
        .bets
        .iter()
        .filter(|bet| !bet.status().is_settled())
        .count();

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "config": config_path.display().to_string(),
            "config_found": config_path.exists(),
            "ledger": store.path().display().to_string(),
            "ledger_found": store.path().exists(),
            "bookmakers": document.bookmakers.len(),
            "bets": document.bets.len(),
            "pending": pending,
            "free_spins": document.free_spins.len(),
            "default_commission_pct": config.hedge.default_commission_pct,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Configuration Check");
    output::field("Config", config_path.display());
    if config_path.exists() {
        output::success("Configuration file is valid");
    } else {
        output::warning("Configuration file not found, using defaults");
    }
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);
    output::field("Commission", output::percent(config.hedge.default_commission_pct));

    output::section("Ledger");
    output::field("Path", store.path().display());
    if !store.path().exists() {
        output::warning("Ledger file not found, starting from an empty ledger");
    }
    output::field("Bookmakers", document.bookmakers.len());
    output::field("Bets", document.bets.len());
    output::field("Pending", pending);
    output::field("Free spins", document.free_spins.len());

    output::success("Ledger is valid");

    Ok(())
}
