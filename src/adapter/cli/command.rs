//! Command-line interface definitions.
//!
//! Defines the CLI structure for the betledger application using `clap`.
//! Every subcommand reads the ledger file named by the configuration;
//! only `add` and `settle` write to it.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::domain::{BetStatus, Sport};

/// Sports-betting ledger: settlement, bookmaker balances and lay hedging
#[derive(Parser, Debug)]
#[command(name = "betledger")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value = "betledger.toml")]
    pub config: PathBuf,

    /// Ledger file to use instead of the configured one.
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the betledger CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show portfolio statistics
    Stats(StatsArgs),

    /// Show the current balance of every bookmaker
    Balances,

    /// Compute the lay stake that hedges a back bet
    Hedge(HedgeArgs),

    /// Record a new bet
    #[command(subcommand)]
    Add(AddCommand),

    /// Settle a pending bet
    Settle(SettleArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Arguments for the `stats` subcommand.
///
/// Omitted filters match everything.
#[derive(Parser, Debug, Default)]
pub struct StatsArgs {
    /// Only count bets on this sport.
    #[arg(long)]
    pub sport: Option<Sport>,

    /// Only count bets with this result (won, lost).
    #[arg(long)]
    pub result: Option<BetStatus>,

    /// First day to include (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day to include, whole day (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Break the figures down by sport.
    #[arg(long)]
    pub by_sport: bool,

    /// Print the cumulative profit curve.
    #[arg(long)]
    pub series: bool,
}

/// Arguments for the `hedge` subcommand.
#[derive(Parser, Debug)]
pub struct HedgeArgs {
    /// Decimal odds of the back bet.
    #[arg(long)]
    pub back_odds: Decimal,

    /// Stake of the back bet.
    #[arg(long)]
    pub back_stake: Decimal,

    /// Decimal lay odds at the exchange.
    #[arg(long)]
    pub lay_odds: Decimal,

    /// Exchange commission in percent (defaults to the configured value).
    #[arg(long)]
    pub commission: Option<Decimal>,

    /// The back bet is a freebet.
    #[arg(long)]
    pub freebet: bool,
}

/// Arguments for the `settle` subcommand.
#[derive(Parser, Debug)]
pub struct SettleArgs {
    /// Identifier of the bet to settle.
    pub bet_id: String,

    /// Outcome to record (won, lost).
    pub status: BetStatus,

    /// Zero-based index of the leg that paid out (surebets only).
    #[arg(long)]
    pub winning_leg: Option<usize>,
}

/// Subcommands for `betledger add`.
#[derive(Subcommand, Debug)]
pub enum AddCommand {
    /// Record a single bet at one bookmaker.
    Single(AddSingleArgs),

    /// Record a multi-leg surebet position.
    Surebet(AddSurebetArgs),
}

/// Fields shared by every new bet.
#[derive(Args, Debug)]
pub struct NewBetArgs {
    /// Identifier of the new bet; must be unused in the ledger.
    pub bet_id: String,

    /// Event description, e.g. "Lyon v Nantes".
    #[arg(long)]
    pub event: String,

    /// Outcome so far (pending, won, lost).
    #[arg(long, default_value = "pending")]
    pub status: BetStatus,

    /// When the bet was placed (RFC 3339, defaults to now).
    #[arg(long)]
    pub date: Option<DateTime<Utc>>,
}

/// Arguments for `betledger add single`.
#[derive(Args, Debug)]
pub struct AddSingleArgs {
    #[command(flatten)]
    pub bet: NewBetArgs,

    /// Sport name; unlisted sports are kept as written.
    #[arg(long)]
    pub sport: String,

    /// Market, e.g. "Match Result".
    #[arg(long, default_value = "")]
    pub market: String,

    /// Selection backed within the market.
    #[arg(long, default_value = "")]
    pub selection: String,

    /// Amount staked.
    #[arg(long)]
    pub stake: Decimal,

    /// Decimal odds taken.
    #[arg(long)]
    pub odds: Decimal,

    /// Bookmaker the bet was placed at.
    #[arg(long)]
    pub bookmaker: String,
}

/// Arguments for `betledger add surebet`.
#[derive(Args, Debug)]
pub struct AddSurebetArgs {
    #[command(flatten)]
    pub bet: NewBetArgs,

    /// One leg as BOOKMAKER:STAKE:ODDS, with a `:free` suffix for a freebet.
    #[arg(long = "leg", required = true)]
    pub legs: Vec<LegSpec>,

    /// Sport name; unlisted sports are kept as written.
    #[arg(long)]
    pub sport: Option<String>,

    /// Market description.
    #[arg(long)]
    pub market: Option<String>,

    /// Profit locked in when the position was placed.
    #[arg(long)]
    pub guaranteed_profit: Option<Decimal>,

    /// Zero-based index of the leg that paid out (won positions only).
    #[arg(long)]
    pub winning_leg: Option<usize>,

    /// Record as a pre-match arbitrage position (`pa_surebet`).
    #[arg(long)]
    pub pa: bool,
}

/// One surebet leg as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct LegSpec {
    pub bookmaker: String,
    pub stake: Decimal,
    pub odds: Decimal,
    pub freebet: bool,
}

impl FromStr for LegSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let freebet = match parts.as_slice() {
            [_, _, _] => false,
            [_, _, _, flag] if flag.eq_ignore_ascii_case("free") => true,
            _ => return Err(format!("expected BOOKMAKER:STAKE:ODDS[:free], got '{s}'")),
        };
        if parts[0].is_empty() {
            return Err(format!("missing bookmaker in leg '{s}'"));
        }
        let stake = parts[1]
            .parse()
            .map_err(|_| format!("invalid stake '{}' in leg '{s}'", parts[1]))?;
        let odds = parts[2]
            .parse()
            .map_err(|_| format!("invalid odds '{}' in leg '{s}'", parts[2]))?;

        Ok(Self {
            bookmaker: parts[0].to_string(),
            stake,
            odds,
            freebet,
        })
    }
}

/// Subcommands for `betledger check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file and the ledger it points at.
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_command_factory_builds() {
        // Verifies that the CLI definition is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name_and_version() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "betledger");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_color_choice_default_is_auto() {
        assert!(matches!(ColorChoice::default(), ColorChoice::Auto));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["betledger", "balances", "--json", "-q"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Balances));
    }

    #[test]
    fn test_parse_default_config_path() {
        let cli = Cli::try_parse_from(["betledger", "balances"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("betledger.toml"));
        assert!(cli.ledger.is_none());
    }

    #[test]
    fn test_parse_verbose_count() {
        let cli = Cli::try_parse_from(["betledger", "-vv", "balances"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_stats_filters() {
        let cli = Cli::try_parse_from([
            "betledger",
            "stats",
            "--sport",
            "tennis",
            "--result",
            "won",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
            "--by-sport",
        ])
        .unwrap();

        let Commands::Stats(args) = cli.command else {
            panic!("expected stats");
        };
        assert_eq!(args.sport, Some(Sport::Tennis));
        assert_eq!(args.result, Some(BetStatus::Won));
        assert_eq!(args.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(args.to, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert!(args.by_sport);
        assert!(!args.series);
    }

    #[test]
    fn test_parse_stats_rejects_unknown_sport() {
        let result = Cli::try_parse_from(["betledger", "stats", "--sport", "curling"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_hedge() {
        let cli = Cli::try_parse_from([
            "betledger",
            "hedge",
            "--back-odds",
            "2.5",
            "--back-stake",
            "10",
            "--lay-odds",
            "2.55",
            "--commission",
            "4.5",
        ])
        .unwrap();

        let Commands::Hedge(args) = cli.command else {
            panic!("expected hedge");
        };
        assert_eq!(args.back_odds, dec!(2.5));
        assert_eq!(args.back_stake, dec!(10));
        assert_eq!(args.lay_odds, dec!(2.55));
        assert_eq!(args.commission, Some(dec!(4.5)));
        assert!(!args.freebet);
    }

    #[test]
    fn test_parse_hedge_requires_odds() {
        let result = Cli::try_parse_from(["betledger", "hedge", "--back-stake", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_settle_with_winning_leg() {
        let cli =
            Cli::try_parse_from(["betledger", "settle", "sb3", "won", "--winning-leg", "1"])
                .unwrap();

        let Commands::Settle(args) = cli.command else {
            panic!("expected settle");
        };
        assert_eq!(args.bet_id, "sb3");
        assert_eq!(args.status, BetStatus::Won);
        assert_eq!(args.winning_leg, Some(1));
    }

    #[test]
    fn test_parse_add_single() {
        let cli = Cli::try_parse_from([
            "betledger",
            "add",
            "single",
            "b9",
            "--event",
            "Littler v Humphries",
            "--sport",
            "darts",
            "--stake",
            "25",
            "--odds",
            "2.4",
            "--bookmaker",
            "alpha",
        ])
        .unwrap();

        let Commands::Add(AddCommand::Single(args)) = cli.command else {
            panic!("expected add single");
        };
        assert_eq!(args.bet.bet_id, "b9");
        assert_eq!(args.bet.status, BetStatus::Pending);
        assert!(args.bet.date.is_none());
        assert_eq!(args.sport, "darts");
        assert_eq!(args.stake, dec!(25));
        assert_eq!(args.odds, dec!(2.4));
        assert_eq!(args.market, "");
    }

    #[test]
    fn test_parse_add_surebet_legs() {
        let cli = Cli::try_parse_from([
            "betledger",
            "add",
            "surebet",
            "sb9",
            "--event",
            "Inter v Milan",
            "--leg",
            "alpha:55:2.0",
            "--leg",
            "beta:40:3.1:free",
            "--status",
            "won",
            "--winning-leg",
            "1",
            "--date",
            "2024-03-09T18:30:00Z",
            "--pa",
        ])
        .unwrap();

        let Commands::Add(AddCommand::Surebet(args)) = cli.command else {
            panic!("expected add surebet");
        };
        assert_eq!(args.legs.len(), 2);
        assert_eq!(
            args.legs[1],
            LegSpec {
                bookmaker: "beta".to_string(),
                stake: dec!(40),
                odds: dec!(3.1),
                freebet: true,
            }
        );
        assert_eq!(args.winning_leg, Some(1));
        assert!(args.pa);
        assert!(args.bet.date.is_some());
    }

    #[test]
    fn test_parse_add_surebet_requires_legs() {
        let result =
            Cli::try_parse_from(["betledger", "add", "surebet", "sb9", "--event", "Inter v Milan"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_leg_spec_rejects_malformed_input() {
        assert!("alpha:10".parse::<LegSpec>().is_err());
        assert!("alpha:ten:2".parse::<LegSpec>().is_err());
        assert!("alpha:10:2:bonus".parse::<LegSpec>().is_err());
        assert!(":10:2".parse::<LegSpec>().is_err());
        assert!(!"alpha:10:2".parse::<LegSpec>().unwrap().freebet);
    }

    #[test]
    fn test_parse_check_config() {
        let cli = Cli::try_parse_from(["betledger", "check", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(CheckCommand::Config)));
    }
}
