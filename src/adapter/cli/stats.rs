//! Handler for `betledger stats`.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::StatsArgs;
use super::output;
use crate::application::LedgerService;
use crate::domain::{BetFilter, DateRange, LedgerSummary, ProfitPoint, Sport};
use crate::error::Result;
use crate::port::LedgerStore;

#[derive(Tabled)]
struct SportRow {
    #[tabled(rename = "Sport")]
    sport: String,
    #[tabled(rename = "Bets")]
    bets: usize,
    #[tabled(rename = "Won")]
    won: usize,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "ROI")]
    roi: String,
}

impl SportRow {
    fn new(sport: Sport, summary: &LedgerSummary) -> Self {
        Self {
            sport: sport.to_string(),
            bets: summary.total_bets,
            won: summary.won,
            stake: output::money(summary.total_stake),
            profit: output::money(summary.total_profit),
            roi: output::percent(summary.roi),
        }
    }
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Bet")]
    bet: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
}

impl From<&ProfitPoint> for SeriesRow {
    fn from(point: &ProfitPoint) -> Self {
        Self {
            date: point.date.format("%Y-%m-%d").to_string(),
            bet: point.bet_id.to_string(),
            profit: output::money(point.profit),
            cumulative: output::money(point.cumulative),
        }
    }
}

/// Build the aggregation filter from command-line arguments.
pub fn filter_from(args: &StatsArgs) -> BetFilter {
    BetFilter {
        sport: args.sport,
        result: args.result,
        date_range: DateRange::new(args.from, args.to),
    }
}

/// Print portfolio statistics.
pub fn execute<S: LedgerStore>(service: &LedgerService<S>, args: &StatsArgs) -> Result<()> {
    let filter = filter_from(args);
    let summary = service.summary(&filter)?;
    let breakdown = if args.by_sport {
        service.breakdown(&filter)?
    } else {
        Vec::new()
    };
    let series = if args.series {
        service.series(&filter)?
    } else {
        Vec::new()
    };

    if output::is_json() {
        let by_sport: Vec<_> = breakdown
            .iter()
            .map(|(sport, summary)| json!({ "sport": sport, "summary": summary }))
            .collect();
        output::json_output(json!({
            "command": "stats",
            "summary": summary,
            "by_sport": by_sport,
            "series": series,
        }));
        return Ok(());
    }

    output::section("Portfolio");
    output::field("Settled bets", summary.total_bets);
    output::field("Won / lost", format!("{} / {}", summary.won, summary.lost));
    output::field("Total stake", output::money(summary.total_stake));
    output::field("Profit", output::signed(summary.total_profit));
    output::field("Win rate", output::percent(summary.win_rate));
    output::field("ROI", output::percent(summary.roi));

    if !summary.inconsistent.is_empty() {
        let ids: Vec<String> = summary.inconsistent.iter().map(ToString::to_string).collect();
        output::warning(&format!(
            "excluded bets whose profit could not be determined: {}",
            ids.join(", ")
        ));
    }

    if args.by_sport {
        output::section("By sport");
        if breakdown.is_empty() {
            output::field("Sports", "none");
        } else {
            let rows: Vec<SportRow> = breakdown
                .iter()
                .map(|(sport, summary)| SportRow::new(*sport, summary))
                .collect();
            output::lines(&Table::new(rows).to_string());
        }
    }

    if args.series {
        output::section("Profit curve");
        if series.is_empty() {
            output::field("Points", "none");
        } else {
            let rows: Vec<SeriesRow> = series.iter().map(SeriesRow::from).collect();
            output::lines(&Table::new(rows).to_string());
        }
    }

    if summary.total_bets == 0 {
        output::hint("no settled bets match the filter");
    }

    Ok(())
}
