//! Handler for `betledger add`.

use chrono::Utc;
use serde_json::json;

use super::command::{AddCommand, AddSingleArgs, AddSurebetArgs, LegSpec};
use super::output;
use crate::application::LedgerService;
use crate::domain::{Bet, BetId, BookmakerId, Leg, SingleBet, SurebetPosition};
use crate::error::Result;
use crate::port::LedgerStore;

/// Build the bet described by the command line.
pub fn bet_from(command: &AddCommand) -> Result<Bet> {
    match command {
        AddCommand::Single(args) => single_from(args),
        AddCommand::Surebet(args) => surebet_from(args),
    }
}

fn single_from(args: &AddSingleArgs) -> Result<Bet> {
    let bet = SingleBet::try_new(
        BetId::new(args.bet.bet_id.as_str()),
        args.bet.event.as_str(),
        args.sport.as_str(),
        args.market.as_str(),
        args.selection.as_str(),
        args.stake,
        args.odds,
        args.bet.status,
        args.bet.date.unwrap_or_else(Utc::now),
        BookmakerId::new(args.bookmaker.as_str()),
    )?;
    Ok(Bet::Single(bet))
}

fn leg_from(spec: &LegSpec) -> Result<Leg> {
    Ok(Leg::try_new(
        BookmakerId::new(spec.bookmaker.as_str()),
        spec.stake,
        spec.odds,
        spec.freebet,
    )?)
}

fn surebet_from(args: &AddSurebetArgs) -> Result<Bet> {
    let legs = args.legs.iter().map(leg_from).collect::<Result<Vec<_>>>()?;
    let mut position = SurebetPosition::try_new(
        BetId::new(args.bet.bet_id.as_str()),
        args.bet.event.as_str(),
        args.bet.status,
        args.bet.date.unwrap_or_else(Utc::now),
        legs,
        args.guaranteed_profit,
    )?;
    if let Some(sport) = &args.sport {
        position = position.with_sport(sport.as_str());
    }
    if let Some(market) = &args.market {
        position = position.with_market(market.as_str());
    }
    if let Some(index) = args.winning_leg {
        position = position.with_winning_leg(index)?;
    }

    Ok(if args.pa {
        Bet::PaSurebet(position)
    } else {
        Bet::Surebet(position)
    })
}

/// Append a new bet to the ledger.
pub fn execute<S: LedgerStore>(service: &LedgerService<S>, command: &AddCommand) -> Result<()> {
    let bet = bet_from(command)?;
    let id = bet.id().clone();
    let kind = bet.kind();
    let status = bet.status();
    let unknown = service.record(bet)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "add",
            "bet_id": id,
            "type": kind,
            "status": status,
            "unlisted_bookmakers": unknown,
        }));
        return Ok(());
    }

    output::section("New bet");
    output::field("Bet", &id);
    output::field("Type", kind);
    output::field("Status", status);
    output::success("Bet recorded");
    if !unknown.is_empty() {
        let ids: Vec<String> = unknown.iter().map(ToString::to_string).collect();
        output::warning(&format!(
            "bookmakers not listed in the ledger: {}",
            ids.join(", ")
        ));
        output::hint("bets at unlisted bookmakers are left out of every balance");
    }

    Ok(())
}
