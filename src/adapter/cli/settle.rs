//! Handler for `betledger settle`.

use serde_json::json;

use super::command::SettleArgs;
use super::output;
use crate::application::LedgerService;
use crate::domain::BetId;
use crate::error::Result;
use crate::port::LedgerStore;

/// Record the outcome of a pending bet and print its realized profit.
pub fn execute<S: LedgerStore>(service: &LedgerService<S>, args: &SettleArgs) -> Result<()> {
    let id = BetId::new(args.bet_id.as_str());
    let settled = service.settle(&id, args.status, args.winning_leg)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "settle",
            "bet_id": id,
            "status": settled.bet.status(),
            "profit": settled.profit,
        }));
        return Ok(());
    }

    output::section("Settlement");
    output::field("Bet", &id);
    output::field("Event", settled.bet.event());
    output::field("Status", settled.bet.status());
    match settled.profit {
        Some(profit) => {
            output::field("Profit", output::signed(profit));
            output::success("Bet settled");
        }
        None => {
            output::warning("Bet settled but its profit cannot be determined");
            output::hint(&format!(
                "settle surebets with {} so the payout can be resolved",
                output::highlight("--winning-leg")
            ));
        }
    }

    Ok(())
}
