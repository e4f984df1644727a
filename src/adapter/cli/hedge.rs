//! Handler for `betledger hedge`.

use rust_decimal::Decimal;
use serde_json::json;

use super::command::HedgeArgs;
use super::output;
use crate::domain::{try_solve_lay, LayRequest, LaySolution};
use crate::error::Result;

/// Build the solver request, falling back to the configured commission.
pub fn request_from(args: &HedgeArgs, default_commission: Decimal) -> LayRequest {
    LayRequest::new(
        args.back_odds,
        args.back_stake,
        args.lay_odds,
        args.commission.unwrap_or(default_commission),
        args.freebet,
    )
}

/// Print the lay stake that equalizes both outcomes.
///
/// Invalid input is not an error: the all-zero solution is reported along
/// with the reason it was rejected.
pub fn execute(args: &HedgeArgs, default_commission: Decimal) -> Result<()> {
    let request = request_from(args, default_commission);
    let (solution, rejected) = match try_solve_lay(&request) {
        Ok(solution) => (solution, None),
        Err(err) => (LaySolution::default(), Some(err.to_string())),
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "hedge",
            "commission_pct": request.commission_pct,
            "freebet": request.is_freebet,
            "solution": solution,
            "rejected": rejected,
        }));
        return Ok(());
    }

    output::section("Lay hedge");
    output::field("Back", format!("{} @ {}", request.back_stake, request.back_odds));
    output::field("Lay odds", request.lay_odds);
    output::field("Commission", output::percent(request.commission_pct));
    if request.is_freebet {
        output::field("Freebet", "yes");
    }

    if let Some(reason) = rejected {
        output::warning(&format!("cannot hedge: {reason}"));
    }

    output::section("Result");
    output::field("Lay stake", output::money(solution.lay_stake));
    output::field("Liability", output::money(solution.liability));
    output::field("If back wins", output::signed(solution.profit_if_back_wins));
    output::field("If lay wins", output::signed(solution.profit_if_lay_wins));

    Ok(())
}
