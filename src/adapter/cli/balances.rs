//! Handler for `betledger balances`.

use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::application::LedgerService;
use crate::domain::BookmakerBalance;
use crate::error::Result;
use crate::port::LedgerStore;

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Bookmaker")]
    name: String,
    #[tabled(rename = "Bankroll")]
    bankroll: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Bets")]
    bets: usize,
}

impl From<&BookmakerBalance> for BalanceRow {
    fn from(balance: &BookmakerBalance) -> Self {
        Self {
            name: balance.name.clone(),
            bankroll: output::money(balance.initial_bankroll),
            profit: output::money(balance.profit),
            balance: output::money(balance.current_balance),
            bets: balance.settled_bets,
        }
    }
}

/// Print the derived balance of every bookmaker.
pub fn execute<S: LedgerStore>(service: &LedgerService<S>) -> Result<()> {
    let balances = service.balances()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "balances",
            "balances": balances,
        }));
        return Ok(());
    }

    output::section("Bookmaker balances");
    if balances.is_empty() {
        output::field("Bookmakers", "none");
        output::hint("add bookmakers to the ledger file");
        return Ok(());
    }

    let rows: Vec<BalanceRow> = balances.iter().map(BalanceRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    for balance in balances.iter().filter(|b| !b.inconsistent.is_empty()) {
        let ids: Vec<String> = balance.inconsistent.iter().map(ToString::to_string).collect();
        output::warning(&format!(
            "{}: skipped bets with unresolvable or out-of-range figures: {}",
            balance.name,
            ids.join(", ")
        ));
    }
    for balance in balances.iter().filter(|b| !b.skipped_spins.is_empty()) {
        let ids: Vec<String> = balance.skipped_spins.iter().map(ToString::to_string).collect();
        output::warning(&format!(
            "{}: skipped free spins that overflow the balance: {}",
            balance.name,
            ids.join(", ")
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookmakerId;
    use rust_decimal_macros::dec;

    #[test]
    fn balance_row_formats_money() {
        let balance = BookmakerBalance {
            bookmaker_id: BookmakerId::new("bk-a"),
            name: "Alpha".to_string(),
            initial_bankroll: dec!(1000),
            profit: dec!(48),
            current_balance: dec!(1048),
            staked: dec!(152),
            settled_bets: 2,
            inconsistent: Vec::new(),
            skipped_spins: Vec::new(),
        };

        let row = BalanceRow::from(&balance);
        assert_eq!(row.name, "Alpha");
        assert_eq!(row.bankroll, "1000.00");
        assert_eq!(row.balance, "1048.00");
        assert_eq!(row.bets, 2);
    }
}
