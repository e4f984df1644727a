//! Ledger use cases: load records from a store and run the engine.
//!
//! Every call reads fresh records and recomputes from scratch; nothing is
//! cached between calls.

use tracing::{debug, info, warn};

use crate::domain::{
    aggregate, balances, breakdown_by_sport, profit_series, settle, Bet, BetFilter, BetId,
    BetStatus, BookmakerBalance, BookmakerId, LedgerSummary, Money, ProfitPoint, Sport,
};
use crate::error::Result;
use crate::port::LedgerStore;

/// Outcome of recording a settlement.
#[derive(Debug, Clone)]
pub struct SettledBet {
    pub bet: Bet,
    /// Realized profit, or `None` when the record is inconsistent.
    pub profit: Option<Money>,
}

/// Application service over a [`LedgerStore`].
pub struct LedgerService<S> {
    store: S,
}

impl<S: LedgerStore> LedgerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Portfolio statistics for the bets matching `filter`.
    pub fn summary(&self, filter: &BetFilter) -> Result<LedgerSummary> {
        let bets = self.store.bets()?;
        let summary = aggregate(&bets, filter);
        report_inconsistent("summary", &summary.inconsistent);
        debug!(
            loaded = bets.len(),
            counted = summary.total_bets,
            profit = %summary.total_profit,
            "ledger aggregated"
        );
        Ok(summary)
    }

    /// Per-sport statistics for the bets matching `filter`.
    pub fn breakdown(&self, filter: &BetFilter) -> Result<Vec<(Sport, LedgerSummary)>> {
        let bets = self.store.bets()?;
        Ok(breakdown_by_sport(&bets, filter))
    }

    /// Cumulative profit curve for the bets matching `filter`.
    pub fn series(&self, filter: &BetFilter) -> Result<Vec<ProfitPoint>> {
        let bets = self.store.bets()?;
        Ok(profit_series(&bets, filter))
    }

    /// Current balance of every bookmaker.
    pub fn balances(&self) -> Result<Vec<BookmakerBalance>> {
        let bookmakers = self.store.bookmakers()?;
        let bets = self.store.bets()?;
        let spins = self.store.free_spins()?;

        let all = balances(&bookmakers, &bets, &spins);
        for balance in &all {
            if !balance.inconsistent.is_empty() {
                warn!(
                    bookmaker = %balance.bookmaker_id,
                    bets = ?balance.inconsistent,
                    "bets skipped in bookmaker balance"
                );
            }
            if !balance.skipped_spins.is_empty() {
                warn!(
                    bookmaker = %balance.bookmaker_id,
                    spins = ?balance.skipped_spins,
                    "free spins skipped in bookmaker balance"
                );
            }
        }
        Ok(all)
    }

    /// Record a new bet.
    ///
    /// Returns the bookmakers the bet references that the ledger does not
    /// list. Such bets still count in statistics but never reach a balance.
    pub fn record(&self, bet: Bet) -> Result<Vec<BookmakerId>> {
        let known = self.store.bookmakers()?;
        let unknown: Vec<BookmakerId> = bet
            .bookmakers()
            .into_iter()
            .filter(|id| !known.iter().any(|bookmaker| bookmaker.id() == *id))
            .cloned()
            .collect();

        let bet_id = bet.id().clone();
        self.store.add_bet(bet)?;
        if !unknown.is_empty() {
            warn!(bet_id = %bet_id, bookmakers = ?unknown, "bet references unlisted bookmakers");
        }
        Ok(unknown)
    }

    /// Settle a pending bet and report its realized profit.
    pub fn settle(
        &self,
        id: &BetId,
        status: BetStatus,
        winning_leg: Option<usize>,
    ) -> Result<SettledBet> {
        let bet = self.store.settle_bet(id, status, winning_leg)?;
        let profit = match settle(&bet) {
            Ok(profit) => {
                info!(bet_id = %id, status = %status, profit = %profit, "bet settled");
                Some(profit)
            }
            Err(err) => {
                warn!(bet_id = %id, error = %err, "bet settled with inconsistent figures");
                None
            }
        };
        Ok(SettledBet { bet, profit })
    }
}

fn report_inconsistent(context: &str, ids: &[BetId]) {
    if !ids.is_empty() {
        warn!(context, bets = ?ids, "settled bets excluded: profit could not be determined");
    }
}
