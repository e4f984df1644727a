//! Bookmaker attribution: where did the money land?
//!
//! Splits each settled bet's cash flows across the bookmakers its stake was
//! placed at and derives every account's current balance from its initial
//! bankroll. Balances are never stored.
//!
//! For a multi-leg position a bookmaker is charged the stake of its own
//! non-freebet legs whatever the outcome, and credited the payout when the
//! winning leg was placed there. Summed over all of a position's
//! bookmakers this equals the position's settled profit.

use rust_decimal::Decimal;
use serde::Serialize;

use super::bet::{Bet, SurebetPosition};
use super::bookmaker::{Bookmaker, FreeSpin};
use super::id::{BetId, BookmakerId, FreeSpinId};
use super::money::Money;
use super::settlement::{resolve_winning_leg, settle, SettlementError};

/// Derived balance of one bookmaker account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookmakerBalance {
    pub bookmaker_id: BookmakerId,
    pub name: String,
    pub initial_bankroll: Money,
    /// Net profit attributed to the bookmaker, free spins included.
    pub profit: Money,
    /// `initial_bankroll + profit`.
    pub current_balance: Money,
    /// Capital committed at the bookmaker by settled bets.
    pub staked: Money,
    /// Settled bets that touched the bookmaker.
    pub settled_bets: usize,
    /// Settled bets skipped because their share could not be determined
    /// or would overflow the account totals.
    pub inconsistent: Vec<BetId>,
    /// Free spins skipped because their winnings would overflow the balance.
    pub skipped_spins: Vec<FreeSpinId>,
}

struct Share {
    profit: Money,
    staked: Money,
}

/// Running account totals. `current_balance` always equals
/// `initial_bankroll + profit`.
struct Totals {
    profit: Money,
    staked: Money,
    current_balance: Money,
}

impl Totals {
    fn opening(initial_bankroll: Money) -> Self {
        Self {
            profit: Decimal::ZERO,
            staked: Decimal::ZERO,
            current_balance: initial_bankroll,
        }
    }

    /// Apply a share, or return `None` and leave the totals unchanged if
    /// any figure overflows.
    fn add(&mut self, share: &Share) -> Option<()> {
        let profit = self.profit.checked_add(share.profit)?;
        let staked = self.staked.checked_add(share.staked)?;
        let current_balance = self.current_balance.checked_add(share.profit)?;
        *self = Self {
            profit,
            staked,
            current_balance,
        };
        Some(())
    }
}

/// Compute one bookmaker's balance from the full bet and free-spin lists.
#[must_use]
pub fn attribute(bookmaker: &Bookmaker, bets: &[Bet], free_spins: &[FreeSpin]) -> BookmakerBalance {
    let id = bookmaker.id();
    let mut totals = Totals::opening(bookmaker.initial_bankroll());
    let mut settled_bets = 0;
    let mut inconsistent = Vec::new();
    let mut skipped_spins = Vec::new();

    for bet in bets {
        if !bet.status().is_settled() || !bet.involves(id) {
            continue;
        }
        let applied = share_of(bet, id).and_then(|share| {
            totals.add(&share).ok_or_else(|| SettlementError::Overflow {
                bet_id: bet.id().clone(),
            })
        });
        match applied {
            Ok(()) => settled_bets += 1,
            Err(err) => inconsistent.push(err.bet_id().clone()),
        }
    }

    for spin in free_spins.iter().filter(|spin| &spin.bookmaker == id) {
        let winnings = Share {
            profit: spin.won(),
            staked: Decimal::ZERO,
        };
        if totals.add(&winnings).is_none() {
            skipped_spins.push(spin.id.clone());
        }
    }

    BookmakerBalance {
        bookmaker_id: id.clone(),
        name: bookmaker.name().to_string(),
        initial_bankroll: bookmaker.initial_bankroll(),
        profit: totals.profit,
        current_balance: totals.current_balance,
        staked: totals.staked,
        settled_bets,
        inconsistent,
        skipped_spins,
    }
}

/// Balances for every bookmaker, in input order.
#[must_use]
pub fn balances(
    bookmakers: &[Bookmaker],
    bets: &[Bet],
    free_spins: &[FreeSpin],
) -> Vec<BookmakerBalance> {
    bookmakers
        .iter()
        .map(|bookmaker| attribute(bookmaker, bets, free_spins))
        .collect()
}

fn share_of(bet: &Bet, bookmaker: &BookmakerId) -> Result<Share, SettlementError> {
    match bet {
        Bet::Single(single) => Ok(Share {
            profit: settle(bet)?,
            staked: single.stake(),
        }),
        Bet::Surebet(position) | Bet::PaSurebet(position) => position_share(position, bookmaker),
    }
}

fn position_share(
    position: &SurebetPosition,
    bookmaker: &BookmakerId,
) -> Result<Share, SettlementError> {
    let winner = resolve_winning_leg(position)?;
    let overflow = || SettlementError::Overflow {
        bet_id: position.id().clone(),
    };

    let mut payout = Decimal::ZERO;
    let mut cost = Decimal::ZERO;
    for (index, leg) in position.legs().iter().enumerate() {
        if leg.bookmaker() != bookmaker {
            continue;
        }
        cost = cost.checked_add(leg.capital_at_risk()).ok_or_else(overflow)?;
        if winner == Some(index) {
            let paid = leg.payout().ok_or_else(overflow)?;
            payout = payout.checked_add(paid).ok_or_else(overflow)?;
        }
    }

    Ok(Share {
        profit: payout.checked_sub(cost).ok_or_else(overflow)?,
        staked: cost,
    })
}
