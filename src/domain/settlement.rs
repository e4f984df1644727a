//! Settlement: turning one bet record into realized profit.
//!
//! All profit figures flow from [`settle`]. Multi-leg positions resolve
//! their paying leg through [`resolve_winning_leg`], which is the only place
//! the winning leg is ever chosen; attribution uses the same resolver.

use rust_decimal::Decimal;
use thiserror::Error;

use super::bet::{Bet, BetStatus, SingleBet, SurebetPosition};
use super::id::BetId;
use super::money::Money;

/// A settled record whose numbers cannot produce a trustworthy profit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    /// A won position where no leg pays more than the capital at risk.
    #[error("won position {bet_id} has no leg paying more than the {capital} at risk")]
    NoWinningLeg {
        /// The offending position.
        bet_id: BetId,
        /// Capital at risk on the position.
        capital: Money,
    },

    /// Stake, payout or profit leaves the decimal range.
    #[error("amounts on bet {bet_id} overflow the decimal range")]
    Overflow {
        /// The offending bet.
        bet_id: BetId,
    },
}

impl SettlementError {
    /// The bet the error refers to.
    #[must_use]
    pub fn bet_id(&self) -> &BetId {
        match self {
            SettlementError::NoWinningLeg { bet_id, .. } | SettlementError::Overflow { bet_id } => {
                bet_id
            }
        }
    }
}

/// Stake actually exposed to loss: the stake of a single bet, or the sum
/// of non-freebet leg stakes of a position.
pub fn capital_at_risk(bet: &Bet) -> Result<Money, SettlementError> {
    match bet {
        Bet::Single(single) => Ok(single.stake()),
        Bet::Surebet(position) | Bet::PaSurebet(position) => position_capital(position),
    }
}

fn position_capital(position: &SurebetPosition) -> Result<Money, SettlementError> {
    position.capital_at_risk().ok_or_else(|| overflow(position.id()))
}

fn overflow(bet_id: &BetId) -> SettlementError {
    SettlementError::Overflow {
        bet_id: bet_id.clone(),
    }
}

/// Find the leg that paid out on a won position.
///
/// Returns `Ok(None)` when the position is not won. An explicitly recorded
/// winning leg always takes precedence; older records without one fall back
/// to the first leg whose payout exceeds the capital at risk.
pub fn resolve_winning_leg(position: &SurebetPosition) -> Result<Option<usize>, SettlementError> {
    if position.status() != BetStatus::Won {
        return Ok(None);
    }
    if let Some(index) = position.winning_leg() {
        return Ok(Some(index));
    }

    let capital = position_capital(position)?;
    for (index, leg) in position.legs().iter().enumerate() {
        let payout = leg.payout().ok_or_else(|| overflow(position.id()))?;
        if payout > capital {
            return Ok(Some(index));
        }
    }
    Err(SettlementError::NoWinningLeg {
        bet_id: position.id().clone(),
        capital,
    })
}

/// Realized profit of one bet. Pending bets settle to zero.
pub fn settle(bet: &Bet) -> Result<Money, SettlementError> {
    match bet {
        Bet::Single(single) => settle_single(single).ok_or_else(|| overflow(single.id())),
        Bet::Surebet(position) | Bet::PaSurebet(position) => settle_position(position),
    }
}

fn settle_single(bet: &SingleBet) -> Option<Money> {
    match bet.status() {
        BetStatus::Won => bet
            .stake()
            .checked_mul(bet.odds())
            .and_then(|payout| payout.checked_sub(bet.stake())),
        BetStatus::Lost => Some(-bet.stake()),
        BetStatus::Pending => Some(Decimal::ZERO),
    }
}

fn settle_position(position: &SurebetPosition) -> Result<Money, SettlementError> {
    match position.status() {
        BetStatus::Pending => Ok(Decimal::ZERO),
        // No leg paid anything.
        BetStatus::Lost => Ok(-position_capital(position)?),
        BetStatus::Won => {
            if position.winning_leg().is_none() {
                if let Some(profit) = position.guaranteed_profit() {
                    return Ok(profit);
                }
            }
            let Some(index) = resolve_winning_leg(position)? else {
                return Ok(Decimal::ZERO);
            };
            let capital = position_capital(position)?;
            position.legs()[index]
                .payout()
                .and_then(|payout| payout.checked_sub(capital))
                .ok_or_else(|| overflow(position.id()))
        }
    }
}
