//! Back/lay hedge stake solver.
//!
//! Given a back bet at a bookmaker and a lay price at an exchange that
//! charges commission on winnings, compute the lay stake that locks in the
//! same result whichever side wins.
//!
//! ```
//! use betledger::domain::hedge::{solve_lay, LayRequest};
//! use rust_decimal_macros::dec;
//!
//! let request = LayRequest::new(dec!(2.5), dec!(10), dec!(2.55), dec!(4.5), false);
//! let solution = solve_lay(&request);
//!
//! assert_eq!(solution.lay_stake.round_dp(2), dec!(9.98));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

use super::money::{Money, Odds, Percent};

/// Smallest `lay_odds - commission` the solver will divide by.
const MIN_DIVISOR: Decimal = dec!(0.000001);

/// Why a lay request cannot be solved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HedgeError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: Decimal },

    #[error("commission must be in [0, 100), got {value}")]
    CommissionOutOfRange { value: Decimal },

    #[error("lay odds {lay_odds} are too close to the commission rate {commission}")]
    DegenerateDivisor { lay_odds: Odds, commission: Decimal },

    #[error("lay calculation overflows the decimal range")]
    Overflow,
}

/// Inputs to the lay solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayRequest {
    pub back_odds: Odds,
    pub back_stake: Money,
    pub lay_odds: Odds,
    /// Exchange commission in percent (4.5 means 4.5%).
    pub commission_pct: Percent,
    /// The back bet is a freebet; its stake is not returned on a win.
    pub is_freebet: bool,
}

impl LayRequest {
    #[must_use]
    pub fn new(
        back_odds: Odds,
        back_stake: Money,
        lay_odds: Odds,
        commission_pct: Percent,
        is_freebet: bool,
    ) -> Self {
        Self {
            back_odds,
            back_stake,
            lay_odds,
            commission_pct,
            is_freebet,
        }
    }

    fn validate(&self) -> Result<(), HedgeError> {
        for (field, value) in [
            ("back odds", self.back_odds),
            ("back stake", self.back_stake),
            ("lay odds", self.lay_odds),
        ] {
            if value <= Decimal::ZERO {
                return Err(HedgeError::NonPositive { field, value });
            }
        }
        if self.commission_pct < Decimal::ZERO || self.commission_pct >= Decimal::ONE_HUNDRED {
            return Err(HedgeError::CommissionOutOfRange {
                value: self.commission_pct,
            });
        }
        Ok(())
    }
}

/// Result of a lay calculation. All zero for invalid input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LaySolution {
    pub lay_stake: Money,
    /// Amount lost at the exchange if the selection wins.
    pub liability: Money,
    pub profit_if_back_wins: Money,
    pub profit_if_lay_wins: Money,
}

impl LaySolution {
    /// Returns true for the all-zero result of an invalid request.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Solve a lay request, reporting why invalid input was rejected.
pub fn try_solve_lay(request: &LayRequest) -> Result<LaySolution, HedgeError> {
    request.validate()?;

    let commission = request
        .commission_pct
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or(HedgeError::Overflow)?;
    let back_profit = if request.is_freebet {
        request
            .back_stake
            .checked_mul(request.back_odds - Decimal::ONE)
    } else {
        request
            .back_stake
            .checked_mul(request.back_odds)
            .and_then(|back_return| back_return.checked_sub(request.back_stake))
    }
    .ok_or(HedgeError::Overflow)?;

    let divisor = request.lay_odds - commission;
    if divisor <= MIN_DIVISOR {
        return Err(HedgeError::DegenerateDivisor {
            lay_odds: request.lay_odds,
            commission,
        });
    }

    let lay_stake = back_profit
        .checked_add(request.back_stake)
        .and_then(|total| total.checked_div(divisor))
        .ok_or(HedgeError::Overflow)?;
    let liability = lay_stake
        .checked_mul(request.lay_odds - Decimal::ONE)
        .ok_or(HedgeError::Overflow)?;
    let profit_if_back_wins = back_profit
        .checked_sub(liability)
        .ok_or(HedgeError::Overflow)?;
    let profit_if_lay_wins = lay_stake
        .checked_mul(Decimal::ONE - commission)
        .and_then(|kept| kept.checked_sub(request.back_stake))
        .ok_or(HedgeError::Overflow)?;

    Ok(LaySolution {
        lay_stake,
        liability,
        profit_if_back_wins,
        profit_if_lay_wins,
    })
}

/// Solve a lay request; invalid input yields [`LaySolution::default`].
#[must_use]
pub fn solve_lay(request: &LayRequest) -> LaySolution {
    try_solve_lay(request).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(back_odds: Decimal, back_stake: Decimal, lay_odds: Decimal, pct: Decimal) -> LayRequest {
        LayRequest::new(back_odds, back_stake, lay_odds, pct, false)
    }

    #[test]
    fn balanced_hedge_with_commission() {
        let solution = solve_lay(&request(dec!(2.5), dec!(10), dec!(2.55), dec!(4.5)));

        // (15 + 10) / (2.55 - 0.045)
        assert_eq!(solution.lay_stake.round_dp(4), dec!(9.9800));
        assert_eq!(solution.liability, solution.lay_stake * dec!(1.55));
        assert_eq!(
            solution.profit_if_back_wins.round_dp(6),
            solution.profit_if_lay_wins.round_dp(6)
        );
        assert_eq!(solution.profit_if_back_wins.round_dp(2), dec!(-0.47));
    }

    #[test]
    fn zero_commission_even_odds() {
        let solution = solve_lay(&request(dec!(2), dec!(10), dec!(2), dec!(0)));

        assert_eq!(solution.lay_stake, dec!(10));
        assert_eq!(solution.liability, dec!(10));
        assert_eq!(solution.profit_if_back_wins, Decimal::ZERO);
        assert_eq!(solution.profit_if_lay_wins, Decimal::ZERO);
    }

    #[test]
    fn freebet_uses_winnings_only() {
        let free = LayRequest::new(dec!(3), dec!(10), dec!(3), dec!(0), true);
        let solution = solve_lay(&free);

        // back profit 20, lay stake (20 + 10) / 3
        assert_eq!(solution.lay_stake, dec!(10));
        assert_eq!(solution.liability, dec!(20));
        assert_eq!(solution.profit_if_back_wins, Decimal::ZERO);
    }

    #[test]
    fn zero_back_odds_yields_zero_result() {
        let solution = solve_lay(&request(dec!(0), dec!(10), dec!(2.5), dec!(5)));
        assert!(solution.is_zero());
        assert_eq!(
            try_solve_lay(&request(dec!(0), dec!(10), dec!(2.5), dec!(5))).unwrap_err(),
            HedgeError::NonPositive {
                field: "back odds",
                value: dec!(0)
            }
        );
    }

    #[test]
    fn negative_stake_yields_zero_result() {
        assert!(solve_lay(&request(dec!(2), dec!(-5), dec!(2), dec!(5))).is_zero());
    }

    #[test]
    fn commission_out_of_range_is_rejected() {
        let err = try_solve_lay(&request(dec!(2), dec!(10), dec!(2), dec!(100))).unwrap_err();
        assert!(matches!(err, HedgeError::CommissionOutOfRange { .. }));
        assert!(solve_lay(&request(dec!(2), dec!(10), dec!(2), dec!(-1))).is_zero());
    }

    #[test]
    fn near_zero_divisor_is_rejected() {
        // 0.05 lay odds against a 5% commission
        let err = try_solve_lay(&request(dec!(2), dec!(10), dec!(0.05), dec!(5))).unwrap_err();
        assert!(matches!(err, HedgeError::DegenerateDivisor { .. }));
        assert!(solve_lay(&request(dec!(2), dec!(10), dec!(0.05), dec!(5))).is_zero());
    }

    #[test]
    fn oversized_back_stake_overflows_to_zero_result() {
        let huge = request(dec!(10), Decimal::MAX, dec!(2), dec!(5));
        assert_eq!(try_solve_lay(&huge).unwrap_err(), HedgeError::Overflow);
        assert!(solve_lay(&huge).is_zero());
    }

    #[test]
    fn oversized_freebet_overflows_to_zero_result() {
        let huge = LayRequest::new(Decimal::MAX, dec!(2), dec!(3), dec!(0), true);
        assert_eq!(try_solve_lay(&huge).unwrap_err(), HedgeError::Overflow);
        assert!(solve_lay(&huge).is_zero());
    }
}
