//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by `try_new` constructors that validate inputs.
//!
//! # Examples
//!
//! Handling validation errors:
//!
//! ```
//! use betledger::domain::{BookmakerId, DomainError, Leg};
//! use rust_decimal_macros::dec;
//!
//! // Decimal odds below 1.0 are rejected
//! let result = Leg::try_new(BookmakerId::new("bk-1"), dec!(10), dec!(0.8), false);
//!
//! assert!(matches!(result, Err(DomainError::OddsBelowOne { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::bet::BetStatus;

/// Errors that occur when domain invariants are violated.
///
/// These errors are returned by `try_new` constructors and other methods
/// that validate domain rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Stakes must be positive.
    #[error("stake must be positive, got {stake}")]
    NonPositiveStake {
        /// The invalid stake that was provided.
        stake: Decimal,
    },

    /// Decimal odds cannot be below 1.0.
    #[error("odds must be at least 1.0, got {odds}")]
    OddsBelowOne {
        /// The invalid odds that were provided.
        odds: Decimal,
    },

    /// A surebet position needs at least one leg.
    #[error("legs cannot be empty")]
    EmptyLegs,

    /// An explicit winning leg must point inside the leg list.
    #[error("winning leg {index} is out of range for {legs} legs")]
    WinningLegOutOfRange {
        /// The requested leg index.
        index: usize,
        /// Number of legs on the position.
        legs: usize,
    },

    /// Only a won position can name a winning leg.
    #[error("a winning leg can only be recorded on a won position")]
    WinningLegWithoutWin,

    /// Single bets have no legs to choose from.
    #[error("single bets have no legs to mark as winning")]
    WinningLegOnSingle,

    /// Bookmaker bankrolls cannot start negative.
    #[error("initial bankroll cannot be negative, got {bankroll}")]
    NegativeBankroll {
        /// The invalid bankroll.
        bankroll: Decimal,
    },

    /// Settled bets never change status again.
    #[error("cannot move bet from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: BetStatus,
        /// Requested status.
        to: BetStatus,
    },
}
