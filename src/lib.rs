//! Betledger - sports-betting settlement and ledger engine.
//!
//! Settles single bets and multi-leg surebet positions, aggregates a
//! portfolio of bets into profit, win-rate and ROI figures, attributes
//! realized profit to each bookmaker account and solves back/lay hedge
//! stakes against a commission-charging exchange.
//!
//! # Architecture
//!
//! - [`domain`] - Pure settlement, aggregation, attribution and hedge math
//! - [`port`] - Storage trait the application layer depends on
//! - [`adapter`] - JSON and in-memory stores, the `betledger` CLI
//! - [`application`] - Use cases wiring a store to the engine
//! - [`infrastructure`] - Configuration and logging setup
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use betledger::domain::{settle, Bet, BetId, BetStatus, BookmakerId, SingleBet, Sport};
//! use chrono::Utc;
//! use rust_decimal_macros::dec;
//!
//! let bet = Bet::Single(
//!     SingleBet::try_new(
//!         BetId::new("b1"),
//!         "Arsenal v Chelsea",
//!         Sport::Football,
//!         "1X2",
//!         "Arsenal",
//!         dec!(100),
//!         dec!(2),
//!         BetStatus::Won,
//!         Utc::now(),
//!         BookmakerId::new("bk-a"),
//!     )
//!     .unwrap(),
//! );
//!
//! assert_eq!(settle(&bet).unwrap(), dec!(100));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
