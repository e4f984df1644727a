//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for bets, legs, bookmakers and free spins.
//! - [`ledger`] - A canned ledger document covering every bet kind.

pub mod domain;
pub mod ledger;
