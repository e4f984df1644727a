//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`LedgerStore`] - Persistence for bets, bookmakers and free spins

mod store;

pub use store::LedgerStore;
