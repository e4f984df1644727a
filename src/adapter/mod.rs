//! Implementations of ports (hexagonal adapters).

pub mod cli;
pub mod store;
