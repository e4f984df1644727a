//! Command-line adapter.

pub mod add;
pub mod balances;
pub mod check;
pub mod command;
pub mod hedge;
pub mod output;
pub mod run;
pub mod settle;
pub mod stats;
