//! Storage-agnostic betting domain: records, settlement and aggregation.

pub mod attribution;
pub mod bet;
pub mod bookmaker;
pub mod error;
pub mod hedge;
pub mod id;
pub mod ledger;
pub mod money;
pub mod settlement;

pub use attribution::{attribute, balances, BookmakerBalance};
pub use bet::{Bet, BetStatus, Leg, SingleBet, Sport, SportLabel, SurebetPosition};
pub use bookmaker::{Bookmaker, FreeSpin};
pub use error::DomainError;
pub use hedge::{solve_lay, try_solve_lay, HedgeError, LayRequest, LaySolution};
pub use id::{BetId, BookmakerId, FreeSpinId};
pub use ledger::{aggregate, breakdown_by_sport, profit_series, BetFilter, DateRange, LedgerSummary, ProfitPoint};
pub use money::{Money, Odds, Percent};
pub use settlement::{capital_at_risk, resolve_winning_leg, settle, SettlementError};
