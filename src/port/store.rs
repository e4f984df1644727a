//! Store port for ledger persistence.
//!
//! The settlement engine never touches storage; it receives the records
//! loaded through this trait and returns plain numbers.

use crate::domain::{Bet, BetId, BetStatus, Bookmaker, FreeSpin};
use crate::error::Result;

/// Storage operations for the bet ledger.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - Records are returned in insertion order
/// - Bets are never deleted; the only mutation is a status transition
pub trait LedgerStore: Send + Sync {
    /// All bets, pending and settled.
    fn bets(&self) -> Result<Vec<Bet>>;

    /// All bookmaker accounts.
    fn bookmakers(&self) -> Result<Vec<Bookmaker>>;

    /// All free-spin bonus records.
    fn free_spins(&self) -> Result<Vec<FreeSpin>>;

    /// Append a new bet. Fails if the id is already taken.
    fn add_bet(&self, bet: Bet) -> Result<()>;

    /// Move a pending bet to `won` or `lost` and return the updated record.
    fn settle_bet(
        &self,
        id: &BetId,
        status: BetStatus,
        winning_leg: Option<usize>,
    ) -> Result<Bet>;
}
