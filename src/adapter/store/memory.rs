//! In-memory store implementation for tests and embedding.

use parking_lot::RwLock;

use super::document::LedgerDocument;
use crate::domain::{Bet, BetId, BetStatus, Bookmaker, FreeSpin};
use crate::error::Result;
use crate::port::LedgerStore;

/// In-memory ledger guarded by a read/write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<LedgerDocument>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a document.
    pub fn with_document(document: LedgerDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }

    /// Add a bookmaker account.
    pub fn add_bookmaker(&self, bookmaker: Bookmaker) {
        self.document.write().bookmakers.push(bookmaker);
    }

    /// Add a free-spin record.
    pub fn add_free_spin(&self, spin: FreeSpin) {
        self.document.write().free_spins.push(spin);
    }

    /// Copy of the current document.
    pub fn snapshot(&self) -> LedgerDocument {
        self.document.read().clone()
    }
}

impl LedgerStore for MemoryStore {
    fn bets(&self) -> Result<Vec<Bet>> {
        Ok(self.document.read().bets.clone())
    }

    fn bookmakers(&self) -> Result<Vec<Bookmaker>> {
        Ok(self.document.read().bookmakers.clone())
    }

    fn free_spins(&self) -> Result<Vec<FreeSpin>> {
        Ok(self.document.read().free_spins.clone())
    }

    fn add_bet(&self, bet: Bet) -> Result<()> {
        self.document.write().add_bet(bet)
    }

    fn settle_bet(
        &self,
        id: &BetId,
        status: BetStatus,
        winning_leg: Option<usize>,
    ) -> Result<Bet> {
        self.document.write().settle_bet(id, status, winning_leg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{bookmaker, pending_single};
    use rust_decimal_macros::dec;

    #[test]
    fn starts_empty() {
        let store = MemoryStore::new();
        assert!(store.bets().unwrap().is_empty());
        assert!(store.bookmakers().unwrap().is_empty());
        assert!(store.free_spins().unwrap().is_empty());
    }

    #[test]
    fn add_and_settle_bet() {
        let store = MemoryStore::new();
        store.add_bookmaker(bookmaker("bk-a", dec!(100)));
        store.add_bet(pending_single("b1", "bk-a")).unwrap();

        let settled = store
            .settle_bet(&BetId::new("b1"), BetStatus::Won, None)
            .unwrap();

        assert_eq!(settled.status(), BetStatus::Won);
        assert_eq!(store.bets().unwrap()[0].status(), BetStatus::Won);
        assert_eq!(store.snapshot().bookmakers.len(), 1);
    }

    #[test]
    fn failed_transition_leaves_bet_untouched() {
        let store = MemoryStore::new();
        store.add_bet(pending_single("b1", "bk-a")).unwrap();

        assert!(store
            .settle_bet(&BetId::new("b1"), BetStatus::Won, Some(0))
            .is_err());
        assert_eq!(store.bets().unwrap()[0].status(), BetStatus::Pending);
    }
}
