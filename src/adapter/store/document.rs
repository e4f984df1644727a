//! The ledger document shared by the store adapters.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Bet, BetId, BetStatus, Bookmaker, FreeSpin};
use crate::error::{Result, StoreError};

/// Everything the ledger persists, as one serializable document.
///
/// ```json
/// { "bookmakers": [...], "bets": [...], "freeSpins": [...] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDocument {
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
    #[serde(default)]
    pub bets: Vec<Bet>,
    #[serde(default)]
    pub free_spins: Vec<FreeSpin>,
}

impl LedgerDocument {
    /// Re-check every record's invariants after deserialization.
    ///
    /// Bookmaker ids and bet ids must each be unique.
    pub fn validate(&self) -> Result<()> {
        let mut bookmaker_ids = HashSet::new();
        for bookmaker in &self.bookmakers {
            bookmaker
                .validate()
                .map_err(|source| StoreError::InvalidRecord {
                    record: format!("bookmaker {}", bookmaker.id()),
                    source,
                })?;
            if !bookmaker_ids.insert(bookmaker.id()) {
                return Err(StoreError::DuplicateBookmaker {
                    bookmaker_id: bookmaker.id().clone(),
                }
                .into());
            }
        }

        let mut bet_ids = HashSet::new();
        for bet in &self.bets {
            bet.validate().map_err(|source| StoreError::InvalidRecord {
                record: format!("bet {}", bet.id()),
                source,
            })?;
            if !bet_ids.insert(bet.id()) {
                return Err(StoreError::DuplicateBet {
                    bet_id: bet.id().clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Append a bet, rejecting an id that is already taken.
    pub fn add_bet(&mut self, bet: Bet) -> Result<()> {
        if self.bets.iter().any(|existing| existing.id() == bet.id()) {
            return Err(StoreError::DuplicateBet {
                bet_id: bet.id().clone(),
            }
            .into());
        }
        self.bets.push(bet);
        Ok(())
    }

    /// Apply a status transition to the bet with the given id.
    pub fn settle_bet(
        &mut self,
        id: &BetId,
        status: BetStatus,
        winning_leg: Option<usize>,
    ) -> Result<Bet> {
        let bet = self
            .bets
            .iter_mut()
            .find(|bet| bet.id() == id)
            .ok_or_else(|| StoreError::BetNotFound { bet_id: id.clone() })?;
        bet.settle_as(status, winning_leg)?;
        Ok(bet.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::error::Error;
    use crate::testkit::domain::{bookmaker, pending_single, single};
    use rust_decimal_macros::dec;

    #[test]
    fn add_bet_rejects_duplicate_ids() {
        let mut document = LedgerDocument::default();
        document.add_bet(pending_single("b1", "bk-a")).unwrap();

        let err = document.add_bet(pending_single("b1", "bk-b")).unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::DuplicateBet { .. })));
    }

    #[test]
    fn settle_bet_unknown_id() {
        let mut document = LedgerDocument::default();
        let err = document
            .settle_bet(&BetId::new("missing"), BetStatus::Won, None)
            .unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::BetNotFound { .. })));
    }

    #[test]
    fn settle_bet_surfaces_domain_errors() {
        let mut document = LedgerDocument::default();
        document
            .add_bet(single("b1", "bk-a", dec!(100), dec!(2), BetStatus::Won))
            .unwrap();

        let err = document
            .settle_bet(&BetId::new("b1"), BetStatus::Lost, None)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn empty_json_object_is_an_empty_ledger() {
        let document: LedgerDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(document, LedgerDocument::default());
    }

    #[test]
    fn validate_rejects_duplicate_bookmaker_ids() {
        let document = LedgerDocument {
            bookmakers: vec![bookmaker("bk-a", dec!(100)), bookmaker("bk-a", dec!(50))],
            ..LedgerDocument::default()
        };

        let err = document.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Store(StoreError::DuplicateBookmaker { ref bookmaker_id })
                if bookmaker_id.as_str() == "bk-a"
        ));
    }

    #[test]
    fn validate_rejects_duplicate_bet_ids() {
        let document = LedgerDocument {
            bets: vec![pending_single("b1", "bk-a"), pending_single("b1", "bk-b")],
            ..LedgerDocument::default()
        };

        let err = document.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Store(StoreError::DuplicateBet { ref bet_id }) if bet_id.as_str() == "b1"
        ));
    }

    #[test]
    fn validate_accepts_distinct_ids() {
        let document = LedgerDocument {
            bookmakers: vec![bookmaker("bk-a", dec!(100)), bookmaker("bk-b", dec!(50))],
            bets: vec![pending_single("b1", "bk-a"), pending_single("b2", "bk-b")],
            ..LedgerDocument::default()
        };
        assert!(document.validate().is_ok());
    }
}
