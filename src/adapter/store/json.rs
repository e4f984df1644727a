//! JSON file store.
//!
//! The whole ledger lives in one document on disk. Every call re-reads the
//! file so external edits are picked up; mutations rewrite it in full.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use super::document::LedgerDocument;
use crate::domain::{Bet, BetId, BetStatus, Bookmaker, FreeSpin};
use crate::error::{Result, StoreError};
use crate::port::LedgerStore;

/// Ledger persisted as a JSON document.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Open a store at `path`. The file is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the document. A missing file is an empty ledger.
    pub fn load(&self) -> Result<LedgerDocument> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "ledger file missing, starting empty");
                return Ok(LedgerDocument::default());
            }
            Err(source) => {
                return Err(StoreError::Access {
                    path: self.path.clone(),
                    source,
                }
                .into())
            }
        };

        let document: LedgerDocument =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        document.validate()?;

        debug!(
            path = %self.path.display(),
            bets = document.bets.len(),
            bookmakers = document.bookmakers.len(),
            free_spins = document.free_spins.len(),
            "ledger loaded"
        );
        Ok(document)
    }

    /// Write the document, replacing the file.
    pub fn save(&self, document: &LedgerDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(document)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Access {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, content).map_err(|source| StoreError::Access {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    fn modify<T>(&self, f: impl FnOnce(&mut LedgerDocument) -> Result<T>) -> Result<T> {
        let _guard = self.write_lock.lock();
        let mut document = self.load()?;
        let value = f(&mut document)?;
        self.save(&document)?;
        Ok(value)
    }
}

impl LedgerStore for JsonStore {
    fn bets(&self) -> Result<Vec<Bet>> {
        Ok(self.load()?.bets)
    }

    fn bookmakers(&self) -> Result<Vec<Bookmaker>> {
        Ok(self.load()?.bookmakers)
    }

    fn free_spins(&self) -> Result<Vec<FreeSpin>> {
        Ok(self.load()?.free_spins)
    }

    fn add_bet(&self, bet: Bet) -> Result<()> {
        let bet_id = bet.id().clone();
        self.modify(|document| document.add_bet(bet))?;
        info!(bet_id = %bet_id, path = %self.path.display(), "bet recorded");
        Ok(())
    }

    fn settle_bet(
        &self,
        id: &BetId,
        status: BetStatus,
        winning_leg: Option<usize>,
    ) -> Result<Bet> {
        self.modify(|document| document.settle_bet(id, status, winning_leg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::domain::{bookmaker, pending_single};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_ledger() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path().join("ledger.json"));

        assert!(store.bets().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("ledger.json");

        let store = JsonStore::open(&path);
        let mut document = LedgerDocument::default();
        document.bookmakers.push(bookmaker("bk-a", dec!(250)));
        store.save(&document).unwrap();
        store.add_bet(pending_single("b1", "bk-a")).unwrap();
        store
            .settle_bet(&BetId::new("b1"), BetStatus::Lost, None)
            .unwrap();

        let reopened = JsonStore::open(&path);
        let bets = reopened.bets().unwrap();
        assert_eq!(bets.len(), 1);
        assert_eq!(bets[0].status(), BetStatus::Lost);
        assert_eq!(reopened.bookmakers().unwrap()[0].initial_bankroll(), dec!(250));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonStore::open(&path).bets().unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Corrupt { .. })));
    }

    #[test]
    fn invalid_record_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(
            &path,
            r#"{"bookmakers": [{"id": "bk", "name": "Neg", "initialBankroll": -5}]}"#,
        )
        .unwrap();

        let err = JsonStore::open(&path).bookmakers().unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::InvalidRecord { .. })));
    }

    #[test]
    fn duplicate_ids_are_rejected_before_any_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        let content = r#"{"bets": [
            {"type": "single", "id": "b1", "event": "e", "sport": "tennis", "stake": "10",
             "odds": "2", "status": "pending", "date": "2024-01-01T00:00:00Z", "bookmaker": "bk"},
            {"type": "single", "id": "b1", "event": "e", "sport": "tennis", "stake": "20",
             "odds": "3", "status": "pending", "date": "2024-01-02T00:00:00Z", "bookmaker": "bk"}
        ]}"#;
        fs::write(&path, content).unwrap();

        let store = JsonStore::open(&path);
        let err = store
            .settle_bet(&BetId::new("b1"), BetStatus::Won, None)
            .unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::DuplicateBet { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn duplicate_bookmakers_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(
            &path,
            r#"{"bookmakers": [
                {"id": "bk", "name": "First", "initialBankroll": 100},
                {"id": "bk", "name": "Second", "initialBankroll": 200}
            ]}"#,
        )
        .unwrap();

        let err = JsonStore::open(&path).bookmakers().unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::DuplicateBookmaker { .. })));
    }
}
