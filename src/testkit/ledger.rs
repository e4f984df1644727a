//! A canned ledger covering singles, surebets, freebets and free spins.
//!
//! Expected figures over the whole document:
//!
//! | figure        | value  |
//! |---------------|--------|
//! | counted bets  | 4      |
//! | total stake   | 310    |
//! | total profit  | 70.6   |
//! | win rate      | 75%    |
//! | bk-a balance  | 1048   |
//! | bk-b balance  | 447.6  |
//! | bk-c balance  | 87.5   |

use rust_decimal_macros::dec;

use super::domain::{bookmaker, day, free_spin, freebet_leg, leg, single_on, surebet};
use crate::adapter::store::{LedgerDocument, MemoryStore};
use crate::domain::{BetStatus, Sport};

/// Build the sample ledger document.
pub fn sample_document() -> LedgerDocument {
    LedgerDocument {
        bookmakers: vec![
            bookmaker("bk-a", dec!(1000)),
            bookmaker("bk-b", dec!(500)),
            bookmaker("bk-c", dec!(0)),
        ],
        bets: vec![
            single_on("s1", "bk-a", Sport::Football, dec!(100), dec!(2), BetStatus::Won, day(2024, 1, 10)),
            single_on("s2", "bk-b", Sport::Tennis, dec!(50), dec!(3), BetStatus::Lost, day(2024, 1, 11)),
            single_on("s3", "bk-a", Sport::Football, dec!(20), dec!(1.5), BetStatus::Pending, day(2024, 1, 12)),
            surebet(
                "sb1",
                BetStatus::Won,
                vec![leg("bk-a", dec!(52), dec!(2.0)), leg("bk-b", dec!(48), dec!(2.2))],
                Some(1),
            ),
            surebet(
                "sb2",
                BetStatus::Won,
                vec![leg("bk-b", dec!(60), dec!(1.9)), freebet_leg("bk-c", dec!(50), dec!(2.5))],
                Some(1),
            ),
        ],
        free_spins: vec![free_spin("fs1", "bk-c", Some(dec!(12.5)))],
    }
}

/// An in-memory store preloaded with [`sample_document`].
pub fn sample_store() -> MemoryStore {
    MemoryStore::with_document(sample_document())
}
