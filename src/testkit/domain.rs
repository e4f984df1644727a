//! Builders for domain records used across tests.
//!
//! Provides concise factory functions for bets, legs, bookmakers and free
//! spins so tests focus on assertions rather than construction
//! boilerplate. Every builder panics on invalid input.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    Bet, BetId, BetStatus, Bookmaker, BookmakerId, FreeSpin, FreeSpinId, Leg, SingleBet, Sport,
    SurebetPosition,
};

/// Midday UTC on the given date.
pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Create a [`Bookmaker`] whose name is its id in upper case.
pub fn bookmaker(id: &str, bankroll: Decimal) -> Bookmaker {
    Bookmaker::try_new(BookmakerId::new(id), id.to_uppercase(), bankroll).unwrap()
}

/// Create a football single bet dated 2024-01-15.
pub fn single(id: &str, bookmaker: &str, stake: Decimal, odds: Decimal, status: BetStatus) -> Bet {
    single_on(id, bookmaker, Sport::Football, stake, odds, status, day(2024, 1, 15))
}

/// Create a single bet with an explicit sport and date.
pub fn single_on(
    id: &str,
    bookmaker: &str,
    sport: Sport,
    stake: Decimal,
    odds: Decimal,
    status: BetStatus,
    date: DateTime<Utc>,
) -> Bet {
    Bet::Single(
        SingleBet::try_new(
            BetId::new(id),
            format!("Event {id}"),
            sport,
            "Match Result",
            "Home",
            stake,
            odds,
            status,
            date,
            BookmakerId::new(bookmaker),
        )
        .unwrap(),
    )
}

/// A pending 10 @ 2.0 single.
pub fn pending_single(id: &str, bookmaker: &str) -> Bet {
    single(id, bookmaker, Decimal::TEN, Decimal::TWO, BetStatus::Pending)
}

/// Create a cash leg.
pub fn leg(bookmaker: &str, stake: Decimal, odds: Decimal) -> Leg {
    Leg::try_new(BookmakerId::new(bookmaker), stake, odds, false).unwrap()
}

/// Create a freebet leg.
pub fn freebet_leg(bookmaker: &str, stake: Decimal, odds: Decimal) -> Leg {
    Leg::try_new(BookmakerId::new(bookmaker), stake, odds, true).unwrap()
}

/// Create a surebet dated 2024-01-15, optionally naming the winning leg.
pub fn surebet(id: &str, status: BetStatus, legs: Vec<Leg>, winning_leg: Option<usize>) -> Bet {
    let mut position =
        SurebetPosition::try_new(BetId::new(id), format!("Event {id}"), status, day(2024, 1, 15), legs, None)
            .unwrap();
    if let Some(index) = winning_leg {
        position = position.with_winning_leg(index).unwrap();
    }
    Bet::Surebet(position)
}

/// Create a free-spin record.
pub fn free_spin(id: &str, bookmaker: &str, won: Option<Decimal>) -> FreeSpin {
    FreeSpin {
        id: FreeSpinId::new(id),
        bookmaker: BookmakerId::new(bookmaker),
        won_amount: won,
        date: day(2024, 1, 20),
    }
}
