//! Ledger aggregation: portfolio statistics over a filtered set of bets.
//!
//! Every function here is a pure fold over its inputs. Nothing is cached
//! between calls, so re-running after a filter change or a new bet is
//! always correct.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::bet::{Bet, BetStatus, Sport};
use super::id::BetId;
use super::money::{percentage, Money, Percent};
use super::settlement::{capital_at_risk, settle, SettlementError};

/// Inclusive calendar-date range.
///
/// `from` starts at 00:00:00 and `to` runs through 23:59:59.999, so a bet
/// placed at any time on the end date is included. Either bound may be
/// open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive).
    pub from: Option<NaiveDate>,
    /// End date (inclusive, whole day).
    pub to: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    fn start(&self) -> Option<NaiveDateTime> {
        self.from.map(|date| date.and_time(NaiveTime::MIN))
    }

    fn end(&self) -> Option<NaiveDateTime> {
        self.to
            .and_then(|date| date.and_hms_milli_opt(23, 59, 59, 999))
    }

    /// Returns true if the timestamp falls inside the range.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let at = at.naive_utc();
        if self.start().is_some_and(|start| at < start) {
            return false;
        }
        if self.end().is_some_and(|end| at > end) {
            return false;
        }
        true
    }
}

/// Filter applied before aggregation. `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BetFilter {
    pub sport: Option<Sport>,
    pub result: Option<BetStatus>,
    pub date_range: DateRange,
}

impl BetFilter {
    /// Returns true if the bet passes every criterion.
    ///
    /// Bets with no recorded sport never match a specific sport.
    #[must_use]
    pub fn matches(&self, bet: &Bet) -> bool {
        if let Some(sport) = self.sport {
            if bet.sport() != Some(sport) {
                return false;
            }
        }
        if let Some(result) = self.result {
            if bet.status() != result {
                return false;
            }
        }
        self.date_range.contains(bet.date())
    }
}

/// Portfolio statistics over settled bets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LedgerSummary {
    /// Settled bets counted in the totals.
    pub total_bets: usize,
    pub won: usize,
    pub lost: usize,
    /// Capital at risk across counted bets.
    pub total_stake: Money,
    pub total_profit: Money,
    /// Won bets as a percentage of counted bets.
    pub win_rate: Percent,
    /// Profit as a percentage of total stake.
    pub roi: Percent,
    /// Settled bets left out because their profit could not be determined.
    pub inconsistent: Vec<BetId>,
}

/// Aggregate the bets that pass `filter` into a [`LedgerSummary`].
///
/// Pending bets never count. A settled bet whose profit cannot be
/// determined, or whose amounts would overflow the running totals, is
/// excluded from every figure and listed in [`LedgerSummary::inconsistent`].
#[must_use]
pub fn aggregate(bets: &[Bet], filter: &BetFilter) -> LedgerSummary {
    let mut summary = LedgerSummary::default();

    for bet in bets.iter().filter(|bet| filter.matches(bet)) {
        if !bet.status().is_settled() {
            continue;
        }
        let (total_stake, total_profit) = match add_to_totals(&summary, bet) {
            Ok(totals) => totals,
            Err(err) => {
                summary.inconsistent.push(err.bet_id().clone());
                continue;
            }
        };

        summary.total_bets += 1;
        match bet.status() {
            BetStatus::Won => summary.won += 1,
            BetStatus::Lost => summary.lost += 1,
            BetStatus::Pending => {}
        }
        summary.total_stake = total_stake;
        summary.total_profit = total_profit;
    }

    summary.win_rate = percentage(Decimal::from(summary.won), Decimal::from(summary.total_bets));
    summary.roi = percentage(summary.total_profit, summary.total_stake);
    summary
}

/// Totals after counting `bet`, leaving `summary` untouched on failure.
fn add_to_totals(summary: &LedgerSummary, bet: &Bet) -> Result<(Money, Money), SettlementError> {
    let profit = settle(bet)?;
    let stake = capital_at_risk(bet)?;
    let overflow = || SettlementError::Overflow {
        bet_id: bet.id().clone(),
    };

    let total_stake = summary.total_stake.checked_add(stake).ok_or_else(overflow)?;
    let total_profit = summary.total_profit.checked_add(profit).ok_or_else(overflow)?;
    Ok((total_stake, total_profit))
}

/// One [`LedgerSummary`] per sport present in the filtered bets, ordered by
/// sport. Bets without a sport are not part of any group.
#[must_use]
pub fn breakdown_by_sport(bets: &[Bet], filter: &BetFilter) -> Vec<(Sport, LedgerSummary)> {
    let sports: BTreeSet<Sport> = bets
        .iter()
        .filter(|bet| filter.matches(bet))
        .filter_map(Bet::sport)
        .collect();

    sports
        .into_iter()
        .map(|sport| {
            let by_sport = BetFilter {
                sport: Some(sport),
                ..*filter
            };
            (sport, aggregate(bets, &by_sport))
        })
        .collect()
}

/// A point on the cumulative profit curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitPoint {
    pub bet_id: BetId,
    pub date: DateTime<Utc>,
    pub profit: Money,
    pub cumulative: Money,
}

/// Running realized profit over settled, consistent bets in date order.
///
/// A bet that would push the running total out of the decimal range is
/// left off the curve.
#[must_use]
pub fn profit_series(bets: &[Bet], filter: &BetFilter) -> Vec<ProfitPoint> {
    let mut settled: Vec<(&Bet, Money)> = bets
        .iter()
        .filter(|bet| filter.matches(bet) && bet.status().is_settled())
        .filter_map(|bet| settle(bet).ok().map(|profit| (bet, profit)))
        .collect();
    settled.sort_by_key(|(bet, _)| bet.date());

    let mut cumulative = Decimal::ZERO;
    settled
        .into_iter()
        .filter_map(|(bet, profit)| {
            cumulative = cumulative.checked_add(profit)?;
            Some(ProfitPoint {
                bet_id: bet.id().clone(),
                date: bet.date(),
                profit,
                cumulative,
            })
        })
        .collect()
}
