//! Bet record types: single bets and multi-leg surebet positions.
//!
//! A [`Bet`] is a tagged union discriminated by `type`:
//!
//! - `single` - one wager at one bookmaker ([`SingleBet`])
//! - `surebet` / `pa_surebet` - a set of mutually exclusive legs spread
//!   across bookmakers ([`SurebetPosition`])
//!
//! Records are immutable once settled; the only mutation is the one-way
//! status transition from `pending` to `won` or `lost`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{BetId, BookmakerId};
use super::money::{Money, Odds};

/// Settlement status of a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    /// Outcome not known yet.
    Pending,
    /// The bet (or one leg of the position) paid out.
    Won,
    /// Nothing paid out.
    Lost,
}

impl BetStatus {
    /// Returns true once the bet is won or lost.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, BetStatus::Pending)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BetStatus::Pending => "pending",
            BetStatus::Won => "won",
            BetStatus::Lost => "lost",
        }
    }
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BetStatus::Pending),
            "won" => Ok(BetStatus::Won),
            "lost" => Ok(BetStatus::Lost),
            other => Err(format!("unknown bet status '{other}'")),
        }
    }
}

/// Sport a bet was placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Football,
    Basketball,
    Tennis,
    Volleyball,
    Hockey,
    Baseball,
    Esports,
    /// Any sport not listed above.
    Other,
}

impl Sport {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Football => "football",
            Sport::Basketball => "basketball",
            Sport::Tennis => "tennis",
            Sport::Volleyball => "volleyball",
            Sport::Hockey => "hockey",
            Sport::Baseball => "baseball",
            Sport::Esports => "esports",
            Sport::Other => "other",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "football" | "soccer" => Ok(Sport::Football),
            "basketball" => Ok(Sport::Basketball),
            "tennis" => Ok(Sport::Tennis),
            "volleyball" => Ok(Sport::Volleyball),
            "hockey" => Ok(Sport::Hockey),
            "baseball" => Ok(Sport::Baseball),
            "esports" => Ok(Sport::Esports),
            "other" => Ok(Sport::Other),
            other => Err(format!("unknown sport '{other}'")),
        }
    }
}

/// A sport as written on a bet record.
///
/// Unknown names classify as [`Sport::Other`] but keep their original
/// spelling, so rewriting the ledger file never loses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SportLabel {
    sport: Sport,
    name: String,
}

impl SportLabel {
    /// Classify a recorded sport name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let sport = name.parse().unwrap_or(Sport::Other);
        Self { sport, name }
    }

    #[must_use]
    pub fn sport(&self) -> Sport {
        self.sport
    }

    #[must_use]
    pub fn sport_label(&self) -> &SportLabel {
        self
    }

    /// The name exactly as recorded.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl From<Sport> for SportLabel {
    fn from(sport: Sport) -> Self {
        Self {
            sport,
            name: sport.as_str().to_string(),
        }
    }
}

impl From<String> for SportLabel {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for SportLabel {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<SportLabel> for String {
    fn from(label: SportLabel) -> Self {
        label.name
    }
}

impl fmt::Display for SportLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn check_stake(stake: Money) -> Result<(), DomainError> {
    if stake <= Decimal::ZERO {
        return Err(DomainError::NonPositiveStake { stake });
    }
    Ok(())
}

fn check_odds(odds: Odds) -> Result<(), DomainError> {
    if odds < Decimal::ONE {
        return Err(DomainError::OddsBelowOne { odds });
    }
    Ok(())
}

/// One leg of a surebet position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    bookmaker: BookmakerId,
    stake: Money,
    odds: Odds,
    #[serde(default)]
    is_freebet: bool,
}

impl Leg {
    /// Create a validated leg.
    pub fn try_new(
        bookmaker: BookmakerId,
        stake: Money,
        odds: Odds,
        is_freebet: bool,
    ) -> Result<Self, DomainError> {
        let leg = Self {
            bookmaker,
            stake,
            odds,
            is_freebet,
        };
        leg.validate()?;
        Ok(leg)
    }

    fn validate(&self) -> Result<(), DomainError> {
        check_stake(self.stake)?;
        check_odds(self.odds)
    }

    #[must_use]
    pub fn bookmaker(&self) -> &BookmakerId {
        &self.bookmaker
    }

    #[must_use]
    pub fn stake(&self) -> Money {
        self.stake
    }

    #[must_use]
    pub fn odds(&self) -> Odds {
        self.odds
    }

    #[must_use]
    pub fn is_freebet(&self) -> bool {
        self.is_freebet
    }

    /// Amount returned when this leg wins.
    ///
    /// A freebet stake is not returned, so only the winnings are paid.
    /// `None` when the product leaves the decimal range.
    #[must_use]
    pub fn payout(&self) -> Option<Money> {
        if self.is_freebet {
            self.stake.checked_mul(self.odds - Decimal::ONE)
        } else {
            self.stake.checked_mul(self.odds)
        }
    }

    /// Stake actually exposed to loss (zero for a freebet).
    #[must_use]
    pub fn capital_at_risk(&self) -> Money {
        if self.is_freebet {
            Decimal::ZERO
        } else {
            self.stake
        }
    }
}

/// A wager on one selection at one bookmaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleBet {
    id: BetId,
    event: String,
    sport: SportLabel,
    #[serde(default)]
    market: String,
    #[serde(default)]
    selection: String,
    stake: Money,
    odds: Odds,
    status: BetStatus,
    date: DateTime<Utc>,
    bookmaker: BookmakerId,
}

impl SingleBet {
    /// Create a validated single bet.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        id: BetId,
        event: impl Into<String>,
        sport: impl Into<SportLabel>,
        market: impl Into<String>,
        selection: impl Into<String>,
        stake: Money,
        odds: Odds,
        status: BetStatus,
        date: DateTime<Utc>,
        bookmaker: BookmakerId,
    ) -> Result<Self, DomainError> {
        let bet = Self {
            id,
            event: event.into(),
            sport: sport.into(),
            market: market.into(),
            selection: selection.into(),
            stake,
            odds,
            status,
            date,
            bookmaker,
        };
        bet.validate()?;
        Ok(bet)
    }

    fn validate(&self) -> Result<(), DomainError> {
        check_stake(self.stake)?;
        check_odds(self.odds)
    }

    #[must_use]
    pub fn id(&self) -> &BetId {
        &self.id
    }

    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    #[must_use]
    pub fn sport(&self) -> Sport {
        self.sport.sport()
    }

    #[must_use]
    pub fn sport_label(&self) -> &SportLabel {
        &self.sport
    }

    #[must_use]
    pub fn market(&self) -> &str {
        &self.market
    }

    #[must_use]
    pub fn selection(&self) -> &str {
        &self.selection
    }

    #[must_use]
    pub fn stake(&self) -> Money {
        self.stake
    }

    #[must_use]
    pub fn odds(&self) -> Odds {
        self.odds
    }

    #[must_use]
    pub fn status(&self) -> BetStatus {
        self.status
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[must_use]
    pub fn bookmaker(&self) -> &BookmakerId {
        &self.bookmaker
    }
}

/// A multi-leg arbitrage position.
///
/// Total stake is never stored; it is always derived from the legs.
/// `winning_leg` records which leg paid out once the position is won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurebetPosition {
    id: BetId,
    event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sport: Option<SportLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    market: Option<String>,
    status: BetStatus,
    date: DateTime<Utc>,
    #[serde(alias = "subBets")]
    legs: Vec<Leg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    guaranteed_profit: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winning_leg: Option<usize>,
}

impl SurebetPosition {
    /// Create a validated position with no sport, market or winning leg.
    pub fn try_new(
        id: BetId,
        event: impl Into<String>,
        status: BetStatus,
        date: DateTime<Utc>,
        legs: Vec<Leg>,
        guaranteed_profit: Option<Money>,
    ) -> Result<Self, DomainError> {
        let position = Self {
            id,
            event: event.into(),
            sport: None,
            market: None,
            status,
            date,
            legs,
            guaranteed_profit,
            winning_leg: None,
        };
        position.validate()?;
        Ok(position)
    }

    /// Tag the position with a sport.
    #[must_use]
    pub fn with_sport(mut self, sport: impl Into<SportLabel>) -> Self {
        self.sport = Some(sport.into());
        self
    }

    /// Tag the position with a market description.
    #[must_use]
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Record the winning leg. Only valid on a won position.
    pub fn with_winning_leg(mut self, index: usize) -> Result<Self, DomainError> {
        self.winning_leg = Some(index);
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.legs.is_empty() {
            return Err(DomainError::EmptyLegs);
        }
        for leg in &self.legs {
            leg.validate()?;
        }
        if let Some(index) = self.winning_leg {
            if self.status != BetStatus::Won {
                return Err(DomainError::WinningLegWithoutWin);
            }
            if index >= self.legs.len() {
                return Err(DomainError::WinningLegOutOfRange {
                    index,
                    legs: self.legs.len(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &BetId {
        &self.id
    }

    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    #[must_use]
    pub fn sport(&self) -> Option<Sport> {
        self.sport.as_ref().map(SportLabel::sport)
    }

    #[must_use]
    pub fn sport_label(&self) -> Option<&SportLabel> {
        self.sport.as_ref()
    }

    #[must_use]
    pub fn market(&self) -> Option<&str> {
        self.market.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> BetStatus {
        self.status
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    #[must_use]
    pub fn guaranteed_profit(&self) -> Option<Money> {
        self.guaranteed_profit
    }

    #[must_use]
    pub fn winning_leg(&self) -> Option<usize> {
        self.winning_leg
    }

    /// Sum of non-freebet leg stakes, or `None` if the sum overflows.
    #[must_use]
    pub fn capital_at_risk(&self) -> Option<Money> {
        self.legs
            .iter()
            .map(Leg::capital_at_risk)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
    }

    /// Returns true if any leg was placed at the bookmaker.
    #[must_use]
    pub fn has_leg_at(&self, bookmaker: &BookmakerId) -> bool {
        self.legs.iter().any(|leg| leg.bookmaker() == bookmaker)
    }
}

/// A bet record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Bet {
    /// A single wager.
    Single(SingleBet),
    /// A multi-outcome arbitrage position.
    Surebet(SurebetPosition),
    /// A surebet settled on player-action terms. Computed like [`Bet::Surebet`].
    PaSurebet(SurebetPosition),
}

impl Bet {
    #[must_use]
    pub fn id(&self) -> &BetId {
        match self {
            Bet::Single(bet) => bet.id(),
            Bet::Surebet(position) | Bet::PaSurebet(position) => position.id(),
        }
    }

    #[must_use]
    pub fn event(&self) -> &str {
        match self {
            Bet::Single(bet) => bet.event(),
            Bet::Surebet(position) | Bet::PaSurebet(position) => position.event(),
        }
    }

    #[must_use]
    pub fn status(&self) -> BetStatus {
        match self {
            Bet::Single(bet) => bet.status(),
            Bet::Surebet(position) | Bet::PaSurebet(position) => position.status(),
        }
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Bet::Single(bet) => bet.date(),
            Bet::Surebet(position) | Bet::PaSurebet(position) => position.date(),
        }
    }

    /// Sport of the bet, if one was recorded.
    #[must_use]
    pub fn sport(&self) -> Option<Sport> {
        match self {
            Bet::Single(bet) => Some(bet.sport()),
            Bet::Surebet(position) | Bet::PaSurebet(position) => position.sport(),
        }
    }

    /// The record's `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Bet::Single(_) => "single",
            Bet::Surebet(_) => "surebet",
            Bet::PaSurebet(_) => "pa_surebet",
        }
    }

    /// The multi-leg position, if this is a surebet of either kind.
    #[must_use]
    pub fn as_position(&self) -> Option<&SurebetPosition> {
        match self {
            Bet::Single(_) => None,
            Bet::Surebet(position) | Bet::PaSurebet(position) => Some(position),
        }
    }

    /// Returns true if the bet, or any of its legs, was placed at the bookmaker.
    #[must_use]
    pub fn involves(&self, bookmaker: &BookmakerId) -> bool {
        match self {
            Bet::Single(bet) => bet.bookmaker() == bookmaker,
            Bet::Surebet(position) | Bet::PaSurebet(position) => position.has_leg_at(bookmaker),
        }
    }

    /// Every bookmaker the bet touches, in leg order, without repeats.
    #[must_use]
    pub fn bookmakers(&self) -> Vec<&BookmakerId> {
        let mut ids: Vec<&BookmakerId> = Vec::new();
        match self {
            Bet::Single(bet) => ids.push(bet.bookmaker()),
            Bet::Surebet(position) | Bet::PaSurebet(position) => {
                for leg in position.legs() {
                    if !ids.contains(&leg.bookmaker()) {
                        ids.push(leg.bookmaker());
                    }
                }
            }
        }
        ids
    }

    /// Re-check every invariant. Used on records loaded from storage.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Bet::Single(bet) => bet.validate(),
            Bet::Surebet(position) | Bet::PaSurebet(position) => position.validate(),
        }
    }

    /// Move a pending bet to `won` or `lost`.
    ///
    /// `winning_leg` may name the leg that paid out on a won surebet.
    pub fn settle_as(
        &mut self,
        to: BetStatus,
        winning_leg: Option<usize>,
    ) -> Result<(), DomainError> {
        let from = self.status();
        if from != BetStatus::Pending || to == BetStatus::Pending {
            return Err(DomainError::InvalidTransition { from, to });
        }

        match self {
            Bet::Single(bet) => {
                if winning_leg.is_some() {
                    return Err(DomainError::WinningLegOnSingle);
                }
                bet.status = to;
            }
            Bet::Surebet(position) | Bet::PaSurebet(position) => {
                let mut updated = position.clone();
                updated.status = to;
                updated.winning_leg = winning_leg;
                updated.validate()?;
                *position = updated;
            }
        }
        Ok(())
    }
}
