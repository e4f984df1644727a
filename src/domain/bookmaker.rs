//! Bookmaker accounts and free-spin bonus records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{BookmakerId, FreeSpinId};
use super::money::Money;

/// A bookmaker account.
///
/// The current balance is never stored; see
/// [`attribute`](crate::domain::attribution::attribute).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmaker {
    id: BookmakerId,
    name: String,
    #[serde(default)]
    initial_bankroll: Money,
}

impl Bookmaker {
    /// Create a bookmaker, rejecting a negative starting bankroll.
    pub fn try_new(
        id: BookmakerId,
        name: impl Into<String>,
        initial_bankroll: Money,
    ) -> Result<Self, DomainError> {
        let bookmaker = Self {
            id,
            name: name.into(),
            initial_bankroll,
        };
        bookmaker.validate()?;
        Ok(bookmaker)
    }

    /// Re-check invariants on a record loaded from storage.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.initial_bankroll < Decimal::ZERO {
            return Err(DomainError::NegativeBankroll {
                bankroll: self.initial_bankroll,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &BookmakerId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn initial_bankroll(&self) -> Money {
        self.initial_bankroll
    }
}

/// A free-spin casino bonus credited at a bookmaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSpin {
    pub id: FreeSpinId,
    pub bookmaker: BookmakerId,
    #[serde(default)]
    pub won_amount: Option<Money>,
    pub date: DateTime<Utc>,
}

impl FreeSpin {
    /// Amount won, zero when none was recorded.
    #[must_use]
    pub fn won(&self) -> Money {
        self.won_amount.unwrap_or(Decimal::ZERO)
    }
}
