//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bet identifier - newtype for type safety.
///
/// Identifies a single bet or a whole surebet position. The inner String is
/// private to ensure all construction goes through the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BetId(String);

impl BetId {
    /// Create a new `BetId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the bet ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BetId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for BetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Bookmaker identifier - the stable key bets and legs point at.
///
/// Bookmaker names are display data and may change; attribution always
/// joins on this identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookmakerId(String);

impl BookmakerId {
    /// Create a new `BookmakerId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the bookmaker ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookmakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BookmakerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for BookmakerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Free-spin bonus record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FreeSpinId(String);

impl FreeSpinId {
    /// Create a new `FreeSpinId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the free-spin ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FreeSpinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FreeSpinId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
