use std::path::PathBuf;

use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{BetId, BookmakerId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Ledger storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("bet not found: {bet_id}")]
    BetNotFound { bet_id: BetId },

    #[error("bet already exists: {bet_id}")]
    DuplicateBet { bet_id: BetId },

    #[error("bookmaker already exists: {bookmaker_id}")]
    DuplicateBookmaker { bookmaker_id: BookmakerId },

    #[error("failed to access ledger at {path}: {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ledger at {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {record} in ledger violates an invariant: {source}")]
    InvalidRecord {
        record: String,
        #[source]
        source: DomainError,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
