//! Error types for the calculator core, the history store and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to parse or evaluate an expression strictly.
///
/// [`crate::calculator::evaluate`] never surfaces these; it falls back to a
/// shorter prefix of the input instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("'{0}{0}' is not a valid operator")]
    DoubledSign(char),

    #[error("unexpected '{0}'")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("result is not a finite number")]
    NonFinite,
}

/// Failure reported by a key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("i/o error on key {key:?}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Failure while reading or writing the calculation history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to encode or decode history")]
    Serialization(#[from] serde_json::Error),

    #[error("history storage failed")]
    Store(#[from] StoreError),

    #[error("history blob is neither a list nor a versioned document")]
    Malformed,

    #[error("unsupported history format version {0:?}")]
    UnsupportedVersion(Option<u64>),

    #[error("a record with id {0} already exists")]
    DuplicateId(String),
}

/// A calculation cannot be saved while a required section is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", .messages.join("; "))]
pub struct CalcError {
    pub messages: Vec<String>,
}

/// Failure loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
