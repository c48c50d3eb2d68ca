//! Error types for LedgerLens engine operations
//!
//! No operation in this crate is fatal to the hosting process; every
//! failure here degrades to a user-visible notification and a recoverable
//! state. The enums exist so hosts and tests can still discriminate.

use ledgerlens_types::{ConfigError, Scenario};
use thiserror::Error;

/// Errors from the external data service collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The request never completed (network, timeout, connection refused)
    #[error("data service unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("data service rejected the request: {0}")]
    Rejected(String),

    /// The response body could not be interpreted
    #[error("malformed data service response: {0}")]
    Malformed(String),
}

/// Errors while loading a transaction batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Error from the data service
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The service returned no records for the requested window
    #[error("no transaction data available for scenario '{scenario}'")]
    EmptyBatch {
        /// Scenario that produced the empty batch
        scenario: Scenario,
    },

    /// Every record in the batch was dropped during parsing
    #[error("none of the {count} records in the batch could be parsed")]
    MalformedBatch {
        /// Raw record count received
        count: usize,
    },
}

/// Errors from the search boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Empty or whitespace-only search term; a user error, not a fault
    #[error("search term is empty")]
    EmptyTerm,
}

/// Errors from the report-export delegate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// The export collaborator failed
    #[error("report export failed: {0}")]
    Delegate(String),
}

/// Top-level error for engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Load failure
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Search failure
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Export failure
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
