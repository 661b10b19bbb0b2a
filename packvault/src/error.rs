//! Error types for packvault

use thiserror::Error;

/// Unified error type for packvault operations
#[derive(Debug, Error)]
pub enum VaultError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Catalog answered with a non-success status
    #[error("Pokemon TCG API error {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    /// Failed to parse JSON (API response, dataset or snapshot)
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Referenced card, binder or trade does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    /// Rejected user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Unparseable currency or condition code
    #[error(transparent)]
    Code(#[from] tcg_common::ParseError),
}

impl VaultError {
    pub(crate) fn card_not_found(id: &str) -> Self {
        VaultError::NotFound {
            kind: "Card",
            id: id.to_string(),
        }
    }

    pub(crate) fn binder_not_found(id: &str) -> Self {
        VaultError::NotFound {
            kind: "Binder",
            id: id.to_string(),
        }
    }

    pub(crate) fn trade_not_found(id: &str) -> Self {
        VaultError::NotFound {
            kind: "Trade",
            id: id.to_string(),
        }
    }
}

/// Short alias re-exported at the crate root
pub type Error = VaultError;

/// Result alias for packvault operations
pub type Result<T> = std::result::Result<T, VaultError>;
