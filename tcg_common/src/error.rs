use thiserror::Error;

/// Failure to parse a user-supplied code
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown currency: {0} (expected USD, CAD, EUR or GBP)")]
    Currency(String),
    #[error("Unknown condition: {0} (expected M, NM, LP, MP, HP or D)")]
    Condition(String),
}
