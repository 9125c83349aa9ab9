use chrono::NaiveDate;

/// Top-level error type for the bank engine and its persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Account error: {0}")]
    Account(#[from] AccountError),
}

/// Rule violations raised by account operations.
/// These are recoverable at the presentation layer (reprompt or message).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("transaction would overdraw the account")]
    Overdraw,

    #[error("account transaction limit reached")]
    TransactionLimit,

    #[error("new transactions must be from {latest} onward")]
    TransactionSequence { latest: NaiveDate },
}
