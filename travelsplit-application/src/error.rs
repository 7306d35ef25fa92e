use travelsplit_domain::{BalanceSheetError, TripError};

/// Violations of the balance list contract, detected before any calculation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalanceInputError {
    #[error("balances must be a list, got {found}")]
    NotAList { found: &'static str },
    #[error("balance #{index} must be a record, got {found}")]
    NotARecord { index: usize, found: &'static str },
    #[error("balance #{index} is missing '{field}'")]
    MissingField { index: usize, field: &'static str },
    #[error("balance #{index} has an invalid '{field}': {detail}")]
    InvalidField {
        index: usize,
        field: &'static str,
        detail: String,
    },
    #[error(transparent)]
    Sheet(#[from] BalanceSheetError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentParseError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error(transparent)]
    Balances(#[from] BalanceInputError),
    #[error("invalid trip document: {0}")]
    InvalidTrip(String),
    #[error(transparent)]
    Trip(#[from] TripError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Parse(#[from] DocumentParseError),
    #[error(transparent)]
    Trip(#[from] TripError),
    #[error("no payments recorded")]
    NoPayments,
}
