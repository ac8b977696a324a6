use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Account {0} not found")]
    AccountNotFound(Uuid),

    #[error("Trade quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Price oracle error: {0}")]
    Oracle(#[from] oracle::error::OracleError),
}
