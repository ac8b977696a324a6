use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("The requested data was not found in the store.")]
    NotFound,

    #[error("Handle '{0}' is already registered.")]
    HandleTaken(String),

    #[error("Email '{0}' is already registered.")]
    EmailTaken(String),

    #[error("Account {0} still has holdings and cannot be deleted.")]
    AccountHasHoldings(Uuid),
}
