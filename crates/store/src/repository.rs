use async_trait::async_trait;
use core_types::{Account, Holding, TransactionRecord};
use uuid::Uuid;

use crate::error::StoreError;

/// Lookup and persistence of accounts.
///
/// Handle resolution is case-insensitive: a counterparty named as "alice"
/// resolves the account registered as "Alice". Registration enforces
/// uniqueness under the same folding.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Inserts a new account, enforcing handle and email uniqueness.
    async fn register(&self, account: Account) -> Result<Account, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, StoreError>;

    async fn all(&self) -> Result<Vec<Account>, StoreError>;

    /// Persists a balance (or other field) change to an existing account.
    async fn save(&self, account: &Account) -> Result<(), StoreError>;

    /// Removes an account. Refused while the account still owns holdings.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Lookup and persistence of per-account, per-symbol holdings.
#[async_trait]
pub trait HoldingStore: Send + Sync {
    async fn find(&self, account_id: Uuid, symbol: &str) -> Result<Option<Holding>, StoreError>;

    async fn for_account(&self, account_id: Uuid) -> Result<Vec<Holding>, StoreError>;

    /// Inserts or replaces the holding for its (account, symbol) key.
    async fn save(&self, holding: &Holding) -> Result<(), StoreError>;

    /// Removes a holding whose quantity has reached zero.
    async fn delete(&self, account_id: Uuid, symbol: &str) -> Result<(), StoreError>;
}

/// The append-only log of executed trade legs.
///
/// Deliberately exposes no update or delete operation: the journal is the
/// audit trail.
#[async_trait]
pub trait TransactionJournal: Send + Sync {
    async fn append(&self, record: TransactionRecord) -> Result<(), StoreError>;

    /// All records for an account, most recent first; ties between equal
    /// timestamps keep insertion order.
    async fn for_account(&self, account_id: Uuid) -> Result<Vec<TransactionRecord>, StoreError>;
}
