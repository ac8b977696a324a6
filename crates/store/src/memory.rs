use async_trait::async_trait;
use core_types::{Account, Holding, TransactionRecord};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::StoreError;
use crate::repository::{AccountDirectory, HoldingStore, TransactionJournal};

/// The in-process store backing all three repository capabilities.
///
/// Accounts and holdings live in concurrent maps; the journal is a plain
/// append sequence behind a mutex. Isolation between concurrent trades is the
/// ledger's job (via `LockRegistry`), not this struct's: the maps only
/// guarantee that individual reads and writes are not torn.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: DashMap<Uuid, Account>,
    /// Lowercased handle -> account id, for case-insensitive resolution.
    handles: DashMap<String, Uuid>,
    /// Lowercased email -> account id.
    emails: DashMap<String, Uuid>,
    /// (account id, uppercased symbol) -> holding.
    holdings: DashMap<(Uuid, String), Holding>,
    journal: Mutex<Vec<TransactionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountDirectory for MemoryStore {
    async fn register(&self, account: Account) -> Result<Account, StoreError> {
        let handle_key = account.handle.to_lowercase();
        let email_key = account.email.to_lowercase();

        match self.handles.entry(handle_key.clone()) {
            Entry::Occupied(_) => return Err(StoreError::HandleTaken(account.handle)),
            Entry::Vacant(entry) => {
                entry.insert(account.id);
            }
        }
        match self.emails.entry(email_key) {
            Entry::Occupied(_) => {
                // Undo the handle reservation before rejecting.
                self.handles.remove(&handle_key);
                return Err(StoreError::EmailTaken(account.email));
            }
            Entry::Vacant(entry) => {
                entry.insert(account.id);
            }
        }

        self.accounts.insert(account.id, account.clone());
        tracing::debug!(account_id = %account.id, handle = %account.handle, "Registered account.");
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, StoreError> {
        let id = match self.handles.get(&handle.to_lowercase()) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn all(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.iter().map(|a| a.clone()).collect())
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        match self.accounts.get_mut(&account.id) {
            Some(mut existing) => {
                *existing = account.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        if self.holdings.iter().any(|h| h.key().0 == id) {
            return Err(StoreError::AccountHasHoldings(id));
        }
        let (_, account) = self.accounts.remove(&id).ok_or(StoreError::NotFound)?;
        self.handles.remove(&account.handle.to_lowercase());
        self.emails.remove(&account.email.to_lowercase());
        Ok(())
    }
}

#[async_trait]
impl HoldingStore for MemoryStore {
    async fn find(&self, account_id: Uuid, symbol: &str) -> Result<Option<Holding>, StoreError> {
        let key = (account_id, symbol.to_uppercase());
        Ok(self.holdings.get(&key).map(|h| h.clone()))
    }

    async fn for_account(&self, account_id: Uuid) -> Result<Vec<Holding>, StoreError> {
        let mut holdings: Vec<Holding> = self
            .holdings
            .iter()
            .filter(|h| h.key().0 == account_id)
            .map(|h| h.clone())
            .collect();
        holdings.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(holdings)
    }

    async fn save(&self, holding: &Holding) -> Result<(), StoreError> {
        let key = (holding.account_id, holding.symbol.to_uppercase());
        self.holdings.insert(key, holding.clone());
        Ok(())
    }

    async fn delete(&self, account_id: Uuid, symbol: &str) -> Result<(), StoreError> {
        let key = (account_id, symbol.to_uppercase());
        self.holdings.remove(&key).ok_or(StoreError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl TransactionJournal for MemoryStore {
    async fn append(&self, record: TransactionRecord) -> Result<(), StoreError> {
        self.journal.lock().push(record);
        Ok(())
    }

    async fn for_account(&self, account_id: Uuid) -> Result<Vec<TransactionRecord>, StoreError> {
        let mut records: Vec<TransactionRecord> = self
            .journal
            .lock()
            .iter()
            .filter(|r| r.account_id == account_id)
            .cloned()
            .collect();
        // Stable sort: equal timestamps keep their insertion order.
        records.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::TradeSide;
    use rust_decimal_macros::dec;

    fn account(handle: &str, email: &str) -> Account {
        Account::new(handle.to_string(), email.to_string(), dec!(100000))
    }

    fn record(
        account_id: Uuid,
        seq_marker: &str,
        executed_at: chrono::DateTime<Utc>,
    ) -> TransactionRecord {
        TransactionRecord {
            id: Uuid::new_v4(),
            account_id,
            symbol: seq_marker.to_string(),
            side: TradeSide::Buy,
            quantity: 1,
            price: dec!(1),
            total_amount: dec!(1),
            counterparty: None,
            executed_at,
        }
    }

    #[tokio::test]
    async fn handle_uniqueness_is_case_insensitive() {
        let store = MemoryStore::new();
        store.register(account("Alice", "alice@example.com")).await.unwrap();

        let err = store
            .register(account("ALICE", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::HandleTaken(_)));

        // The rejected registration must not leak an email reservation.
        store.register(account("bob", "other@example.com")).await.unwrap();
    }

    #[tokio::test]
    async fn handle_lookup_is_case_insensitive() {
        let store = MemoryStore::new();
        let alice = store.register(account("Alice", "alice@example.com")).await.unwrap();

        let found = store.find_by_handle("alice").await.unwrap().unwrap();
        assert_eq!(found.id, alice.id);
    }

    #[tokio::test]
    async fn delete_is_refused_while_holdings_exist() {
        let store = MemoryStore::new();
        let alice = store.register(account("alice", "alice@example.com")).await.unwrap();
        HoldingStore::save(
            &store,
            &Holding::new(alice.id, "AAPL".to_string(), 5, dec!(175.50)),
        )
        .await
        .unwrap();

        let err = AccountDirectory::delete(&store, alice.id).await.unwrap_err();
        assert!(matches!(err, StoreError::AccountHasHoldings(_)));

        HoldingStore::delete(&store, alice.id, "AAPL").await.unwrap();
        AccountDirectory::delete(&store, alice.id).await.unwrap();
        assert!(store.find_by_handle("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn journal_is_newest_first_with_ties_in_insertion_order() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        let early = Utc.with_ymd_and_hms(2026, 1, 1, 9, 30, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 1, 1, 16, 0, 0).unwrap();

        store.append(record(id, "FIRST", early)).await.unwrap();
        store.append(record(id, "TIE-A", late)).await.unwrap();
        store.append(record(id, "TIE-B", late)).await.unwrap();

        let records = TransactionJournal::for_account(&store, id).await.unwrap();
        let symbols: Vec<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["TIE-A", "TIE-B", "FIRST"]);
    }
}
