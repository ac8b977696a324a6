use crate::enums::TradeSide;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account: the owner of a cash balance and zero or more holdings.
///
/// The balance is only ever mutated by the ledger while completing a trade,
/// and must never go negative as the result of a trade the account initiates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    /// Unique, human-facing name used to address the account as a counterparty.
    pub handle: String,
    pub email: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(handle: String, email: String, initial_balance: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            handle,
            email,
            balance: initial_balance,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An account's current position in one symbol: quantity plus average cost basis.
///
/// There is at most one `Holding` per (account, symbol) pair, and the quantity
/// is strictly positive while the holding exists; a holding that reaches zero
/// quantity is removed rather than kept around.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub account_id: Uuid,
    pub symbol: String,
    pub quantity: i64,
    /// Weighted average price paid per unit, updated only on acquisition events.
    pub avg_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Holding {
    pub fn new(account_id: Uuid, symbol: String, quantity: i64, avg_price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            symbol,
            quantity,
            avg_price,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One immutable leg of an executed trade, as recorded in the journal.
///
/// Records are append-only: they are never mutated or deleted after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: i64,
    /// Execution price per unit at the time of the trade.
    pub price: Decimal,
    pub total_amount: Decimal,
    /// Free-form annotation of the other party in a peer-to-peer trade.
    pub counterparty: Option<String>,
    pub executed_at: DateTime<Utc>,
}

/// An ephemeral market quote for a single symbol.
///
/// Produced fresh per request by the price oracle and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub current_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub open_price: Decimal,
    pub previous_close: Decimal,
    /// Bid price - what sellers receive.
    pub bid: Decimal,
    /// Ask price - what buyers pay.
    pub ask: Decimal,
    pub timestamp: DateTime<Utc>,
}
