use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// The result of a buy or sell attempt.
///
/// A declined trade is a normal outcome, not an error: it means a business
/// rule prevented execution and no state was changed. Callers branch on the
/// variant instead of catching anything.
#[derive(Debug, Clone)]
pub enum TradeOutcome {
    Executed(TradeReceipt),
    Declined {
        reason: DeclineReason,
        /// The initiating account's balance at the time of the decline.
        balance: Decimal,
    },
}

/// Details of an executed trade, from the initiating account's perspective.
#[derive(Debug, Clone)]
pub struct TradeReceipt {
    pub symbol: String,
    pub quantity: i64,
    pub price: Decimal,
    pub total_amount: Decimal,
    pub new_balance: Decimal,
    /// The counterparty handle for a peer-to-peer sell; `None` for a market buy.
    pub counterparty: Option<String>,
}

/// Why a trade was declined.
#[derive(Debug, Clone)]
pub enum DeclineReason {
    InsufficientFunds {
        /// Handle of the party short on cash; `None` when it is the initiator.
        handle: Option<String>,
        required: Decimal,
        available: Decimal,
    },
    InsufficientQuantity {
        available: i64,
    },
    SelfTrade {
        /// The buyer handle as named in the request, when the rejection came
        /// from the handle comparison rather than the id comparison.
        handle: Option<String>,
    },
    UnverifiedCounterparty {
        handle: String,
    },
    HoldingNotFound {
        symbol: String,
    },
}

impl DeclineReason {
    /// Human-readable reason string carried in the declined payload.
    pub fn message(&self) -> String {
        match self {
            DeclineReason::InsufficientFunds { handle: None, .. } => {
                "Insufficient balance".to_string()
            }
            DeclineReason::InsufficientFunds {
                handle: Some(handle),
                required,
                available,
            } => format!(
                "Buyer '{handle}' has insufficient balance. Required: {required}, Available: {available}"
            ),
            DeclineReason::InsufficientQuantity { available } => {
                format!("Insufficient stock quantity. Available: {available}")
            }
            DeclineReason::SelfTrade { handle: None } => {
                "Invalid transaction: You cannot sell stocks to yourself. Please specify a different buyer."
                    .to_string()
            }
            DeclineReason::SelfTrade { handle: Some(handle) } => format!(
                "Invalid transaction: Seller and buyer cannot be the same person ({handle})."
            ),
            DeclineReason::UnverifiedCounterparty { handle } => format!(
                "Buyer '{handle}' is not registered in the system. All buyers must be verified users."
            ),
            DeclineReason::HoldingNotFound { .. } => {
                "Stock not found in seller's portfolio".to_string()
            }
        }
    }
}

/// A holding valued at the current market price, with derived profit fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPosition {
    pub account_id: Uuid,
    pub symbol: String,
    pub quantity: i64,
    pub avg_purchase_price: Decimal,
    pub current_price: Decimal,
    /// quantity * current_price
    pub current_value: Decimal,
    /// quantity * avg_purchase_price
    pub invested_amount: Decimal,
    /// current_value - invested_amount
    pub net_profit: Decimal,
    /// net_profit / invested_amount * 100, zero when nothing is invested.
    pub profit_percentage: Decimal,
}
