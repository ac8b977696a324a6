//! # Ledger Crate
//!
//! This crate is the trade-execution core. Given a buy or sell request it
//! validates the business guards, obtains a quote, and mutates account
//! balances, holdings, and the transaction journal as one atomic unit.
//!
//! ## Architectural Principles
//!
//! - **Declined is not an error:** A business rule preventing execution
//!   (insufficient funds, insufficient quantity, self-trade, unverified
//!   counterparty) produces the `Declined` variant of `TradeOutcome`, leaving
//!   all state untouched. Only genuinely exceptional conditions (unknown
//!   account, storage failure) surface as `LedgerError`.
//! - **Capability Seams:** The ledger depends only on the `store` repository
//!   traits and the `PriceOracle` trait; it knows nothing about the storage
//!   engine or whether a quote is live or synthetic.
//! - **Per-Account Isolation:** Every trade runs its whole
//!   read-compute-write sequence while holding the lock of each account it
//!   touches, acquired in ascending-id order for two-account trades.
//!
//! ## Public API
//!
//! - `Ledger`: the orchestrator for buys, peer-to-peer sells, portfolio
//!   valuation, and journal queries.
//! - `TradeOutcome`, `TradeReceipt`, `DeclineReason`: the tagged result type.
//! - `PortfolioPosition`: a holding valued at the current market price.
//! - `cost_basis::average_price`: the weighted-average cost recomputation.
//! - `LedgerError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod core;
pub mod cost_basis;
pub mod error;
pub mod outcome;

// Re-export the key components to provide a clean, public-facing API.
pub use crate::core::Ledger;
pub use error::LedgerError;
pub use outcome::{DeclineReason, PortfolioPosition, TradeOutcome, TradeReceipt};
