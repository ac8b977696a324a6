//! # Price Oracle Crate
//!
//! This crate is the market-data boundary of the system. It defines the
//! `PriceOracle` trait and three implementations:
//!
//! - `FinnhubClient`: fetches live quotes from the Finnhub REST API.
//! - `SyntheticOracle`: generates plausible quotes from a small symbol table
//!   plus a bounded random perturbation, for demos and keyless operation.
//! - `FailoverOracle`: wraps the live client with a bounded timeout and falls
//!   through to the synthetic generator on any upstream failure, so a quote
//!   request never blocks or fails a trade.
//!
//! The ledger treats every returned quote as authoritative; it has no way to
//! tell a live quote from a synthetic one.

use async_trait::async_trait;
use core_types::Quote;

use crate::error::OracleError;

mod finnhub;
mod synthetic;
mod failover;
pub mod error;

// --- Public API ---
pub use failover::FailoverOracle;
pub use finnhub::FinnhubClient;
pub use synthetic::SyntheticOracle;

/// The generic, abstract interface for a market quote source.
///
/// This trait is the contract the ledger core depends on, allowing the
/// underlying implementation (live, synthetic, or a fixed test double)
/// to be swapped out.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Returns a current quote for the given symbol.
    async fn quote(&self, symbol: &str) -> Result<Quote, OracleError>;
}
