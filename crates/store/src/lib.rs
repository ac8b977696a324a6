//! # Store Crate
//!
//! This crate is the persistence boundary of the system. It defines the small
//! repository capabilities the ledger depends on and provides the in-process
//! implementation backing them.
//!
//! ## Architectural Principles
//!
//! - **Capability Interfaces:** The ledger core depends only on the
//!   `AccountDirectory`, `HoldingStore`, and `TransactionJournal` traits,
//!   never on a concrete storage engine. Swapping the backing store does not
//!   touch the trading logic.
//! - **Append-Only Journal:** The journal capability exposes no update or
//!   delete operation. Records are a sequence, not a set; ordering ties are
//!   broken by insertion order.
//! - **Per-Key Locking:** The `LockRegistry` hands out one async mutex per
//!   account id, always acquired in ascending-id order, so a two-account trade
//!   can never deadlock against its mirror image.
//!
//! ## Public API
//!
//! - `AccountDirectory`, `HoldingStore`, `TransactionJournal`: the capability traits.
//! - `MemoryStore`: the in-process implementation of all three.
//! - `LockRegistry`: per-account locks for atomic trade execution.
//! - `StoreError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod locks;
pub mod memory;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use locks::LockRegistry;
pub use memory::MemoryStore;
pub use repository::{AccountDirectory, HoldingStore, TransactionJournal};
