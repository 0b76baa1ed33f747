//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Clock and persistence seams
//! - `engine` - Account operations over the store and the log
//! - `ledger_store` - Account state and balance mutation rules
//! - `transaction_log` - Append-only transaction history

pub mod engine;
pub mod ledger_store;
pub mod traits;
pub mod transaction_log;

pub use engine::Ledger;
pub use ledger_store::LedgerStore;
pub use traits::{Clock, Persistence, SystemClock};
pub use transaction_log::{Statement, TransactionLog};
