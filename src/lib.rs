//! Bank Ledger Library
//! # Overview
//!
//! This library provides a single-user bank account ledger: account balances
//! plus an append-only transaction history, persisted to two CSV files and
//! driven through an interactive text menu.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, TransactionRecord, LedgerError)
//! - [`core`] - Business logic components:
//!   - [`core::ledger_store`] - Account state and balance mutation rules
//!   - [`core::transaction_log`] - Append-only transaction history
//!   - [`core::engine`] - Validated account operations over both
//!   - [`core::traits`] - Clock and persistence seams
//! - [`io`] - CSV file format and file-backed persistence
//! - [`cli`] - CLI arguments and menu text
//! - [`session`] - Interactive menu loop
//!
//! # Operations
//!
//! - **Create Account**: Open an account with a non-negative balance
//! - **Deposit**: Credit a positive amount to an existing account
//! - **Withdraw**: Debit a positive amount not exceeding the balance
//! - **Check Balance**: Read the current balance
//! - **View Statement**: List an account's deposits and withdrawals in order
//!
//! # Invariants
//!
//! - Balances are never negative
//! - Every successful deposit or withdrawal appends exactly one record
//! - A failed operation changes nothing

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod session;
pub mod types;

pub use crate::core::{Clock, Ledger, LedgerStore, Persistence, SystemClock, TransactionLog};
pub use crate::io::CsvStore;
pub use session::{Session, SessionConfig};
pub use types::{Account, AccountId, LedgerError, TransactionRecord, TransactionType};
