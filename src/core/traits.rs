//! Core traits for time and persistence
//!
//! This module defines the seams the ledger depends on without owning:
//! where timestamps come from, and where state is loaded from and saved to.

use crate::types::{Account, LedgerError, TransactionRecord};
use chrono::{Local, NaiveDateTime};

/// Source of timestamps for account creation and transactions
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Trait for loading and saving ledger state
///
/// Called once at startup to load the starting state and at shutdown to
/// write it back. Implementations never see the ledger mid-operation.
pub trait Persistence {
    /// Load all stored accounts
    ///
    /// `created_at` is assigned to accounts whose storage has no creation
    /// time of its own.
    fn load_accounts(&self, created_at: NaiveDateTime) -> Result<Vec<Account>, LedgerError>;

    /// Load all stored transaction records, oldest first
    fn load_transactions(&self) -> Result<Vec<TransactionRecord>, LedgerError>;

    /// Replace the stored accounts
    fn save_accounts(&self, accounts: &[&Account]) -> Result<(), LedgerError>;

    /// Replace the stored transaction records
    fn save_transactions(&self, records: &[TransactionRecord]) -> Result<(), LedgerError>;
}
