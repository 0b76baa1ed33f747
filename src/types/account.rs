//! Account-related types for the bank ledger
//!
//! This module defines the Account structure held by the ledger store.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Account identifier
///
/// Free-form account number as typed by the user (e.g. "A1", "1002").
pub type AccountId = String;

/// Bank account state
///
/// Exactly one instance exists per account id, owned by the
/// [`LedgerStore`](crate::core::LedgerStore). Only `balance` ever changes
/// after creation, and only through the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The account number
    pub id: AccountId,

    /// Current balance
    ///
    /// Never negative. Deposits increase it, withdrawals decrease it.
    pub balance: Decimal,

    /// When the account was opened
    pub created_at: NaiveDateTime,
}

impl Account {
    /// Create a new account with the given opening balance
    ///
    /// # Arguments
    ///
    /// * `id` - The account number
    /// * `balance` - The opening balance
    /// * `created_at` - Creation timestamp
    pub fn new(id: impl Into<AccountId>, balance: Decimal, created_at: NaiveDateTime) -> Self {
        Account {
            id: id.into(),
            balance,
            created_at,
        }
    }
}
