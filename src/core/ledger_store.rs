//! Ledger store module
//!
//! This module provides the `LedgerStore` struct which owns every account
//! and is the only place balances are mutated.
//!
//! The LedgerStore is responsible for:
//! - Opening accounts with a non-negative starting balance
//! - Rejecting duplicate account numbers
//! - Applying balance adjustments without ever going negative
//! - Providing sorted account listings for persistence

use crate::types::{Account, AccountId, LedgerError};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Owns all accounts and their balances
///
/// Holds exactly one long-lived `Account` per id. Callers get shared
/// references for reads; balances change only through [`adjust_balance`].
///
/// [`adjust_balance`]: LedgerStore::adjust_balance
#[derive(Debug, Default)]
pub struct LedgerStore {
    /// Map of account numbers to account state
    accounts: HashMap<AccountId, Account>,
}

impl LedgerStore {
    /// Create an empty LedgerStore
    pub fn new() -> Self {
        LedgerStore {
            accounts: HashMap::new(),
        }
    }

    /// Build a store from previously persisted accounts
    ///
    /// If the same account number appears more than once, the first
    /// occurrence is kept and later ones are ignored with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored account has a blank account number or a
    /// negative balance.
    pub fn from_accounts<I>(accounts: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = Account>,
    {
        let mut store = LedgerStore::new();

        for account in accounts {
            if account.id.trim().is_empty() {
                return Err(LedgerError::invalid_account_id(&account.id));
            }
            if account.balance < Decimal::ZERO {
                return Err(LedgerError::invalid_amount(account.balance, "load"));
            }
            if store.accounts.contains_key(&account.id) {
                warn!(account = %account.id, "duplicate stored account ignored");
                continue;
            }
            store.accounts.insert(account.id.clone(), account);
        }

        Ok(store)
    }

    /// Open a new account
    ///
    /// # Arguments
    ///
    /// * `id` - The account number (must not be blank)
    /// * `initial_balance` - Opening balance (zero or more)
    /// * `created_at` - Creation timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account number is blank
    /// - An account with this number already exists
    /// - The opening balance is negative
    pub fn create_account(
        &mut self,
        id: &str,
        initial_balance: Decimal,
        created_at: NaiveDateTime,
    ) -> Result<&Account, LedgerError> {
        if id.trim().is_empty() {
            return Err(LedgerError::invalid_account_id(id));
        }
        if self.accounts.contains_key(id) {
            return Err(LedgerError::duplicate_account(id));
        }
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::invalid_amount(initial_balance, "create_account"));
        }

        debug!(account = id, balance = %initial_balance, "account created");

        let account = self
            .accounts
            .entry(id.to_string())
            .or_insert_with(|| Account::new(id, initial_balance, created_at));
        Ok(account)
    }

    /// Look up an account by number
    pub fn get_account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Apply a signed change to an account balance
    ///
    /// Either the whole change is applied or the account is left untouched.
    ///
    /// # Arguments
    ///
    /// * `id` - The account number
    /// * `delta` - Amount to add (negative to subtract)
    ///
    /// # Returns
    ///
    /// The balance after the adjustment
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The resulting balance would be negative
    /// - Adding `delta` would overflow
    pub fn adjust_balance(&mut self, id: &str, delta: Decimal) -> Result<Decimal, LedgerError> {
        let account = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;

        let new_balance = account
            .balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::arithmetic_overflow("adjust_balance", id))?;

        if new_balance < Decimal::ZERO {
            return Err(LedgerError::insufficient_funds(
                id,
                account.balance,
                delta.abs(),
            ));
        }

        account.balance = new_balance;
        Ok(new_balance)
    }

    /// Get all accounts sorted by account number
    ///
    /// Sorting keeps the persisted accounts file stable between runs.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        accounts
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
