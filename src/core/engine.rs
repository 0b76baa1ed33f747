//! Ledger engine
//!
//! This module provides the `Ledger` that carries out account operations by
//! coordinating between the LedgerStore and TransactionLog components.
//!
//! The engine enforces business rules such as:
//! - Amounts for deposits and withdrawals must be strictly positive
//! - Balances never go negative
//! - Every successful deposit or withdrawal adds exactly one log record,
//!   and a failed one adds none
//!
//! # Lifecycle
//!
//! A `Ledger` is built from owned store and log values (or loaded through a
//! [`Persistence`] implementation), mutated by the operations below, and
//! written back with [`Ledger::save`].

use crate::core::ledger_store::LedgerStore;
use crate::core::traits::{Clock, Persistence, SystemClock};
use crate::core::transaction_log::{Statement, TransactionLog};
use crate::types::{Account, LedgerError, TransactionRecord, TransactionType};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info};

/// Account operations over a store and its transaction log
///
/// Each operation runs to completion before returning; no caller can
/// observe a balance change without its log record or vice versa.
#[derive(Debug)]
pub struct Ledger<C: Clock = SystemClock> {
    store: LedgerStore,
    log: TransactionLog,
    clock: C,
}

impl Ledger<SystemClock> {
    /// Create an empty ledger using the wall clock
    pub fn new() -> Self {
        Ledger::with_parts(LedgerStore::new(), TransactionLog::new(), SystemClock)
    }
}

impl Default for Ledger<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Ledger<C> {
    /// Create a ledger from an existing store, log and clock
    pub fn with_parts(store: LedgerStore, log: TransactionLog, clock: C) -> Self {
        Ledger { store, log, clock }
    }

    /// Load the starting state from storage
    ///
    /// Accounts whose stored data carries no creation time get the
    /// timestamp of their earliest logged transaction, when that is earlier
    /// than what storage reported.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or holds invalid data.
    pub fn load<P: Persistence>(persistence: &P, clock: C) -> Result<Self, LedgerError> {
        let records = persistence.load_transactions()?;

        let mut earliest = HashMap::new();
        for record in &records {
            earliest
                .entry(record.account_id.as_str())
                .and_modify(|t| {
                    if record.timestamp < *t {
                        *t = record.timestamp;
                    }
                })
                .or_insert(record.timestamp);
        }

        let loaded_at = clock.now();
        let accounts = persistence
            .load_accounts(loaded_at)?
            .into_iter()
            .map(|mut account| {
                if let Some(&first) = earliest.get(account.id.as_str()) {
                    account.created_at = account.created_at.min(first);
                }
                account
            });
        let store = LedgerStore::from_accounts(accounts)?;

        let log = TransactionLog::from_records(records)?;

        info!(
            accounts = store.len(),
            transactions = log.len(),
            "ledger loaded"
        );

        Ok(Ledger::with_parts(store, log, clock))
    }

    /// Write accounts and transaction history to storage
    pub fn save<P: Persistence>(&self, persistence: &P) -> Result<(), LedgerError> {
        persistence.save_accounts(&self.store.accounts())?;
        persistence.save_transactions(self.log.records())?;

        info!(
            accounts = self.store.len(),
            transactions = self.log.len(),
            "ledger saved"
        );
        Ok(())
    }

    /// Open a new account
    ///
    /// Account creation is not recorded in the transaction log.
    ///
    /// # Errors
    ///
    /// Returns an error if the account number is blank or already taken, or
    /// the opening balance is negative.
    pub fn create_account(
        &mut self,
        account_id: &str,
        initial_balance: Decimal,
    ) -> Result<&Account, LedgerError> {
        let now = self.clock.now();
        self.store.create_account(account_id, initial_balance, now)
    }

    /// Deposit funds into an account
    ///
    /// # Returns
    ///
    /// The new balance
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero or negative
    /// - The account does not exist
    /// - The transaction log is full
    pub fn deposit(&mut self, account_id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.apply(account_id, amount, TransactionType::Deposit)
    }

    /// Withdraw funds from an account
    ///
    /// # Returns
    ///
    /// The new balance
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero or negative
    /// - The account does not exist
    /// - The amount exceeds the current balance
    /// - The transaction log is full
    pub fn withdraw(&mut self, account_id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.apply(account_id, amount, TransactionType::Withdraw)
    }

    /// Current balance of an account
    pub fn check_balance(&self, account_id: &str) -> Result<Decimal, LedgerError> {
        self.store
            .get_account(account_id)
            .map(|account| account.balance)
            .ok_or_else(|| LedgerError::account_not_found(account_id))
    }

    /// Transaction history of an account, oldest first
    ///
    /// Does not check that the account exists: an unknown account simply
    /// has an empty statement.
    pub fn statement<'a>(&'a self, account_id: &'a str) -> Statement<'a> {
        self.log.statement_for(account_id)
    }

    /// Look up an account
    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.store.get_account(account_id)
    }

    /// All accounts sorted by account number
    pub fn accounts(&self) -> Vec<&Account> {
        self.store.accounts()
    }

    /// Full transaction history in insertion order
    pub fn transactions(&self) -> &[TransactionRecord] {
        self.log.records()
    }

    /// Take the store and log back out of the ledger
    pub fn into_parts(self) -> (LedgerStore, TransactionLog) {
        (self.store, self.log)
    }

    fn apply(
        &mut self,
        account_id: &str,
        amount: Decimal,
        tx_type: TransactionType,
    ) -> Result<Decimal, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount, tx_type.as_str()));
        }

        // Checked up front so a full log cannot strand a balance change
        self.log.ensure_capacity()?;

        let delta = match tx_type {
            TransactionType::Deposit => amount,
            TransactionType::Withdraw => -amount,
        };
        let new_balance = self.store.adjust_balance(account_id, delta)?;

        let now = self.clock.now();
        self.log.append(account_id, amount, tx_type, now)?;

        debug!(
            account = account_id,
            %tx_type,
            %amount,
            balance = %new_balance,
            "transaction applied"
        );
        Ok(new_balance)
    }
}
