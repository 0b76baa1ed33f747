//! Transaction-related types for the bank ledger
//!
//! This module defines the transaction types and the records kept in the
//! append-only transaction log.

use super::account::AccountId;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;

/// Transaction types supported by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    ///
    /// Requires the account balance to cover the amount.
    Withdraw,
}

impl TransactionType {
    /// Lowercase name used in the transactions file and in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in the transaction log
///
/// One record is written per successful deposit or withdrawal. Records are
/// never modified once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// The account this transaction applied to
    ///
    /// Always refers to an id that existed when the record was written.
    pub account_id: AccountId,

    /// The transaction amount
    ///
    /// Always positive, for withdrawals too. `tx_type` carries the direction.
    pub amount: Decimal,

    /// Deposit or withdraw
    pub tx_type: TransactionType,

    /// When the operation happened
    pub timestamp: NaiveDateTime,
}

impl TransactionRecord {
    /// Signed effect of this record on the account balance
    pub fn signed_amount(&self) -> Decimal {
        match self.tx_type {
            TransactionType::Deposit => self.amount,
            TransactionType::Withdraw => -self.amount,
        }
    }
}
