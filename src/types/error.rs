//! Error types for the bank ledger
//!
//! This module defines all error types that can occur while operating on the
//! ledger or moving its state to and from storage.
//!
//! # Error Categories
//!
//! - **Ledger Errors**: Invalid amount, unknown or duplicate account,
//!   insufficient funds. The caller reports them and carries on.
//! - **Persistence Errors**: File I/O failures and malformed CSV data.
//!   These are fatal when loading the starting state.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank ledger
///
/// Each variant includes relevant context so the message can be shown to
/// the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Amount is not acceptable for the operation
    ///
    /// Deposits and withdrawals need a strictly positive amount; opening
    /// balances must not be negative.
    #[error("Invalid amount {amount} for {operation}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
        /// Operation that rejected it
        operation: String,
    },

    /// Account number is empty or blank
    #[error("Invalid account number '{account}'")]
    InvalidAccountId {
        /// The rejected account number
        account: String,
    },

    /// Operation references an account that does not exist
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The unknown account number
        account: String,
    },

    /// Account creation with an account number already in use
    #[error("Account {account} already exists")]
    DuplicateAccount {
        /// The duplicated account number
        account: String,
    },

    /// Withdrawal exceeds the current balance
    ///
    /// The account is left unchanged.
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account number
        account: String,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Balance arithmetic would overflow
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account number
        account: String,
    },

    /// The transaction log cannot accept more entries
    #[error("Transaction log is full ({capacity} records)")]
    StorageFull {
        /// Configured maximum number of records
        capacity: usize,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A stored row parsed as CSV but holds an unusable value
    #[error("Invalid {field} '{value}'{}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidRecord {
        /// Column holding the bad value
        field: String,
        /// The raw value
        value: String,
        /// Line number (if available)
        line: Option<u64>,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal, operation: &str) -> Self {
        LedgerError::InvalidAmount {
            amount,
            operation: operation.to_string(),
        }
    }

    /// Create an InvalidAccountId error
    pub fn invalid_account_id(account: &str) -> Self {
        LedgerError::InvalidAccountId {
            account: account.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        LedgerError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: &str) -> Self {
        LedgerError::DuplicateAccount {
            account: account.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an InvalidRecord error
    pub fn invalid_record(field: &str, value: &str, line: Option<u64>) -> Self {
        LedgerError::InvalidRecord {
            field: field.to_string(),
            value: value.to_string(),
            line,
        }
    }

    /// Whether the caller can report this error and keep going
    ///
    /// Ledger validation failures are recoverable. Storage failures are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidAmount { .. }
                | LedgerError::InvalidAccountId { .. }
                | LedgerError::AccountNotFound { .. }
                | LedgerError::DuplicateAccount { .. }
                | LedgerError::InsufficientFunds { .. }
                | LedgerError::ArithmeticOverflow { .. }
                | LedgerError::StorageFull { .. }
        )
    }
}
