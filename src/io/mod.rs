//! I/O module
//!
//! Handles reading and writing the ledger's CSV files.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, serialization)
//! - `csv_store` - File-backed implementation of the persistence trait

pub mod csv_format;
pub mod csv_store;

pub use csv_format::{
    read_accounts_csv, read_transactions_csv, write_accounts_csv, write_transactions_csv,
    AccountRow, TransactionRow,
};
pub use csv_store::CsvStore;
