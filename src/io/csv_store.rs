//! CSV file persistence
//!
//! Implements the [`Persistence`] trait over two flat CSV files, one for
//! accounts and one for transactions. Format details live in
//! [`csv_format`](crate::io::csv_format).
//!
//! # Missing Files
//!
//! A missing file loads as an empty collection, so the first run starts with
//! an empty ledger. Every other read failure is returned to the caller.
//!
//! # Saving
//!
//! Each save overwrites the whole file.

use crate::core::traits::Persistence;
use crate::io::csv_format::{
    read_accounts_csv, read_transactions_csv, write_accounts_csv, write_transactions_csv,
};
use crate::types::{Account, LedgerError, TransactionRecord};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default accounts file name
pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.csv";

/// Default transactions file name
pub const DEFAULT_TRANSACTIONS_FILE: &str = "transactions.csv";

/// Ledger storage backed by two CSV files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvStore {
    accounts_path: PathBuf,
    transactions_path: PathBuf,
}

impl CsvStore {
    /// Create a store over the given file paths
    ///
    /// Files are not touched until the first load or save.
    pub fn new(accounts_path: impl Into<PathBuf>, transactions_path: impl Into<PathBuf>) -> Self {
        CsvStore {
            accounts_path: accounts_path.into(),
            transactions_path: transactions_path.into(),
        }
    }

    /// Create a store using the default file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        CsvStore::new(
            dir.join(DEFAULT_ACCOUNTS_FILE),
            dir.join(DEFAULT_TRANSACTIONS_FILE),
        )
    }

    /// Path of the accounts file
    pub fn accounts_path(&self) -> &Path {
        &self.accounts_path
    }

    /// Path of the transactions file
    pub fn transactions_path(&self) -> &Path {
        &self.transactions_path
    }

    /// Open a file for reading, treating a missing file as no data
    fn open_existing(path: &Path) -> Result<Option<BufReader<File>>, LedgerError> {
        match File::open(path) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no stored data, starting empty");
                Ok(None)
            }
            Err(e) => Err(LedgerError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            }),
        }
    }

    /// Create or truncate a file for writing
    fn create(path: &Path) -> Result<BufWriter<File>, LedgerError> {
        let file = File::create(path).map_err(|e| LedgerError::IoError {
            message: format!("Failed to write file '{}': {}", path.display(), e),
        })?;
        Ok(BufWriter::new(file))
    }
}

impl Default for CsvStore {
    fn default() -> Self {
        CsvStore::new(DEFAULT_ACCOUNTS_FILE, DEFAULT_TRANSACTIONS_FILE)
    }
}

impl Persistence for CsvStore {
    fn load_accounts(&self, created_at: NaiveDateTime) -> Result<Vec<Account>, LedgerError> {
        let Some(reader) = Self::open_existing(&self.accounts_path)? else {
            return Ok(Vec::new());
        };

        // The accounts file has no creation time column
        let accounts = read_accounts_csv(reader, created_at)?;
        debug!(path = %self.accounts_path.display(), count = accounts.len(), "accounts read");
        Ok(accounts)
    }

    fn load_transactions(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
        let Some(reader) = Self::open_existing(&self.transactions_path)? else {
            return Ok(Vec::new());
        };

        let records = read_transactions_csv(reader)?;
        debug!(path = %self.transactions_path.display(), count = records.len(), "transactions read");
        Ok(records)
    }

    fn save_accounts(&self, accounts: &[&Account]) -> Result<(), LedgerError> {
        let mut writer = Self::create(&self.accounts_path)?;
        write_accounts_csv(accounts, &mut writer)?;
        writer.flush()?;
        debug!(path = %self.accounts_path.display(), count = accounts.len(), "accounts written");
        Ok(())
    }

    fn save_transactions(&self, records: &[TransactionRecord]) -> Result<(), LedgerError> {
        let mut writer = Self::create(&self.transactions_path)?;
        write_transactions_csv(records, &mut writer)?;
        writer.flush()?;
        debug!(path = %self.transactions_path.display(), count = records.len(), "transactions written");
        Ok(())
    }
}
