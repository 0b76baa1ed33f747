use crate::io::csv_store::{CsvStore, DEFAULT_ACCOUNTS_FILE, DEFAULT_TRANSACTIONS_FILE};
use crate::session::SessionConfig;
use clap::Parser;
use std::path::PathBuf;

/// Interactive bank account ledger backed by CSV files
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Interactive bank account ledger backed by CSV files", long_about = None)]
pub struct CliArgs {
    /// Accounts CSV file path
    #[arg(
        long = "accounts",
        value_name = "PATH",
        default_value = DEFAULT_ACCOUNTS_FILE,
        help = "Path to the accounts CSV file (created on exit if missing)"
    )]
    pub accounts_file: PathBuf,

    /// Transactions CSV file path
    #[arg(
        long = "transactions",
        value_name = "PATH",
        default_value = DEFAULT_TRANSACTIONS_FILE,
        help = "Path to the transactions CSV file (created on exit if missing)"
    )]
    pub transactions_file: PathBuf,

    /// Save both files after every successful change instead of only on exit
    #[arg(
        long = "flush-each-operation",
        help = "Save both files after every account creation, deposit and withdrawal"
    )]
    pub flush_each_operation: bool,

    /// Log verbosity when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level written to stderr: error, warn, info, debug or trace"
    )]
    pub log_level: String,
}

impl CliArgs {
    /// Create a SessionConfig from CLI arguments
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            flush_each_operation: self.flush_each_operation,
        }
    }

    /// Storage over the configured file paths
    pub fn csv_store(&self) -> CsvStore {
        CsvStore::new(&self.accounts_file, &self.transactions_file)
    }
}
