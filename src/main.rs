//! Bank Ledger CLI
//!
//! Interactive menu for creating accounts, depositing, withdrawing and
//! viewing statements.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --accounts data/accounts.csv --transactions data/transactions.csv
//! cargo run -- --flush-each-operation --log-level debug
//! ```
//!
//! Existing accounts and transactions are loaded from the CSV files at
//! startup (missing files mean an empty ledger) and written back on exit.
//! Logs go to stderr; `RUST_LOG` overrides `--log-level`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unreadable or malformed data files, failed save, terminal I/O error)

use bank_ledger::cli;
use bank_ledger::{Ledger, Session, SystemClock};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let store = args.csv_store();

    // Without a starting state the session cannot run
    let ledger = match Ledger::load(&store, SystemClock) {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut session = Session::new(ledger, &store, args.to_session_config());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(e) = session.run(stdin.lock(), &mut stdout) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
