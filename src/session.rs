//! Interactive menu session
//!
//! This module drives the numbered text menu. It reads choices and values
//! from any `BufRead`, calls into the [`Ledger`], and writes human-readable
//! results to any `Write`.
//!
//! # Design
//!
//! The session only orchestrates, delegating:
//! - Menu text and choice parsing to `cli::menu`
//! - Account operations to `Ledger`
//! - Saving to the injected `Persistence` implementation
//!
//! # Error Handling
//!
//! Ledger errors (unknown account, insufficient funds, ...) are printed and
//! the menu is shown again. Unparseable amounts are reported the same way.
//! Only I/O failures on the terminal and a failed final save end the
//! session with an error.
//!
//! # Lifecycle
//!
//! State is saved when the user picks Exit or input ends. With
//! `flush_each_operation` set, it is also saved after every successful
//! account creation, deposit and withdrawal.

use crate::cli::menu::{parse_typed_amount, render_statement, MenuChoice, CHOICE_PROMPT, MENU};
use crate::core::traits::{Clock, Persistence, SystemClock};
use crate::core::Ledger;
use crate::types::LedgerError;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use tracing::{error, warn};

/// Session behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Save after every successful mutating operation, not only on exit
    pub flush_each_operation: bool,
}

/// What a menu action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Ledger state changed
    Applied,
    /// Read-only action, or the request was refused
    Unchanged,
    /// Input ended while prompting
    EndOfInput,
}

/// One interactive run over a ledger
pub struct Session<'p, P: Persistence, C: Clock = SystemClock> {
    ledger: Ledger<C>,
    persistence: &'p P,
    config: SessionConfig,
}

impl<'p, P: Persistence, C: Clock> Session<'p, P, C> {
    /// Create a session over a loaded ledger
    pub fn new(ledger: Ledger<C>, persistence: &'p P, config: SessionConfig) -> Self {
        Session {
            ledger,
            persistence,
            config,
        }
    }

    /// The ledger this session operates on
    pub fn ledger(&self) -> &Ledger<C> {
        &self.ledger
    }

    /// End the session and take the ledger back
    pub fn into_ledger(self) -> Ledger<C> {
        self.ledger
    }

    /// Run the menu loop until Exit or end of input, then save
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails, or if the
    /// final save fails.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> Result<(), LedgerError> {
        loop {
            writeln!(output, "{}", MENU)?;
            let Some(line) = prompt(&mut input, output, CHOICE_PROMPT)? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(output, "Invalid choice. Please choose a valid option.")?;
                continue;
            };

            let outcome = match choice {
                MenuChoice::CreateAccount => self.create_account(&mut input, output)?,
                MenuChoice::Deposit => self.deposit(&mut input, output)?,
                MenuChoice::Withdraw => self.withdraw(&mut input, output)?,
                MenuChoice::CheckBalance => self.check_balance(&mut input, output)?,
                MenuChoice::ViewStatement => self.view_statement(&mut input, output)?,
                MenuChoice::Exit => break,
            };

            match outcome {
                Outcome::Applied if self.config.flush_each_operation => self.flush(output)?,
                Outcome::Applied | Outcome::Unchanged => {}
                Outcome::EndOfInput => break,
            }
        }

        writeln!(output, "Exiting program.")?;
        output.flush()?;
        self.ledger.save(self.persistence)
    }

    fn create_account<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome, LedgerError> {
        let Some(account_id) = prompt(input, output, "Enter account number: ")? else {
            return Ok(Outcome::EndOfInput);
        };
        let Some(raw) = prompt(input, output, "Enter initial balance: ")? else {
            return Ok(Outcome::EndOfInput);
        };
        let Some(initial_balance) = read_amount(&raw, output)? else {
            return Ok(Outcome::Unchanged);
        };

        match self.ledger.create_account(&account_id, initial_balance) {
            Ok(_) => {
                writeln!(output, "Account created successfully.")?;
                Ok(Outcome::Applied)
            }
            Err(e) => reject(e, output),
        }
    }

    fn deposit<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome, LedgerError> {
        let Some(account_id) = prompt(input, output, "Enter account number: ")? else {
            return Ok(Outcome::EndOfInput);
        };
        let Some(raw) = prompt(input, output, "Enter deposit amount: ")? else {
            return Ok(Outcome::EndOfInput);
        };
        let Some(amount) = read_amount(&raw, output)? else {
            return Ok(Outcome::Unchanged);
        };

        match self.ledger.deposit(&account_id, amount) {
            Ok(balance) => {
                writeln!(output, "Deposited {}. New balance: {}", amount, balance)?;
                Ok(Outcome::Applied)
            }
            Err(e) => reject(e, output),
        }
    }

    fn withdraw<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome, LedgerError> {
        let Some(account_id) = prompt(input, output, "Enter account number: ")? else {
            return Ok(Outcome::EndOfInput);
        };
        let Some(raw) = prompt(input, output, "Enter withdrawal amount: ")? else {
            return Ok(Outcome::EndOfInput);
        };
        let Some(amount) = read_amount(&raw, output)? else {
            return Ok(Outcome::Unchanged);
        };

        match self.ledger.withdraw(&account_id, amount) {
            Ok(balance) => {
                writeln!(output, "Withdrawn {}. New balance: {}", amount, balance)?;
                Ok(Outcome::Applied)
            }
            Err(e) => reject(e, output),
        }
    }

    fn check_balance<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome, LedgerError> {
        let Some(account_id) = prompt(input, output, "Enter account number: ")? else {
            return Ok(Outcome::EndOfInput);
        };

        match self.ledger.check_balance(&account_id) {
            Ok(balance) => {
                writeln!(
                    output,
                    "Current balance for account {}: {}",
                    account_id, balance
                )?;
                Ok(Outcome::Unchanged)
            }
            Err(e) => reject(e, output),
        }
    }

    fn view_statement<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome, LedgerError> {
        let Some(account_id) = prompt(input, output, "Enter account number: ")? else {
            return Ok(Outcome::EndOfInput);
        };

        match render_statement(self.ledger.statement(&account_id)) {
            Some(table) => write!(output, "{}", table)?,
            None => writeln!(output, "No transactions found.")?,
        }
        Ok(Outcome::Unchanged)
    }

    /// Save mid-session; a failure is reported but does not end the session
    fn flush<W: Write>(&self, output: &mut W) -> Result<(), LedgerError> {
        if let Err(e) = self.ledger.save(self.persistence) {
            error!(error = %e, "failed to save ledger");
            writeln!(output, "Warning: changes not saved: {}", e)?;
        }
        Ok(())
    }
}

/// Print a prompt and read one trimmed line
///
/// Returns `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> Result<Option<String>, LedgerError> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Parse a user-supplied amount, reporting bad input
fn read_amount<W: Write>(raw: &str, output: &mut W) -> Result<Option<Decimal>, LedgerError> {
    match parse_typed_amount(raw) {
        Some(amount) => Ok(Some(amount)),
        None => {
            warn!(input = raw, "unparseable amount");
            writeln!(output, "Invalid amount '{}'.", raw)?;
            Ok(None)
        }
    }
}

/// Report a refused operation, or escalate an unrecoverable error
fn reject<W: Write>(error: LedgerError, output: &mut W) -> Result<Outcome, LedgerError> {
    if !error.is_recoverable() {
        return Err(error);
    }
    warn!(error = %error, "operation rejected");
    writeln!(output, "Error: {}", error)?;
    Ok(Outcome::Unchanged)
}
