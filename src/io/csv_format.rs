//! CSV format handling for the accounts and transactions files
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for deserialization
//! - Conversion from rows to domain types
//! - Serialization of accounts and transaction records
//!
//! # File Layout
//!
//! ```text
//! Account Number,Balance
//! A1,150.0
//! ```
//!
//! ```text
//! Account Number,Amount,Transaction Type,Transaction Time
//! A1,50,deposit,2024-01-15 10:30:45.123456
//! ```
//!
//! Column names and order are fixed so files from earlier runs keep loading.
//!
//! All functions work on generic readers and writers (no file handling) for
//! easy testing.

use crate::types::{Account, LedgerError, TransactionRecord, TransactionType};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::{Read, Write};
use std::str::FromStr;

/// Header of the accounts file
pub const ACCOUNTS_HEADER: [&str; 2] = ["Account Number", "Balance"];

/// Header of the transactions file
pub const TRANSACTIONS_HEADER: [&str; 4] = [
    "Account Number",
    "Amount",
    "Transaction Type",
    "Transaction Time",
];

/// Timestamp format written to the transactions file
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Formats accepted when reading timestamps
const ACCEPTED_TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One row of the accounts file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountRow {
    #[serde(rename = "Account Number")]
    pub account_number: String,
    #[serde(rename = "Balance")]
    pub balance: String,
}

/// One row of the transactions file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TransactionRow {
    #[serde(rename = "Account Number")]
    pub account_number: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Transaction Type")]
    pub transaction_type: String,
    #[serde(rename = "Transaction Time")]
    pub transaction_time: String,
}

/// Parse a decimal amount as written by this program or by older tools
///
/// Accepts plain decimals (`150.0`) and scientific notation (`1.5e2`).
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// Parse a transaction timestamp
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    ACCEPTED_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Format a transaction timestamp for the transactions file
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a transaction type name
///
/// Case-insensitive. `withdrawal` is accepted as an alias of `withdraw`.
pub fn parse_transaction_type(value: &str) -> Option<TransactionType> {
    match value.trim().to_lowercase().as_str() {
        "deposit" => Some(TransactionType::Deposit),
        "withdraw" | "withdrawal" => Some(TransactionType::Withdraw),
        _ => None,
    }
}

/// Convert an AccountRow to an Account
///
/// The accounts file does not store creation times, so `created_at` is
/// supplied by the caller.
///
/// # Arguments
///
/// * `row` - The deserialized row
/// * `line` - Line number for error messages
/// * `created_at` - Creation time to assign
pub fn convert_account_row(
    row: AccountRow,
    line: Option<u64>,
    created_at: NaiveDateTime,
) -> Result<Account, LedgerError> {
    let balance = parse_amount(&row.balance)
        .ok_or_else(|| LedgerError::invalid_record("Balance", &row.balance, line))?;

    Ok(Account::new(row.account_number.trim(), balance, created_at))
}

/// Convert a TransactionRow to a TransactionRecord
///
/// # Errors
///
/// Returns an error if the amount, transaction type or time cannot be
/// parsed.
pub fn convert_transaction_row(
    row: TransactionRow,
    line: Option<u64>,
) -> Result<TransactionRecord, LedgerError> {
    let amount = parse_amount(&row.amount)
        .ok_or_else(|| LedgerError::invalid_record("Amount", &row.amount, line))?;

    let tx_type = parse_transaction_type(&row.transaction_type).ok_or_else(|| {
        LedgerError::invalid_record("Transaction Type", &row.transaction_type, line)
    })?;

    let timestamp = parse_timestamp(&row.transaction_time).ok_or_else(|| {
        LedgerError::invalid_record("Transaction Time", &row.transaction_time, line)
    })?;

    Ok(TransactionRecord {
        account_id: row.account_number.trim().to_string(),
        amount,
        tx_type,
        timestamp,
    })
}

/// Read all accounts from CSV input
///
/// # Errors
///
/// Returns an error on the first malformed row.
pub fn read_accounts_csv<R: Read>(
    input: R,
    created_at: NaiveDateTime,
) -> Result<Vec<Account>, LedgerError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);

    reader
        .deserialize::<AccountRow>()
        .enumerate()
        .map(|(index, result)| {
            // Line 1 is the header
            let line = Some(index as u64 + 2);
            convert_account_row(result?, line, created_at)
        })
        .collect()
}

/// Read all transaction records from CSV input, in file order
///
/// # Errors
///
/// Returns an error on the first malformed row.
pub fn read_transactions_csv<R: Read>(input: R) -> Result<Vec<TransactionRecord>, LedgerError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);

    reader
        .deserialize::<TransactionRow>()
        .enumerate()
        .map(|(index, result)| {
            let line = Some(index as u64 + 2);
            convert_transaction_row(result?, line)
        })
        .collect()
}

/// Write accounts in CSV format
///
/// The header is always written, even when there are no accounts.
pub fn write_accounts_csv(accounts: &[&Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(ACCOUNTS_HEADER)?;

    for account in accounts {
        writer.write_record(&[account.id.clone(), account.balance.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write transaction records in CSV format
///
/// The header is always written, even when there are no records.
pub fn write_transactions_csv(
    records: &[TransactionRecord],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(TRANSACTIONS_HEADER)?;

    for record in records {
        writer.write_record(&[
            record.account_id.clone(),
            record.amount.to_string(),
            record.tx_type.as_str().to_string(),
            format_timestamp(&record.timestamp),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[rstest]
    #[case::plain("150.0", Decimal::new(1500, 1))]
    #[case::integer("42", Decimal::new(42, 0))]
    #[case::padded("  7.25 ", Decimal::new(725, 2))]
    #[case::scientific("1.5e2", Decimal::new(150, 0))]
    fn test_parse_amount_valid(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(input), Some(expected));
    }

    #[rstest]
    #[case::empty("")]
    #[case::text("abc")]
    #[case::nan("nan")]
    fn test_parse_amount_invalid(#[case] input: &str) {
        assert_eq!(parse_amount(input), None);
    }

    #[rstest]
    #[case::micros("2024-01-15 10:30:45.123456", 123_456_000)]
    #[case::no_fraction("2024-01-15 10:30:45", 0)]
    #[case::iso("2024-01-15T10:30:45.5", 500_000_000)]
    fn test_parse_timestamp(#[case] input: &str, #[case] nanos: u32) {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_nano_opt(10, 30, 45, nanos)
            .unwrap();
        assert_eq!(parse_timestamp(input), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_format_timestamp_uses_microseconds() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_micro_opt(10, 30, 45, 7)
            .unwrap();
        assert_eq!(format_timestamp(&timestamp), "2024-01-15 10:30:45.000007");
    }

    #[rstest]
    #[case("deposit", Some(TransactionType::Deposit))]
    #[case("DEPOSIT", Some(TransactionType::Deposit))]
    #[case("withdraw", Some(TransactionType::Withdraw))]
    #[case("Withdrawal", Some(TransactionType::Withdraw))]
    #[case("transfer", None)]
    fn test_parse_transaction_type(#[case] input: &str, #[case] expected: Option<TransactionType>) {
        assert_eq!(parse_transaction_type(input), expected);
    }

    #[test]
    fn test_read_accounts_csv() {
        let input = "Account Number,Balance\nA1,150.0\n1002, 20\n";

        let accounts = read_accounts_csv(input.as_bytes(), noon()).unwrap();

        assert_eq!(
            accounts,
            vec![
                Account::new("A1", Decimal::new(1500, 1), noon()),
                Account::new("1002", Decimal::new(20, 0), noon()),
            ]
        );
    }

    #[test]
    fn test_read_accounts_csv_header_only() {
        let accounts = read_accounts_csv("Account Number,Balance\n".as_bytes(), noon()).unwrap();
        assert!(accounts.is_empty());
    }

    #[test]
    fn test_read_accounts_csv_bad_balance_reports_line() {
        let input = "Account Number,Balance\nA1,10\nB2,lots\n";

        let result = read_accounts_csv(input.as_bytes(), noon());

        assert_eq!(
            result.unwrap_err(),
            LedgerError::invalid_record("Balance", "lots", Some(3))
        );
    }

    #[test]
    fn test_read_accounts_csv_missing_column() {
        let input = "Account Number\nA1\n";

        let result = read_accounts_csv(input.as_bytes(), noon());

        assert!(matches!(result.unwrap_err(), LedgerError::ParseError { .. }));
    }

    #[test]
    fn test_read_transactions_csv() {
        let input = "Account Number,Amount,Transaction Type,Transaction Time\n\
                     A1,50.0,deposit,2024-01-15 10:30:45.123456\n\
                     A1,20,withdraw,2024-01-15 10:31:00\n";

        let records = read_transactions_csv(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].account_id, "A1");
        assert_eq!(records[0].amount, Decimal::new(500, 1));
        assert_eq!(records[0].tx_type, TransactionType::Deposit);
        assert_eq!(records[1].tx_type, TransactionType::Withdraw);
        assert_eq!(
            records[1].timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 31, 0)
                .unwrap()
        );
    }

    #[rstest]
    #[case::bad_type("A1,5,transfer,2024-01-15 10:30:45", "Transaction Type")]
    #[case::bad_amount("A1,five,deposit,2024-01-15 10:30:45", "Amount")]
    #[case::bad_time("A1,5,deposit,soon", "Transaction Time")]
    fn test_read_transactions_csv_invalid_rows(#[case] row: &str, #[case] field: &str) {
        let input = format!(
            "Account Number,Amount,Transaction Type,Transaction Time\n{}\n",
            row
        );

        let result = read_transactions_csv(input.as_bytes());

        match result.unwrap_err() {
            LedgerError::InvalidRecord { field: f, line, .. } => {
                assert_eq!(f, field);
                assert_eq!(line, Some(2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_write_accounts_csv() {
        let a1 = Account::new("A1", Decimal::new(1500, 1), noon());
        let b2 = Account::new("B2", Decimal::ZERO, noon());
        let mut output = Vec::new();

        write_accounts_csv(&[&a1, &b2], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Account Number,Balance\nA1,150.0\nB2,0\n"
        );
    }

    #[test]
    fn test_write_empty_files_keep_headers() {
        let mut accounts = Vec::new();
        let mut transactions = Vec::new();

        write_accounts_csv(&[], &mut accounts).unwrap();
        write_transactions_csv(&[], &mut transactions).unwrap();

        assert_eq!(
            String::from_utf8(accounts).unwrap(),
            "Account Number,Balance\n"
        );
        assert_eq!(
            String::from_utf8(transactions).unwrap(),
            "Account Number,Amount,Transaction Type,Transaction Time\n"
        );
    }

    #[test]
    fn test_write_then_read_transactions() {
        let records = vec![
            TransactionRecord {
                account_id: "A1".to_string(),
                amount: Decimal::new(50, 0),
                tx_type: TransactionType::Deposit,
                timestamp: noon(),
            },
            TransactionRecord {
                account_id: "A1".to_string(),
                amount: Decimal::new(1255, 2),
                tx_type: TransactionType::Withdraw,
                timestamp: noon(),
            },
        ];
        let mut output = Vec::new();

        write_transactions_csv(&records, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("A1,12.55,withdraw,2024-01-15 12:00:00.000000"));
        assert_eq!(read_transactions_csv(text.as_bytes()).unwrap(), records);
    }
}
