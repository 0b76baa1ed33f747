//! Menu text and choice parsing for the interactive session

use crate::io::csv_format::format_timestamp;
use crate::types::TransactionRecord;
use rust_decimal::Decimal;
use std::fmt::Write;
use std::str::FromStr;

/// Options shown before every choice prompt
pub const MENU: &str = "\nChoose an option:\n\
                        1. Create Bank Account\n\
                        2. Deposit\n\
                        3. Withdraw\n\
                        4. Check Balance\n\
                        5. View Statement\n\
                        6. Exit";

/// Prompt for the menu choice
pub const CHOICE_PROMPT: &str = "Enter your choice (1/2/3/4/5/6): ";

/// Menu options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateAccount,
    Deposit,
    Withdraw,
    CheckBalance,
    ViewStatement,
    Exit,
}

impl MenuChoice {
    /// Parse the user's menu input
    ///
    /// Returns `None` for anything other than the digits 1 through 6.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::CreateAccount),
            "2" => Some(MenuChoice::Deposit),
            "3" => Some(MenuChoice::Withdraw),
            "4" => Some(MenuChoice::CheckBalance),
            "5" => Some(MenuChoice::ViewStatement),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Parse an amount typed at a prompt
///
/// Only plain decimal notation is accepted: an optional sign, digits and at
/// most one decimal point. Sign checks are left to the ledger so that a
/// negative amount is reported as such.
pub fn parse_typed_amount(input: &str) -> Option<Decimal> {
    let input = input.trim();
    let digits = input.strip_prefix(['-', '+']).unwrap_or(input);

    if !digits.chars().any(|c| c.is_ascii_digit())
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        || digits.matches('.').count() > 1
    {
        return None;
    }

    Decimal::from_str(input).ok()
}

/// Render an account statement as a text table
///
/// Returns `None` when there are no records.
pub fn render_statement<'a, I>(records: I) -> Option<String>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut records = records.into_iter().peekable();
    records.peek()?;

    let mut table = String::from("Transaction History:\n");
    let _ = writeln!(
        table,
        "{:<16} {:>14}  {:<16} {}",
        "Account Number", "Amount", "Transaction Type", "Transaction Time"
    );
    for record in records {
        let _ = writeln!(
            table,
            "{:<16} {:>14}  {:<16} {}",
            record.account_id,
            record.amount.to_string(),
            record.tx_type.as_str(),
            format_timestamp(&record.timestamp)
        );
    }

    Some(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionType;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case("1", Some(MenuChoice::CreateAccount))]
    #[case("2", Some(MenuChoice::Deposit))]
    #[case("3", Some(MenuChoice::Withdraw))]
    #[case(" 4 ", Some(MenuChoice::CheckBalance))]
    #[case("5", Some(MenuChoice::ViewStatement))]
    #[case("6", Some(MenuChoice::Exit))]
    #[case("7", None)]
    #[case("", None)]
    #[case("deposit", None)]
    fn test_parse_choice(#[case] input: &str, #[case] expected: Option<MenuChoice>) {
        assert_eq!(MenuChoice::parse(input), expected);
    }

    #[rstest]
    #[case::integer("100", Decimal::new(100, 0))]
    #[case::fraction("12.55", Decimal::new(1255, 2))]
    #[case::padded(" 7.5 ", Decimal::new(75, 1))]
    #[case::negative("-5", Decimal::new(-5, 0))]
    fn test_parse_typed_amount_valid(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_typed_amount(input), Some(expected));
    }

    #[rstest]
    #[case::underscores("1_000")]
    #[case::exponent("1E+5")]
    #[case::tiny_exponent("1e-100")]
    #[case::words("ten")]
    #[case::empty("")]
    #[case::sign_only("-")]
    #[case::two_points("1.2.3")]
    #[case::too_many_digits("123456789012345678901234567890123")]
    fn test_parse_typed_amount_invalid(#[case] input: &str) {
        assert_eq!(parse_typed_amount(input), None);
    }

    #[test]
    fn test_render_empty_statement() {
        let records: Vec<TransactionRecord> = Vec::new();
        assert_eq!(render_statement(&records), None);
    }

    #[test]
    fn test_render_statement_lists_records() {
        let records = vec![TransactionRecord {
            account_id: "A1".to_string(),
            amount: Decimal::new(500, 1),
            tx_type: TransactionType::Deposit,
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }];

        let table = render_statement(&records).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Transaction History:");
        assert!(lines[1].starts_with("Account Number"));
        assert!(lines[2].starts_with("A1"));
        assert!(lines[2].contains("50.0"));
        assert!(lines[2].contains("deposit"));
        assert!(lines[2].ends_with("2024-01-15 10:00:00.000000"));
    }
}
