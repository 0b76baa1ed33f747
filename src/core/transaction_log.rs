//! Append-only transaction log
//!
//! This module provides the TransactionLog component that keeps the history
//! of every successful deposit and withdrawal, in the order they happened.
//!
//! # Ordering
//!
//! Records are kept in insertion order. Within a single account, timestamps
//! never go backwards: if the clock reports a time earlier than the
//! account's latest record, the record is stamped with that latest time
//! instead.
//!
//! # Capacity
//!
//! The log is unbounded by default. A bounded log rejects appends with
//! `StorageFull` once it holds `capacity` records.

use crate::types::{AccountId, LedgerError, TransactionRecord, TransactionType};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::slice;

/// Append-only log of transaction records
#[derive(Debug, Default)]
pub struct TransactionLog {
    /// Records in insertion order
    records: Vec<TransactionRecord>,

    /// Latest timestamp written per account
    latest: HashMap<AccountId, NaiveDateTime>,

    /// Maximum number of records, if bounded
    capacity: Option<usize>,
}

impl TransactionLog {
    /// Create a new empty, unbounded log
    pub fn new() -> Self {
        TransactionLog {
            records: Vec::new(),
            latest: HashMap::new(),
            capacity: None,
        }
    }

    /// Create a new empty log holding at most `capacity` records
    pub fn bounded(capacity: usize) -> Self {
        TransactionLog {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    /// Build a log from previously persisted records
    ///
    /// Records keep the order they are given in.
    ///
    /// # Errors
    ///
    /// Returns an error if a record has a non-positive amount.
    pub fn from_records<I>(records: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = TransactionRecord>,
    {
        let mut log = TransactionLog::new();

        for record in records {
            if record.amount <= Decimal::ZERO {
                return Err(LedgerError::invalid_amount(record.amount, "load"));
            }
            log.track_latest(&record.account_id, record.timestamp);
            log.records.push(record);
        }

        Ok(log)
    }

    /// Check that one more record can be appended
    ///
    /// Callers run this before mutating anything else so a full log never
    /// leaves a half-applied operation behind.
    pub fn ensure_capacity(&self) -> Result<(), LedgerError> {
        match self.capacity {
            Some(capacity) if self.records.len() >= capacity => {
                Err(LedgerError::StorageFull { capacity })
            }
            _ => Ok(()),
        }
    }

    /// Append a record
    ///
    /// # Arguments
    ///
    /// * `account_id` - The account the transaction applied to
    /// * `amount` - Positive transaction amount
    /// * `tx_type` - Deposit or withdraw
    /// * `timestamp` - When the transaction happened
    ///
    /// # Returns
    ///
    /// The appended record, with its timestamp clamped so the account's
    /// history stays non-decreasing
    ///
    /// # Errors
    ///
    /// Returns `StorageFull` if the log is bounded and already full.
    pub fn append(
        &mut self,
        account_id: &str,
        amount: Decimal,
        tx_type: TransactionType,
        timestamp: NaiveDateTime,
    ) -> Result<&TransactionRecord, LedgerError> {
        self.ensure_capacity()?;

        let timestamp = match self.latest.get(account_id) {
            Some(&latest) if latest > timestamp => latest,
            _ => timestamp,
        };
        self.track_latest(account_id, timestamp);

        let index = self.records.len();
        self.records.push(TransactionRecord {
            account_id: account_id.to_string(),
            amount,
            tx_type,
            timestamp,
        });
        Ok(&self.records[index])
    }

    /// All records for one account, oldest first
    ///
    /// The returned iterator is lazy and can be cloned to walk the
    /// statement again. An account without history yields nothing.
    pub fn statement_for<'a>(&'a self, account_id: &'a str) -> Statement<'a> {
        Statement {
            records: self.records.iter(),
            account_id,
        }
    }

    /// All records, in insertion order
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn track_latest(&mut self, account_id: &str, timestamp: NaiveDateTime) {
        match self.latest.get_mut(account_id) {
            Some(latest) if *latest < timestamp => *latest = timestamp,
            Some(_) => {}
            None => {
                self.latest.insert(account_id.to_string(), timestamp);
            }
        }
    }
}

/// Lazy iterator over one account's transaction records
#[derive(Debug, Clone)]
pub struct Statement<'a> {
    records: slice::Iter<'a, TransactionRecord>,
    account_id: &'a str,
}

impl<'a> Iterator for Statement<'a> {
    type Item = &'a TransactionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let account_id = self.account_id;
        self.records
            .by_ref()
            .find(|record| record.account_id == account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_append_and_statement() {
        let mut log = TransactionLog::new();

        log.append("A1", Decimal::new(50, 0), TransactionType::Deposit, base_time())
            .unwrap();
        log.append("B2", Decimal::new(10, 0), TransactionType::Deposit, base_time())
            .unwrap();
        log.append("A1", Decimal::new(20, 0), TransactionType::Withdraw, base_time())
            .unwrap();

        let statement: Vec<_> = log.statement_for("A1").collect();

        assert_eq!(log.len(), 3);
        assert_eq!(statement.len(), 2);
        assert_eq!(statement[0].tx_type, TransactionType::Deposit);
        assert_eq!(statement[0].amount, Decimal::new(50, 0));
        assert_eq!(statement[1].tx_type, TransactionType::Withdraw);
        assert_eq!(statement[1].amount, Decimal::new(20, 0));
    }

    #[test]
    fn test_statement_for_unknown_account_is_empty() {
        let mut log = TransactionLog::new();
        log.append("A1", Decimal::ONE, TransactionType::Deposit, base_time())
            .unwrap();

        assert_eq!(log.statement_for("nobody").count(), 0);
    }

    #[test]
    fn test_statement_is_restartable() {
        let mut log = TransactionLog::new();
        for _ in 0..3 {
            log.append("A1", Decimal::ONE, TransactionType::Deposit, base_time())
                .unwrap();
        }

        let statement = log.statement_for("A1");
        let replay = statement.clone();

        assert_eq!(statement.count(), 3);
        assert_eq!(replay.count(), 3);
        assert_eq!(log.statement_for("A1").count(), 3);
    }

    #[test]
    fn test_append_clamps_backwards_clock_per_account() {
        let mut log = TransactionLog::new();
        let later = base_time() + Duration::minutes(5);

        log.append("A1", Decimal::ONE, TransactionType::Deposit, later)
            .unwrap();
        let record = log
            .append("A1", Decimal::ONE, TransactionType::Deposit, base_time())
            .unwrap();

        assert_eq!(record.timestamp, later);
    }

    #[test]
    fn test_append_does_not_clamp_across_accounts() {
        let mut log = TransactionLog::new();
        let later = base_time() + Duration::minutes(5);

        log.append("A1", Decimal::ONE, TransactionType::Deposit, later)
            .unwrap();
        let record = log
            .append("B2", Decimal::ONE, TransactionType::Deposit, base_time())
            .unwrap();

        assert_eq!(record.timestamp, base_time());
    }

    #[test]
    fn test_bounded_log_reports_storage_full() {
        let mut log = TransactionLog::bounded(1);

        log.append("A1", Decimal::ONE, TransactionType::Deposit, base_time())
            .unwrap();

        assert_eq!(
            log.ensure_capacity().unwrap_err(),
            LedgerError::StorageFull { capacity: 1 }
        );
        let result = log.append("A1", Decimal::ONE, TransactionType::Deposit, base_time());
        assert!(matches!(result.unwrap_err(), LedgerError::StorageFull { .. }));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_from_records_keeps_order_and_tracks_latest() {
        let later = base_time() + Duration::hours(1);
        let records = vec![
            TransactionRecord {
                account_id: "A1".to_string(),
                amount: Decimal::new(5, 0),
                tx_type: TransactionType::Deposit,
                timestamp: later,
            },
            TransactionRecord {
                account_id: "A1".to_string(),
                amount: Decimal::new(3, 0),
                tx_type: TransactionType::Withdraw,
                timestamp: later,
            },
        ];

        let mut log = TransactionLog::from_records(records).unwrap();
        let appended = log
            .append("A1", Decimal::ONE, TransactionType::Deposit, base_time())
            .unwrap();

        assert_eq!(appended.timestamp, later);
        let amounts: Vec<Decimal> = log.statement_for("A1").map(|r| r.amount).collect();
        assert_eq!(
            amounts,
            vec![Decimal::new(5, 0), Decimal::new(3, 0), Decimal::ONE]
        );
    }

    #[test]
    fn test_from_records_rejects_non_positive_amount() {
        let records = vec![TransactionRecord {
            account_id: "A1".to_string(),
            amount: Decimal::ZERO,
            tx_type: TransactionType::Deposit,
            timestamp: base_time(),
        }];

        assert!(matches!(
            TransactionLog::from_records(records).unwrap_err(),
            LedgerError::InvalidAmount { .. }
        ));
    }
}
