//! Load the transaction ledger from CSV exports or raw records

use super::amount::{parse_amount, parse_date};
use super::data::{Ledger, Transaction, TransactionKind};
use crate::error::{Result, WaterfallError};
use csv::Reader;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Default ledger file name, as exported by the fund administrator
pub const DEFAULT_TRANSACTIONS_PATH: &str = "transactions.csv";

/// Raw ledger row before normalization
///
/// Field names match the export header:
/// `commitment_id,transaction_date,transaction_amount,contribution_or_distribution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub commitment_id: u32,
    /// `MM/DD/YYYY`
    pub transaction_date: String,
    /// Formatted amount, e.g. `$1,200.00` or `(500.00)`
    pub transaction_amount: String,
    #[serde(rename = "contribution_or_distribution")]
    pub kind: String,
}

impl RawTransaction {
    pub fn new(commitment_id: u32, transaction_date: &str, transaction_amount: &str, kind: &str) -> Self {
        Self {
            commitment_id,
            transaction_date: transaction_date.to_string(),
            transaction_amount: transaction_amount.to_string(),
            kind: kind.to_string(),
        }
    }

    fn to_transaction(&self) -> Result<Transaction> {
        let transaction_date = parse_date(&self.transaction_date)?;
        let transaction_amount = parse_amount(&self.transaction_amount)?;
        let kind: TransactionKind = self.kind.parse()?;

        Ok(Transaction::new(
            self.commitment_id,
            transaction_date,
            transaction_amount,
            kind,
        ))
    }
}

impl Ledger {
    /// Normalize raw records into a ledger
    ///
    /// Fails on the first record that cannot be normalized, reporting its
    /// 1-based position.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawTransaction>,
    {
        let transactions = records
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.to_transaction().map_err(|e| e.at_record(index + 1)))
            .collect::<Result<Vec<_>>>()?;

        let ledger = Ledger::new(transactions);
        log::info!(
            "Loaded ledger with {} transactions across {} commitments",
            ledger.len(),
            ledger.commitment_ids().len()
        );
        Ok(ledger)
    }
}

/// Load the ledger from a CSV file
pub fn load_ledger<P: AsRef<Path>>(path: P) -> Result<Ledger> {
    log::debug!("Reading transactions from {}", path.as_ref().display());
    let reader = Reader::from_path(path)?;
    read_ledger(reader)
}

/// Load the ledger from any reader (e.g., uploaded body, string buffer)
pub fn load_ledger_from_reader<R: Read>(reader: R) -> Result<Ledger> {
    read_ledger(Reader::from_reader(reader))
}

fn read_ledger<R: Read>(mut reader: Reader<R>) -> Result<Ledger> {
    let mut records = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: RawTransaction =
            result.map_err(|e| WaterfallError::from(e).at_record(index + 1))?;
        records.push(row);
    }

    Ledger::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE_CSV: &str = "\
commitment_id,transaction_date,transaction_amount,contribution_or_distribution
4,01/15/2020,\"($1,000.00)\",contribution
4,08/02/2020,\"$1,500.00\",distribution
5,03/01/2021,-250,contribution
";

    #[test]
    fn test_load_from_reader() {
        let ledger = load_ledger_from_reader(SAMPLE_CSV.as_bytes()).expect("Failed to load ledger");
        assert_eq!(ledger.len(), 3);

        let first = &ledger.transactions()[0];
        assert_eq!(first.commitment_id, 4);
        assert_eq!(first.transaction_date, NaiveDate::from_ymd_opt(2020, 1, 15).unwrap());
        assert_eq!(first.transaction_amount, -1000.0);
        assert_eq!(first.kind, TransactionKind::Contribution);

        assert_eq!(ledger.transactions()[1].transaction_amount, 1500.0);
        assert_eq!(ledger.transactions()[2].transaction_amount, -250.0);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let csv = "\
commitment_id,transaction_date,transaction_amount,contribution_or_distribution
4,01/15/2020,-100,contribution
4,02/15/2020,50,fee
";
        match load_ledger_from_reader(csv.as_bytes()) {
            Err(WaterfallError::InvalidRecord { record, source }) => {
                assert_eq!(record, 2);
                assert!(matches!(*source, WaterfallError::UnknownKind { .. }));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_amount_reports_record() {
        let records = vec![
            RawTransaction::new(1, "01/01/2020", "-100", "contribution"),
            RawTransaction::new(1, "01/02/2020", "12abc", "distribution"),
        ];
        match Ledger::from_records(records) {
            Err(WaterfallError::InvalidRecord { record, source }) => {
                assert_eq!(record, 2);
                assert!(matches!(*source, WaterfallError::MalformedAmount { .. }));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_date_reports_record() {
        let records = vec![RawTransaction::new(1, "2020-01-01", "-100", "contribution")];
        match Ledger::from_records(records) {
            Err(WaterfallError::InvalidRecord { record, source }) => {
                assert_eq!(record, 1);
                assert!(matches!(*source, WaterfallError::MalformedDate { .. }));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let csv = "commitment_id,transaction_date\n4,01/15/2020\n";
        let err = load_ledger_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            WaterfallError::InvalidRecord { source, .. } => {
                assert!(matches!(*source, WaterfallError::Csv(_)))
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }
}
