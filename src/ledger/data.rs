//! Transaction records and the immutable ledger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::WaterfallError;

/// Direction of a cash movement between the LP and the fund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Capital called from the LP
    Contribution,
    /// Cash returned to the partners
    Distribution,
}

impl FromStr for TransactionKind {
    type Err = WaterfallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("contribution") {
            Ok(TransactionKind::Contribution)
        } else if trimmed.eq_ignore_ascii_case("distribution") {
            Ok(TransactionKind::Distribution)
        } else {
            Err(WaterfallError::UnknownKind {
                value: s.to_string(),
            })
        }
    }
}

/// A single normalized ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Commitment this cash movement belongs to
    pub commitment_id: u32,

    /// Calendar date of the cash movement
    pub transaction_date: NaiveDate,

    /// Signed amount; contributions are usually negative
    pub transaction_amount: f64,

    /// Contribution or distribution
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn new(
        commitment_id: u32,
        transaction_date: NaiveDate,
        transaction_amount: f64,
        kind: TransactionKind,
    ) -> Self {
        Self {
            commitment_id,
            transaction_date,
            transaction_amount,
            kind,
        }
    }

    pub fn is_contribution(&self) -> bool {
        self.kind == TransactionKind::Contribution
    }

    pub fn is_distribution(&self) -> bool {
        self.kind == TransactionKind::Distribution
    }
}

/// Transaction ledger, fixed once loaded
///
/// There are no mutating methods: every query borrows the ledger and
/// filters it into a [`CommitmentScope`].
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// All transactions in load order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Distinct commitment ids present in the ledger, ascending
    pub fn commitment_ids(&self) -> BTreeSet<u32> {
        self.transactions.iter().map(|t| t.commitment_id).collect()
    }

    /// Whether any transaction (at any date) belongs to the commitment
    pub fn has_commitment(&self, commitment_id: u32) -> bool {
        self.transactions
            .iter()
            .any(|t| t.commitment_id == commitment_id)
    }

    /// Transactions of one commitment dated strictly before `analysis_date`
    pub fn scope(&self, commitment_id: u32, analysis_date: NaiveDate) -> CommitmentScope<'_> {
        let transactions = self
            .transactions
            .iter()
            .filter(|t| t.commitment_id == commitment_id && t.transaction_date < analysis_date)
            .collect();

        CommitmentScope {
            commitment_id,
            analysis_date,
            transactions,
        }
    }
}

/// Filtered, borrowed view of one commitment's in-scope transactions
#[derive(Debug, Clone)]
pub struct CommitmentScope<'a> {
    commitment_id: u32,
    analysis_date: NaiveDate,
    transactions: Vec<&'a Transaction>,
}

impl<'a> CommitmentScope<'a> {
    pub fn commitment_id(&self) -> u32 {
        self.commitment_id
    }

    pub fn analysis_date(&self) -> NaiveDate {
        self.analysis_date
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn contributions(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.transactions.iter().copied().filter(|t| t.is_contribution())
    }

    pub fn distributions(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.transactions.iter().copied().filter(|t| t.is_distribution())
    }

    /// Sum of contribution amounts, each taken as an outflow
    ///
    /// The kind sets the direction: a contribution recorded as a positive
    /// magnitude counts the same as its negative.
    pub fn total_contributions(&self) -> f64 {
        self.contributions()
            .fold(0.0, |acc, t| acc - t.transaction_amount.abs())
    }

    /// Signed sum of distribution amounts
    pub fn total_distributions(&self) -> f64 {
        self.distributions().fold(0.0, |acc, t| acc + t.transaction_amount)
    }

    /// Latest transaction date in scope, of either kind
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.transactions.iter().map(|t| t.transaction_date).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_ledger() -> Ledger {
        Ledger::new(vec![
            Transaction::new(1, date(2020, 1, 1), -1000.0, TransactionKind::Contribution),
            Transaction::new(1, date(2020, 6, 1), -500.0, TransactionKind::Contribution),
            Transaction::new(1, date(2021, 1, 1), 800.0, TransactionKind::Distribution),
            Transaction::new(1, date(2022, 1, 1), 2000.0, TransactionKind::Distribution),
            Transaction::new(2, date(2020, 3, 1), -300.0, TransactionKind::Contribution),
        ])
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("contribution".parse::<TransactionKind>().unwrap(), TransactionKind::Contribution);
        assert_eq!(" Distribution ".parse::<TransactionKind>().unwrap(), TransactionKind::Distribution);
        assert!(matches!(
            "dividend".parse::<TransactionKind>(),
            Err(WaterfallError::UnknownKind { .. })
        ));
    }

    #[test]
    fn test_scope_excludes_analysis_date() {
        let ledger = sample_ledger();

        // The 2022-01-01 distribution falls on the boundary and is excluded
        let scope = ledger.scope(1, date(2022, 1, 1));
        assert_eq!(scope.len(), 3);
        assert_eq!(scope.total_contributions(), -1500.0);
        assert_eq!(scope.total_distributions(), 800.0);
        assert_eq!(scope.latest_date(), Some(date(2021, 1, 1)));

        let scope = ledger.scope(1, date(2022, 1, 2));
        assert_eq!(scope.total_distributions(), 2800.0);
    }

    #[test]
    fn test_scope_filters_commitment() {
        let ledger = sample_ledger();
        let scope = ledger.scope(2, date(2030, 1, 1));
        assert_eq!(scope.len(), 1);
        assert_eq!(scope.contributions().count(), 1);
        assert_eq!(scope.distributions().count(), 0);
    }

    #[test]
    fn test_scope_leaves_ledger_untouched() {
        let ledger = sample_ledger();
        let before = ledger.transactions().to_vec();
        let _ = ledger.scope(1, date(2021, 1, 1));
        assert_eq!(ledger.transactions(), before.as_slice());
    }

    #[test]
    fn test_commitment_lookup() {
        let ledger = sample_ledger();
        assert!(ledger.has_commitment(2));
        assert!(!ledger.has_commitment(3));
        assert_eq!(ledger.commitment_ids().into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_empty_scope() {
        let ledger = sample_ledger();
        let scope = ledger.scope(1, date(2019, 1, 1));
        assert!(scope.is_empty());
        assert_eq!(scope.total_contributions(), 0.0);
        assert_eq!(scope.latest_date(), None);
    }
}
