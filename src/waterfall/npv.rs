//! Time value of money for the preferred return hurdle

use crate::ledger::CommitmentScope;

/// Day count basis for annual compounding
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Compound `value` forward at an annual `rate` over `days`
///
/// `value * (1 + rate)^(days / 365)`
pub fn npv(value: f64, rate: f64, days: i64) -> f64 {
    value * (1.0 + rate).powf(days as f64 / DAYS_PER_YEAR)
}

/// Sum of in-scope contributions, each compounded from its own date to the
/// latest transaction date in scope
///
/// Contributions are outflows whatever sign the ledger records, so the
/// result is never positive. An empty scope has no hurdle.
pub fn contribution_npv(scope: &CommitmentScope<'_>, rate: f64) -> f64 {
    let final_date = match scope.latest_date() {
        Some(date) => date,
        None => return 0.0,
    };

    scope.contributions().fold(0.0, |acc, t| {
        let days = (final_date - t.transaction_date).num_days();
        acc + npv(-t.transaction_amount.abs(), rate, days)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Ledger, Transaction, TransactionKind};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    #[test]
    fn test_one_year_compounding() {
        assert_relative_eq!(npv(1000.0, 0.08, 365), 1080.0, epsilon = 1e-9);
        assert_relative_eq!(npv(-1000.0, 0.08, 730), -1166.4, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_days_is_identity() {
        assert_eq!(npv(1234.56, 0.08, 0), 1234.56);
    }

    #[test]
    fn test_strictly_increasing_in_days() {
        let mut previous = npv(500.0, 0.05, 0);
        for days in 1..=2000 {
            let value = npv(500.0, 0.05, days);
            assert!(value > previous, "npv not increasing at day {}", days);
            previous = value;
        }
    }

    #[test]
    fn test_contribution_npv_uses_latest_date() {
        let d0 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        let ledger = Ledger::new(vec![
            Transaction::new(1, d0, -1000.0, TransactionKind::Contribution),
            Transaction::new(1, d1, 1500.0, TransactionKind::Distribution),
        ]);

        let scope = ledger.scope(1, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        // 2020 is a leap year: 365 days between the two dates
        assert_relative_eq!(contribution_npv(&scope, 0.08), -1080.0, epsilon = 1e-9);
    }

    #[test]
    fn test_contribution_sign_follows_kind() {
        let d0 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        let ledger = Ledger::new(vec![
            Transaction::new(1, d0, 1000.0, TransactionKind::Contribution),
            Transaction::new(1, d1, -500.0, TransactionKind::Contribution),
        ]);

        let scope = ledger.scope(1, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(scope.total_contributions(), -1500.0);
        assert_relative_eq!(contribution_npv(&scope, 0.08), -1580.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_scope_has_no_hurdle() {
        let ledger = Ledger::default();
        let scope = ledger.scope(1, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(contribution_npv(&scope, 0.08), 0.0);
    }
}
