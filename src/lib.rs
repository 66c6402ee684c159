//! Waterfall Engine - private equity distribution waterfall analysis
//!
//! This library provides:
//! - Ledger loading with normalization of formatted amounts and dates
//! - The four-tier waterfall: return of capital, preferred return,
//!   GP catch-up and carried interest split
//! - Aggregated LP/GP profit and realized profit split per commitment
//! - CSV and plain-text reporting

pub mod error;
pub mod ledger;
pub mod report;
pub mod waterfall;

// Re-export commonly used types
pub use error::{Result, WaterfallError};
pub use ledger::{load_ledger, Ledger, Transaction, TransactionKind};
pub use report::{ReportRow, WaterfallReport};
pub use waterfall::{TierResult, WaterfallConfig, WaterfallEngine, WaterfallResult};
