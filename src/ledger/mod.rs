//! Transaction ledger: normalization and loading

mod amount;
mod data;
pub mod loader;

pub use amount::{parse_amount, parse_date, LEDGER_DATE_FORMAT};
pub use data::{CommitmentScope, Ledger, Transaction, TransactionKind};
pub use loader::{load_ledger, load_ledger_from_reader, RawTransaction};
