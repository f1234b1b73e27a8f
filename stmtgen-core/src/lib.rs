//! stmtgen-core: synthetic bank-transaction generation and running-balance ledger

pub mod catalog;
pub mod error;
pub mod generator;
pub mod ledger;
pub mod money;
pub mod period;
pub mod statement;
pub mod transaction;

pub use catalog::{AmountRange, Catalog, TransactionCategory};
pub use error::{Result, StatementError};
pub use generator::{MAX_SYNTHETIC_COUNT, days_between, generate, real_deposit_transactions};
pub use ledger::{Ledger, apply_balances, apply_balances_checked};
pub use money::round_cents;
pub use period::{DEFAULT_PERIOD_PADDING_DAYS, suggest_period};
pub use statement::{
    ATM_CATEGORY, CategoryOverview, Statement, StatementRequest, StatementSummary, build_statement,
    build_statement_with_rng,
};
pub use transaction::{PAYROLL_CATEGORY, RealDeposit, Transaction, TxnKind};
