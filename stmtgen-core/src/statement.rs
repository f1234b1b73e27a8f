//! Statement assembly: generate, apply balances, summarize.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::generator::generate;
use crate::ledger::{Ledger, apply_balances};
use crate::money::round_cents;
use crate::transaction::{RealDeposit, Transaction, TxnKind};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Withdrawals in this category are reported as ATM debits
pub const ATM_CATEGORY: &str = "ATM Withdrawal";

/// Everything a caller supplies to produce one statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatementRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub synthetic_count: i64,
    pub opening_balance: Decimal,
    #[serde(default)]
    pub include_real_deposits: bool,
    #[serde(default)]
    pub real_deposits: Vec<RealDeposit>,
    /// Fixed seed for reproducible output; OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Per-category aggregate, in order of first appearance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryOverview {
    pub name: String,
    pub kind: TxnKind,
    pub count: usize,
    pub total: Decimal,
}

/// Counts and totals a bank layout shows in its summary box
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatementSummary {
    pub deposit_count: usize,
    pub deposit_total: Decimal,
    pub atm_withdrawal_count: usize,
    pub atm_withdrawal_total: Decimal,
    pub electronic_withdrawal_count: usize,
    pub electronic_withdrawal_total: Decimal,
    pub categories: Vec<CategoryOverview>,
}

impl StatementSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = StatementSummary::default();

        for t in transactions {
            match t.kind {
                TxnKind::Deposit => {
                    summary.deposit_count += 1;
                    summary.deposit_total = round_cents(summary.deposit_total + t.amount);
                }
                TxnKind::Withdrawal if t.category == ATM_CATEGORY => {
                    summary.atm_withdrawal_count += 1;
                    summary.atm_withdrawal_total = round_cents(summary.atm_withdrawal_total + t.amount);
                }
                TxnKind::Withdrawal => {
                    summary.electronic_withdrawal_count += 1;
                    summary.electronic_withdrawal_total =
                        round_cents(summary.electronic_withdrawal_total + t.amount);
                }
            }

            match summary
                .categories
                .iter_mut()
                .find(|c| c.name == t.category && c.kind == t.kind)
            {
                Some(overview) => {
                    overview.count += 1;
                    overview.total = round_cents(overview.total + t.amount);
                }
                None => summary.categories.push(CategoryOverview {
                    name: t.category.clone(),
                    kind: t.kind,
                    count: 1,
                    total: t.amount,
                }),
            }
        }

        summary
    }

    pub fn withdrawal_total(&self) -> Decimal {
        round_cents(self.atm_withdrawal_total + self.electronic_withdrawal_total)
    }
}

/// A generated statement, ready for a renderer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub ledger: Ledger,
    pub summary: StatementSummary,
}

/// Build a statement with an RNG seeded from the request (or the OS).
pub fn build_statement(catalog: &Catalog, request: &StatementRequest) -> Result<Statement> {
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    build_statement_with_rng(catalog, request, &mut rng)
}

pub fn build_statement_with_rng<R: Rng>(
    catalog: &Catalog,
    request: &StatementRequest,
    rng: &mut R,
) -> Result<Statement> {
    let transactions = generate(
        catalog,
        rng,
        request.start_date,
        request.end_date,
        request.synthetic_count,
        request.include_real_deposits,
        &request.real_deposits,
    )?;
    let ledger = apply_balances(transactions, request.opening_balance);
    let summary = StatementSummary::from_transactions(&ledger.transactions);

    info!(
        start = %request.start_date,
        end = %request.end_date,
        transactions = ledger.len(),
        closing_balance = %ledger.closing_balance,
        "built statement"
    );

    Ok(Statement {
        start_date: request.start_date,
        end_date: request.end_date,
        ledger,
        summary,
    })
}
