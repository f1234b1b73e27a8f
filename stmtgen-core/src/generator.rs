//! Synthetic transaction generation merged with real (paystub) deposits.

use crate::catalog::Catalog;
use crate::error::{Result, StatementError};
use crate::money::round_cents;
use crate::transaction::{PAYROLL_CATEGORY, RealDeposit, Transaction, TxnKind};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

/// Upper bound on synthetic transactions per call; callers normally cap far lower
pub const MAX_SYNTHETIC_COUNT: i64 = 100_000;

/// Whole days from `start` to `end` (0 for a single-day window)
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Produce a date-sorted mix of real deposits and `count` synthetic transactions.
///
/// Real deposits outside `[start, end]` are dropped. Equal dates keep insertion
/// order (real deposits first, then synthetic in draw order), so a seeded `rng`
/// always yields the same sequence. Balances are left unset.
pub fn generate<R: Rng>(
    catalog: &Catalog,
    rng: &mut R,
    start: NaiveDate,
    end: NaiveDate,
    count: i64,
    include_real_deposits: bool,
    real_deposits: &[RealDeposit],
) -> Result<Vec<Transaction>> {
    if count < 0 {
        return Err(StatementError::invalid(format!(
            "synthetic transaction count must be >= 0, got {count}"
        )));
    }
    if count > MAX_SYNTHETIC_COUNT {
        return Err(StatementError::invalid(format!(
            "synthetic transaction count {count} exceeds {MAX_SYNTHETIC_COUNT}"
        )));
    }
    if start > end {
        return Err(StatementError::invalid(format!(
            "start date {start} is after end date {end}"
        )));
    }

    let mut txns = Vec::new();

    if include_real_deposits {
        txns.extend(real_deposit_transactions(start, end, real_deposits)?);
    }
    let real_count = txns.len();

    let span = days_between(start, end);
    for i in 0..count {
        let template = catalog.pick_weighted(rng);
        let description = template.pick_description(rng).to_string();
        let amount = template.pick_amount(rng);
        let offset = rng.random_range(0..=span);

        txns.push(Transaction::new(
            format!("random-{i}"),
            start + Duration::days(offset),
            description,
            amount,
            template.kind,
            template.category.clone(),
        ));
    }

    // stable: equal dates keep insertion order
    txns.sort_by_key(|t| t.date);

    debug!(
        real = real_count,
        synthetic = count,
        %start,
        %end,
        "generated transactions"
    );
    Ok(txns)
}

/// Convert in-window paystub records into payroll deposits.
///
/// Out-of-window records are dropped without inspection; only an in-window
/// record with non-positive net pay is an error.
///
/// Ids carry the record's position in the supplied list, so they stay stable
/// when other records are filtered out.
pub fn real_deposit_transactions(
    start: NaiveDate,
    end: NaiveDate,
    real_deposits: &[RealDeposit],
) -> Result<Vec<Transaction>> {
    let mut out = Vec::new();
    for (index, rd) in real_deposits.iter().enumerate() {
        if rd.pay_date < start || rd.pay_date > end {
            debug!(index, pay_date = %rd.pay_date, "real deposit outside window, skipped");
            continue;
        }
        if rd.net_pay <= Decimal::ZERO {
            return Err(StatementError::invalid(format!(
                "real deposit {index} ({}) has non-positive net pay {}",
                rd.company_name, rd.net_pay
            )));
        }
        out.push(Transaction::new(
            format!("paystub-{index}"),
            rd.pay_date,
            rd.description(),
            round_cents(rd.net_pay),
            TxnKind::Deposit,
            PAYROLL_CATEGORY,
        ));
    }
    Ok(out)
}
