//! Default statement window derived from paystub records.

use crate::transaction::RealDeposit;
use chrono::{Duration, NaiveDate};

pub const DEFAULT_PERIOD_PADDING_DAYS: i64 = 5;

/// Earliest pay-period start (or pay date) through the latest pay date,
/// widened by `padding_days` on each side. `None` for no records.
pub fn suggest_period(real_deposits: &[RealDeposit], padding_days: i64) -> Option<(NaiveDate, NaiveDate)> {
    let earliest = real_deposits
        .iter()
        .map(|rd| rd.pay_period_start.unwrap_or(rd.pay_date))
        .min()?;
    let latest = real_deposits.iter().map(|rd| rd.pay_date).max()?;
    let pad = Duration::days(padding_days.max(0));
    Some((earliest - pad, latest + pad))
}
