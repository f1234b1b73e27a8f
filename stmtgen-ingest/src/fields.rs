//! Field-level parsing shared by the paystub readers.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// `$2,000.00`, `2000`, `1,234.5`; no sign, at most 2 decimals
pub fn amount_pattern() -> Result<Regex> {
    Ok(Regex::new(r"^\$?\s*(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?$")?)
}

pub fn parse_amount(re: &Regex, raw: &str) -> Result<Decimal> {
    let s = raw.trim();
    if !re.is_match(s) {
        bail!("invalid amount '{raw}'");
    }
    let cleaned: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    Decimal::from_str(&cleaned).with_context(|| format!("invalid amount '{raw}'"))
}

/// `YYYY-MM-DD` or `MM/DD/YYYY`
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .with_context(|| format!("invalid date '{raw}' (expected YYYY-MM-DD or MM/DD/YYYY)"))
}

/// Header key with case, spaces, dashes and underscores removed
pub fn normalize_header(h: &str) -> String {
    h.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(|c| c.to_lowercase())
        .collect()
}
