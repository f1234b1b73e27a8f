//! Paystub readers.
//!
//! CSV layout (header names are matched loosely, order is free):
//!   pay_date,company_name,net_pay[,pay_period_start]
//!   2024-01-15,Acme Corp,"$2,000.00",2024-01-01
//!
//! Any malformed row fails the whole read: a statement should never be built
//! from a partial set of paystubs.

use anyhow::{Context, Result, anyhow, bail};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use stmtgen_core::RealDeposit;
use tracing::debug;

use crate::fields::{amount_pattern, normalize_header, parse_amount, parse_date};

const PAY_DATE: &str = "paydate";
const COMPANY_NAME: &str = "companyname";
const NET_PAY: &str = "netpay";
const PAY_PERIOD_START: &str = "payperiodstart";

/// Load paystubs from a `.csv` or `.json` file.
pub fn load_real_deposits(path: impl AsRef<Path>) -> Result<Vec<RealDeposit>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let deposits = match ext.as_str() {
        "csv" => parse_paystub_csv(path)?,
        "json" => {
            let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            parse_paystub_json_str(&s).with_context(|| format!("parsing {}", path.display()))?
        }
        other => bail!(
            "unsupported paystub file '{}' (extension '{}'; expected .csv or .json)",
            path.display(),
            other
        ),
    };

    debug!(count = deposits.len(), path = %path.display(), "loaded paystubs");
    Ok(deposits)
}

pub fn parse_paystub_csv(path: impl AsRef<Path>) -> Result<Vec<RealDeposit>> {
    let file = fs::File::open(path.as_ref()).with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_paystub_reader(file).with_context(|| format!("parsing {}", path.as_ref().display()))
}

pub fn parse_paystub_csv_str(text: &str) -> Result<Vec<RealDeposit>> {
    parse_paystub_reader(text.as_bytes())
}

fn parse_paystub_reader<R: Read>(reader: R) -> Result<Vec<RealDeposit>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: HashMap<String, usize> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_header(h), i))
        .collect();

    let column = |name: &str| -> Result<usize> {
        columns
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("missing '{name}' column"))
    };
    let pay_date_col = column(PAY_DATE)?;
    let company_col = column(COMPANY_NAME)?;
    let net_pay_col = column(NET_PAY)?;
    let period_col = columns.get(PAY_PERIOD_START).copied();

    let amount_re = amount_pattern()?;
    let mut out = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        // header is line 1
        let line = i + 2;
        let record = result.with_context(|| format!("line {line}"))?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let field = |col: usize| record.get(col).unwrap_or("");

        let pay_date = parse_date(field(pay_date_col)).with_context(|| format!("line {line}"))?;
        let company_name = field(company_col).to_string();
        if company_name.is_empty() {
            bail!("line {line}: empty company name");
        }
        let net_pay = parse_amount(&amount_re, field(net_pay_col)).with_context(|| format!("line {line}"))?;
        ensure_positive(net_pay, line)?;

        let mut deposit = RealDeposit::new(pay_date, company_name, net_pay);
        if let Some(col) = period_col {
            let raw = field(col);
            if !raw.is_empty() {
                deposit = deposit.with_period_start(parse_date(raw).with_context(|| format!("line {line}"))?);
            }
        }
        out.push(deposit);
    }

    Ok(out)
}

/// JSON array of paystub objects (camelCase or snake_case keys).
pub fn parse_paystub_json_str(text: &str) -> Result<Vec<RealDeposit>> {
    let deposits: Vec<RealDeposit> = serde_json::from_str(text).context("paystub JSON")?;
    for (i, d) in deposits.iter().enumerate() {
        if d.net_pay <= Decimal::ZERO {
            bail!("paystub {i} ({}): net pay must be positive, got {}", d.company_name, d.net_pay);
        }
    }
    Ok(deposits)
}

fn ensure_positive(net_pay: Decimal, line: usize) -> Result<()> {
    if net_pay <= Decimal::ZERO {
        bail!("line {line}: net pay must be positive, got {net_pay}");
    }
    Ok(())
}
