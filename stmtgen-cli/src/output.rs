//! Statement rendering for the terminal and for export.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use stmtgen_core::{Catalog, Statement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub fn render_statement(statement: &Statement, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(statement_table(statement)),
        OutputFormat::Json => serde_json::to_string_pretty(statement).context("serialize statement"),
        OutputFormat::Csv => statement_csv(statement),
    }
}

fn statement_table(statement: &Statement) -> String {
    let ledger = &statement.ledger;
    let summary = &statement.summary;
    let mut s = String::new();

    let _ = writeln!(s, "Statement Period: {} - {}\n", statement.start_date, statement.end_date);
    let _ = writeln!(s, "Opening Balance:   {:>12.2}", ledger.opening_balance);
    let _ = writeln!(
        s,
        "Deposits:          {:>12.2}  ({} items)",
        ledger.total_deposits, summary.deposit_count
    );
    let _ = writeln!(
        s,
        "ATM Withdrawals:   {:>12.2}  ({} items)",
        summary.atm_withdrawal_total, summary.atm_withdrawal_count
    );
    let _ = writeln!(
        s,
        "Electronic:        {:>12.2}  ({} items)",
        summary.electronic_withdrawal_total, summary.electronic_withdrawal_count
    );
    let _ = writeln!(s, "Closing Balance:   {:>12.2}\n", ledger.closing_balance);

    let _ = writeln!(s, "{:<10}  {:<36}  {:>11}  {:>11}", "DATE", "DESCRIPTION", "AMOUNT", "BALANCE");
    for t in &ledger.transactions {
        let sign = if t.is_deposit() { "+" } else { "-" };
        let _ = writeln!(
            s,
            "{:<10}  {:<36}  {:>11}  {:>11.2}",
            t.date,
            truncate(&t.description, 36),
            format!("{sign}{:.2}", t.amount),
            t.balance.unwrap_or_default()
        );
    }

    if !summary.categories.is_empty() {
        let _ = writeln!(s, "\nBy category:");
        for c in &summary.categories {
            let _ = writeln!(s, "- [{}] {}: {} x, {:.2}", c.kind.label(), c.name, c.count, c.total);
        }
    }
    s
}

fn statement_csv(statement: &Statement) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["id", "date", "description", "category", "type", "amount", "balance"])?;
    for t in &statement.ledger.transactions {
        wtr.write_record([
            t.id.clone(),
            t.date.to_string(),
            t.description.clone(),
            t.category.clone(),
            t.kind.label().to_string(),
            format!("{:.2}", t.amount),
            t.balance.map(|b| format!("{b:.2}")).unwrap_or_default(),
        ])?;
    }
    let bytes = wtr.into_inner().context("flush csv")?;
    String::from_utf8(bytes).context("csv output is not UTF-8")
}

pub fn render_catalog(catalog: &Catalog, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(catalog.list_categories()).context("serialize catalog")
        }
        OutputFormat::Csv => catalog_csv(catalog),
        OutputFormat::Table => {
            let mut s = String::new();
            let _ = writeln!(
                s,
                "{:<20}  {:<10}  {:>6}  {:>6}  {:>17}  {:>5}",
                "CATEGORY", "TYPE", "WEIGHT", "SHARE", "RANGE", "DESCS"
            );
            for c in catalog.list_categories() {
                let share = catalog.selection_share(&c.category).unwrap_or(0.0) * 100.0;
                let _ = writeln!(
                    s,
                    "{:<20}  {:<10}  {:>6}  {:>5.1}%  {:>17}  {:>5}",
                    c.category,
                    c.kind.label(),
                    c.weight,
                    share,
                    format!("{:.2}-{:.2}", c.amount_range.min, c.amount_range.max),
                    c.descriptions.len()
                );
            }
            Ok(s)
        }
    }
}

fn catalog_csv(catalog: &Catalog) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["category", "type", "weight", "share", "min_amount", "max_amount", "descriptions"])?;
    for c in catalog.list_categories() {
        let share = catalog.selection_share(&c.category).unwrap_or(0.0);
        wtr.write_record([
            c.category.clone(),
            c.kind.label().to_string(),
            c.weight.to_string(),
            format!("{share:.4}"),
            format!("{:.2}", c.amount_range.min),
            format!("{:.2}", c.amount_range.max),
            c.descriptions.len().to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().context("flush csv")?;
    String::from_utf8(bytes).context("csv output is not UTF-8")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).chain(std::iter::once('…')).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use stmtgen_core::{StatementRequest, build_statement};

    fn sample() -> Statement {
        let request = StatementRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            synthetic_count: 6,
            opening_balance: Decimal::new(100000, 2),
            include_real_deposits: false,
            real_deposits: Vec::new(),
            seed: Some(8),
        };
        build_statement(Catalog::builtin(), &request).unwrap()
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let out = render_statement(&sample(), OutputFormat::Csv).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "id,date,description,category,type,amount,balance");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_table_shows_balances() {
        let out = render_statement(&sample(), OutputFormat::Table).unwrap();
        assert!(out.contains("Opening Balance:"));
        assert!(out.contains("1000.00"));
        assert!(out.contains("Closing Balance:"));
    }

    #[test]
    fn test_json_roundtrips() {
        let statement = sample();
        let out = render_statement(&statement, OutputFormat::Json).unwrap();
        let back: Statement = serde_json::from_str(&out).unwrap();
        assert_eq!(back, statement);
    }

    #[test]
    fn test_catalog_table_lists_every_category() {
        let out = render_catalog(Catalog::builtin(), OutputFormat::Table).unwrap();
        assert_eq!(out.lines().count(), 1 + Catalog::builtin().list_categories().len());
        assert!(out.contains("Grocery Store"));
    }

    #[test]
    fn test_catalog_csv_is_real_csv() {
        let out = render_catalog(Catalog::builtin(), OutputFormat::Csv).unwrap();
        let mut rdr = csv::Reader::from_reader(out.as_bytes());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(&headers[0], "category");
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), Catalog::builtin().list_categories().len());
        assert_eq!(&rows[0][0], "Payroll");
        assert_eq!(&rows[0][2], "8");
        assert_eq!(&rows[0][4], "1000.00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("SHORT", 10), "SHORT");
        assert_eq!(truncate("ABCDEFGHIJ", 5), "ABCD…");
    }
}
