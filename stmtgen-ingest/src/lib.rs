//! stmtgen-ingest: load paystub records (CSV / JSON) as real deposits.

pub mod fields;
pub mod paystubs;

pub use paystubs::{load_real_deposits, parse_paystub_csv, parse_paystub_csv_str, parse_paystub_json_str};
