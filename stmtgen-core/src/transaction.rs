//! Transaction records produced by the generator and annotated by the ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category label given to every deposit built from a paystub.
pub const PAYROLL_CATEGORY: &str = "Payroll";

/// Direction of a transaction relative to the account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxnKind {
    #[serde(rename = "deposit")]
    Deposit,
    #[serde(rename = "withdrawal")]
    Withdrawal,
}

impl TxnKind {
    /// Sign applied to the amount when it hits the running balance
    pub fn sign(&self) -> Decimal {
        match self {
            TxnKind::Deposit => Decimal::ONE,
            TxnKind::Withdrawal => Decimal::NEGATIVE_ONE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TxnKind::Deposit => "deposit",
            TxnKind::Withdrawal => "withdrawal",
        }
    }
}

/// A single statement line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique within one generation run (`paystub-N` or `random-N`)
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    /// Always positive; direction comes from `kind`
    pub amount: Decimal,
    pub kind: TxnKind,
    pub category: String,
    /// Running balance after this line. `None` until the ledger pass.
    pub balance: Option<Decimal>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        kind: TxnKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            balance: None,
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.kind == TxnKind::Deposit
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind == TxnKind::Withdrawal
    }

    /// Amount with the sign it contributes to the balance
    pub fn signed_amount(&self) -> Decimal {
        self.kind.sign() * self.amount
    }
}

/// A paystub-derived deposit supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RealDeposit {
    #[serde(alias = "pay_date")]
    pub pay_date: NaiveDate,
    #[serde(alias = "company_name")]
    pub company_name: String,
    #[serde(alias = "net_pay")]
    pub net_pay: Decimal,
    /// First day of the pay period, used only for period suggestion
    #[serde(default, alias = "pay_period_start")]
    pub pay_period_start: Option<NaiveDate>,
}

impl RealDeposit {
    pub fn new(pay_date: NaiveDate, company_name: impl Into<String>, net_pay: Decimal) -> Self {
        Self {
            pay_date,
            company_name: company_name.into(),
            net_pay,
            pay_period_start: None,
        }
    }

    pub fn with_period_start(mut self, start: NaiveDate) -> Self {
        self.pay_period_start = Some(start);
        self
    }

    pub fn description(&self) -> String {
        format!("{} Payroll ACH Deposit", self.company_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_signed_amount() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let w = Transaction::new("random-0", date, "KROGER #789", dec!(42.10), TxnKind::Withdrawal, "Grocery Store");
        assert!(w.is_withdrawal());
        assert_eq!(w.signed_amount(), dec!(-42.10));
        assert_eq!(w.balance, None);
    }

    #[test]
    fn test_real_deposit_description() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let rd = RealDeposit::new(date, "Acme", dec!(2000));
        assert_eq!(rd.description(), "Acme Payroll ACH Deposit");
    }

    #[test]
    fn test_real_deposit_accepts_camel_and_snake_case() {
        let camel: RealDeposit = serde_json::from_str(
            r#"{"payDate":"2024-01-15","companyName":"Acme","netPay":"2000.00"}"#,
        )
        .unwrap();
        let snake: RealDeposit = serde_json::from_str(
            r#"{"pay_date":"2024-01-15","company_name":"Acme","net_pay":"2000.00","pay_period_start":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(camel.net_pay, dec!(2000.00));
        assert_eq!(snake.company_name, "Acme");
        assert_eq!(snake.pay_period_start, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TxnKind::Deposit).unwrap(), "\"deposit\"");
    }
}
