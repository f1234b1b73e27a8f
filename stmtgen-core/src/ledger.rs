//! Running-balance ledger.
//!
//! A single forward fold: each balance depends on every earlier one, so the
//! input order is the statement order. Balances are rounded to cents after
//! every step and may go negative.

use crate::error::{Result, StatementError};
use crate::money::round_cents;
use crate::transaction::{Transaction, TxnKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Transactions annotated with balances, plus the derived totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn net_change(&self) -> Decimal {
        round_cents(self.total_deposits - self.total_withdrawals)
    }

    /// `closing == opening + deposits - withdrawals`
    pub fn is_balanced(&self) -> bool {
        round_cents(self.opening_balance + self.net_change()) == self.closing_balance
    }

    pub fn deposits(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.is_deposit())
    }

    pub fn withdrawals(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.is_withdrawal())
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }
}

/// Assign running balances in sequence order. The input is trusted to be date-sorted.
pub fn apply_balances(mut transactions: Vec<Transaction>, opening_balance: Decimal) -> Ledger {
    let opening_balance = round_cents(opening_balance);
    let mut balance = opening_balance;
    let mut total_deposits = Decimal::ZERO;
    let mut total_withdrawals = Decimal::ZERO;

    for txn in transactions.iter_mut() {
        balance = round_cents(balance + txn.signed_amount());
        match txn.kind {
            TxnKind::Deposit => total_deposits = round_cents(total_deposits + txn.amount),
            TxnKind::Withdrawal => total_withdrawals = round_cents(total_withdrawals + txn.amount),
        }
        txn.balance = Some(balance);
    }

    debug!(
        count = transactions.len(),
        %opening_balance,
        closing_balance = %balance,
        "applied balances"
    );

    Ledger {
        opening_balance,
        closing_balance: balance,
        total_deposits,
        total_withdrawals,
        transactions,
    }
}

/// Like [`apply_balances`], but rejects input that is not sorted by date.
pub fn apply_balances_checked(transactions: Vec<Transaction>, opening_balance: Decimal) -> Result<Ledger> {
    if let Some(pos) = transactions.windows(2).position(|w| w[0].date > w[1].date) {
        return Err(StatementError::DataIntegrity(format!(
            "transaction '{}' ({}) precedes '{}' ({})",
            transactions[pos].id,
            transactions[pos].date,
            transactions[pos + 1].id,
            transactions[pos + 1].date
        )));
    }
    Ok(apply_balances(transactions, opening_balance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn txn(id: &str, day: u32, amount: Decimal, kind: TxnKind) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        Transaction::new(id, date, id.to_uppercase(), amount, kind, "Test")
    }

    #[test]
    fn test_empty_ledger_closes_at_opening() {
        let ledger = apply_balances(Vec::new(), dec!(1234.56));
        assert!(ledger.is_empty());
        assert_eq!(ledger.closing_balance, dec!(1234.56));
        assert_eq!(ledger.total_deposits, Decimal::ZERO);
        assert!(ledger.is_balanced());
    }

    #[test]
    fn test_negative_balance_is_allowed() {
        let ledger = apply_balances(vec![txn("w", 1, dec!(50), TxnKind::Withdrawal)], dec!(30.00));
        assert_eq!(ledger.transactions[0].balance, Some(dec!(-20.00)));
        assert_eq!(ledger.closing_balance, dec!(-20.00));
    }

    #[test]
    fn test_running_balance_sequence() {
        let txns = vec![
            txn("a", 2, dec!(100.10), TxnKind::Deposit),
            txn("b", 3, dec!(25.05), TxnKind::Withdrawal),
            txn("c", 3, dec!(0.95), TxnKind::Withdrawal),
            txn("d", 9, dec!(10), TxnKind::Deposit),
        ];
        let ledger = apply_balances(txns, dec!(0));
        let balances: Vec<_> = ledger.transactions.iter().map(|t| t.balance.unwrap()).collect();
        assert_eq!(balances, vec![dec!(100.10), dec!(75.05), dec!(74.10), dec!(84.10)]);
        assert_eq!(ledger.total_deposits, dec!(110.10));
        assert_eq!(ledger.total_withdrawals, dec!(26.00));
        assert_eq!(ledger.deposits().count(), 2);
        assert_eq!(ledger.withdrawals().count(), 2);
    }

    #[test]
    fn test_balance_identity_over_many_steps() {
        // 0.10 repeated is where binary floats drift
        let txns: Vec<_> = (0..1000)
            .map(|i| {
                let kind = if i % 3 == 0 { TxnKind::Withdrawal } else { TxnKind::Deposit };
                txn(&format!("t{i}"), 1, dec!(0.10), kind)
            })
            .collect();
        let ledger = apply_balances(txns, dec!(0.30));
        assert!(ledger.is_balanced());
        assert_eq!(ledger.closing_balance, dec!(0.30) + ledger.total_deposits - ledger.total_withdrawals);
        assert_eq!(ledger.transactions.last().unwrap().balance, Some(ledger.closing_balance));
    }

    #[test]
    fn test_opening_balance_rounded_to_cents() {
        let ledger = apply_balances(Vec::new(), dec!(10.005));
        assert_eq!(ledger.closing_balance, dec!(10.01));
    }

    #[test]
    fn test_checked_rejects_unsorted_input() {
        let txns = vec![
            txn("late", 20, dec!(1), TxnKind::Deposit),
            txn("early", 5, dec!(1), TxnKind::Deposit),
        ];
        let err = apply_balances_checked(txns, dec!(0)).unwrap_err();
        assert!(matches!(err, StatementError::DataIntegrity(_)));
        assert!(err.to_string().contains("late"));
    }

    #[test]
    fn test_checked_accepts_sorted_input() {
        let txns = vec![
            txn("a", 5, dec!(1), TxnKind::Deposit),
            txn("b", 5, dec!(2), TxnKind::Withdrawal),
        ];
        let ledger = apply_balances_checked(txns, dec!(0)).unwrap();
        assert_eq!(ledger.closing_balance, dec!(-1));
    }
}
