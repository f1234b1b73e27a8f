use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal_macros::dec;
use stmtgen_core::{
    Catalog, PAYROLL_CATEGORY, RealDeposit, StatementRequest, TxnKind, apply_balances, build_statement,
    generate,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// January statement with one in-window paystub: 10 synthetic + 1 payroll line.
#[test]
fn test_january_statement_with_paystub() {
    let deposits = vec![RealDeposit::new(ymd(2024, 1, 15), "Acme", dec!(2000.00))];
    let mut rng = StdRng::seed_from_u64(2024);

    let txns = generate(
        Catalog::builtin(),
        &mut rng,
        ymd(2024, 1, 1),
        ymd(2024, 1, 31),
        10,
        true,
        &deposits,
    )
    .unwrap();
    let ledger = apply_balances(txns, dec!(1000.00));

    assert_eq!(ledger.len(), 11);
    let payroll: Vec<_> = ledger.transactions.iter().filter(|t| t.id.starts_with("paystub-")).collect();
    assert_eq!(payroll.len(), 1);
    assert_eq!(payroll[0].category, PAYROLL_CATEGORY);
    assert_eq!(payroll[0].amount, dec!(2000.00));
    assert_eq!(payroll[0].date, ymd(2024, 1, 15));
    assert_eq!(payroll[0].description, "Acme Payroll ACH Deposit");

    assert!(ledger.transactions.iter().all(|t| t.date >= ymd(2024, 1, 1) && t.date <= ymd(2024, 1, 31)));
    assert_eq!(
        ledger.transactions.last().unwrap().balance,
        Some(dec!(1000.00) + ledger.total_deposits - ledger.total_withdrawals)
    );
}

/// Single-day window still yields every synthetic transaction, all on that day.
#[test]
fn test_single_day_window() {
    let day = ymd(2024, 2, 29);
    let mut rng = StdRng::seed_from_u64(9);
    let txns = generate(Catalog::builtin(), &mut rng, day, day, 5, false, &[]).unwrap();
    assert_eq!(txns.len(), 5);
    assert!(txns.iter().all(|t| t.date == day));
}

#[test]
fn test_overdraft_single_withdrawal() {
    let txn = stmtgen_core::Transaction::new(
        "w-0",
        ymd(2024, 1, 1),
        "ATM WITHDRAWAL - MALL",
        dec!(50),
        TxnKind::Withdrawal,
        "ATM Withdrawal",
    );
    let ledger = apply_balances(vec![txn], dec!(30.00));
    assert_eq!(ledger.closing_balance, dec!(-20.00));
}

#[test]
fn test_same_seed_same_sequence() {
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(Catalog::builtin(), &mut rng, ymd(2024, 4, 1), ymd(2024, 6, 30), 50, false, &[]).unwrap()
    };
    assert_eq!(run(77), run(77));
    assert_ne!(run(77), run(78));
}

#[test]
fn test_count_and_window_hold_across_seeds() {
    let deposits = vec![
        RealDeposit::new(ymd(2024, 6, 30), "Outside", dec!(800)),
        RealDeposit::new(ymd(2024, 7, 1), "Start", dec!(900)),
        RealDeposit::new(ymd(2024, 7, 14), "End", dec!(950)),
        RealDeposit::new(ymd(2024, 7, 15), "Outside", dec!(1000)),
    ];
    for seed in 0..50u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = (seed % 20) as i64;
        let txns = generate(Catalog::builtin(), &mut rng, ymd(2024, 7, 1), ymd(2024, 7, 14), count, true, &deposits)
            .unwrap();

        let synthetic = txns.iter().filter(|t| t.id.starts_with("random-")).count();
        assert_eq!(synthetic as i64, count);
        let real: Vec<_> = txns.iter().filter(|t| t.id.starts_with("paystub-")).map(|t| t.id.as_str()).collect();
        assert_eq!(real.len(), 2);
        assert!(real.contains(&"paystub-1") && real.contains(&"paystub-2"));
        assert!(txns.iter().all(|t| t.date >= ymd(2024, 7, 1) && t.date <= ymd(2024, 7, 14)));

        let ledger = apply_balances(txns, dec!(250));
        assert!(ledger.is_balanced());
    }
}

#[test]
fn test_built_statement_serializes() {
    let request = StatementRequest {
        start_date: ymd(2024, 1, 1),
        end_date: ymd(2024, 1, 31),
        synthetic_count: 10,
        opening_balance: dec!(1000),
        include_real_deposits: true,
        real_deposits: vec![RealDeposit::new(ymd(2024, 1, 15), "Acme", dec!(2000))],
        seed: Some(3),
    };
    let statement = build_statement(Catalog::builtin(), &request).unwrap();
    let json = serde_json::to_value(&statement).unwrap();
    assert_eq!(json["ledger"]["transactions"].as_array().unwrap().len(), 11);
    assert!(statement.summary.deposit_count >= 1);
    assert!(statement.ledger.is_balanced());
}
