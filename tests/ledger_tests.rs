// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finbot::ledger;
use finbot::models::Category;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    finbot::db::init_schema(&mut conn).unwrap();
    conn
}

fn insert_income(conn: &Connection, amount: &str) {
    conn.execute(
        "INSERT INTO incomes(description, amount) VALUES ('salário', ?1)",
        params![amount],
    )
    .unwrap();
}

#[test]
fn balance_combines_all_ledgers() {
    let conn = setup();
    insert_income(&conn, "3000");
    conn.execute(
        "INSERT INTO partner_incomes(description, amount) VALUES ('salário', '1500')",
        [],
    )
    .unwrap();
    conn.execute("INSERT INTO voucher_credits(amount) VALUES ('800')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO fixed_expenses(description, amount) VALUES ('aluguel', '1200')",
        [],
    )
    .unwrap();
    ledger::commit_expense(
        &conn,
        dec("200"),
        "mercado",
        Category::Pix,
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    )
    .unwrap();
    ledger::commit_expense(
        &conn,
        dec("100"),
        "almoço",
        Category::FoodVoucher,
        NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
    )
    .unwrap();

    let t = ledger::totals(&conn, None).unwrap();
    assert_eq!(t.income_total(), dec("4500"));
    assert_eq!(t.voucher_balance(), dec("700"));
    // 4500 + 700 - 200 (non-voucher spending) - 1200
    assert_eq!(t.balance(), dec("3800"));
}

#[test]
fn voucher_expense_moves_balance_by_its_amount_once() {
    let conn = setup();
    insert_income(&conn, "1000");
    conn.execute("INSERT INTO voucher_credits(amount) VALUES ('500')", [])
        .unwrap();

    let before = ledger::totals(&conn, None).unwrap();
    ledger::commit_expense(
        &conn,
        dec("10"),
        "x",
        Category::FoodVoucher,
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    )
    .unwrap();
    let after = ledger::totals(&conn, None).unwrap();

    assert_eq!(after.balance(), before.balance() - dec("10"));
    assert_eq!(after.voucher_balance(), before.voucher_balance() - dec("10"));
}

#[test]
fn non_voucher_expense_leaves_voucher_pot_alone() {
    let conn = setup();
    conn.execute("INSERT INTO voucher_credits(amount) VALUES ('500')", [])
        .unwrap();
    let before = ledger::voucher_balance(&conn).unwrap();
    ledger::commit_expense(
        &conn,
        dec("10"),
        "x",
        Category::Debit,
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    )
    .unwrap();
    assert_eq!(ledger::voucher_balance(&conn).unwrap(), before);
}

#[test]
fn voucher_expense_over_balance_is_rejected() {
    let conn = setup();
    conn.execute("INSERT INTO voucher_credits(amount) VALUES ('50')", [])
        .unwrap();
    let err = ledger::commit_expense(
        &conn,
        dec("80"),
        "jantar",
        Category::FoodVoucher,
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ledger::LedgerError>(),
        Some(&ledger::LedgerError::InsufficientVoucherBalance {
            available: dec("50"),
            needed: dec("80"),
        })
    );
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn credit_expense_adds_unpaid_statement_item() {
    let conn = setup();
    ledger::commit_expense(
        &conn,
        dec("120"),
        "tv nova",
        Category::Credit,
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    )
    .unwrap();
    let items = ledger::unpaid_statement_items(&conn).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0], ("tv nova".to_string(), dec("120")));
    assert_eq!(ledger::credit_total(&conn).unwrap(), dec("120"));
}

#[test]
fn mtp_split_is_50_30_15_5() {
    let split = ledger::mtp_split(dec("1000")).unwrap();
    assert_eq!(split.needs, dec("500"));
    assert_eq!(split.priorities, dec("300"));
    assert_eq!(split.quality_of_life, dec("150"));
    assert_eq!(split.financial_freedom, dec("50"));
    assert_eq!(
        split.needs + split.priorities + split.quality_of_life + split.financial_freedom,
        dec("1000")
    );
}

#[test]
fn mtp_refuses_non_positive_disposable() {
    assert!(ledger::mtp_split(Decimal::ZERO).is_none());
    assert!(ledger::mtp_split(dec("-10")).is_none());
}

#[test]
fn top3_on_empty_table_is_empty() {
    let conn = setup();
    assert!(ledger::top_expenses(&conn, 3).unwrap().is_empty());
}

#[test]
fn top3_orders_by_amount_then_insertion() {
    let conn = setup();
    for (amount, description) in [("100", "a"), ("50", "b"), ("100", "c"), ("70", "d")] {
        conn.execute(
            "INSERT INTO expenses(amount, description, category) VALUES (?1, ?2, 'pix')",
            params![amount, description],
        )
        .unwrap();
    }
    let top = ledger::top_expenses(&conn, 3).unwrap();
    let names: Vec<&str> = top.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(names, ["a", "c", "d"]);
}

#[test]
fn monthly_filter_uses_transaction_date_with_created_at_fallback() {
    let conn = setup();
    conn.execute(
        "INSERT INTO expenses(amount, description, category, transaction_date, created_at)
         VALUES ('10', 'dated', 'pix', '2025-02-15', '2025-03-01 10:00:00')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO expenses(amount, description, category, transaction_date, created_at)
         VALUES ('20', 'undated', 'pix', NULL, '2025-03-05 10:00:00')",
        [],
    )
    .unwrap();

    assert_eq!(
        ledger::sum_expenses(&conn, Some("2025-02"), None).unwrap(),
        dec("10")
    );
    assert_eq!(
        ledger::sum_expenses(&conn, Some("2025-03"), None).unwrap(),
        dec("20")
    );
}

#[test]
fn monthly_history_is_newest_first() {
    let conn = setup();
    for (amount, date) in [("10", "2025-01-05"), ("20", "2025-02-05"), ("30", "2025-02-20")] {
        conn.execute(
            "INSERT INTO expenses(amount, description, category, transaction_date) VALUES (?1, 'x', 'pix', ?2)",
            params![amount, date],
        )
        .unwrap();
    }
    let history = ledger::monthly_expense_history(&conn, 6).unwrap();
    assert_eq!(
        history,
        vec![
            ("2025-02".to_string(), dec("50")),
            ("2025-01".to_string(), dec("10")),
        ]
    );
}
