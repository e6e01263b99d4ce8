// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finbot::export;
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    finbot::db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO incomes(description, amount) VALUES ('Salário', '3000')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO expenses(amount, description, category, transaction_date)
         VALUES ('50', 'Mercado', 'pix', '2025-03-09')",
        [],
    )
    .unwrap();
    conn.execute("INSERT INTO voucher_credits(amount) VALUES ('800')", [])
        .unwrap();
    conn
}

#[test]
fn csv_export_writes_all_ledgers() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dump.csv");
    export::export(&conn, "csv", &out).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ledger,description,amount,category,date"
    );
    assert!(content.contains("incomes,Salário,3000"));
    assert!(content.contains("expenses,Mercado,50,pix,2025-03-09"));
    assert!(content.contains("voucher_credits,,800"));
}

#[test]
fn json_export_is_parseable() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dump.json");
    export::export(&conn, "json", &out).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);
}

#[test]
fn rows_carry_the_expense_transaction_date() {
    let conn = setup();
    let rows = export::collect_rows(&conn).unwrap();
    let expense = rows.iter().find(|r| r.ledger == "expenses").unwrap();
    assert_eq!(expense.date, "2025-03-09");
    assert_eq!(expense.category, "pix");
}
