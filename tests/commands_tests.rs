// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finbot::commands::{categories, expenses, incomes, reminders};
use finbot::config::Config;
use finbot::dialogue::Sessions;
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    finbot::db::init_schema(&mut conn).unwrap();
    conn
}

fn test_config() -> Config {
    Config {
        telegram_token: "test-token".to_string(),
        gemini_api_key: None,
        db_path: None,
        voucher_keywords: vec!["vale".to_string(), "vale-alimentacao".to_string()],
    }
}

#[test]
fn duplicate_category_reports_and_leaves_table_unchanged() {
    let conn = setup();
    let reply = categories::add(&conn, &["Assinaturas"]).unwrap();
    assert!(reply.text.contains("criada com sucesso"));

    let reply = categories::add(&conn, &["Assinaturas"]).unwrap();
    assert!(reply.text.contains("já existe"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn removing_missing_category_reports_not_found() {
    let conn = setup();
    let reply = categories::remove(&conn, &["Fantasma"]).unwrap();
    assert!(reply.text.contains("não encontrada"));
}

#[test]
fn reminder_day_out_of_range_answers_with_usage_hint() {
    let conn = setup();
    for bad in [&["40", "luz"][..], &["0", "luz"][..], &["dez", "luz"][..]] {
        let reply = reminders::add(&conn, bad).unwrap();
        assert!(reply.text.contains("Uso correto"));
    }
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM reminders", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn income_with_voucher_keyword_credits_the_voucher_ledger() {
    let conn = setup();
    let cfg = test_config();
    let reply = incomes::add_income(&conn, &cfg, &["800", "vale", "do", "mês"]).unwrap();
    assert!(reply.text.contains("Vale-alimentação"));

    let vouchers: i64 = conn
        .query_row("SELECT COUNT(*) FROM voucher_credits", [], |r| r.get(0))
        .unwrap();
    let incomes_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM incomes", [], |r| r.get(0))
        .unwrap();
    assert_eq!(vouchers, 1);
    assert_eq!(incomes_count, 0);
}

#[test]
fn plain_income_goes_to_the_income_ledger() {
    let conn = setup();
    let cfg = test_config();
    incomes::add_income(&conn, &cfg, &["3000", "Salário"]).unwrap();
    let (description, amount): (String, String) = conn
        .query_row("SELECT description, amount FROM incomes", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(description, "Salário");
    assert_eq!(amount, "3000");
}

#[test]
fn income_accepts_brazilian_decimal_commas() {
    let conn = setup();
    let cfg = test_config();
    incomes::add_income(&conn, &cfg, &["1.500,99", "Salário"]).unwrap();
    let amount: String = conn
        .query_row("SELECT amount FROM incomes", [], |r| r.get(0))
        .unwrap();
    assert_eq!(amount, "1500.99");
}

#[test]
fn missing_amount_answers_with_usage_hint() {
    let conn = setup();
    let cfg = test_config();
    let reply = incomes::add_income(&conn, &cfg, &[]).unwrap();
    assert!(reply.text.contains("Uso correto"));
    let reply = incomes::add_income(&conn, &cfg, &["muito", "dinheiro"]).unwrap();
    assert!(reply.text.contains("Uso correto"));
}

#[test]
fn addgasto_without_args_hints_instead_of_starting_a_draft() {
    let mut sessions = Sessions::new();
    let reply = expenses::add_expense(&mut sessions, 7, &[]).unwrap();
    assert!(reply.text.contains("Uso correto"));
    assert!(sessions.pending(7).is_none());
}

#[test]
fn fixed_expense_is_recorded() {
    let conn = setup();
    let reply = expenses::add_fixed(&conn, &["1200", "Aluguel"]).unwrap();
    assert!(reply.text.contains("Despesa fixa registrada"));
    let amount: String = conn
        .query_row("SELECT amount FROM fixed_expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(amount, "1200");
}
