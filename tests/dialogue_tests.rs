// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finbot::dialogue::Sessions;
use finbot::models::Category;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    finbot::db::init_schema(&mut conn).unwrap();
    conn
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

const CHAT: i64 = 7;

#[test]
fn full_round_trip_commits_one_dated_expense() {
    let conn = setup();
    let mut sessions = Sessions::new();

    let reply = sessions.start_expense(CHAT, dec("50"), "Supermercado".to_string());
    let keyboard = reply.keyboard.expect("category choices expected");
    assert_eq!(keyboard.inline_keyboard.len(), 4);

    let prompt = sessions.select_category(CHAT, Category::Pix).unwrap();
    assert!(prompt.contains("Quando foi esse gasto"));
    assert!(sessions.awaiting_date(CHAT));

    let reply = sessions
        .handle_date_reply(&conn, CHAT, "ontem", today())
        .unwrap();
    assert!(reply.text.contains("Gasto registrado com sucesso"));

    let rows: Vec<(String, String, String, Option<String>)> = {
        let mut stmt = conn
            .prepare("SELECT amount, description, category, transaction_date FROM expenses")
            .unwrap();
        let got = stmt
            .query_map([], |r| {
                Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
            })
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        got
    };
    assert_eq!(
        rows,
        vec![(
            "50".to_string(),
            "Supermercado".to_string(),
            "pix".to_string(),
            Some("2025-03-09".to_string()),
        )]
    );
    assert!(sessions.pending(CHAT).is_none());
}

#[test]
fn unparsable_date_reprompts_and_keeps_draft() {
    let conn = setup();
    let mut sessions = Sessions::new();
    sessions.start_expense(CHAT, dec("50"), "Supermercado".to_string());
    sessions.select_category(CHAT, Category::Debit).unwrap();

    let reply = sessions
        .handle_date_reply(&conn, CHAT, "sei lá", today())
        .unwrap();
    assert!(reply.text.contains("Não entendi essa data"));
    assert!(sessions.awaiting_date(CHAT));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);

    // a valid answer afterwards still commits
    let reply = sessions
        .handle_date_reply(&conn, CHAT, "25/09", today())
        .unwrap();
    assert!(reply.text.contains("Gasto registrado com sucesso"));
    let date: Option<String> = conn
        .query_row("SELECT transaction_date FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(date.as_deref(), Some("2025-09-25"));
}

#[test]
fn insufficient_voucher_balance_aborts_and_discards() {
    let conn = setup();
    conn.execute("INSERT INTO voucher_credits(amount) VALUES ('30')", [])
        .unwrap();
    let mut sessions = Sessions::new();
    sessions.start_expense(CHAT, dec("80"), "Jantar".to_string());
    sessions.select_category(CHAT, Category::FoodVoucher).unwrap();

    let reply = sessions
        .handle_date_reply(&conn, CHAT, "hoje", today())
        .unwrap();
    assert!(reply.text.contains("Saldo insuficiente"));
    assert!(reply.text.contains("R$ 30,00"));
    assert!(sessions.pending(CHAT).is_none());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn credit_commit_also_writes_statement_item() {
    let conn = setup();
    let mut sessions = Sessions::new();
    sessions.start_expense(CHAT, dec("120"), "TV".to_string());
    sessions.select_category(CHAT, Category::Credit).unwrap();
    sessions
        .handle_date_reply(&conn, CHAT, "hoje", today())
        .unwrap();

    let (description, paid): (String, bool) = conn
        .query_row(
            "SELECT description, paid FROM card_statement",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(description, "TV");
    assert!(!paid);
}

#[test]
fn starting_a_new_draft_discards_the_old_one() {
    let conn = setup();
    let mut sessions = Sessions::new();
    sessions.start_expense(CHAT, dec("50"), "Primeiro".to_string());
    sessions.select_category(CHAT, Category::Pix).unwrap();
    assert!(sessions.awaiting_date(CHAT));

    sessions.start_expense(CHAT, dec("99"), "Segundo".to_string());
    assert!(!sessions.awaiting_date(CHAT));

    sessions.select_category(CHAT, Category::Debit).unwrap();
    sessions
        .handle_date_reply(&conn, CHAT, "hoje", today())
        .unwrap();

    let (amount, description): (String, String) = conn
        .query_row("SELECT amount, description FROM expenses", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(amount, "99");
    assert_eq!(description, "Segundo");
}

#[test]
fn chats_do_not_share_dialogue_state() {
    let mut sessions = Sessions::new();
    sessions.start_expense(1, dec("10"), "a".to_string());
    sessions.start_expense(2, dec("20"), "b".to_string());
    sessions.select_category(1, Category::Pix).unwrap();
    assert!(sessions.awaiting_date(1));
    assert!(!sessions.awaiting_date(2));
}

#[test]
fn stale_category_press_is_ignored() {
    let mut sessions = Sessions::new();
    assert!(sessions.select_category(CHAT, Category::Pix).is_none());
}

#[test]
fn date_reply_without_pending_draft_is_harmless() {
    let conn = setup();
    let mut sessions = Sessions::new();
    let reply = sessions
        .handle_date_reply(&conn, CHAT, "hoje", today())
        .unwrap();
    assert!(reply.text.contains("Nenhum gasto pendente"));
}
