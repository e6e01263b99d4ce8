// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Datelike, Utc};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::telegram::Reply;
use crate::utils::{fmt_money, month_name_pt, parse_amount_arg};

/// /orcamento <valor>: overall spending limit for the current month.
/// Resubmitting replaces the value for the period.
pub fn set_general(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let amount = match args.first().map(|s| parse_amount_arg(s)) {
        Some(Ok(a)) => a,
        _ => {
            return Ok(Reply::text(
                "❗ Uso correto: /orcamento <valor>\nEx: /orcamento 2000",
            ));
        }
    };
    let now = Utc::now().date_naive();
    upsert(conn, "general", "", amount, now.month(), now.year())?;
    Ok(Reply::text(format!(
        "✅ *Orçamento mensal definido!*\n\n💰 Limite: {} para {}/{}",
        fmt_money(&amount),
        month_name_pt(now.month()),
        now.year()
    )))
}

/// /orcamento_categoria <categoria> <valor>: the amount is the last token.
pub fn set_category(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let usage = || {
        Reply::text(
            "❗ Uso correto: /orcamento_categoria <categoria> <valor>\n\
             Ex: /orcamento_categoria Alimentação 500",
        )
    };
    let Some((raw_amount, cat_parts)) = args.split_last() else {
        return Ok(usage());
    };
    if cat_parts.is_empty() {
        return Ok(usage());
    }
    let Ok(amount) = parse_amount_arg(raw_amount) else {
        return Ok(usage());
    };
    let category = cat_parts.join(" ");
    let now = Utc::now().date_naive();
    upsert(conn, "category", &category, amount, now.month(), now.year())?;
    Ok(Reply::text(format!(
        "✅ *Orçamento por categoria definido!*\n\n🏷️ Categoria: {}\n💰 Limite: {} para {}/{}",
        category,
        fmt_money(&amount),
        month_name_pt(now.month()),
        now.year()
    )))
}

pub fn upsert(
    conn: &Connection,
    scope: &str,
    category: &str,
    amount: Decimal,
    month: u32,
    year: i32,
) -> Result<()> {
    conn.execute(
        "INSERT INTO budgets(scope, category, amount, month, year) VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(scope, category, month, year) DO UPDATE SET amount=excluded.amount",
        params![scope, category, amount.to_string(), month, year],
    )?;
    Ok(())
}
