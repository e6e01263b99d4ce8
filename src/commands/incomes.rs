// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::config::Config;
use crate::telegram::Reply;
use crate::utils::{fmt_money, parse_amount_arg};

fn description_from(args: &[&str]) -> String {
    if args.is_empty() {
        "Sem descrição".to_string()
    } else {
        args.join(" ")
    }
}

/// /addreceita <valor> <descrição>. Descriptions matching the configured
/// food-voucher keywords are credited to the voucher ledger instead.
pub fn add_income(conn: &Connection, cfg: &Config, args: &[&str]) -> Result<Reply> {
    let Some((raw_amount, rest)) = args.split_first() else {
        return Ok(usage_income());
    };
    let Ok(amount) = parse_amount_arg(raw_amount) else {
        return Ok(usage_income());
    };
    let description = description_from(rest);

    if cfg.is_voucher_income(&description) {
        insert_voucher(conn, amount)?;
        return Ok(Reply::text(format!(
            "✅ Vale-alimentação registrado!\n🍽️ {}",
            fmt_money(&amount)
        )));
    }

    conn.execute(
        "INSERT INTO incomes(description, amount) VALUES (?1, ?2)",
        params![description, amount.to_string()],
    )?;
    Ok(Reply::text(format!(
        "✅ Receita registrada!\n💰 {} - {}",
        fmt_money(&amount),
        description
    )))
}

pub fn add_partner_income(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let Some((raw_amount, rest)) = args.split_first() else {
        return Ok(usage_partner());
    };
    let Ok(amount) = parse_amount_arg(raw_amount) else {
        return Ok(usage_partner());
    };
    let description = description_from(rest);
    conn.execute(
        "INSERT INTO partner_incomes(description, amount) VALUES (?1, ?2)",
        params![description, amount.to_string()],
    )?;
    Ok(Reply::text(format!(
        "✅ Receita da parceira registrada!\n💰 {} - {}",
        fmt_money(&amount),
        description
    )))
}

/// /vale <valor>: a food-voucher deposit.
pub fn add_voucher_credit(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let amount = match args.first().map(|s| parse_amount_arg(s)) {
        Some(Ok(a)) => a,
        _ => {
            return Ok(Reply::text(
                "❗ Uso correto: /vale <valor>\nEx: /vale 800",
            ));
        }
    };
    insert_voucher(conn, amount)?;
    Ok(Reply::text(format!(
        "✅ Vale-alimentação registrado!\n🍽️ {}",
        fmt_money(&amount)
    )))
}

pub fn insert_voucher(conn: &Connection, amount: Decimal) -> Result<()> {
    conn.execute(
        "INSERT INTO voucher_credits(amount) VALUES (?1)",
        params![amount.to_string()],
    )?;
    Ok(())
}

fn usage_income() -> Reply {
    Reply::text(
        "❗ Uso correto: /addreceita <valor> <descrição>\nEx: /addreceita 2000 Salário",
    )
}

fn usage_partner() -> Reply {
    Reply::text(
        "❗ Uso correto: /addreceita_parceiro <valor> <descrição>\nEx: /addreceita_parceiro 1500 Salário",
    )
}
