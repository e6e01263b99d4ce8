// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::models::RecurringPayment;
use crate::telegram::Reply;
use crate::utils::{fmt_money, parse_amount_arg, parse_day_of_month};

pub fn list(conn: &Connection) -> Result<Reply> {
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, day_of_month, active FROM recurring ORDER BY day_of_month",
    )?;
    let payments = stmt
        .query_map([], |r| {
            Ok(RecurringPayment {
                id: r.get(0)?,
                description: r.get(1)?,
                amount: r.get::<_, String>(2)?.parse().unwrap_or(Decimal::ZERO),
                day_of_month: r.get(3)?,
                active: r.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    if payments.is_empty() {
        return Ok(Reply::text(
            "🔄 Nenhum pagamento recorrente!\n\n\
             Use /addrecorrente para criar:\nEx: /addrecorrente 100 15 Netflix",
        ));
    }

    let mut msg = String::from("🔄 PAGAMENTOS RECORRENTES\n━━━━━━━━━━━━━━━━━━━━━━\n\n");
    for p in &payments {
        let status = if p.active { "✅" } else { "❌" };
        msg.push_str(&format!(
            "{} *Dia {}*: {} - {}\n",
            status,
            p.day_of_month,
            p.description,
            fmt_money(&p.amount)
        ));
    }
    Ok(Reply::text(msg))
}

/// /addrecorrente <valor> <dia> <descrição>
pub fn add(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let (Some(raw_amount), Some(raw_day)) = (args.first(), args.get(1)) else {
        return Ok(usage());
    };
    let Ok(amount) = parse_amount_arg(raw_amount) else {
        return Ok(usage());
    };
    let Ok(day) = parse_day_of_month(raw_day) else {
        return Ok(usage());
    };
    let description = if args.len() > 2 {
        args[2..].join(" ")
    } else {
        "Recorrente sem descrição".to_string()
    };
    conn.execute(
        "INSERT INTO recurring(description, amount, day_of_month) VALUES (?1, ?2, ?3)",
        params![description, amount.to_string(), day],
    )?;
    Ok(Reply::text(format!(
        "✅ *Pagamento recorrente criado!*\n\n🔄 {}\n💰 Valor: {}\n📅 Todo dia {}",
        description,
        fmt_money(&amount),
        day
    )))
}

fn usage() -> Reply {
    Reply::text(
        "❗ Uso correto: /addrecorrente <valor> <dia> <descrição>\n\
         Ex: /addrecorrente 100 15 Netflix\nDia deve ser entre 1 e 31",
    )
}
