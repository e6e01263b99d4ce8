// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, params};

use crate::dialogue::Sessions;
use crate::telegram::Reply;
use crate::utils::{fmt_money, parse_amount_arg};

/// /addgasto <valor> <descrição>: opens the category/date dialogue instead
/// of committing straight away.
pub fn add_expense(sessions: &mut Sessions, chat_id: i64, args: &[&str]) -> Result<Reply> {
    let Some((raw_amount, rest)) = args.split_first() else {
        return Ok(usage_expense());
    };
    let Ok(amount) = parse_amount_arg(raw_amount) else {
        return Ok(usage_expense());
    };
    let description = if rest.is_empty() {
        "Sem descrição".to_string()
    } else {
        rest.join(" ")
    };
    Ok(sessions.start_expense(chat_id, amount, description))
}

/// /fixo <valor> <descrição>: a fixed monthly expense, no dialogue.
pub fn add_fixed(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let Some((raw_amount, rest)) = args.split_first() else {
        return Ok(usage_fixed());
    };
    let Ok(amount) = parse_amount_arg(raw_amount) else {
        return Ok(usage_fixed());
    };
    let description = if rest.is_empty() {
        "Sem descrição".to_string()
    } else {
        rest.join(" ")
    };
    conn.execute(
        "INSERT INTO fixed_expenses(description, amount) VALUES (?1, ?2)",
        params![description, amount.to_string()],
    )?;
    Ok(Reply::text(format!(
        "✅ Despesa fixa registrada!\n🏠 {} - {}",
        fmt_money(&amount),
        description
    )))
}

fn usage_expense() -> Reply {
    Reply::text(
        "❗ *Uso correto:* `/addgasto <valor> <descrição>`\n\n\
         📝 *Exemplo:*\n• `/addgasto 50 Supermercado`\n\n\
         Você selecionará a categoria e depois informará a data.",
    )
}

fn usage_fixed() -> Reply {
    Reply::text("❗ Uso correto: /fixo <valor> <descrição>\nEx: /fixo 1200 Aluguel")
}
