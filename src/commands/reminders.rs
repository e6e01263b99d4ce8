// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, params};

use crate::models::Reminder;
use crate::telegram::Reply;
use crate::utils::parse_day_of_month;

pub fn list(conn: &Connection) -> Result<Reply> {
    let mut stmt = conn
        .prepare("SELECT id, description, day_of_month, active FROM reminders ORDER BY day_of_month")?;
    let reminders = stmt
        .query_map([], |r| {
            Ok(Reminder {
                id: r.get(0)?,
                description: r.get(1)?,
                day_of_month: r.get(2)?,
                active: r.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    if reminders.is_empty() {
        return Ok(Reply::text(
            "🔔 Nenhum lembrete cadastrado!\n\n\
             Use /addlembrete para criar:\nEx: /addlembrete 10 Pagar conta de luz",
        ));
    }

    let mut msg = String::from("🔔 SEUS LEMBRETES\n━━━━━━━━━━━━━━━━━━━━━━\n\n");
    for r in &reminders {
        let status = if r.active { "🔔" } else { "🔕" };
        msg.push_str(&format!(
            "{} *Dia {}*: {}\n",
            status, r.day_of_month, r.description
        ));
    }
    Ok(Reply::text(msg))
}

pub fn add(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let Some((raw_day, rest)) = args.split_first() else {
        return Ok(usage());
    };
    let Ok(day) = parse_day_of_month(raw_day) else {
        return Ok(usage());
    };
    let description = if rest.is_empty() {
        "Lembrete sem descrição".to_string()
    } else {
        rest.join(" ")
    };
    conn.execute(
        "INSERT INTO reminders(description, day_of_month) VALUES (?1, ?2)",
        params![description, day],
    )?;
    Ok(Reply::text(format!(
        "✅ *Lembrete criado!*\n\n🔔 Todo dia {}: {}",
        day, description
    )))
}

fn usage() -> Reply {
    Reply::text(
        "❗ Uso correto: /addlembrete <dia> <descrição>\n\
         Ex: /addlembrete 10 Pagar conta de luz\nDia deve ser entre 1 e 31",
    )
}
