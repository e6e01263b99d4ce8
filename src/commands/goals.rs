// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::ledger::{self, LedgerError};
use crate::models::Goal;
use crate::telegram::Reply;
use crate::utils::{fmt_money, parse_amount_arg};

pub fn list(conn: &Connection) -> Result<Reply> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target, current, completed FROM goals ORDER BY completed ASC, id DESC",
    )?;
    let goals = stmt
        .query_map([], |r| {
            Ok(Goal {
                id: r.get(0)?,
                name: r.get(1)?,
                target: r.get::<_, String>(2)?.parse().unwrap_or(Decimal::ZERO),
                current: r.get::<_, String>(3)?.parse().unwrap_or(Decimal::ZERO),
                completed: r.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    if goals.is_empty() {
        return Ok(Reply::text(
            "🎯 Nenhuma meta cadastrada ainda!\n\n\
             Use /addmeta para criar uma nova meta:\nEx: /addmeta 5000 Viagem para praia",
        ));
    }

    let mut msg = String::from("🎯 SUAS METAS DE ECONOMIA\n━━━━━━━━━━━━━━━━━━━━━━\n\n");
    for g in &goals {
        let progress = if g.target > Decimal::ZERO {
            g.current / g.target * Decimal::from(100)
        } else {
            Decimal::ZERO
        };
        let status = if g.completed { "✅" } else { "🎯" };
        msg.push_str(&format!(
            "{} *Meta #{}: {}*\n   Progresso: {} / {} ({:.1}%)\n   Faltam: {}\n\n",
            status,
            g.id,
            g.name,
            fmt_money(&g.current),
            fmt_money(&g.target),
            progress,
            fmt_money(&(g.target - g.current))
        ));
    }
    msg.push_str("💡 Use /progresso_meta <id> <valor> para adicionar progresso");
    Ok(Reply::text(msg))
}

pub fn add(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let Some((raw_amount, rest)) = args.split_first() else {
        return Ok(usage_add());
    };
    let Ok(target) = parse_amount_arg(raw_amount) else {
        return Ok(usage_add());
    };
    let name = if rest.is_empty() {
        "Meta sem nome".to_string()
    } else {
        rest.join(" ")
    };
    conn.execute(
        "INSERT INTO goals(name, target, current) VALUES (?1, ?2, '0')",
        params![name, target.to_string()],
    )?;
    let goal_id = conn.last_insert_rowid();
    Ok(Reply::text(format!(
        "✅ *Meta criada com sucesso!*\n\n🎯 Meta #{}: {}\n💰 Valor alvo: {}\n\n\
         Use /progresso_meta {} <valor> para adicionar progresso!",
        goal_id,
        name,
        fmt_money(&target),
        goal_id
    )))
}

pub fn progress(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let (Some(raw_id), Some(raw_amount)) = (args.first(), args.get(1)) else {
        return Ok(usage_progress());
    };
    let Ok(goal_id) = raw_id.parse::<i64>() else {
        return Ok(usage_progress());
    };
    let Ok(amount) = parse_amount_arg(raw_amount) else {
        return Ok(usage_progress());
    };

    match ledger::add_goal_progress(conn, goal_id, amount) {
        Ok(p) if p.completed => Ok(Reply::text(format!(
            "🎉 *PARABÉNS! Meta concluída!*\n\n✅ {}\n💰 Valor alcançado: {}\n\n\
             Você conseguiu! Continue assim! 🚀",
            p.name,
            fmt_money(&p.target)
        ))),
        Ok(p) => {
            let pct = p.current / p.target * Decimal::from(100);
            Ok(Reply::text(format!(
                "✅ *Progresso adicionado!*\n\n🎯 {}\n💰 {} / {} ({:.1}%)\n📊 Faltam: {}\n\n\
                 Continue assim! 💪",
                p.name,
                fmt_money(&p.current),
                fmt_money(&p.target),
                pct,
                fmt_money(&(p.target - p.current))
            )))
        }
        Err(e) => match e.downcast_ref::<LedgerError>() {
            Some(LedgerError::GoalNotFound(_)) => Ok(Reply::text("❗ Meta não encontrada!")),
            Some(LedgerError::GoalCompleted(_)) => {
                Ok(Reply::text("✅ Esta meta já foi concluída!"))
            }
            _ => Err(e),
        },
    }
}

fn usage_add() -> Reply {
    Reply::text("❗ Uso correto: /addmeta <valor> <nome>\nEx: /addmeta 5000 Viagem para praia")
}

fn usage_progress() -> Reply {
    Reply::text("❗ Uso correto: /progresso_meta <id> <valor>\nEx: /progresso_meta 1 500")
}
