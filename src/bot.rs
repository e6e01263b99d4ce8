// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, params};

use crate::commands::{self, CommandContext, admin};
use crate::config::Config;
use crate::dialogue::{CATEGORY_CALLBACK_PREFIX, Sessions};
use crate::interpreter::Interpreter;
use crate::models::{Category, DraftKind, TransactionDraft};
use crate::telegram::{CallbackQuery, Client, Message, Reply, Update};
use crate::utils::fmt_money;

/// Long-poll loop: fetch updates, advance each chat's dialogue or route the
/// command. A fault in one update is logged and skipped; a transport fault
/// unwinds to main, which restarts the loop.
pub fn run(cfg: &Config, conn: &Connection) -> Result<()> {
    let tg = Client::new(&cfg.telegram_token)?;
    let interpreter = Interpreter::new(cfg.gemini_api_key.clone())?;
    let mut sessions = Sessions::new();

    println!("🤖 FinBot iniciado! Aguardando mensagens...");
    let mut offset = 0i64;
    loop {
        let updates = tg.get_updates(offset)?;
        for update in updates {
            offset = offset.max(update.update_id + 1);
            if let Err(e) = handle_update(conn, cfg, &tg, &interpreter, &mut sessions, update) {
                eprintln!("update error: {e:#}");
            }
        }
    }
}

fn handle_update(
    conn: &Connection,
    cfg: &Config,
    tg: &Client,
    interpreter: &Interpreter,
    sessions: &mut Sessions,
    update: Update,
) -> Result<()> {
    if let Some(callback) = update.callback_query {
        return handle_callback(conn, tg, sessions, callback);
    }
    let Some(message) = update.message else {
        return Ok(());
    };
    let Some(text) = message.text.clone() else {
        return Ok(());
    };
    let chat_id = message.chat.id;

    let reply = handle_text(conn, cfg, interpreter, sessions, chat_id, text.trim())?;
    tg.send_reply(chat_id, &reply)
}

/// Resume-or-start entry point for a text message: a pending date question
/// wins over everything except slash commands, which abandon the draft.
pub fn handle_text(
    conn: &Connection,
    cfg: &Config,
    interpreter: &Interpreter,
    sessions: &mut Sessions,
    chat_id: i64,
    text: &str,
) -> Result<Reply> {
    if text.starts_with('/') {
        let mut ctx = CommandContext {
            conn,
            cfg,
            sessions,
            interpreter,
        };
        return commands::dispatch(&mut ctx, chat_id, text);
    }
    if sessions.awaiting_date(chat_id) {
        let today = Utc::now().date_naive();
        return sessions.handle_date_reply(conn, chat_id, text, today);
    }
    match interpreter.interpret(text)? {
        None => Ok(Reply::text(
            "🤔 Não consegui entender. Use /ajuda para ver os comandos disponíveis.",
        )),
        Some(draft) => handle_interpreted(conn, cfg, sessions, chat_id, draft),
    }
}

fn handle_interpreted(
    conn: &Connection,
    cfg: &Config,
    sessions: &mut Sessions,
    chat_id: i64,
    draft: TransactionDraft,
) -> Result<Reply> {
    match draft.kind {
        DraftKind::Income => {
            if cfg.is_voucher_income(&draft.description) {
                crate::commands::incomes::insert_voucher(conn, draft.amount)?;
                return Ok(Reply::text(format!(
                    "✅ *Vale-alimentação registrado automaticamente!*\n🍽️ {}",
                    fmt_money(&draft.amount)
                )));
            }
            conn.execute(
                "INSERT INTO incomes(description, amount) VALUES (?1, ?2)",
                params![draft.description, draft.amount.to_string()],
            )?;
            Ok(Reply::text(format!(
                "✅ *Receita registrada automaticamente!*\n💰 {} - {}",
                fmt_money(&draft.amount),
                draft.description
            )))
        }
        DraftKind::Expense => {
            let mut reply = sessions.start_expense(chat_id, draft.amount, draft.description);
            reply.text = format!("✅ *Gasto identificado automaticamente!*\n{}", reply.text);
            Ok(reply)
        }
    }
}

fn handle_callback(
    conn: &Connection,
    tg: &Client,
    sessions: &mut Sessions,
    callback: CallbackQuery,
) -> Result<()> {
    tg.answer_callback(&callback.id)?;
    let Some(data) = callback.data else {
        return Ok(());
    };
    let Some(Message {
        message_id,
        chat,
        ..
    }) = callback.message
    else {
        return Ok(());
    };

    if let Some(token) = data.strip_prefix(CATEGORY_CALLBACK_PREFIX) {
        let Some(category) = Category::from_token(token) else {
            return Ok(());
        };
        // None means the button belongs to a draft that was already
        // discarded; nothing to do
        if let Some(prompt) = sessions.select_category(chat.id, category) {
            tg.edit_message_text(chat.id, message_id, &prompt)?;
        }
        return Ok(());
    }

    match data.as_str() {
        admin::RESET_CONFIRM => {
            let done = admin::reset_confirmed(conn)?;
            tg.edit_message_text(chat.id, message_id, &done)
        }
        admin::RESET_CANCEL => tg.edit_message_text(chat.id, message_id, &admin::reset_cancelled()),
        _ => Ok(()),
    }
}
