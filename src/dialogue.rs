// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::ledger::{self, LedgerError};
use crate::models::Category;
use crate::telegram::{InlineKeyboard, Reply};
use crate::utils::{fmt_money, parse_user_date};

pub const CATEGORY_CALLBACK_PREFIX: &str = "cat|";

/// A pending expense making its way through the collection dialogue.
/// Category is asked first, then the date; the draft commits when the date
/// resolves.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialogue {
    AwaitingCategory {
        amount: Decimal,
        description: String,
    },
    AwaitingDate {
        amount: Decimal,
        description: String,
        category: Category,
    },
}

/// Per-chat dialogue state. Each chat holds at most one pending draft;
/// starting a new one discards the old. The update loop advances a chat's
/// dialogue only from that chat's own messages, so no locking is needed.
#[derive(Debug, Default)]
pub struct Sessions {
    inner: HashMap<i64, Dialogue>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the category step for a fresh expense draft, replacing any
    /// dialogue this chat still had pending.
    pub fn start_expense(&mut self, chat_id: i64, amount: Decimal, description: String) -> Reply {
        let prompt = format!(
            "🛒 *Selecione a categoria para:*\n💰 {} - {}",
            fmt_money(&amount),
            description
        );
        self.inner.insert(
            chat_id,
            Dialogue::AwaitingCategory {
                amount,
                description,
            },
        );
        Reply::with_keyboard(prompt, category_keyboard())
    }

    /// Records the category picked on the inline keyboard and moves the
    /// dialogue to the date step. Returns the new prompt text, or None when
    /// no draft was awaiting a category (stale button press).
    pub fn select_category(&mut self, chat_id: i64, category: Category) -> Option<String> {
        let Some(Dialogue::AwaitingCategory {
            amount,
            description,
        }) = self.inner.get(&chat_id).cloned()
        else {
            return None;
        };
        let prompt = format!(
            "✅ *Categoria selecionada!*\n{} {} - {}\n🏷️ Categoria: {}\n\n\
             📅 *Quando foi esse gasto?*\n\
             Você pode responder com:\n\
             • 'hoje', 'ontem', 'amanhã'\n\
             • '25/09', '25/09/2024'\n\
             • Ou qualquer data no formato DD/MM/AAAA",
            category.emoji(),
            fmt_money(&amount),
            description,
            category.label()
        );
        self.inner.insert(
            chat_id,
            Dialogue::AwaitingDate {
                amount,
                description,
                category,
            },
        );
        Some(prompt)
    }

    /// True when the next plain-text message from this chat is a date
    /// answer. Takes priority over commands and the interpreter.
    pub fn awaiting_date(&self, chat_id: i64) -> bool {
        matches!(self.inner.get(&chat_id), Some(Dialogue::AwaitingDate { .. }))
    }

    pub fn pending(&self, chat_id: i64) -> Option<&Dialogue> {
        self.inner.get(&chat_id)
    }

    pub fn clear(&mut self, chat_id: i64) {
        self.inner.remove(&chat_id);
    }

    /// Resolves the date answer and commits the draft. Unparsable input
    /// re-prompts and keeps the draft pending; an insufficient food-voucher
    /// balance aborts and discards it.
    pub fn handle_date_reply(
        &mut self,
        conn: &Connection,
        chat_id: i64,
        text: &str,
        today: NaiveDate,
    ) -> Result<Reply> {
        let Some(Dialogue::AwaitingDate {
            amount,
            description,
            category,
        }) = self.inner.get(&chat_id).cloned()
        else {
            return Ok(Reply::text(
                "🤔 Nenhum gasto pendente. Use /addgasto para registrar um.",
            ));
        };

        let Some(date) = parse_user_date(text, today) else {
            return Ok(Reply::text(
                "❗ Não entendi essa data. Responda com 'hoje', 'ontem' ou algo como '25/09/2024'.",
            ));
        };

        match ledger::commit_expense(conn, amount, &description, category, date) {
            Ok(()) => {
                self.inner.remove(&chat_id);
                let date_display = if date == today {
                    "hoje".to_string()
                } else {
                    date.format("%d/%m/%Y").to_string()
                };
                Ok(Reply::text(format!(
                    "✅ *Gasto registrado com sucesso!*\n{} {} - {}\n📅 Data: {}\n🏷️ Categoria: {}",
                    category.emoji(),
                    fmt_money(&amount),
                    description,
                    date_display,
                    category.label()
                )))
            }
            Err(e) => match e.downcast_ref::<LedgerError>() {
                Some(LedgerError::InsufficientVoucherBalance { available, needed }) => {
                    self.inner.remove(&chat_id);
                    Ok(Reply::text(format!(
                        "⚠️ *Saldo insuficiente no vale-alimentação!*\n\
                         Saldo disponível: {}\nValor do gasto: {}",
                        fmt_money(available),
                        fmt_money(needed)
                    )))
                }
                _ => Err(e),
            },
        }
    }
}

fn category_keyboard() -> InlineKeyboard {
    InlineKeyboard::rows(
        Category::ALL
            .iter()
            .map(|c| {
                (
                    format!("{} {}", c.emoji(), c.label()),
                    format!("{}{}", CATEGORY_CALLBACK_PREFIX, c.token()),
                )
            })
            .collect(),
    )
}
