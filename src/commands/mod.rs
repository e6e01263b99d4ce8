// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod admin;
pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod goals;
pub mod incomes;
pub mod recurring;
pub mod reminders;
pub mod reports;

use anyhow::Result;
use rusqlite::Connection;

use crate::config::Config;
use crate::dialogue::Sessions;
use crate::interpreter::Interpreter;
use crate::telegram::Reply;

pub struct CommandContext<'a> {
    pub conn: &'a Connection,
    pub cfg: &'a Config,
    pub sessions: &'a mut Sessions,
    pub interpreter: &'a Interpreter,
}

/// Routes a slash command ("/addgasto 50 Supermercado") to its handler.
/// Issuing any command abandons a pending expense draft; /addgasto then
/// opens a fresh one.
pub fn dispatch(ctx: &mut CommandContext, chat_id: i64, text: &str) -> Result<Reply> {
    let mut parts = text.split_whitespace();
    let head = parts.next().unwrap_or("");
    let name = head.trim_start_matches('/');
    let name = name.split('@').next().unwrap_or(name);
    let args: Vec<&str> = parts.collect();

    ctx.sessions.clear(chat_id);

    match name {
        "start" => Ok(admin::start()),
        "ajuda" | "help" => Ok(admin::help()),
        "addreceita" => incomes::add_income(ctx.conn, ctx.cfg, &args),
        "addreceita_parceiro" => incomes::add_partner_income(ctx.conn, &args),
        "vale" => incomes::add_voucher_credit(ctx.conn, &args),
        "addgasto" => expenses::add_expense(ctx.sessions, chat_id, &args),
        "fixo" => expenses::add_fixed(ctx.conn, &args),
        "saldo" => reports::balance(ctx.conn),
        "saldo_mes" => reports::balance_month(ctx.conn, &args),
        "relatorio" => reports::report(ctx.conn),
        "relatorio_mes" => reports::report_month(ctx.conn, &args),
        "comparar_meses" => reports::compare_months(ctx.conn),
        "historico_meses" => reports::history_months(ctx.conn),
        "top3" => reports::top3(ctx.conn),
        "fatura" => reports::statement(ctx.conn),
        "mtp" => reports::mtp(ctx.conn),
        "dashboard" => reports::dashboard(ctx.conn),
        "ia" => reports::ask_ai(ctx.interpreter, &args),
        "metas" => goals::list(ctx.conn),
        "addmeta" => goals::add(ctx.conn, &args),
        "progresso_meta" => goals::progress(ctx.conn, &args),
        "lembretes" => reminders::list(ctx.conn),
        "addlembrete" => reminders::add(ctx.conn, &args),
        "categorias" => categories::list(ctx.conn),
        "addcategoria" => categories::add(ctx.conn, &args),
        "removecategoria" => categories::remove(ctx.conn, &args),
        "orcamento" => budgets::set_general(ctx.conn, &args),
        "orcamento_categoria" => budgets::set_category(ctx.conn, &args),
        "recorrentes" => recurring::list(ctx.conn),
        "addrecorrente" => recurring::add(ctx.conn, &args),
        "reset" => Ok(admin::reset_prompt()),
        _ => Ok(Reply::text(
            "🤔 Comando desconhecido. Digite /ajuda para ver os comandos disponíveis.",
        )),
    }
}
