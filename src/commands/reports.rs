// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Datelike, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::interpreter::Interpreter;
use crate::ledger::{self, Totals};
use crate::models::Category;
use crate::telegram::Reply;
use crate::utils::{fmt_money, month_key, month_name_pt, parse_month_year, previous_month};

fn category_display(token: &str) -> String {
    match Category::from_token(token) {
        Some(c) => c.label().to_string(),
        None => {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => token.to_string(),
            }
        }
    }
}

fn balance_message(title: &str, t: &Totals) -> String {
    format!(
        "💳 {}\n━━━━━━━━━━━━━━━━━━━━━━\n\
         💰 Receitas: {}\n\
         🍽️ Vales: {} (Saldo: {})\n\
         🛒 Gastos: {}\n\
         🏠 Fixos: {}\n\
         ━━━━━━━━━━━━━━━━━━━━━━\n\
         💵 Saldo: {}",
        title,
        fmt_money(&t.income_total()),
        fmt_money(&t.voucher_credits),
        fmt_money(&t.voucher_balance()),
        fmt_money(&t.expenses),
        fmt_money(&t.fixed_expenses),
        fmt_money(&t.balance())
    )
}

/// /saldo: consolidated all-time balance.
pub fn balance(conn: &Connection) -> Result<Reply> {
    let t = ledger::totals(conn, None)?;
    Ok(Reply::text(balance_message("SALDO ATUAL", &t)))
}

/// /saldo_mes <mês> <ano>
pub fn balance_month(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let (Some(m), Some(y)) = (args.first(), args.get(1)) else {
        return Ok(Reply::text(
            "❗ Uso correto: /saldo_mes <mês> <ano>\nEx: /saldo_mes 9 2024",
        ));
    };
    let Ok((month, year)) = parse_month_year(m, y) else {
        return Ok(Reply::text(
            "❗ Uso correto: /saldo_mes <mês> <ano>\nEx: /saldo_mes 9 2024",
        ));
    };
    let t = ledger::totals(conn, Some(&month_key(year, month)))?;
    let title = format!("SALDO - {}/{}", month_name_pt(month).to_uppercase(), year);
    Ok(Reply::text(balance_message(&title, &t)))
}

fn report_message(conn: &Connection, title: &str, month: Option<&str>) -> Result<String> {
    let t = ledger::totals(conn, month)?;
    let by_category = ledger::spend_by_category(conn, month)?;
    let mut msg = format!(
        "📊 *RELATÓRIO - {}*\n━━━━━━━━━━━━━━━━━━━━━━\n\n\
         *ENTRADAS*\n\
         💰 Receitas: {}\n\
         💰 Receitas Parceiro: {}\n\
         🍽️ Vales: {}\n\
         *Total: {}*\n\n\
         *SAÍDAS*\n\
         🛒 Gastos: {}\n\
         🏠 Fixos: {}\n\
         *Total: {}*\n\n",
        title,
        fmt_money(&t.incomes),
        fmt_money(&t.partner_incomes),
        fmt_money(&t.voucher_credits),
        fmt_money(&(t.income_total() + t.voucher_credits)),
        fmt_money(&t.expenses),
        fmt_money(&t.fixed_expenses),
        fmt_money(&(t.expenses + t.fixed_expenses))
    );
    if !by_category.is_empty() {
        msg.push_str("*GASTOS POR CATEGORIA*\n");
        for (token, total) in &by_category {
            msg.push_str(&format!("• {}: {}\n", category_display(token), fmt_money(total)));
        }
        msg.push('\n');
    }
    msg.push_str(&format!(
        "━━━━━━━━━━━━━━━━━━━━━━\n💵 *SALDO: {}*",
        fmt_money(&t.balance())
    ));
    Ok(msg)
}

/// /relatorio: the current calendar month.
pub fn report(conn: &Connection) -> Result<Reply> {
    let now = Utc::now().date_naive();
    let title = format!("{}/{}", month_name_pt(now.month()).to_uppercase(), now.year());
    let key = month_key(now.year(), now.month());
    Ok(Reply::text(report_message(conn, &title, Some(&key))?))
}

/// /relatorio_mes <mês> <ano>
pub fn report_month(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let usage = "❗ Uso correto: /relatorio_mes <mês> <ano>\nEx: /relatorio_mes 9 2024";
    let (Some(m), Some(y)) = (args.first(), args.get(1)) else {
        return Ok(Reply::text(usage));
    };
    let Ok((month, year)) = parse_month_year(m, y) else {
        return Ok(Reply::text(usage));
    };
    let title = format!("{}/{}", month_name_pt(month).to_uppercase(), year);
    let key = month_key(year, month);
    Ok(Reply::text(report_message(conn, &title, Some(&key))?))
}

/// /comparar_meses: spending this month against last month.
pub fn compare_months(conn: &Connection) -> Result<Reply> {
    let now = Utc::now().date_naive();
    let (prev_year, prev_month) = previous_month(now.year(), now.month());
    let current = ledger::sum_expenses(conn, Some(&month_key(now.year(), now.month())), None)?;
    let previous = ledger::sum_expenses(conn, Some(&month_key(prev_year, prev_month)), None)?;

    let diff = current - previous;
    let trend = if diff > Decimal::ZERO {
        let pct = if previous > Decimal::ZERO {
            diff / previous * Decimal::from(100)
        } else {
            Decimal::ZERO
        };
        format!("📈 Aumento de {} (+{:.1}%)", fmt_money(&diff), pct)
    } else if diff < Decimal::ZERO {
        let pct = if previous > Decimal::ZERO {
            diff / previous * Decimal::from(100)
        } else {
            Decimal::ZERO
        };
        format!("📉 Redução de {} ({:.1}%)", fmt_money(&diff.abs()), pct)
    } else {
        "➡️ Gastos mantidos".to_string()
    };

    let mut msg = format!(
        "📊 *COMPARAÇÃO DE GASTOS*\n━━━━━━━━━━━━━━━━━━━━━━\n\n\
         📅 {}/{}: {}\n📅 {}/{}: {}\n\n{}\n\n",
        month_name_pt(prev_month),
        prev_year,
        fmt_money(&previous),
        month_name_pt(now.month()),
        now.year(),
        fmt_money(&current),
        trend
    );

    let by_category = ledger::spend_by_category(conn, Some(&month_key(now.year(), now.month())))?;
    if !by_category.is_empty() {
        msg.push_str("*Gastos por categoria (mês atual):*\n");
        for (token, total) in &by_category {
            msg.push_str(&format!("• {}: {}\n", category_display(token), fmt_money(total)));
        }
    }
    Ok(Reply::text(msg))
}

/// /historico_meses: the last six months of spending.
pub fn history_months(conn: &Connection) -> Result<Reply> {
    let history = ledger::monthly_expense_history(conn, 6)?;
    if history.is_empty() {
        return Ok(Reply::text("📊 Nenhum dado histórico disponível."));
    }
    let mut msg =
        String::from("📈 *HISTÓRICO DOS ÚLTIMOS 6 MESES*\n━━━━━━━━━━━━━━━━━━━━━━\n\n");
    for (key, total) in history.iter().rev() {
        let display = match key.split_once('-') {
            Some((year, month)) => {
                let m: u32 = month.parse().unwrap_or(0);
                if (1..=12).contains(&m) {
                    format!("{}/{}", month_name_pt(m), year)
                } else {
                    key.clone()
                }
            }
            None => key.clone(),
        };
        msg.push_str(&format!("📅 {}: {}\n", display, fmt_money(total)));
    }
    Ok(Reply::text(msg))
}

/// /top3: the three largest expenses ever recorded.
pub fn top3(conn: &Connection) -> Result<Reply> {
    let top = ledger::top_expenses(conn, 3)?;
    if top.is_empty() {
        return Ok(Reply::text("📊 Nenhum gasto registrado ainda."));
    }
    let mut msg = String::from("🔥 TOP 3 MAIORES GASTOS\n━━━━━━━━━━━━━━━━━━━━━━\n");
    let medals = ["🥇", "🥈", "🥉"];
    for (i, e) in top.iter().enumerate() {
        msg.push_str(&format!(
            "{} {} - {} ({})\n",
            medals.get(i).unwrap_or(&"•"),
            fmt_money(&e.amount),
            e.description,
            category_display(&e.category)
        ));
    }
    Ok(Reply::text(msg))
}

/// /fatura: credit-card total plus unpaid statement items.
pub fn statement(conn: &Connection) -> Result<Reply> {
    let total = ledger::credit_total(conn)?;
    let items = ledger::unpaid_statement_items(conn)?;
    let mut msg = format!(
        "💎 FATURA DO CARTÃO\n━━━━━━━━━━━━━━━━━━━━━━\n💳 Total: {}\n\n",
        fmt_money(&total)
    );
    if items.is_empty() {
        msg.push_str("Nenhum item pendente na fatura.");
    } else {
        msg.push_str("*Itens na fatura:*\n");
        for (description, amount) in &items {
            msg.push_str(&format!("• {}: {}\n", description, fmt_money(amount)));
        }
    }
    Ok(Reply::text(msg))
}

/// /mtp: Método Traz Paz: 50/30/15/5 split of disposable income.
pub fn mtp(conn: &Connection) -> Result<Reply> {
    let t = ledger::totals(conn, None)?;
    let disposable = t.income_total() - t.fixed_expenses;
    let Some(split) = ledger::mtp_split(disposable) else {
        return Ok(Reply::text(
            "⚠️ *Atenção!*\nSuas despesas fixas excedem suas receitas!\n\
             Revise seus gastos urgentemente.",
        ));
    };
    Ok(Reply::text(format!(
        "🧘 *MÉTODO TRAZ PAZ*\n━━━━━━━━━━━━━━━━━━━━━━\n\n\
         💰 Total de receitas: {}\n\
         🏠 Despesas fixas: {}\n\
         ✅ Disponível: {}\n\n\
         *Distribuição recomendada:*\n\
         🛒 Necessidades (50%): {}\n\
         🎯 Prioridades (30%): {}\n\
         😊 Qualidade de Vida (15%): {}\n\
         💎 Liberdade Financeira (5%): {}\n\n\
         *Dica:* Siga essa distribuição para ter uma vida financeira equilibrada!",
        fmt_money(&t.income_total()),
        fmt_money(&t.fixed_expenses),
        fmt_money(&split.disposable),
        fmt_money(&split.needs),
        fmt_money(&split.priorities),
        fmt_money(&split.quality_of_life),
        fmt_money(&split.financial_freedom)
    )))
}

/// /dashboard: all the headline numbers in one message.
pub fn dashboard(conn: &Connection) -> Result<Reply> {
    let t = ledger::totals(conn, None)?;
    let now = Utc::now().date_naive();
    let budget = ledger::general_budget(conn, now.month(), now.year())?;
    let active_goals = ledger::active_goal_count(conn)?;
    let reminders_today = ledger::reminders_due_count(conn, now.day())?;

    let mut msg = format!(
        "📊 *DASHBOARD FINANCEIRO*\n━━━━━━━━━━━━━━━━━━━━━━\n\n\
         💰 *RESUMO GERAL*\n\
         • Receitas: {}\n\
         • Gastos: {}\n\
         • Fixos: {}\n\
         • *Saldo: {}*\n\n\
         🍽️ *VALE-ALIMENTAÇÃO*\n\
         • Total recebido: {}\n\
         • Gasto: {}\n\
         • *Saldo: {}*\n\n",
        fmt_money(&t.income_total()),
        fmt_money(&t.expenses),
        fmt_money(&t.fixed_expenses),
        fmt_money(&t.balance()),
        fmt_money(&t.voucher_credits),
        fmt_money(&t.voucher_expenses),
        fmt_money(&t.voucher_balance())
    );

    let mut used_pct = Decimal::ZERO;
    if let Some(limit) = budget {
        if limit > Decimal::ZERO {
            used_pct = t.expenses / limit * Decimal::from(100);
        }
        let alert = if used_pct >= Decimal::from(90) {
            "🚨 ATENÇÃO: Orçamento quase esgotado!"
        } else if used_pct >= Decimal::from(75) {
            "⚠️ ALERTA: 75% do orçamento usado"
        } else {
            "✅ Orçamento sob controle"
        };
        msg.push_str(&format!(
            "💳 *ORÇAMENTO MENSAL*\n\
             • Limite: {}\n\
             • Usado: {} ({:.1}%)\n\
             • Disponível: {}\n\
             • {}\n\n",
            fmt_money(&limit),
            fmt_money(&t.expenses),
            used_pct,
            fmt_money(&(limit - t.expenses)),
            alert
        ));
    }

    msg.push_str(&format!(
        "🎯 *STATUS*\n• Metas ativas: {}\n• Lembretes hoje: {}\n\n💡 *DICAS*\n",
        active_goals, reminders_today
    ));

    let balance = t.balance();
    if balance < Decimal::ZERO {
        msg.push_str("• Atenção! Você está no vermelho. Revise seus gastos.\n");
    } else if balance < Decimal::from(500) {
        msg.push_str("• Seu saldo está baixo. Considere economizar mais.\n");
    } else {
        msg.push_str("• Ótimo! Você está com saldo positivo. Continue assim!\n");
    }
    if used_pct > Decimal::from(90) {
        msg.push_str("• Cuidado com novos gastos este mês!\n");
    }
    if active_goals > 0 {
        msg.push_str(&format!(
            "• Você tem {} meta(s) ativa(s). Use /metas para ver.\n",
            active_goals
        ));
    }
    Ok(Reply::text(msg))
}

/// /ia <pergunta>: open-ended financial Q&A.
pub fn ask_ai(interpreter: &Interpreter, args: &[&str]) -> Result<Reply> {
    if args.is_empty() {
        return Ok(Reply::text(
            "❗ Uso correto: /ia <sua pergunta>\nEx: /ia Como posso economizar mais?",
        ));
    }
    let question = args.join(" ");
    match interpreter.ask(&question)? {
        Some(answer) => Ok(Reply::text(format!("🤖 *IA Financeira:*\n\n{}", answer))),
        None => Ok(Reply::text(
            "❗ A IA está indisponível no momento. Tente novamente mais tarde.",
        )),
    }
}
