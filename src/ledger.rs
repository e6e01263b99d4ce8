// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Category;

/// Domain failures the chat handlers branch on to produce a friendly reply
/// instead of a crash.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("insufficient food-voucher balance: available {available}, needed {needed}")]
    InsufficientVoucherBalance { available: Decimal, needed: Decimal },
    #[error("goal {0} not found")]
    GoalNotFound(i64),
    #[error("goal '{0}' already completed")]
    GoalCompleted(String),
}

fn parse_stored(amount: &str) -> Result<Decimal> {
    amount
        .parse::<Decimal>()
        .with_context(|| format!("Invalid stored amount '{}'", amount))
}

/// Sums the TEXT-encoded amounts returned by `sql`. Row-by-row Decimal
/// accumulation, never SQL SUM, so cents stay exact.
fn sum_amounts(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Decimal> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(args.iter()))?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let s: String = r.get(0)?;
        total += parse_stored(&s)?;
    }
    Ok(total)
}

fn sum_simple(conn: &Connection, table: &str, month: Option<&str>) -> Result<Decimal> {
    match month {
        Some(m) => sum_amounts(
            conn,
            &format!(
                "SELECT amount FROM {} WHERE substr(created_at,1,7)=?1",
                table
            ),
            &[&m],
        ),
        None => sum_amounts(conn, &format!("SELECT amount FROM {}", table), &[]),
    }
}

/// Expenses filter on the transaction date when present, falling back to
/// the record-creation timestamp.
pub fn sum_expenses(
    conn: &Connection,
    month: Option<&str>,
    category: Option<&str>,
) -> Result<Decimal> {
    let mut sql = String::from("SELECT amount FROM expenses WHERE 1=1");
    let mut args: Vec<&dyn rusqlite::ToSql> = Vec::new();
    if let Some(ref m) = month {
        sql.push_str(" AND substr(COALESCE(transaction_date, created_at),1,7)=?");
        args.push(m);
    }
    if let Some(ref c) = category {
        sql.push_str(" AND category=?");
        args.push(c);
    }
    sum_amounts(conn, &sql, &args)
}

#[derive(Debug, Clone)]
pub struct Totals {
    pub incomes: Decimal,
    pub partner_incomes: Decimal,
    pub voucher_credits: Decimal,
    pub expenses: Decimal,
    pub fixed_expenses: Decimal,
    pub voucher_expenses: Decimal,
}

impl Totals {
    pub fn income_total(&self) -> Decimal {
        self.incomes + self.partner_incomes
    }

    pub fn voucher_balance(&self) -> Decimal {
        self.voucher_credits - self.voucher_expenses
    }

    /// Canonical balance. Voucher spending is netted inside the voucher
    /// pot, so the expense term must exclude it or it would be discounted
    /// twice.
    pub fn balance(&self) -> Decimal {
        self.income_total() + self.voucher_balance() - (self.expenses - self.voucher_expenses)
            - self.fixed_expenses
    }
}

pub fn totals(conn: &Connection, month: Option<&str>) -> Result<Totals> {
    Ok(Totals {
        incomes: sum_simple(conn, "incomes", month)?,
        partner_incomes: sum_simple(conn, "partner_incomes", month)?,
        voucher_credits: sum_simple(conn, "voucher_credits", month)?,
        expenses: sum_expenses(conn, month, None)?,
        fixed_expenses: sum_simple(conn, "fixed_expenses", month)?,
        voucher_expenses: sum_expenses(conn, month, Some(Category::FoodVoucher.token()))?,
    })
}

pub fn voucher_balance(conn: &Connection) -> Result<Decimal> {
    let credits = sum_simple(conn, "voucher_credits", None)?;
    let spent = sum_expenses(conn, None, Some(Category::FoodVoucher.token()))?;
    Ok(credits - spent)
}

/// Commits a finished expense draft. Food-voucher expenses are rejected
/// when the voucher pot cannot cover them. Credit expenses also append an
/// unpaid card-statement item; that second write is independent and an
/// orphaned statement item is tolerated over cross-table atomicity.
pub fn commit_expense(
    conn: &Connection,
    amount: Decimal,
    description: &str,
    category: Category,
    date: NaiveDate,
) -> Result<()> {
    if category == Category::FoodVoucher {
        let available = voucher_balance(conn)?;
        if available < amount {
            return Err(LedgerError::InsufficientVoucherBalance {
                available,
                needed: amount,
            }
            .into());
        }
    }
    conn.execute(
        "INSERT INTO expenses(amount, description, category, transaction_date) VALUES (?1, ?2, ?3, ?4)",
        params![
            amount.to_string(),
            description,
            category.token(),
            date.to_string()
        ],
    )?;
    if category == Category::Credit {
        conn.execute(
            "INSERT INTO card_statement(description, amount, paid) VALUES (?1, ?2, 0)",
            params![description, amount.to_string()],
        )?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct TopExpense {
    pub amount: Decimal,
    pub description: String,
    pub category: String,
}

/// Highest-amount expenses, ties broken by insertion order.
pub fn top_expenses(conn: &Connection, n: usize) -> Result<Vec<TopExpense>> {
    let mut stmt =
        conn.prepare("SELECT amount, description, category FROM expenses ORDER BY id")?;
    let mut rows = stmt.query([])?;
    let mut all = Vec::new();
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(0)?;
        all.push(TopExpense {
            amount: parse_stored(&amount_s)?,
            description: r.get(1)?,
            category: r.get(2)?,
        });
    }
    all.sort_by(|a, b| b.amount.cmp(&a.amount));
    all.truncate(n);
    Ok(all)
}

pub fn spend_by_category(conn: &Connection, month: Option<&str>) -> Result<Vec<(String, Decimal)>> {
    let mut sql = String::from("SELECT category, amount FROM expenses");
    let mut args: Vec<&dyn rusqlite::ToSql> = Vec::new();
    if let Some(ref m) = month {
        sql.push_str(" WHERE substr(COALESCE(transaction_date, created_at),1,7)=?");
        args.push(m);
    }
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(args.iter()))?;
    use std::collections::HashMap;
    let mut agg: HashMap<String, Decimal> = HashMap::new();
    while let Some(r) = rows.next()? {
        let cat: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        *agg.entry(cat).or_insert(Decimal::ZERO) += parse_stored(&amount_s)?;
    }
    let mut items: Vec<_> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(items)
}

/// Expense totals per calendar month, newest first, at most `limit` months.
pub fn monthly_expense_history(conn: &Connection, limit: usize) -> Result<Vec<(String, Decimal)>> {
    let mut stmt = conn.prepare(
        "SELECT substr(COALESCE(transaction_date, created_at),1,7), amount FROM expenses",
    )?;
    let mut rows = stmt.query([])?;
    use std::collections::BTreeMap;
    let mut map: BTreeMap<String, Decimal> = BTreeMap::new();
    while let Some(r) = rows.next()? {
        let m: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        *map.entry(m).or_insert(Decimal::ZERO) += parse_stored(&amount_s)?;
    }
    Ok(map.into_iter().rev().take(limit).collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MtpSplit {
    pub disposable: Decimal,
    pub needs: Decimal,
    pub priorities: Decimal,
    pub quality_of_life: Decimal,
    pub financial_freedom: Decimal,
}

/// Fixed-percentage split of disposable income: 50/30/15/5. None when
/// nothing is left to split.
pub fn mtp_split(disposable: Decimal) -> Option<MtpSplit> {
    if disposable <= Decimal::ZERO {
        return None;
    }
    Some(MtpSplit {
        disposable,
        needs: disposable * Decimal::new(50, 2),
        priorities: disposable * Decimal::new(30, 2),
        quality_of_life: disposable * Decimal::new(15, 2),
        financial_freedom: disposable * Decimal::new(5, 2),
    })
}

#[derive(Debug, Clone)]
pub struct GoalProgress {
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub completed: bool,
}

/// Adds a contribution to a savings goal. The final contribution is clamped
/// at the target and marks the goal completed; completed goals reject
/// further contributions.
pub fn add_goal_progress(conn: &Connection, goal_id: i64, amount: Decimal) -> Result<GoalProgress> {
    let row: Option<(String, String, String, bool)> = conn
        .query_row(
            "SELECT name, target, current, completed FROM goals WHERE id=?1",
            params![goal_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let (name, target_s, current_s, completed) =
        row.ok_or(LedgerError::GoalNotFound(goal_id))?;
    if completed {
        return Err(LedgerError::GoalCompleted(name).into());
    }
    let target = parse_stored(&target_s)?;
    let current = parse_stored(&current_s)?;
    let new_current = current + amount;
    if new_current >= target {
        conn.execute(
            "UPDATE goals SET current=?1, completed=1 WHERE id=?2",
            params![target.to_string(), goal_id],
        )?;
        Ok(GoalProgress {
            name,
            target,
            current: target,
            completed: true,
        })
    } else {
        conn.execute(
            "UPDATE goals SET current=?1 WHERE id=?2",
            params![new_current.to_string(), goal_id],
        )?;
        Ok(GoalProgress {
            name,
            target,
            current: new_current,
            completed: false,
        })
    }
}

pub fn general_budget(conn: &Connection, month: u32, year: i32) -> Result<Option<Decimal>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT amount FROM budgets WHERE scope='general' AND month=?1 AND year=?2",
            params![month, year],
            |r| r.get(0),
        )
        .optional()?;
    v.as_deref().map(parse_stored).transpose()
}

pub fn credit_total(conn: &Connection) -> Result<Decimal> {
    sum_expenses(conn, None, Some(Category::Credit.token()))
}

pub fn unpaid_statement_items(conn: &Connection) -> Result<Vec<(String, Decimal)>> {
    let mut stmt =
        conn.prepare("SELECT description, amount FROM card_statement WHERE paid=0 ORDER BY id")?;
    let mut rows = stmt.query([])?;
    let mut items = Vec::new();
    while let Some(r) = rows.next()? {
        let d: String = r.get(0)?;
        let a: String = r.get(1)?;
        items.push((d, parse_stored(&a)?));
    }
    Ok(items)
}

pub fn active_goal_count(conn: &Connection) -> Result<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM goals WHERE completed=0", [], |r| {
        r.get(0)
    })?;
    Ok(n)
}

pub fn reminders_due_count(conn: &Connection, day: u32) -> Result<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM reminders WHERE active=1 AND day_of_month=?1",
        params![day],
        |r| r.get(0),
    )?;
    Ok(n)
}
