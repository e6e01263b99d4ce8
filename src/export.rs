// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ExportRow {
    pub ledger: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: String,
}

/// Flattens every ledger table into (ledger, description, amount, category,
/// date) rows: the spreadsheet-style dump users had on the chat side.
pub fn collect_rows(conn: &Connection) -> Result<Vec<ExportRow>> {
    let mut rows = Vec::new();

    let simple: [(&str, &str); 4] = [
        ("incomes", "SELECT description, amount, created_at FROM incomes ORDER BY id"),
        (
            "partner_incomes",
            "SELECT description, amount, created_at FROM partner_incomes ORDER BY id",
        ),
        (
            "fixed_expenses",
            "SELECT description, amount, created_at FROM fixed_expenses ORDER BY id",
        ),
        (
            "voucher_credits",
            "SELECT '', amount, created_at FROM voucher_credits ORDER BY id",
        ),
    ];
    for (ledger, sql) in simple {
        let mut stmt = conn.prepare(sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            rows.push(ExportRow {
                ledger: ledger.to_string(),
                description: r.get(0)?,
                amount: r.get(1)?,
                category: String::new(),
                date: r.get(2)?,
            });
        }
    }

    let mut stmt = conn.prepare(
        "SELECT description, amount, category, COALESCE(transaction_date, created_at) FROM expenses ORDER BY id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        rows.push(ExportRow {
            ledger: "expenses".to_string(),
            description: r.get(0)?,
            amount: r.get(1)?,
            category: r.get(2)?,
            date: r.get(3)?,
        });
    }

    Ok(rows)
}

pub fn export(conn: &Connection, format: &str, out: &Path) -> Result<()> {
    let rows = collect_rows(conn)?;
    match format {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["ledger", "description", "amount", "category", "date"])?;
            for r in &rows {
                wtr.write_record([
                    r.ledger.as_str(),
                    r.description.as_str(),
                    r.amount.as_str(),
                    r.category.as_str(),
                    r.date.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", format);
            return Ok(());
        }
    }
    println!("Exported {} rows to {}", rows.len(), out.display());
    Ok(())
}
