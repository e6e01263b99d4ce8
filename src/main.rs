// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::{Path, PathBuf};

use finbot::{bot, cli, config::Config, db, export, ledger, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("init", _)) => {
            let conn = db::open_or_init(db_override().as_deref())?;
            drop(conn);
            println!("Database initialized at {}", effective_db_path()?.display());
        }
        Some(("export", sub)) => {
            let conn = db::open_or_init(db_override().as_deref())?;
            let format = sub.get_one::<String>("format").unwrap();
            let out = sub.get_one::<String>("out").unwrap();
            export::export(&conn, format, Path::new(out))?;
        }
        Some(("ledger", sub)) => {
            let conn = db::open_or_init(db_override().as_deref())?;
            print_ledger(&conn, sub)?;
        }
        Some(("run", _)) | None => run_bot()?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn db_override() -> Option<PathBuf> {
    std::env::var("FINBOT_DB").ok().map(PathBuf::from)
}

fn effective_db_path() -> Result<PathBuf> {
    match db_override() {
        Some(p) => Ok(p),
        None => db::db_path(),
    }
}

/// Restart-on-crash: the poll loop only returns on error; log it, sleep a
/// fixed interval, go again. In-flight dialogue drafts are lost; committed
/// rows are not.
fn run_bot() -> Result<()> {
    let cfg = Config::from_env()?;
    let conn = db::open_or_init(cfg.db_path.as_deref())?;
    loop {
        if let Err(e) = bot::run(&cfg, &conn) {
            eprintln!("❌ Erro: {e:#}");
            eprintln!("🔄 Reiniciando em 10 segundos...");
            std::thread::sleep(std::time::Duration::from_secs(10));
        }
    }
}

fn print_ledger(conn: &rusqlite::Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub.get_one::<String>("month").map(|s| s.as_str());
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&20);
    let json_flag = sub.get_flag("json");

    let mut sql = String::from(
        "SELECT COALESCE(transaction_date, created_at), description, category, amount, paid
         FROM expenses WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(m) = month {
        sql.push_str(" AND substr(COALESCE(transaction_date, created_at),1,7)=?");
        params_vec.push(m.to_string());
    }
    sql.push_str(" ORDER BY COALESCE(transaction_date, created_at) DESC, id DESC LIMIT ?");
    params_vec.push(limit.to_string());

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let description: String = r.get(1)?;
        let category: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let paid: bool = r.get(4)?;
        data.push(vec![
            date,
            description,
            category,
            amount,
            if paid { "yes".into() } else { "no".into() },
        ]);
    }

    if json_flag {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        println!(
            "{}",
            utils::pretty_table(&["Date", "Description", "Category", "Amount", "Paid"], data)
        );
        let total = ledger::sum_expenses(conn, month, None)?;
        println!("Total spent: {}", utils::fmt_money(&total));
    }
    Ok(())
}
