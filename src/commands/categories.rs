// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, params};

use crate::models::Category;
use crate::telegram::Reply;

pub fn list(conn: &Connection) -> Result<Reply> {
    let mut msg = String::from("🏷️ CATEGORIAS\n━━━━━━━━━━━━━━━━━━━━━━\n\n*Padrões:*\n");
    for cat in Category::ALL {
        msg.push_str(&format!("• {}\n", cat.label()));
    }

    let mut stmt = conn.prepare("SELECT name FROM categories ORDER BY name")?;
    let mut rows = stmt.query([])?;
    let mut any = false;
    let mut custom = String::new();
    while let Some(r) = rows.next()? {
        any = true;
        let name: String = r.get(0)?;
        custom.push_str(&format!("• {}\n", name));
    }
    if any {
        msg.push_str("\n*Suas categorias:*\n");
        msg.push_str(&custom);
    } else {
        msg.push_str("\n*Você ainda não criou categorias personalizadas.*\n");
    }
    msg.push_str("\nUse /addcategoria <nome> para criar nova categoria");
    Ok(Reply::text(msg))
}

pub fn add(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let name = args.join(" ");
    if name.is_empty() {
        return Ok(Reply::text(
            "❗ Uso correto: /addcategoria <nome>\nEx: /addcategoria Assinaturas",
        ));
    }
    match conn.execute("INSERT INTO categories(name) VALUES (?1)", params![name]) {
        Ok(_) => Ok(Reply::text(format!(
            "✅ Categoria *{}* criada com sucesso!",
            name
        ))),
        Err(e) if is_unique_violation(&e) => Ok(Reply::text(format!(
            "❗ A categoria *{}* já existe!",
            name
        ))),
        Err(e) => Err(e.into()),
    }
}

pub fn remove(conn: &Connection, args: &[&str]) -> Result<Reply> {
    let name = args.join(" ");
    if name.is_empty() {
        return Ok(Reply::text(
            "❗ Uso correto: /removecategoria <nome>\nEx: /removecategoria Assinaturas",
        ));
    }
    let removed = conn.execute("DELETE FROM categories WHERE name=?1", params![name])?;
    if removed > 0 {
        Ok(Reply::text(format!("✅ Categoria *{}* removida!", name)))
    } else {
        Ok(Reply::text(format!(
            "❗ Categoria *{}* não encontrada!",
            name
        )))
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ErrorCode::ConstraintViolation,
                ..
            },
            _,
        )
    )
}
