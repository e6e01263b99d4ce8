// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::telegram::{InlineKeyboard, Reply};

pub const RESET_CONFIRM: &str = "reset_confirm";
pub const RESET_CANCEL: &str = "reset_cancel";

pub fn start() -> Reply {
    Reply::text(
        "🤖 Olá! Bem-vindo ao FinBot!\n\n\
         Eu sou seu assistente financeiro pessoal. Posso ajudar você a:\n\
         💰 Registrar receitas e despesas\n\
         📊 Acompanhar seu saldo e orçamento\n\
         📄 Gerar relatórios\n\
         🎯 Definir e acompanhar metas\n\
         🔔 Configurar lembretes\n\
         🧘 Aplicar o Método Traz Paz\n\n\
         Você pode usar comandos ou simplesmente me dizer em linguagem natural! \
         Por exemplo: 'Gastei 20 reais com Redbull'\n\n\
         Digite /ajuda para ver todos os comandos disponíveis.",
    )
}

pub fn help() -> Reply {
    Reply::text(
        "📌 COMANDOS DISPONÍVEIS\n\
         ━━━━━━━━━━━━━━━━━━━━━━\n\n\
         💵 RECEITAS\n\
         /addreceita <valor> <descrição>\n\
         /addreceita_parceiro <valor> <descrição>\n\
         /vale <valor>\n\n\
         🛒 DESPESAS\n\
         /addgasto <valor> <descrição>\n\
         /fixo <valor> <descrição>\n\n\
         🎯 METAS\n\
         /metas · /addmeta <valor> <nome> · /progresso_meta <id> <valor>\n\n\
         📊 RELATÓRIOS\n\
         /relatorio · /relatorio_mes <mês> <ano>\n\
         /saldo · /saldo_mes <mês> <ano>\n\
         /comparar_meses · /historico_meses\n\n\
         🔔 LEMBRETES\n\
         /lembretes · /addlembrete <dia> <descrição>\n\n\
         🏷️ CATEGORIAS\n\
         /categorias · /addcategoria <nome> · /removecategoria <nome>\n\n\
         💰 ORÇAMENTO\n\
         /orcamento <valor> · /orcamento_categoria <categoria> <valor>\n\n\
         🔄 RECORRENTES\n\
         /recorrentes · /addrecorrente <valor> <dia> <descrição>\n\n\
         📈 CONSULTAS\n\
         /top3 · /fatura · /mtp · /dashboard\n\n\
         🤖 INTELIGÊNCIA ARTIFICIAL\n\
         /ia <pergunta>\n\n\
         💬 LINGUAGEM NATURAL\n\
         Você pode simplesmente me dizer:\n\
         • 'Gastei 20 no Redbull'\n\
         • 'Recebi 3000 de salário'\n\n\
         🗑️ GERENCIAMENTO\n\
         /reset - Apagar todos os dados",
    )
}

pub fn reset_prompt() -> Reply {
    Reply::with_keyboard(
        "⚠️ *ATENÇÃO!*\n\n\
         Você está prestes a apagar TODOS os dados:\n\
         receitas, gastos, fixos, vales, metas, lembretes,\n\
         categorias, orçamentos e recorrentes.\n\n\
         *Esta ação NÃO pode ser desfeita!*\n\nTem certeza?",
        InlineKeyboard::rows(vec![
            ("✅ SIM, apagar tudo".into(), RESET_CONFIRM.into()),
            ("❌ NÃO, cancelar".into(), RESET_CANCEL.into()),
        ]),
    )
}

/// Wipes every ledger table. Only reachable through the confirm button.
pub fn reset_confirmed(conn: &Connection) -> Result<String> {
    conn.execute_batch(
        r#"
        DELETE FROM incomes;
        DELETE FROM partner_incomes;
        DELETE FROM expenses;
        DELETE FROM fixed_expenses;
        DELETE FROM voucher_credits;
        DELETE FROM card_statement;
        DELETE FROM goals;
        DELETE FROM reminders;
        DELETE FROM categories;
        DELETE FROM budgets;
        DELETE FROM recurring;
        "#,
    )?;
    Ok("✅ *Todos os dados foram apagados!*\n\nVocê pode começar do zero agora.".to_string())
}

pub fn reset_cancelled() -> String {
    "❌ Reset cancelado. Seus dados estão seguros!".to_string()
}
