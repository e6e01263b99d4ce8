// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::fold_accents;

/// Payment category of an expense. Stored in the DB as the accent-folded
/// token so lookups never depend on the client's input encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Debit,
    Credit,
    FoodVoucher,
    Pix,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Debit,
        Category::Credit,
        Category::FoodVoucher,
        Category::Pix,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Category::Debit => "debito",
            Category::Credit => "credito",
            Category::FoodVoucher => "alimentacao",
            Category::Pix => "pix",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Debit => "Débito",
            Category::Credit => "Crédito",
            Category::FoodVoucher => "Vale-Alimentação",
            Category::Pix => "Pix",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Debit => "💳",
            Category::Credit => "💎",
            Category::FoodVoucher => "🍽️",
            Category::Pix => "📱",
        }
    }

    /// Accepts the stored token, the display label, or any accented variant.
    pub fn from_token(s: &str) -> Option<Category> {
        match fold_accents(s.trim()).to_lowercase().as_str() {
            "debito" => Some(Category::Debit),
            "credito" => Some(Category::Credit),
            "alimentacao" | "vale-alimentacao" => Some(Category::FoodVoucher),
            "pix" => Some(Category::Pix),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    Income,
    Expense,
}

/// A transaction the user has started but not yet committed. Expense drafts
/// pick up category and date across the dialogue; income drafts commit
/// immediately.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub kind: DraftKind,
    pub amount: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub description: String,
    pub day_of_month: u32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringPayment {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub day_of_month: u32,
    pub active: bool,
}
