// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_VOUCHER_KEYWORDS: &[&str] = &["vale", "vale-alimentacao", "vr", "va"];

/// Process-wide configuration, built once in main and passed into
/// constructors. Lives from process start to shutdown.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub gemini_api_key: Option<String>,
    pub db_path: Option<PathBuf>,
    /// Income descriptions matching any of these (accent-folded, lowercase)
    /// are credited to the food-voucher ledger instead of generic income.
    pub voucher_keywords: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let telegram_token = env::var("TELEGRAM_BOT_TOKEN")
            .context("TELEGRAM_BOT_TOKEN environment variable is not set")?;
        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        let db_path = env::var("FINBOT_DB").ok().map(PathBuf::from);
        let voucher_keywords = match env::var("FINBOT_VOUCHER_KEYWORDS") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .split(',')
                .map(|k| crate::utils::fold_accents(k.trim()).to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            _ => DEFAULT_VOUCHER_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        };
        Ok(Self {
            telegram_token,
            gemini_api_key,
            db_path,
            voucher_keywords,
        })
    }

    /// True when the description looks like a food-voucher deposit.
    pub fn is_voucher_income(&self, description: &str) -> bool {
        let folded = crate::utils::fold_accents(description).to_lowercase();
        self.voucher_keywords.iter().any(|k| {
            folded == *k || folded.split_whitespace().any(|w| w == k)
        })
    }
}
