// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{Duration, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

const UA: &str = concat!(
    "finbot/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/finbot-br/finbot)"
);

pub fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// Folds the accented characters that show up in Portuguese input so
/// keyword and category matching is accent-insensitive.
pub fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            _ => c,
        })
        .collect()
}

/// Parses a monetary amount the way Brazilian users type it: "1.500,99",
/// "150,99", "150.99", with or without an "R$" prefix. When both separators
/// are present "." groups thousands and "," marks decimals.
pub fn normalize_amount(s: &str) -> Option<Decimal> {
    let cleaned = s
        .trim()
        .trim_start_matches("R$")
        .trim_start_matches("r$")
        .replace(['\u{a0}', ' '], "");
    if cleaned.is_empty() {
        return None;
    }
    let normalized = if cleaned.contains('.') && cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.contains(',') {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };
    normalized.parse::<Decimal>().ok()
}

/// Command-argument variant of [`normalize_amount`]: positive amounts only,
/// errors carry the offending text for the usage hint.
pub fn parse_amount_arg(s: &str) -> Result<Decimal> {
    let amount =
        normalize_amount(s).with_context(|| format!("Invalid amount '{}'", s))?;
    if amount <= Decimal::ZERO {
        return Err(anyhow!("Amount '{}' must be positive", s));
    }
    Ok(amount)
}

pub fn parse_day_of_month(s: &str) -> Result<u32> {
    let day: u32 = s
        .parse()
        .with_context(|| format!("Invalid day '{}'", s))?;
    if !(1..=31).contains(&day) {
        return Err(anyhow!("Day {} out of range 1-31", day));
    }
    Ok(day)
}

static EXPLICIT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[/\-.](\d{1,2})(?:[/\-.](\d{2,4}))?$").unwrap());

/// Resolves a user-typed date: relative keywords (hoje/ontem/amanhã and the
/// English equivalents, accent-insensitive) or explicit day-month[-year]
/// with "/", "-" or "." separators. A missing year means the current one.
/// Returns None for anything else so the caller can re-prompt instead of
/// silently misdating the transaction.
pub fn parse_user_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = fold_accents(input.trim()).to_lowercase();
    match text.as_str() {
        "hoje" | "today" => return Some(today),
        "ontem" | "yesterday" => return Some(today - Duration::days(1)),
        "amanha" | "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }
    let caps = EXPLICIT_DATE.captures(&text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = match caps.get(3) {
        Some(y) => {
            let y: i32 = y.as_str().parse().ok()?;
            if y < 100 { y + 2000 } else { y }
        }
        None => today.year(),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

use chrono::Datelike;

/// Formats a Decimal in Brazilian currency style: "R$ 1.234,56".
pub fn fmt_money(d: &Decimal) -> String {
    let rounded = d.round_dp(2);
    let negative = rounded.is_sign_negative();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }
    let sign = if negative { "-" } else { "" };
    format!("R$ {}{},{}", sign, grouped, frac_part)
}

pub const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

pub fn month_name_pt(month: u32) -> &'static str {
    MONTHS_PT
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("?")
}

/// "YYYY-MM" key used by the substr() month filters.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

pub fn parse_month_year(month_s: &str, year_s: &str) -> Result<(u32, i32)> {
    let month: u32 = month_s
        .parse()
        .with_context(|| format!("Invalid month '{}'", month_s))?;
    let year: i32 = year_s
        .parse()
        .with_context(|| format!("Invalid year '{}'", year_s))?;
    if !(1..=12).contains(&month) {
        return Err(anyhow!("Month {} out of range 1-12", month));
    }
    if !(2000..=2100).contains(&year) {
        return Err(anyhow!("Year {} out of range 2000-2100", year));
    }
    Ok((month, year))
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}
