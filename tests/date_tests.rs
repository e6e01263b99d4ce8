// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finbot::utils::parse_user_date;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn relative_keywords() {
    assert_eq!(parse_user_date("hoje", today()), Some(today()));
    assert_eq!(parse_user_date("ontem", today()), Some(ymd(2025, 3, 9)));
    assert_eq!(parse_user_date("amanhã", today()), Some(ymd(2025, 3, 11)));
    assert_eq!(parse_user_date("tomorrow", today()), Some(ymd(2025, 3, 11)));
    assert_eq!(parse_user_date("yesterday", today()), Some(ymd(2025, 3, 9)));
}

#[test]
fn keywords_are_case_and_accent_insensitive() {
    assert_eq!(parse_user_date("HOJE", today()), Some(today()));
    assert_eq!(parse_user_date("Amanha", today()), Some(ymd(2025, 3, 11)));
    assert_eq!(parse_user_date("  Ontem  ", today()), Some(ymd(2025, 3, 9)));
}

#[test]
fn day_month_defaults_to_current_year() {
    assert_eq!(parse_user_date("25/09", today()), Some(ymd(2025, 9, 25)));
    assert_eq!(parse_user_date("5-1", today()), Some(ymd(2025, 1, 5)));
    assert_eq!(parse_user_date("31.12", today()), Some(ymd(2025, 12, 31)));
}

#[test]
fn explicit_year_forms() {
    assert_eq!(parse_user_date("25/09/2024", today()), Some(ymd(2024, 9, 25)));
    assert_eq!(parse_user_date("25-09-2024", today()), Some(ymd(2024, 9, 25)));
    assert_eq!(parse_user_date("25.09.24", today()), Some(ymd(2024, 9, 25)));
}

#[test]
fn day_comes_before_month() {
    assert_eq!(parse_user_date("03/04", today()), Some(ymd(2025, 4, 3)));
}

#[test]
fn unparsable_input_returns_none_for_reprompt() {
    assert_eq!(parse_user_date("sei lá", today()), None);
    assert_eq!(parse_user_date("", today()), None);
    assert_eq!(parse_user_date("2024/09/25", today()), None);
    assert_eq!(parse_user_date("32/01", today()), None);
    assert_eq!(parse_user_date("10/13", today()), None);
}
