// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finbot::utils::{fmt_money, normalize_amount, parse_amount_arg};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn comma_and_dot_decimal_agree() {
    assert_eq!(normalize_amount("150,99").unwrap(), dec("150.99"));
    assert_eq!(normalize_amount("150.99").unwrap(), dec("150.99"));
}

#[test]
fn brazilian_thousands_separator() {
    assert_eq!(normalize_amount("1.500,99").unwrap(), dec("1500.99"));
    assert_eq!(normalize_amount("12.345.678,90").unwrap(), dec("12345678.90"));
}

#[test]
fn currency_symbol_and_spaces_stripped() {
    assert_eq!(normalize_amount("R$ 1.234,56").unwrap(), dec("1234.56"));
    assert_eq!(normalize_amount("r$20").unwrap(), dec("20"));
    assert_eq!(normalize_amount(" 35,5 ").unwrap(), dec("35.5"));
}

#[test]
fn plain_integers_pass_through() {
    assert_eq!(normalize_amount("800").unwrap(), dec("800"));
}

#[test]
fn garbage_is_rejected() {
    assert!(normalize_amount("").is_none());
    assert!(normalize_amount("abc").is_none());
    assert!(normalize_amount("12,34,56").is_none());
    assert!(normalize_amount("R$").is_none());
}

#[test]
fn command_args_must_be_positive() {
    assert!(parse_amount_arg("50").is_ok());
    assert!(parse_amount_arg("0").is_err());
    assert!(parse_amount_arg("-10").is_err());
    assert!(parse_amount_arg("dez").is_err());
}

#[test]
fn money_formats_in_brazilian_style() {
    assert_eq!(fmt_money(&dec("1234.56")), "R$ 1.234,56");
    assert_eq!(fmt_money(&dec("0.5")), "R$ 0,50");
    assert_eq!(fmt_money(&dec("1000000")), "R$ 1.000.000,00");
    assert_eq!(fmt_money(&dec("-42.1")), "R$ -42,10");
}
