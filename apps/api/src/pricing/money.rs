//! Money formatting and parsing.
//!
//! Amounts render as `$X,XXX.XX`: two decimals, comma grouping,
//! round-half-to-even. Negative amounts get a leading minus sign.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

use crate::errors::AppError;

/// Formats an amount as a currency string, e.g. `1234.5` → `$1,234.50`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let fixed = format!("{rounded:.2}");

    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{frac_part}")
}

/// Parses a user-typed amount into a `Decimal`.
///
/// Accepts an optional leading `$` and comma grouping. Rejects anything
/// non-numeric with a `Validation` error instead of silently coercing to
/// zero, so a typo in a compensation override surfaces to the user.
pub fn parse_amount(input: &str) -> Result<Decimal, AppError> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    cleaned
        .parse::<Decimal>()
        .map_err(|_| AppError::Validation(format!("'{input}' is not a valid amount")))
}

/// Serde adapter for money fields: accepts a JSON number or a user-typed
/// string like `"$1,500.25"`. Bad strings are rejected at the boundary via
/// [`parse_amount`], never coerced to zero.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(Decimal),
        Text(String),
    }

    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(amount) => Ok(amount),
        RawAmount::Text(text) => {
            parse_amount(&text).map_err(|e| serde::de::Error::custom(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(dec!(1234567.89)), "$1,234,567.89");
        assert_eq!(format_money(dec!(1000)), "$1,000.00");
    }

    #[test]
    fn test_format_money_small_amounts() {
        assert_eq!(format_money(dec!(0)), "$0.00");
        assert_eq!(format_money(dec!(7.5)), "$7.50");
        assert_eq!(format_money(dec!(999.99)), "$999.99");
    }

    #[test]
    fn test_format_money_rounds_half_to_even() {
        assert_eq!(format_money(dec!(2.005)), "$2.00");
        assert_eq!(format_money(dec!(2.015)), "$2.02");
        assert_eq!(format_money(dec!(2.025)), "$2.02");
    }

    #[test]
    fn test_format_money_negative_leading_minus() {
        assert_eq!(format_money(dec!(-1234.5)), "-$1,234.50");
    }

    #[test]
    fn test_parse_amount_plain_and_decorated() {
        assert_eq!(parse_amount("1500").unwrap(), dec!(1500));
        assert_eq!(parse_amount("$1,500.25").unwrap(), dec!(1500.25));
        assert_eq!(parse_amount("  42.10 ").unwrap(), dec!(42.10));
    }

    #[test]
    fn test_parse_amount_rejects_non_numeric() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("12.3.4").is_err());
    }
}
