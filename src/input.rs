//! Input
//!
//! Sanitises raw text, as typed into a form or passed on the command line, into the
//! non-negative numbers the discount engine expects. Nothing here fails: text that doesn't
//! start with a number, and negative numbers, become zero.

use rust_decimal::Decimal;

use crate::coupons::CouponTerms;

/// Parse a raw amount, coercing anything unusable to zero.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so `"12500원"` is
/// `12500`. Scientific notation such as `"1.25e4"` is accepted. Positive numbers too large for
/// a [`Decimal`] saturate to [`Decimal::MAX`].
pub fn parse_amount(raw: &str) -> Decimal {
    let Some(number) = numeric_prefix(raw.trim_start()) else {
        return Decimal::ZERO;
    };

    let parsed = if number.exponent.is_empty() {
        number.mantissa.parse::<Decimal>().ok()
    } else {
        Decimal::from_scientific(&format!("{}e{}", number.mantissa, number.exponent)).ok()
    };

    match parsed {
        Some(value) if value > Decimal::ZERO => value.normalize(),
        Some(_) => Decimal::ZERO,
        None if number.overflows() => Decimal::MAX,
        None => Decimal::ZERO,
    }
}

/// Build coupon terms from raw rate (percent points), minimum purchase and maximum discount.
pub fn parse_coupon_terms(discount_rate: &str, min_purchase: &str, max_discount: &str) -> CouponTerms {
    CouponTerms::from_percent_points(
        parse_amount(discount_rate),
        parse_amount(min_purchase),
        parse_amount(max_discount),
    )
}

/// The numeric prefix of a string, split into mantissa and exponent.
#[derive(Debug, Default, PartialEq)]
struct NumericPrefix {
    mantissa: String,
    exponent: String,
}

/// Integer digits `Decimal` can hold.
const MAX_INTEGER_DIGITS: i64 = 28;

impl NumericPrefix {
    /// Whether a positive prefix is too large for `Decimal`, judged by its decimal magnitude.
    fn overflows(&self) -> bool {
        if self.mantissa.starts_with('-') {
            return false;
        }

        let (integer, fraction) = self
            .mantissa
            .split_once('.')
            .unwrap_or((self.mantissa.as_str(), ""));

        let integer = integer.trim_start_matches('0');

        // Position of the leading significant digit relative to the decimal point
        let magnitude = if integer.is_empty() {
            let leading_zeros = fraction.len() - fraction.trim_start_matches('0').len();

            -i64::try_from(leading_zeros).unwrap_or(i64::MAX)
        } else {
            i64::try_from(integer.len()).unwrap_or(i64::MAX)
        };

        let exponent = if self.exponent.is_empty() {
            0
        } else {
            self.exponent.parse::<i64>().unwrap_or_else(|_err| {
                if self.exponent.starts_with('-') {
                    i64::MIN
                } else {
                    i64::MAX
                }
            })
        };

        magnitude.saturating_add(exponent) > MAX_INTEGER_DIGITS
    }
}

fn numeric_prefix(s: &str) -> Option<NumericPrefix> {
    let mut chars = s.chars().peekable();
    let mut prefix = NumericPrefix::default();

    if let Some(sign) = chars.next_if(|ch| matches!(ch, '+' | '-')) {
        if sign == '-' {
            prefix.mantissa.push(sign);
        }
    }

    let mut integer = String::new();
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        integer.push(digit);
    }

    let mut fraction = String::new();
    if chars.next_if_eq(&'.').is_some() {
        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
            fraction.push(digit);
        }
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    prefix
        .mantissa
        .push_str(if integer.is_empty() { "0" } else { &integer });

    if !fraction.is_empty() {
        prefix.mantissa.push('.');
        prefix.mantissa.push_str(&fraction);
    }

    if chars.next_if(|ch| matches!(ch, 'e' | 'E')).is_some() {
        let mut exponent = String::new();

        if let Some(sign) = chars.next_if(|ch| matches!(ch, '+' | '-')) {
            exponent.push(sign);
        }

        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
            exponent.push(digit);
        }

        if exponent.chars().any(|ch| ch.is_ascii_digit()) {
            prefix.exponent = exponent;
        }
    }

    Some(prefix)
}
