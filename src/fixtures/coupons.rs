//! Coupon Fixtures

use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};
use serde::Deserialize;

use crate::{
    coupons::{Coupon, CouponTerms},
    fixtures::FixtureError,
};

/// Wrapper for a coupon set in YAML
#[derive(Debug, Deserialize)]
pub struct CouponsFixture {
    /// ISO currency code for every amount in the set
    pub currency: Option<String>,

    /// Coupons in display order
    pub coupons: Vec<CouponFixture>,
}

/// A scalar that YAML may give as a string or an integer
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FixtureValue {
    /// Integer literal, e.g. `10000`
    Integer(i64),

    /// Quoted text, e.g. `"30%"` or `"12.5"`
    Text(String),
}

impl FixtureValue {
    fn as_text(&self) -> String {
        match self {
            FixtureValue::Integer(value) => value.to_string(),
            FixtureValue::Text(value) => value.clone(),
        }
    }
}

/// Coupon fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Display name, defaults to `Coupon N`
    pub name: Option<String>,

    /// `"30%"` or a bare integer `30` in percent points, or `"0.3"` as a fraction
    pub discount_rate: FixtureValue,

    /// Minimum purchase amount
    pub min_purchase: FixtureValue,

    /// Maximum discount amount
    pub max_discount: FixtureValue,
}

impl CouponFixture {
    /// Convert to a [`Coupon`], naming it after `position` when the fixture has no name.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate or either amount is malformed or negative.
    pub fn try_into_coupon(self, position: usize) -> Result<Coupon, FixtureError> {
        let discount_rate = match self.discount_rate {
            // `discount_rate: 30` is 30%, not 30 as a fraction
            FixtureValue::Integer(points) if points >= 0 => Decimal::from(points),
            FixtureValue::Integer(points) => {
                return Err(FixtureError::InvalidPercentage(points.to_string()));
            }
            FixtureValue::Text(text) => parse_rate(&text)?,
        };

        let terms = CouponTerms::from_percent_points(
            discount_rate,
            parse_amount(&self.min_purchase.as_text())?,
            parse_amount(&self.max_discount.as_text())?,
        );

        Ok(match self.name {
            Some(name) => Coupon::new(name, terms),
            None => Coupon::numbered(position, terms),
        })
    }
}

/// Parse a non-negative decimal amount (e.g., "10000" or "12.50")
///
/// # Errors
///
/// Returns an error if the string is not a decimal number or is negative.
pub fn parse_amount(s: &str) -> Result<Decimal, FixtureError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidAmount(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidAmount(s.to_string()));
    }

    Ok(amount)
}

/// Parse a rate string into percent points (e.g., "30%" -> 30, "0.3" -> 30)
///
/// # Errors
///
/// Returns an error if the string is not a number or is negative.
pub fn parse_rate(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();

    let points = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
    } else {
        // Fractions are converted to percent points (0.3 -> 30)
        trimmed
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))?
    };

    if points.is_sign_negative() {
        return Err(FixtureError::InvalidPercentage(s.to_string()));
    }

    Ok(points)
}

/// Look up a supported ISO currency code
///
/// # Errors
///
/// Returns an error for codes outside the supported set.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "KRW" => Ok(iso::KRW),
        "JPY" => Ok(iso::JPY),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "GBP" => Ok(iso::GBP),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_rate_accepts_percent_points() -> TestResult {
        assert_eq!(parse_rate("30%")?, Decimal::from(30));
        assert_eq!(parse_rate(" 12.5 % ")?, Decimal::new(125, 1));

        Ok(())
    }

    #[test]
    fn parse_rate_converts_fractions() -> TestResult {
        assert_eq!(parse_rate("0.3")?, Decimal::from(30));

        Ok(())
    }

    #[test]
    fn parse_rate_rejects_garbage_and_negatives() {
        assert!(matches!(parse_rate("thirty"), Err(FixtureError::InvalidPercentage(_))));
        assert!(matches!(parse_rate("-5%"), Err(FixtureError::InvalidPercentage(_))));
    }

    #[test]
    fn parse_amount_rejects_garbage_and_negatives() {
        assert!(matches!(parse_amount("10k"), Err(FixtureError::InvalidAmount(_))));
        assert!(matches!(parse_amount("-1"), Err(FixtureError::InvalidAmount(_))));
    }

    #[test]
    fn parse_currency_accepts_supported_codes() -> TestResult {
        assert_eq!(parse_currency("KRW")?, iso::KRW);
        assert_eq!(parse_currency("usd")?, iso::USD);

        Ok(())
    }

    #[test]
    fn parse_currency_rejects_unknown_code() {
        let result = parse_currency("ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn coupon_fixture_accepts_integers_and_strings() -> TestResult {
        let yaml = r#"
name: Weekend
discount_rate: "30%"
min_purchase: 10000
max_discount: "3000"
"#;
        let fixture: CouponFixture = serde_norway::from_str(yaml)?;
        let coupon = fixture.try_into_coupon(1)?;

        assert_eq!(coupon.name(), "Weekend");
        assert_eq!(coupon.terms().rate(), Decimal::new(3, 1));
        assert_eq!(coupon.terms().min_purchase(), Decimal::from(10_000));
        assert_eq!(coupon.terms().max_discount(), Decimal::from(3_000));

        Ok(())
    }

    #[test]
    fn integer_rate_is_read_as_percent_points() -> TestResult {
        let yaml = "discount_rate: 30\nmin_purchase: 10000\nmax_discount: 3000\n";
        let fixture: CouponFixture = serde_norway::from_str(yaml)?;
        let coupon = fixture.try_into_coupon(1)?;

        assert_eq!(coupon.terms().rate(), Decimal::new(3, 1));
        assert_eq!(
            coupon.terms().optimal_purchase_amount(),
            Some(Decimal::from(10_000))
        );

        Ok(())
    }

    #[test]
    fn negative_integer_rate_is_rejected() -> TestResult {
        let yaml = "discount_rate: -5\nmin_purchase: 0\nmax_discount: 1000\n";
        let fixture: CouponFixture = serde_norway::from_str(yaml)?;

        assert!(matches!(
            fixture.try_into_coupon(1),
            Err(FixtureError::InvalidPercentage(_))
        ));

        Ok(())
    }

    #[test]
    fn unnamed_coupon_fixture_gets_numbered_name() -> TestResult {
        let yaml = r#"
discount_rate: "10%"
min_purchase: "0"
max_discount: "1000"
"#;
        let fixture: CouponFixture = serde_norway::from_str(yaml)?;
        let coupon = fixture.try_into_coupon(3)?;

        assert_eq!(coupon.name(), "Coupon 3");

        Ok(())
    }
}
