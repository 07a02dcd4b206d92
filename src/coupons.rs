//! Coupons

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

/// The rule a coupon applies: a percentage off, gated by a minimum purchase and capped at a
/// maximum discount.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CouponTerms {
    discount_rate: Percentage,
    min_purchase: Decimal,
    max_discount: Decimal,
}

impl CouponTerms {
    /// Create coupon terms from a fractional rate (0.4 is 40% off).
    pub fn new(discount_rate: Percentage, min_purchase: Decimal, max_discount: Decimal) -> Self {
        Self {
            discount_rate,
            min_purchase,
            max_discount,
        }
    }

    /// Create coupon terms from a rate in percent points (40 is 40% off).
    pub fn from_percent_points(
        discount_rate: Decimal,
        min_purchase: Decimal,
        max_discount: Decimal,
    ) -> Self {
        Self::new(
            Percentage::from(discount_rate / Decimal::ONE_HUNDRED),
            min_purchase,
            max_discount,
        )
    }

    /// Discount rate as a percentage.
    pub fn discount_rate(&self) -> Percentage {
        self.discount_rate
    }

    /// Discount rate as a plain fraction.
    pub fn rate(&self) -> Decimal {
        // `Percentage` doesn't expose its inner value, multiplying by one unwraps it.
        self.discount_rate * Decimal::ONE
    }

    /// Minimum purchase amount before any discount applies.
    pub fn min_purchase(&self) -> Decimal {
        self.min_purchase
    }

    /// Upper bound on the discount amount.
    pub fn max_discount(&self) -> Decimal {
        self.max_discount
    }

    /// A coupon is active when it has both a positive rate and a positive cap.
    ///
    /// Inactive coupons are excluded from comparisons and strategies.
    pub fn is_active(&self) -> bool {
        self.rate() > Decimal::ZERO && self.max_discount > Decimal::ZERO
    }

    /// The smallest purchase amount at which the cap, rather than the rate, limits the discount.
    ///
    /// Returns `None` when the rate is zero or negative, since no purchase amount reaches the cap.
    pub fn optimal_purchase_amount(&self) -> Option<Decimal> {
        let rate = self.rate();

        if rate <= Decimal::ZERO {
            return None;
        }

        self.max_discount.checked_div(rate)
    }

    /// [`Self::optimal_purchase_amount`], raised to at least the minimum purchase amount.
    pub fn floored_optimal_purchase_amount(&self) -> Option<Decimal> {
        self.optimal_purchase_amount()
            .map(|optimal| optimal.max(self.min_purchase))
    }
}

impl AsRef<CouponTerms> for CouponTerms {
    fn as_ref(&self) -> &CouponTerms {
        self
    }
}

/// Coupon terms with a display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon {
    name: String,
    terms: CouponTerms,
}

impl Coupon {
    /// Create a new named coupon.
    pub fn new(name: impl Into<String>, terms: CouponTerms) -> Self {
        Self {
            name: name.into(),
            terms,
        }
    }

    /// Create a coupon named after its 1-based position, e.g. `Coupon 2`.
    pub fn numbered(position: usize, terms: CouponTerms) -> Self {
        Self::new(format!("Coupon {position}"), terms)
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coupon terms.
    pub fn terms(&self) -> &CouponTerms {
        &self.terms
    }
}

impl AsRef<CouponTerms> for Coupon {
    fn as_ref(&self) -> &CouponTerms {
        &self.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(rate: i64, min: i64, max: i64) -> CouponTerms {
        CouponTerms::from_percent_points(Decimal::from(rate), Decimal::from(min), Decimal::from(max))
    }

    #[test]
    fn from_percent_points_stores_fraction() {
        let terms = terms(40, 10_000, 5_000);

        assert_eq!(terms.rate(), Decimal::new(4, 1));
        assert_eq!(terms.discount_rate(), Percentage::from(Decimal::new(4, 1)));
    }

    #[test]
    fn active_requires_rate_and_cap() {
        assert!(terms(40, 10_000, 5_000).is_active());
        assert!(terms(40, 0, 5_000).is_active());
        assert!(!terms(0, 10_000, 5_000).is_active());
        assert!(!terms(40, 10_000, 0).is_active());
        assert!(!terms(-10, 10_000, 5_000).is_active());
    }

    #[test]
    fn optimal_purchase_amount_divides_cap_by_rate() {
        assert_eq!(
            terms(40, 10_000, 5_000).optimal_purchase_amount(),
            Some(Decimal::from(12_500))
        );
    }

    #[test]
    fn optimal_purchase_amount_is_undefined_for_zero_rate() {
        assert_eq!(terms(0, 10_000, 5_000).optimal_purchase_amount(), None);
        assert_eq!(terms(0, 10_000, 5_000).floored_optimal_purchase_amount(), None);
    }

    #[test]
    fn floored_optimal_uses_min_purchase_when_larger() {
        // 1,000 / 10% = 10,000, below the 20,000 minimum
        let terms = terms(10, 20_000, 1_000);

        assert_eq!(terms.optimal_purchase_amount(), Some(Decimal::from(10_000)));
        assert_eq!(
            terms.floored_optimal_purchase_amount(),
            Some(Decimal::from(20_000))
        );
    }

    #[test]
    fn floored_optimal_matches_unfloored_above_minimum() {
        let terms = terms(20, 10_000, 5_000);

        assert_eq!(
            terms.floored_optimal_purchase_amount(),
            terms.optimal_purchase_amount()
        );
    }

    #[test]
    fn numbered_coupon_uses_position_in_name() {
        let coupon = Coupon::numbered(2, terms(10, 0, 1_000));

        assert_eq!(coupon.name(), "Coupon 2");
        assert_eq!(coupon.as_ref(), coupon.terms());
    }
}
