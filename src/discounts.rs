//! Discounts
//!
//! The single-coupon discount engine. Given one set of [`CouponTerms`] and a purchase amount it
//! works out how much the coupon takes off, what is left to pay and whether the purchase
//! already captures the largest discount the coupon can give.

use rust_decimal::Decimal;
use tracing::trace;

use crate::coupons::CouponTerms;

/// Outcome of applying one coupon to one purchase amount.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DiscountResult {
    discount_amount: Decimal,
    final_amount: Decimal,
    is_optimal: bool,
}

impl DiscountResult {
    /// Create a new discount result.
    pub fn new(discount_amount: Decimal, final_amount: Decimal, is_optimal: bool) -> Self {
        Self {
            discount_amount,
            final_amount,
            is_optimal,
        }
    }

    /// Result for a purchase the coupon doesn't apply to.
    fn undiscounted(purchase_amount: Decimal) -> Self {
        Self::new(Decimal::ZERO, purchase_amount, false)
    }

    /// Amount taken off the purchase.
    pub fn discount_amount(&self) -> Decimal {
        self.discount_amount
    }

    /// Amount left to pay.
    pub fn final_amount(&self) -> Decimal {
        self.final_amount
    }

    /// Whether the purchase amount already captures the maximum discount.
    pub fn is_optimal(&self) -> bool {
        self.is_optimal
    }

    /// Classify this result for display.
    ///
    /// The spend-more target is the unfloored optimal purchase amount of `terms`.
    pub fn advice(&self, terms: &CouponTerms) -> Advice {
        Advice::classify(self, terms.min_purchase(), terms.optimal_purchase_amount())
    }
}

/// What a shopper should take away from a discount result.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advice {
    /// The purchase already gets the largest discount the coupon allows.
    Optimal,

    /// A discount applies, but spending at least `target` would capture the cap.
    SpendMore {
        /// Purchase amount at which the cap is reached.
        target: Decimal,
    },

    /// No discount applies; the minimum purchase is shown as the reason.
    NotEligible {
        /// Minimum purchase amount of the coupon.
        min_purchase: Decimal,
    },
}

impl Advice {
    pub(crate) fn classify(
        result: &DiscountResult,
        min_purchase: Decimal,
        target: Option<Decimal>,
    ) -> Self {
        if result.discount_amount <= Decimal::ZERO {
            return Advice::NotEligible { min_purchase };
        }

        match target {
            Some(target) if !result.is_optimal => Advice::SpendMore { target },
            _ => Advice::Optimal,
        }
    }
}

/// Calculates the discount a coupon gives on a purchase amount.
///
/// Below the minimum purchase no discount applies at all. Otherwise the discount is the rate
/// applied to the purchase amount, capped at the coupon's maximum discount.
///
/// A coupon with a zero rate has no optimal purchase amount, so its result is never optimal.
pub fn calculate_discount(terms: &CouponTerms, purchase_amount: Decimal) -> DiscountResult {
    if purchase_amount < terms.min_purchase() {
        trace!(%purchase_amount, min_purchase = %terms.min_purchase(), "below minimum purchase");

        return DiscountResult::undiscounted(purchase_amount);
    }

    let raw_discount = purchase_amount.saturating_mul(terms.rate());
    let discount_amount = raw_discount.min(terms.max_discount());
    let final_amount = purchase_amount.saturating_sub(discount_amount);

    let is_optimal = terms
        .optimal_purchase_amount()
        .is_some_and(|optimal| purchase_amount >= optimal);

    trace!(%purchase_amount, %discount_amount, %final_amount, is_optimal, "calculated discount");

    DiscountResult::new(discount_amount, final_amount, is_optimal)
}
