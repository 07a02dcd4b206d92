//! Coupon Calc prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    comparison::{
        ComparisonEntry, compare,
        strategies::{OptimalStrategy, optimal_strategies},
    },
    coupons::{Coupon, CouponTerms},
    discounts::{Advice, DiscountResult, calculate_discount},
    fixtures::{Fixture, FixtureError},
    input::{parse_amount, parse_coupon_terms},
    report::{Report, ReportError},
};
