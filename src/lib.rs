//! Coupon Calc
//!
//! Coupon Calc works out what a percentage coupon with a minimum purchase and a discount cap is
//! worth at a given purchase amount, and ranks several coupons against each other.
//!
//! The core is two pure functions: [`discounts::calculate_discount`] for a single coupon and
//! [`comparison::compare`] for many. Everything else in the crate (input sanitisation, YAML
//! fixtures and table reports) exists to feed them and present their results.

pub mod comparison;
pub mod coupons;
pub mod discounts;
pub mod fixtures;
pub mod input;
pub mod prelude;
pub mod report;
