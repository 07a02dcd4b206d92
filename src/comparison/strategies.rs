//! Optimal strategies
//!
//! For every active coupon, the cheapest way to max it out: buy exactly its optimal purchase
//! amount and take the full capped discount. Strategies are ranked by what is left to pay.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    comparison::{
        ActiveCoupon, active_coupons,
        ranking::{RankOrder, ranks_by},
    },
    coupons::CouponTerms,
};

/// The best-case use of a single coupon.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OptimalStrategy {
    coupon_idx: usize,
    optimal_purchase_amount: Decimal,
    max_discount: Decimal,
    final_amount: Decimal,
    rank: usize,
}

impl OptimalStrategy {
    /// Index of the coupon in the slice passed to [`optimal_strategies`].
    pub fn coupon_idx(&self) -> usize {
        self.coupon_idx
    }

    /// Purchase amount to aim for, never below the coupon's minimum purchase.
    pub fn optimal_purchase_amount(&self) -> Decimal {
        self.optimal_purchase_amount
    }

    /// Discount received at the optimal purchase amount.
    pub fn max_discount(&self) -> Decimal {
        self.max_discount
    }

    /// Amount paid when buying exactly the optimal purchase amount.
    pub fn final_amount(&self) -> Decimal {
        self.final_amount
    }

    /// 1-based rank, cheapest final amount first.
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// Amount paid when a coupon is maxed out at its floored optimal purchase amount.
pub(crate) fn strategy_final_amount(active: &ActiveCoupon) -> Decimal {
    active
        .optimal_purchase_amount
        .saturating_sub(active.terms.max_discount())
}

/// Ranks of `active` coupons by [`strategy_final_amount`], cheapest first.
pub(crate) fn strategy_ranks(active: &[ActiveCoupon]) -> SmallVec<[usize; 4]> {
    ranks_by(active, RankOrder::Ascending, strategy_final_amount)
}

/// Builds the optimal strategy for every active coupon, in input order.
///
/// Inactive coupons get no strategy.
pub fn optimal_strategies<C: AsRef<CouponTerms>>(coupons: &[C]) -> SmallVec<[OptimalStrategy; 4]> {
    let active = active_coupons(coupons);
    let ranks = strategy_ranks(&active);

    active
        .iter()
        .zip(ranks)
        .map(|(coupon, rank)| OptimalStrategy {
            coupon_idx: coupon.coupon_idx,
            optimal_purchase_amount: coupon.optimal_purchase_amount,
            max_discount: coupon.terms.max_discount(),
            final_amount: strategy_final_amount(coupon),
            rank,
        })
        .collect()
}
