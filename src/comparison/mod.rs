//! Comparison
//!
//! Applies the discount engine to several coupons at one purchase amount and ranks them.
//!
//! Two independent rankings are produced for the same set of coupons:
//!
//! - the discount rank orders coupons by the discount they give at the entered amount,
//!   largest first;
//! - the strategy rank orders coupons by what would be paid when buying exactly each coupon's
//!   optimal purchase amount, cheapest first.
//!
//! Inactive coupons (zero rate or zero cap) never appear in either ranking.
//!
//! The optimal purchase amount used here is floored at the coupon's minimum purchase, unlike
//! [`CouponTerms::optimal_purchase_amount`] which the single-coupon engine uses. For active
//! coupons both produce the same `is_optimal`, but the reported amounts differ whenever the
//! minimum purchase is above the point where the cap is reached.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    comparison::{
        ranking::{RankOrder, ranks_by},
        strategies::strategy_ranks,
    },
    coupons::CouponTerms,
    discounts::{Advice, DiscountResult, calculate_discount},
};

mod ranking;
pub mod strategies;

/// An active coupon with its floored optimal purchase amount.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ActiveCoupon {
    pub(crate) coupon_idx: usize,
    pub(crate) terms: CouponTerms,
    pub(crate) optimal_purchase_amount: Decimal,
}

/// Filter `coupons` down to the active ones, remembering their input positions.
pub(crate) fn active_coupons<C: AsRef<CouponTerms>>(coupons: &[C]) -> SmallVec<[ActiveCoupon; 4]> {
    coupons
        .iter()
        .map(<C as AsRef<CouponTerms>>::as_ref)
        .enumerate()
        .filter_map(|(coupon_idx, terms)| {
            if !terms.is_active() {
                debug!(coupon_idx, "skipping inactive coupon");

                return None;
            }

            terms
                .floored_optimal_purchase_amount()
                .map(|optimal_purchase_amount| ActiveCoupon {
                    coupon_idx,
                    terms: *terms,
                    optimal_purchase_amount,
                })
        })
        .collect()
}

/// One coupon's outcome within a comparison.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ComparisonEntry {
    coupon_idx: usize,
    result: DiscountResult,
    min_purchase: Decimal,
    optimal_purchase_amount: Decimal,
    rank: usize,
    strategy_rank: usize,
}

impl ComparisonEntry {
    /// Index of the coupon in the slice passed to [`compare`].
    pub fn coupon_idx(&self) -> usize {
        self.coupon_idx
    }

    /// Discount engine result for this coupon.
    pub fn result(&self) -> &DiscountResult {
        &self.result
    }

    /// Amount taken off the purchase.
    pub fn discount_amount(&self) -> Decimal {
        self.result.discount_amount()
    }

    /// Amount left to pay.
    pub fn final_amount(&self) -> Decimal {
        self.result.final_amount()
    }

    /// Whether the purchase already captures this coupon's maximum discount.
    pub fn is_optimal(&self) -> bool {
        self.result.is_optimal()
    }

    /// Optimal purchase amount, floored at the coupon's minimum purchase.
    pub fn optimal_purchase_amount(&self) -> Decimal {
        self.optimal_purchase_amount
    }

    /// 1-based rank by discount amount, largest first.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// 1-based rank by final amount at the optimal purchase amount, cheapest first.
    pub fn strategy_rank(&self) -> usize {
        self.strategy_rank
    }

    /// Classify this entry for display, targeting the floored optimal purchase amount.
    pub fn advice(&self) -> Advice {
        Advice::classify(
            &self.result,
            self.min_purchase,
            Some(self.optimal_purchase_amount),
        )
    }
}

/// Compares coupons at a single purchase amount.
///
/// Entries come back in input order, one per active coupon, each annotated with its discount
/// rank and strategy rank. An input without active coupons gives an empty comparison.
pub fn compare<C: AsRef<CouponTerms>>(
    coupons: &[C],
    purchase_amount: Decimal,
) -> SmallVec<[ComparisonEntry; 4]> {
    let active = active_coupons(coupons);

    let results: SmallVec<[DiscountResult; 4]> = active
        .iter()
        .map(|coupon| calculate_discount(&coupon.terms, purchase_amount))
        .collect();

    let ranks = ranks_by(&results, RankOrder::Descending, DiscountResult::discount_amount);
    let strategy_ranks = strategy_ranks(&active);

    debug!(
        %purchase_amount,
        coupons = coupons.len(),
        active = active.len(),
        "compared coupons"
    );

    active
        .iter()
        .zip(results)
        .zip(ranks.into_iter().zip(strategy_ranks))
        .map(|((coupon, result), (rank, strategy_rank))| ComparisonEntry {
            coupon_idx: coupon.coupon_idx,
            result,
            min_purchase: coupon.terms.min_purchase(),
            optimal_purchase_amount: coupon.optimal_purchase_amount,
            rank,
            strategy_rank,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::coupons::Coupon;

    use super::*;

    fn terms(rate: i64, min: i64, max: i64) -> CouponTerms {
        CouponTerms::from_percent_points(Decimal::from(rate), Decimal::from(min), Decimal::from(max))
    }

    fn three_coupons() -> [CouponTerms; 3] {
        [
            terms(30, 10_000, 3_000),
            terms(20, 10_000, 5_000),
            terms(10, 5_000, 1_000),
        ]
    }

    #[test]
    fn ranks_by_discount_without_reordering() {
        let entries = compare(&three_coupons(), Decimal::from(30_000));

        let discounts: Vec<Decimal> = entries
            .iter()
            .map(ComparisonEntry::discount_amount)
            .collect();
        let ranks: Vec<usize> = entries.iter().map(ComparisonEntry::rank).collect();
        let indices: Vec<usize> = entries.iter().map(ComparisonEntry::coupon_idx).collect();

        assert_eq!(
            discounts,
            [
                Decimal::from(3_000),
                Decimal::from(5_000),
                Decimal::from(1_000)
            ]
        );
        assert_eq!(ranks, [2, 1, 3]);
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn strategy_rank_is_independent_of_discount_rank() {
        let entries = compare(&three_coupons(), Decimal::from(30_000));

        let strategy_ranks: Vec<usize> = entries
            .iter()
            .map(ComparisonEntry::strategy_rank)
            .collect();

        assert_eq!(strategy_ranks, [1, 3, 2]);
    }

    #[test]
    fn inactive_coupons_produce_no_entry() {
        let coupons = [
            terms(0, 0, 5_000),
            terms(20, 0, 5_000),
            terms(20, 0, 0),
        ];

        let entries = compare(&coupons, Decimal::from(10_000));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().map(ComparisonEntry::coupon_idx), Some(1));
        assert_eq!(entries.first().map(ComparisonEntry::rank), Some(1));
    }

    #[test]
    fn empty_input_gives_empty_comparison() {
        let coupons: [CouponTerms; 0] = [];

        assert!(compare(&coupons, Decimal::from(10_000)).is_empty());
    }

    #[test]
    fn equal_discounts_keep_input_order() {
        let coupons = [
            terms(10, 0, 1_000),
            terms(50, 0, 5_000),
            terms(20, 0, 1_000),
        ];

        // 1,000 / 5,000 / 1,000 at 10,000
        let ranks: Vec<usize> = compare(&coupons, Decimal::from(10_000))
            .iter()
            .map(ComparisonEntry::rank)
            .collect();

        assert_eq!(ranks, [2, 1, 3]);
    }

    #[test]
    fn entries_use_floored_optimal_amount() {
        let coupons = [terms(10, 20_000, 1_000)];

        let entries = compare(&coupons, Decimal::from(15_000));
        let entry = entries.first();

        assert_eq!(
            entry.map(ComparisonEntry::optimal_purchase_amount),
            Some(Decimal::from(20_000))
        );
        assert_eq!(
            coupons.first().and_then(CouponTerms::optimal_purchase_amount),
            Some(Decimal::from(10_000))
        );
        assert_eq!(entry.map(ComparisonEntry::is_optimal), Some(false));
    }

    #[test]
    fn entry_optimality_matches_floored_threshold() {
        let coupons = three_coupons();

        for amount in [0, 4_999, 5_000, 9_999, 10_000, 12_000, 25_000, 40_000] {
            let amount = Decimal::from(amount);

            for entry in compare(&coupons, amount) {
                assert_eq!(
                    entry.is_optimal(),
                    amount >= entry.optimal_purchase_amount(),
                    "coupon {} at {amount}",
                    entry.coupon_idx()
                );
            }
        }
    }

    #[test]
    fn entry_advice_targets_floored_optimal_amount() {
        let coupons = [terms(10, 20_000, 1_000), terms(20, 10_000, 5_000)];

        let entries = compare(&coupons, Decimal::from(20_000));
        let advice: Vec<Advice> = entries.iter().map(ComparisonEntry::advice).collect();

        assert_eq!(
            advice,
            [
                Advice::Optimal,
                Advice::SpendMore {
                    target: Decimal::from(25_000)
                }
            ]
        );
    }

    #[test]
    fn entry_advice_reports_minimum_when_not_eligible() {
        let coupons = [terms(10, 20_000, 1_000)];

        let advice = compare(&coupons, Decimal::from(5_000))
            .first()
            .map(ComparisonEntry::advice);

        assert_eq!(
            advice,
            Some(Advice::NotEligible {
                min_purchase: Decimal::from(20_000)
            })
        );
    }

    #[test]
    fn accepts_named_coupons() -> TestResult {
        let coupons = [
            Coupon::new("Small", terms(10, 0, 1_000)),
            Coupon::new("Large", terms(20, 0, 5_000)),
        ];

        let entries = compare(&coupons, Decimal::from(10_000));
        let best = entries
            .iter()
            .find(|entry| entry.rank() == 1)
            .and_then(|entry| coupons.get(entry.coupon_idx()))
            .ok_or("no best coupon")?;

        assert_eq!(best.name(), "Large");

        Ok(())
    }
}
