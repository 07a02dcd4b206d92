//! Report
//!
//! Renders discount results, comparisons and optimal strategies as terminal tables.

use std::{io, ops::Range};

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    comparison::{ComparisonEntry, strategies::OptimalStrategy},
    coupons::{Coupon, CouponTerms},
    discounts::{Advice, DiscountResult},
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Writes human-readable reports in a single currency.
#[derive(Debug, Copy, Clone)]
pub struct Report {
    currency: &'static Currency,
}

impl Report {
    /// Create a report that formats amounts in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }

    /// Currency used for all amounts.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Convert an amount to money, rounded half away from zero to the currency's minor unit.
    pub fn money(&self, amount: Decimal) -> Money<'static, Currency> {
        Money::from_decimal(
            amount.round_dp_with_strategy(
                self.currency.exponent,
                RoundingStrategy::MidpointAwayFromZero,
            ),
            self.currency,
        )
    }

    /// Writes the outcome of one coupon applied to one purchase amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the output can't be written.
    pub fn write_discount(
        &self,
        mut out: impl io::Write,
        terms: &CouponTerms,
        purchase_amount: Decimal,
        result: &DiscountResult,
    ) -> Result<(), ReportError> {
        let lines = [
            ("Purchase:", self.money(purchase_amount).to_string(), false),
            ("Discount:", format!("-{}", self.money(result.discount_amount())), false),
            ("To pay:", self.money(result.final_amount()).to_string(), true),
        ];

        // Widths in chars, currency symbols are multi-byte.
        let label_width = lines
            .iter()
            .map(|(label, ..)| label.chars().count())
            .max()
            .unwrap_or_default();
        let value_width = lines
            .iter()
            .map(|(_, value, _)| value.chars().count())
            .max()
            .unwrap_or_default();

        writeln!(out)?;

        for (label, value, bold) in &lines {
            let (on, off) = if *bold { ("\x1b[1m", "\x1b[0m") } else { ("", "") };

            writeln!(out, " {on}{label:>label_width$}  {value:>value_width$}{off}")?;
        }

        writeln!(out, "\n {}\n", self.advice_text(result.advice(terms)))?;

        Ok(())
    }

    /// Writes a comparison table, one row per entry in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the output can't be written.
    pub fn write_comparison(
        &self,
        mut out: impl io::Write,
        coupons: &[Coupon],
        purchase_amount: Decimal,
        entries: &[ComparisonEntry],
    ) -> Result<(), ReportError> {
        writeln!(out, "\n Comparison at {}", self.money(purchase_amount))?;

        if entries.is_empty() {
            writeln!(out, " No active coupons to compare.\n")?;

            return Ok(());
        }

        let mut builder = Builder::default();
        let mut color_ops: SmallVec<[(usize, usize, Color); 8]> = SmallVec::new();

        builder.push_record(["Rank", "Coupon", "Discount", "To pay", "Status", "Advice"]);

        for (row, entry) in entries.iter().enumerate() {
            let advice = entry.advice();

            builder.push_record([
                format!("#{}", entry.rank()),
                coupon_name(coupons, entry.coupon_idx()).to_string(),
                format!("-{}", self.money(entry.discount_amount())),
                format!("{}", self.money(entry.final_amount())),
                status_text(entry.is_optimal()).to_string(),
                self.advice_hint(advice),
            ]);

            if entry.rank() == 1 {
                color_ops.push((row + 1, 0, Color::FG_GREEN));
                color_ops.push((row + 1, 1, Color::FG_GREEN));
            }

            if let Advice::NotEligible { .. } = advice {
                color_ops.push((row + 1, 5, Color::FG_RED));
            }
        }

        write_table(&mut out, builder, 2..4, color_ops)
    }

    /// Writes the optimal strategy for each coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if the output can't be written.
    pub fn write_strategies(
        &self,
        mut out: impl io::Write,
        coupons: &[Coupon],
        strategies: &[OptimalStrategy],
    ) -> Result<(), ReportError> {
        writeln!(out, "\n Optimal strategy per coupon")?;

        if strategies.is_empty() {
            writeln!(out, " No active coupons.\n")?;

            return Ok(());
        }

        let mut builder = Builder::default();
        let mut color_ops: SmallVec<[(usize, usize, Color); 8]> = SmallVec::new();

        builder.push_record(["Rank", "Coupon", "Buy", "Discount", "To pay"]);

        for (row, strategy) in strategies.iter().enumerate() {
            builder.push_record([
                format!("#{}", strategy.rank()),
                coupon_name(coupons, strategy.coupon_idx()).to_string(),
                format!("{}", self.money(strategy.optimal_purchase_amount())),
                format!("-{}", self.money(strategy.max_discount())),
                format!("{}", self.money(strategy.final_amount())),
            ]);

            if strategy.rank() == 1 {
                color_ops.push((row + 1, 0, Color::FG_GREEN));
                color_ops.push((row + 1, 1, Color::FG_GREEN));
            }
        }

        write_table(&mut out, builder, 2..5, color_ops)
    }

    fn advice_text(&self, advice: Advice) -> String {
        match advice {
            Advice::Optimal => "You are getting the best discount this coupon allows.".to_string(),
            Advice::SpendMore { target } => format!(
                "Spend {} or more for the maximum discount.",
                self.money(target)
            ),
            Advice::NotEligible { min_purchase } => format!(
                "The minimum purchase of {} is not met, so no discount applies.",
                self.money(min_purchase)
            ),
        }
    }

    fn advice_hint(&self, advice: Advice) -> String {
        match advice {
            Advice::Optimal => String::new(),
            Advice::SpendMore { target } => format!("Max discount from {}", self.money(target)),
            Advice::NotEligible { min_purchase } => {
                format!("Below minimum {}", self.money(min_purchase))
            }
        }
    }
}

fn coupon_name(coupons: &[Coupon], coupon_idx: usize) -> &str {
    coupons.get(coupon_idx).map_or("<unknown>", Coupon::name)
}

fn status_text(is_optimal: bool) -> &'static str {
    if is_optimal { "Optimal" } else { "Improvable" }
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    amount_columns: Range<usize>,
    color_ops: SmallVec<[(usize, usize, Color); 8]>,
) -> Result<(), ReportError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(amount_columns), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "{table_str}\n")?;

    Ok(())
}

/// Dims each run of box-drawing characters (U+2500..U+257F) with one ANSI escape pair.
fn colorize_borders(table: &str) -> String {
    let is_border = |ch: &char| ('\u{2500}'..='\u{257F}').contains(ch);

    let mut out = String::with_capacity(table.len() + 256);
    let mut chars = table.chars().peekable();

    while let Some(ch) = chars.next() {
        if !is_border(&ch) {
            out.push(ch);
            continue;
        }

        out.push_str("\x1b[90m");
        out.push(ch);

        while let Some(border) = chars.next_if(is_border) {
            out.push(border);
        }

        out.push_str("\x1b[0m");
    }

    out
}
