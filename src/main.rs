//! Coupon calculator command line

use std::io;

use anyhow::Result;
use clap::Parser;
use rusty_money::iso;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coupon_calc::{
    comparison::{compare, strategies::optimal_strategies},
    discounts::calculate_discount,
    input::{parse_amount, parse_coupon_terms},
    report::Report,
};

use crate::config::{CliConfig, Command};

mod config;

/// Coupon calculator entry point
pub fn main() -> Result<()> {
    let config = CliConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let handle = stdout.lock();

    run(config, handle)
}

fn run(config: CliConfig, mut out: impl io::Write) -> Result<()> {
    match config.command {
        Command::Calculate {
            rate,
            min_purchase,
            max_discount,
            amount,
        } => {
            let terms = parse_coupon_terms(&rate, &min_purchase, &max_discount);
            let purchase_amount = parse_amount(&amount);
            let result = calculate_discount(&terms, purchase_amount);

            info!(
                %purchase_amount,
                discount_amount = %result.discount_amount(),
                "calculated single coupon"
            );

            Report::new(config.currency.unwrap_or(iso::KRW)).write_discount(
                &mut out,
                &terms,
                purchase_amount,
                &result,
            )?;
        }
        Command::Compare { amount, source } => {
            let (coupons, fixture_currency) = source.load(&config.fixtures_dir)?;
            let purchase_amount = parse_amount(&amount);
            let entries = compare(&coupons, purchase_amount);

            info!(
                %purchase_amount,
                coupons = coupons.len(),
                ranked = entries.len(),
                "compared coupons"
            );

            let report = Report::new(config.currency.or(fixture_currency).unwrap_or(iso::KRW));

            report.write_strategies(&mut out, &coupons, &optimal_strategies(&coupons))?;
            report.write_comparison(&mut out, &coupons, purchase_amount, &entries)?;
        }
        Command::Strategies { source } => {
            let (coupons, fixture_currency) = source.load(&config.fixtures_dir)?;
            let strategies = optimal_strategies(&coupons);

            info!(coupons = coupons.len(), ranked = strategies.len(), "planned strategies");

            Report::new(config.currency.or(fixture_currency).unwrap_or(iso::KRW))
                .write_strategies(&mut out, &coupons, &strategies)?;
        }
    }

    Ok(())
}
