//! Command line configuration

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::{Args, Parser, Subcommand};
use rusty_money::iso::Currency;
use thiserror::Error;

use coupon_calc::{
    coupons::{Coupon, CouponTerms},
    fixtures::{Fixture, FixtureError, parse_currency},
    input::parse_coupon_terms,
};

/// Coupon discount calculator
#[derive(Debug, Parser)]
#[command(name = "coupon-calc", about = "Coupon discount calculator", long_about = None)]
pub struct CliConfig {
    /// Directory containing `coupons/<name>.yml` fixture files
    #[arg(long, env = "COUPON_FIXTURES_DIR", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Currency for displayed amounts (KRW, JPY, USD, EUR, GBP); defaults to the fixture's
    #[arg(long, env = "COUPON_CURRENCY", value_parser = currency_arg)]
    pub currency: Option<&'static Currency>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// What to calculate
    #[command(subcommand)]
    pub command: Command,
}

/// Calculator commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply one coupon to a purchase amount
    Calculate {
        /// Discount rate in percent
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        rate: String,

        /// Minimum purchase amount
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        min_purchase: String,

        /// Maximum discount amount
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        max_discount: String,

        /// Purchase amount
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        amount: String,
    },

    /// Rank several coupons at one purchase amount
    Compare {
        /// Purchase amount
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// Coupons to compare
        #[command(flatten)]
        source: CouponSource,
    },

    /// Show the cheapest way to max out each coupon
    Strategies {
        /// Coupons to plan for
        #[command(flatten)]
        source: CouponSource,
    },
}

/// Where a command gets its coupons from
#[derive(Debug, Args)]
pub struct CouponSource {
    /// Fixture set to load from the fixtures directory
    #[arg(short, long, conflicts_with = "coupons")]
    pub fixture: Option<String>,

    /// Coupon given inline as `[NAME=]RATE,MIN,MAX`; repeat for more coupons
    #[arg(short, long = "coupon", value_name = "[NAME=]RATE,MIN,MAX")]
    pub coupons: Vec<CouponArg>,
}

impl CouponSource {
    /// Resolve the coupons, plus the fixture's currency when loaded from a fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture set cannot be loaded.
    pub fn load(
        &self,
        fixtures_dir: &Path,
    ) -> Result<(Vec<Coupon>, Option<&'static Currency>), FixtureError> {
        if let Some(name) = self.fixture.as_deref() {
            let fixture = Fixture::from_set_in(fixtures_dir, name)?;

            return Ok((fixture.coupons().to_vec(), Some(fixture.currency())));
        }

        let coupons = self
            .coupons
            .iter()
            .enumerate()
            .map(|(idx, coupon)| coupon.to_coupon(idx + 1))
            .collect();

        Ok((coupons, None))
    }
}

/// Errors parsing an inline coupon argument
#[derive(Debug, Error, PartialEq)]
pub enum CouponArgError {
    /// Wrong number of comma separated fields
    #[error("expected [NAME=]RATE,MIN,MAX, got {0:?}")]
    Format(String),
}

/// A coupon given on the command line
#[derive(Debug, Clone)]
pub struct CouponArg {
    name: Option<String>,
    terms: CouponTerms,
}

impl CouponArg {
    fn to_coupon(&self, position: usize) -> Coupon {
        match &self.name {
            Some(name) => Coupon::new(name.clone(), self.terms),
            None => Coupon::numbered(position, self.terms),
        }
    }
}

impl FromStr for CouponArg {
    type Err = CouponArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, fields) = match s.split_once('=') {
            Some((name, fields)) => (Some(name.trim().to_string()), fields),
            None => (None, s),
        };

        let parts: Vec<&str> = fields.split(',').collect();

        let [rate, min_purchase, max_discount] = parts.as_slice() else {
            return Err(CouponArgError::Format(s.to_string()));
        };

        Ok(Self {
            name: name.filter(|name| !name.is_empty()),
            terms: parse_coupon_terms(rate, min_purchase, max_discount),
        })
    }
}

fn currency_arg(code: &str) -> Result<&'static Currency, String> {
    parse_currency(code).map_err(|err| err.to_string())
}
