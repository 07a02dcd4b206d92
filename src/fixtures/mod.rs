//! Fixtures
//!
//! Named coupon sets stored as YAML under `<base_path>/coupons/<name>.yml`.

use std::{fs, path::PathBuf};

use rusty_money::iso::{self, Currency};
use thiserror::Error;
use tracing::debug;

use crate::{coupons::Coupon, fixtures::coupons::CouponsFixture};

pub mod coupons;

pub use coupons::parse_currency;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid amount format
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between coupon sets
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Coupons in the order they were loaded
    coupons: Vec<Coupon>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            coupons: Vec::new(),
            currency: None,
        }
    }

    /// Load coupons from a YAML fixture file, appending them to any already loaded
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a coupon is malformed, or if
    /// its currency differs from previously loaded coupons.
    pub fn load_coupons(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("coupons").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CouponsFixture = serde_norway::from_str(&contents)?;

        let currency = match fixture.currency.as_deref() {
            Some(code) => parse_currency(code)?,
            None => iso::KRW,
        };

        if let Some(existing_currency) = self.currency {
            if existing_currency != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing_currency.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        for coupon_fixture in fixture.coupons {
            let position = self.coupons.len() + 1;

            self.coupons.push(coupon_fixture.try_into_coupon(position)?);
        }

        debug!(
            path = %file_path.display(),
            coupons = self.coupons.len(),
            "loaded coupon fixture"
        );

        Ok(self)
    }

    /// Load a coupon set by name from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_coupons(name)?;

        Ok(fixture)
    }

    /// Load a coupon set by name from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture.load_coupons(name)?;

        Ok(fixture)
    }

    /// Get all coupons
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Get the currency, falling back to KRW when nothing has been loaded
    pub fn currency(&self) -> &'static Currency {
        self.currency.unwrap_or(iso::KRW)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
