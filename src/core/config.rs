//! Pricing configuration.
//!
//! Values are resolved in this order (highest priority first):
//!
//! 1. Environment variables `ANGEBOT_VAT_RATE` (fraction, e.g. `0.20`) and
//!    `ANGEBOT_CURRENCY` (ISO 4217 code)
//! 2. Values deserialized by the application from its own settings file
//! 3. Defaults: 20% VAT, EUR

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::currencies;
use super::error::AngebotError;

pub const ENV_VAT_RATE: &str = "ANGEBOT_VAT_RATE";
pub const ENV_CURRENCY: &str = "ANGEBOT_CURRENCY";

/// Settings shared by every offer priced in one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// VAT rate as a fraction (0.20 = 20%).
    pub vat_rate: Decimal,
    /// Offer currency (ISO 4217).
    pub currency_code: String,
    /// Rounding precision override. Defaults to the currency's minor units.
    pub minor_units: Option<u32>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            vat_rate: dec!(0.20),
            currency_code: "EUR".to_string(),
            minor_units: None,
        }
    }
}

impl PricingConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, AngebotError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup` (keyed by the `ENV_*` names) onto `self`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AngebotError> {
        if let Some(raw) = lookup(ENV_VAT_RATE) {
            let rate = Decimal::from_str(raw.trim()).map_err(|e| {
                warn!(value = %raw, "rejecting VAT rate override");
                AngebotError::Config(format!("{ENV_VAT_RATE} '{raw}' is not a number: {e}"))
            })?;
            self.vat_rate = rate;
        }
        if let Some(raw) = lookup(ENV_CURRENCY) {
            self.currency_code = raw.trim().to_uppercase();
        }

        self.validate()?;
        info!(
            vat_rate = %self.vat_rate,
            currency = %self.currency_code,
            "pricing config loaded"
        );
        Ok(self)
    }

    /// Check the VAT rate, currency and precision override.
    pub fn validate(&self) -> Result<(), AngebotError> {
        if self.vat_rate.is_sign_negative() {
            warn!(vat_rate = %self.vat_rate, "negative VAT rate");
            return Err(AngebotError::Config(format!(
                "VAT rate {} must not be negative",
                self.vat_rate
            )));
        }
        if !currencies::is_known_currency_code(&self.currency_code) {
            warn!(currency = %self.currency_code, "unknown currency");
            return Err(AngebotError::Config(format!(
                "currency code '{}' is not a known ISO 4217 code",
                self.currency_code
            )));
        }
        if let Some(places) = self.minor_units.filter(|&p| p > Decimal::MAX_SCALE) {
            warn!(minor_units = places, "precision override out of range");
            return Err(AngebotError::Config(format!(
                "minor units {places} exceed the maximum of {}",
                Decimal::MAX_SCALE
            )));
        }
        Ok(())
    }

    /// Decimal places used when rounding amounts for display and submission.
    pub fn decimal_places(&self) -> u32 {
        self.minor_units
            .or_else(|| currencies::minor_units(&self.currency_code))
            .unwrap_or(2)
    }
}
