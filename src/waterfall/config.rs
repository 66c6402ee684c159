//! Waterfall rate configuration

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::error::{Result, WaterfallError};

/// Default annual preferred return (hurdle) rate: 8%
pub const DEFAULT_PREFERRED_RETURN_RATE: f64 = 0.08;

/// Default GP carried interest: 20%
pub const DEFAULT_CARRIED_INTEREST_RATE: f64 = 0.20;

/// Default catch-up rate: 100% to the GP
pub const DEFAULT_CATCH_UP_RATE: f64 = 1.0;

/// Default LP share of the final split
pub const DEFAULT_LP_SPLIT_RATE: f64 = 0.80;

fn default_preferred_return_rate() -> f64 { DEFAULT_PREFERRED_RETURN_RATE }
fn default_carried_interest_rate() -> f64 { DEFAULT_CARRIED_INTEREST_RATE }
fn default_catch_up_rate() -> f64 { DEFAULT_CATCH_UP_RATE }
fn default_lp_split_rate() -> f64 { DEFAULT_LP_SPLIT_RATE }

/// Rates that drive the four waterfall tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterfallConfig {
    /// Annual rate compounded on contributions for the hurdle
    #[serde(default = "default_preferred_return_rate")]
    pub preferred_return_rate: f64,

    /// GP share of profit after the hurdle
    #[serde(default = "default_carried_interest_rate")]
    pub carried_interest_rate: f64,

    /// Share of catch-up distributions going to the GP
    #[serde(default = "default_catch_up_rate")]
    pub catch_up_rate: f64,

    /// LP share of the final split as entered by the caller.
    /// The final split is driven by `carried_interest_rate`; this is carried
    /// through for reporting only.
    #[serde(default = "default_lp_split_rate")]
    pub lp_split_rate: f64,
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            preferred_return_rate: DEFAULT_PREFERRED_RETURN_RATE,
            carried_interest_rate: DEFAULT_CARRIED_INTEREST_RATE,
            catch_up_rate: DEFAULT_CATCH_UP_RATE,
            lp_split_rate: DEFAULT_LP_SPLIT_RATE,
        }
    }
}

impl WaterfallConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: WaterfallConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Check rate bounds
    ///
    /// The catch-up formula divides by `catch_up_rate - carried_interest_rate`,
    /// so the catch-up rate must be strictly greater than the carry.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &str, reason: &str| WaterfallError::InvalidConfig {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if !self.preferred_return_rate.is_finite() || self.preferred_return_rate < 0.0 {
            return Err(invalid("preferred_return_rate", "must be a non-negative rate"));
        }
        if !(0.0..1.0).contains(&self.carried_interest_rate) {
            return Err(invalid("carried_interest_rate", "must be in [0, 1)"));
        }
        if !self.catch_up_rate.is_finite() || self.catch_up_rate > 1.0 {
            return Err(invalid("catch_up_rate", "must not exceed 1"));
        }
        if self.catch_up_rate <= self.carried_interest_rate {
            return Err(invalid(
                "catch_up_rate",
                "must be greater than carried_interest_rate",
            ));
        }
        if !(0.0..=1.0).contains(&self.lp_split_rate) {
            return Err(invalid("lp_split_rate", "must be in [0, 1]"));
        }
        Ok(())
    }
}
