//! Waterfall output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tiers::TierResult;

/// LP/GP amounts allocated by one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierAllocation {
    pub lp_allocation: f64,
    pub gp_allocation: f64,
}

impl From<&TierResult> for TierAllocation {
    fn from(tier: &TierResult) -> Self {
        Self {
            lp_allocation: tier.lp_allocation,
            gp_allocation: tier.gp_allocation,
        }
    }
}

/// Full tier-by-tier results, including completion flags and carried capital
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub return_of_capital: TierResult,
    pub preferred_return: TierResult,
    pub catch_up: TierResult,
    pub final_split: TierResult,
}

impl TierBreakdown {
    /// Tiers in waterfall order
    pub fn tiers(&self) -> [&TierResult; 4] {
        [
            &self.return_of_capital,
            &self.preferred_return,
            &self.catch_up,
            &self.final_split,
        ]
    }

    pub fn total_lp(&self) -> f64 {
        self.tiers().iter().map(|t| t.lp_allocation).sum()
    }

    pub fn total_gp(&self) -> f64 {
        self.tiers().iter().map(|t| t.gp_allocation).sum()
    }
}

/// Waterfall analysis of one commitment as of an analysis date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallResult {
    pub commitment_id: u32,
    pub analysis_date: NaiveDate,

    /// Capital contributed before the analysis date (absolute)
    pub total_commitment: f64,

    /// Cash distributed before the analysis date
    pub total_distributions: f64,

    // Tier allocations
    pub return_of_capital: TierAllocation,
    pub preferred_return: TierAllocation,
    pub catch_up: TierAllocation,
    pub final_split: TierAllocation,

    // Aggregates
    pub total_lp_profit: f64,
    pub total_gp_profit: f64,

    /// LP portion of net profit (distributions beyond returned capital), as a
    /// fraction rounded to three decimals of a percent
    pub profit_split_percentage: f64,
}

impl WaterfallResult {
    /// Distributions beyond contributed capital
    pub fn net_profit(&self) -> f64 {
        self.total_lp_profit + self.total_gp_profit - self.total_commitment
    }
}
