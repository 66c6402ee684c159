//! Waterfall engine: runs the tier chain and aggregates the result

use chrono::NaiveDate;

use super::config::WaterfallConfig;
use super::result::{TierAllocation, TierBreakdown, WaterfallResult};
use super::tiers::{catch_up, final_split, preferred_return, return_of_capital, round_to, round_to_cents};
use crate::error::{Result, WaterfallError};
use crate::ledger::Ledger;
use crate::report::WaterfallReport;

/// Below this the net profit is treated as zero and the split is undefined
const SPLIT_EPSILON: f64 = 1e-9;

/// Distribution waterfall engine over an immutable ledger
#[derive(Debug, Clone)]
pub struct WaterfallEngine {
    ledger: Ledger,
    config: WaterfallConfig,
}

impl WaterfallEngine {
    /// Create an engine, rejecting rate combinations the tiers cannot handle
    pub fn new(ledger: Ledger, config: WaterfallConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { ledger, config })
    }

    /// Create an engine with the default 8% / 20% / 100% terms
    pub fn with_defaults(ledger: Ledger) -> Self {
        Self {
            ledger,
            config: WaterfallConfig::default(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn config(&self) -> &WaterfallConfig {
        &self.config
    }

    /// Run the four tiers for a commitment, transactions strictly before
    /// `analysis_date`
    pub fn run_tiers(&self, commitment_id: u32, analysis_date: NaiveDate) -> Result<TierBreakdown> {
        if !self.ledger.has_commitment(commitment_id) {
            return Err(WaterfallError::UnknownCommitment(commitment_id));
        }

        let scope = self.ledger.scope(commitment_id, analysis_date);
        log::debug!(
            "Commitment {}: {} transactions before {}",
            scope.commitment_id(),
            scope.len(),
            scope.analysis_date()
        );

        let roc = return_of_capital(&scope);
        log::debug!("Return of capital: {:?}", roc);

        let pref = preferred_return(&scope, &self.config, &roc);
        log::debug!("Preferred return: {:?}", pref);

        let cu = catch_up(&self.config, &pref);
        log::debug!("Catch-up: {:?}", cu);
        if pref.is_completed && !cu.is_completed {
            log::warn!(
                "Commitment {}: catch-up only partially paid ({:.2} to GP)",
                commitment_id,
                cu.gp_allocation
            );
        }

        let split = final_split(&self.config, &cu);
        log::debug!("Final split: {:?}", split);

        Ok(TierBreakdown {
            return_of_capital: roc,
            preferred_return: pref,
            catch_up: cu,
            final_split: split,
        })
    }

    /// Full waterfall analysis for one commitment
    pub fn analyze_commitment(&self, commitment_id: u32, analysis_date: NaiveDate) -> Result<WaterfallResult> {
        let tiers = self.run_tiers(commitment_id, analysis_date)?;
        let scope = self.ledger.scope(commitment_id, analysis_date);

        let total_commitment = scope.total_contributions().abs();
        let total_distributions = scope.total_distributions();

        let total_lp = tiers.total_lp();
        let total_gp = tiers.total_gp();

        let net_profit = total_lp + total_gp - total_commitment;
        if net_profit.abs() < SPLIT_EPSILON {
            return Err(WaterfallError::UndefinedSplit { commitment_id });
        }
        let profit_split = (total_lp - total_commitment) / net_profit;

        let result = WaterfallResult {
            commitment_id,
            analysis_date,
            total_commitment,
            total_distributions,
            return_of_capital: TierAllocation::from(&tiers.return_of_capital),
            preferred_return: TierAllocation::from(&tiers.preferred_return),
            catch_up: TierAllocation::from(&tiers.catch_up),
            final_split: TierAllocation::from(&tiers.final_split),
            total_lp_profit: round_to_cents(total_lp),
            total_gp_profit: round_to_cents(total_gp),
            profit_split_percentage: round_to(profit_split * 100.0, 3) / 100.0,
        };

        log::info!(
            "Commitment {} as of {}: LP {:.2}, GP {:.2}, split {:.5}",
            commitment_id,
            analysis_date,
            result.total_lp_profit,
            result.total_gp_profit,
            result.profit_split_percentage
        );

        Ok(result)
    }

    /// Analysis wrapped for tabular export
    pub fn generate_report(&self, commitment_id: u32, analysis_date: NaiveDate) -> Result<WaterfallReport> {
        self.analyze_commitment(commitment_id, analysis_date)
            .map(WaterfallReport::new)
    }
}
