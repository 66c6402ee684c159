//! The four sequential waterfall tiers
//!
//! Each tier takes the previous tier's [`TierResult`] and gates on
//! `is_completed`: nothing flows downstream until the tier above has been
//! fully satisfied.

use serde::{Deserialize, Serialize};

use super::config::WaterfallConfig;
use super::npv::contribution_npv;
use crate::ledger::CommitmentScope;

/// Round a monetary amount to cents
pub fn round_to_cents(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to `places` decimals
///
/// Exact ties round half away from zero (`f64::round`), not half to even as
/// banker's rounding would: `round_to(0.125, 2)` is `0.13`, not `0.12`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // Avoid reporting -0.00
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Allocation produced by one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierResult {
    /// Tier fully satisfied; remaining capital may flow to the next tier
    pub is_completed: bool,
    pub lp_allocation: f64,
    pub gp_allocation: f64,
    /// Distributable capital handed to the next tier
    pub next_tier_capital: f64,
}

impl TierResult {
    /// Result of a tier that was never reached
    pub fn incomplete() -> Self {
        Self {
            is_completed: false,
            lp_allocation: 0.0,
            gp_allocation: 0.0,
            next_tier_capital: 0.0,
        }
    }
}

/// Tier 1: return contributed capital to the LP
///
/// Completes once cumulative distributions have caught up with contributions.
pub fn return_of_capital(scope: &CommitmentScope<'_>) -> TierResult {
    let total_contribution = scope.total_contributions();
    let total_distribution = scope.total_distributions();

    let max_distribution = total_contribution.abs().min(total_distribution.abs());

    TierResult {
        is_completed: total_distribution + total_contribution >= 0.0,
        lp_allocation: max_distribution,
        gp_allocation: 0.0,
        next_tier_capital: total_distribution - max_distribution,
    }
}

/// Tier 2: pay the LP its compounded preferred return
///
/// The hurdle is every contribution compounded at the preferred rate up to
/// the latest in-scope transaction date, less the capital tier 1 already
/// returned.
pub fn preferred_return(
    scope: &CommitmentScope<'_>,
    config: &WaterfallConfig,
    roc: &TierResult,
) -> TierResult {
    if !roc.is_completed {
        return TierResult::incomplete();
    }

    let hurdle = contribution_npv(scope, config.preferred_return_rate);
    let lp_allocation = round_to_cents(
        (hurdle.abs() - roc.lp_allocation.abs()).min(roc.next_tier_capital),
    );

    TierResult {
        is_completed: true,
        lp_allocation,
        gp_allocation: 0.0,
        next_tier_capital: roc.next_tier_capital - lp_allocation,
    }
}

/// Tier 3: GP catch-up until its share of profit reaches the carry
///
/// With a 100% catch-up the GP receives `carry / (1 - carry)` of the
/// preferred return. When capital runs out first the GP keeps what is
/// available and the tier stays incomplete.
pub fn catch_up(config: &WaterfallConfig, pref: &TierResult) -> TierResult {
    if !pref.is_completed {
        return TierResult::incomplete();
    }

    let carry = config.carried_interest_rate;
    let total_catch_up = carry * pref.lp_allocation.abs() / (config.catch_up_rate - carry);
    let effective_catch_up = round_to_cents(total_catch_up.min(pref.next_tier_capital));

    TierResult {
        is_completed: total_catch_up <= pref.next_tier_capital,
        lp_allocation: 0.0,
        gp_allocation: effective_catch_up,
        next_tier_capital: pref.next_tier_capital - effective_catch_up,
    }
}

/// Tier 4: split whatever remains by the carried interest rate
pub fn final_split(config: &WaterfallConfig, catch_up: &TierResult) -> TierResult {
    if !catch_up.is_completed {
        return TierResult::incomplete();
    }

    let remaining = catch_up.next_tier_capital;
    let carry = config.carried_interest_rate;

    TierResult {
        is_completed: true,
        lp_allocation: round_to_cents(remaining * (1.0 - carry)),
        gp_allocation: round_to_cents(remaining * carry),
        next_tier_capital: 0.0,
    }
}
