//! Four-tier distribution waterfall

mod config;
mod engine;
pub mod npv;
mod result;
mod tiers;

pub use config::{
    WaterfallConfig, DEFAULT_CARRIED_INTEREST_RATE, DEFAULT_CATCH_UP_RATE,
    DEFAULT_LP_SPLIT_RATE, DEFAULT_PREFERRED_RETURN_RATE,
};
pub use engine::WaterfallEngine;
pub use result::{TierAllocation, TierBreakdown, WaterfallResult};
pub use tiers::{
    catch_up, final_split, preferred_return, return_of_capital, round_to, round_to_cents,
    TierResult,
};
