//! Tabular reporting of a waterfall analysis
//!
//! Flattens [`WaterfallResult`] into a single CSV row and renders the
//! labelled plain-text summary used on the console.

use serde::Serialize;
use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::waterfall::WaterfallResult;

/// One flat report row, tier allocations spread into columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub commitment_id: u32,
    pub analysis_date: String,
    pub total_commitment: f64,
    pub total_distributions: f64,
    pub return_of_capital_lp: f64,
    pub return_of_capital_gp: f64,
    pub preferred_return_lp: f64,
    pub preferred_return_gp: f64,
    pub catch_up_lp: f64,
    pub catch_up_gp: f64,
    pub final_split_lp: f64,
    pub final_split_gp: f64,
    pub total_lp_profit: f64,
    pub total_gp_profit: f64,
    pub profit_split_percentage: f64,
}

impl From<&WaterfallResult> for ReportRow {
    fn from(r: &WaterfallResult) -> Self {
        Self {
            commitment_id: r.commitment_id,
            analysis_date: r.analysis_date.format("%Y-%m-%d").to_string(),
            total_commitment: r.total_commitment,
            total_distributions: r.total_distributions,
            return_of_capital_lp: r.return_of_capital.lp_allocation,
            return_of_capital_gp: r.return_of_capital.gp_allocation,
            preferred_return_lp: r.preferred_return.lp_allocation,
            preferred_return_gp: r.preferred_return.gp_allocation,
            catch_up_lp: r.catch_up.lp_allocation,
            catch_up_gp: r.catch_up.gp_allocation,
            final_split_lp: r.final_split.lp_allocation,
            final_split_gp: r.final_split.gp_allocation,
            total_lp_profit: r.total_lp_profit,
            total_gp_profit: r.total_gp_profit,
            profit_split_percentage: r.profit_split_percentage,
        }
    }
}

/// Report for a single analysed commitment
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallReport {
    result: WaterfallResult,
}

impl WaterfallReport {
    pub fn new(result: WaterfallResult) -> Self {
        Self { result }
    }

    pub fn result(&self) -> &WaterfallResult {
        &self.result
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        vec![ReportRow::from(&self.result)]
    }

    /// Write the report as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in self.rows() {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// CSV text of the report
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl fmt::Display for WaterfallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        writeln!(f, "Commitment ID: {}", r.commitment_id)?;
        writeln!(f, "Analysis Date: {}", r.analysis_date)?;
        writeln!(f, "Total Commitment: {:.2}", r.total_commitment)?;
        writeln!(f, "Total Distributions: {:.2}", r.total_distributions)?;

        let tiers = [
            ("Return of Capital", &r.return_of_capital),
            ("Preferred Return", &r.preferred_return),
            ("Catch-up", &r.catch_up),
            ("Final Split", &r.final_split),
        ];
        for (label, tier) in tiers {
            writeln!(f, "{} LP Allocation: {:.2}", label, tier.lp_allocation)?;
            writeln!(f, "{} GP Allocation: {:.2}", label, tier.gp_allocation)?;
        }

        writeln!(f, "Total LP Profit: {:.2}", r.total_lp_profit)?;
        writeln!(f, "Total GP Profit: {:.2}", r.total_gp_profit)?;
        write!(f, "Profit Split Percentage: {}", r.profit_split_percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waterfall::TierAllocation;
    use chrono::NaiveDate;

    fn sample_result() -> WaterfallResult {
        let tier = |lp, gp| TierAllocation {
            lp_allocation: lp,
            gp_allocation: gp,
        };
        WaterfallResult {
            commitment_id: 4,
            analysis_date: NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
            total_commitment: 1000.0,
            total_distributions: 1500.0,
            return_of_capital: tier(1000.0, 0.0),
            preferred_return: tier(43.07, 0.0),
            catch_up: tier(0.0, 10.77),
            final_split: tier(356.93, 89.23),
            total_lp_profit: 1400.0,
            total_gp_profit: 100.0,
            profit_split_percentage: 0.8,
        }
    }

    #[test]
    fn test_csv_has_header_and_one_row() {
        let report = WaterfallReport::new(sample_result());
        let csv = report.to_csv_string().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("commitment_id,analysis_date,total_commitment"));
        assert!(lines[0].ends_with("total_gp_profit,profit_split_percentage"));
        assert!(lines[1].starts_with("4,2022-01-03,1000.0,1500.0,1000.0,0.0,43.07"));
    }

    #[test]
    fn test_text_summary() {
        let text = WaterfallReport::new(sample_result()).to_string();
        assert!(text.starts_with("Commitment ID: 4\nAnalysis Date: 2022-01-03\n"));
        assert!(text.contains("Catch-up GP Allocation: 10.77"));
        assert!(text.contains("Final Split LP Allocation: 356.93"));
        assert!(text.ends_with("Profit Split Percentage: 0.8"));
    }
}
