//! ROI calculator
//!
//! Derives savings, cost and payback figures from a handful of estimates
//! about the task being automated. All figures are annual unless named
//! otherwise; money is in whatever currency the inputs use.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{PlaybookError, Result};

/// Working weeks counted per year
pub const WEEKS_PER_YEAR: f64 = 52.0;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Estimates entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInputs {
    /// Hours one person spends on the task each week
    pub hours_per_week: f64,
    /// Number of people doing the task
    pub people: u32,
    /// Fully loaded cost of one hour of work
    pub hourly_cost: f64,
    /// Share of the task time expected to be saved, 0-100
    pub time_saved_percent: f64,
    /// Tool licence cost per user per month
    pub monthly_tool_cost_per_user: f64,
    /// One-time cost of setup, integration and training
    pub implementation_cost: f64,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            hours_per_week: 5.0,
            people: 10,
            hourly_cost: 50.0,
            time_saved_percent: 30.0,
            monthly_tool_cost_per_user: 30.0,
            implementation_cost: 0.0,
        }
    }
}

impl RoiInputs {
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("hours per week", self.hours_per_week),
            ("hourly cost", self.hourly_cost),
            ("time saved percent", self.time_saved_percent),
            ("monthly tool cost", self.monthly_tool_cost_per_user),
            ("implementation cost", self.implementation_cost),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PlaybookError::validation(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.hours_per_week > 168.0 {
            return Err(PlaybookError::validation(
                "hours per week cannot exceed 168",
            ));
        }
        if self.time_saved_percent > 100.0 {
            return Err(PlaybookError::validation(
                "time saved percent cannot exceed 100",
            ));
        }
        Ok(())
    }

    /// Validate and compute the derived figures
    pub fn calculate(&self) -> Result<RoiResult> {
        self.validate()?;

        let people = f64::from(self.people);
        let weekly_hours_saved = self.hours_per_week * people * self.time_saved_percent / 100.0;
        let annual_hours_saved = weekly_hours_saved * WEEKS_PER_YEAR;
        let annual_value = annual_hours_saved * self.hourly_cost;
        let annual_tool_cost = self.monthly_tool_cost_per_user * people * MONTHS_PER_YEAR;
        let net_annual_benefit = annual_value - annual_tool_cost;

        let first_year_cost = annual_tool_cost + self.implementation_cost;
        let first_year_roi_percent = (first_year_cost > 0.0)
            .then(|| (annual_value - first_year_cost) / first_year_cost * 100.0);

        let net_monthly_benefit = net_annual_benefit / MONTHS_PER_YEAR;
        let payback_months =
            (net_monthly_benefit > 0.0).then(|| self.implementation_cost / net_monthly_benefit);

        Ok(RoiResult {
            weekly_hours_saved,
            annual_hours_saved,
            annual_value,
            annual_tool_cost,
            net_annual_benefit,
            first_year_roi_percent,
            payback_months,
        })
    }
}

/// Figures derived from [`RoiInputs`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub weekly_hours_saved: f64,
    pub annual_hours_saved: f64,
    pub annual_value: f64,
    pub annual_tool_cost: f64,
    pub net_annual_benefit: f64,
    /// `None` when there is no cost to measure a return against
    pub first_year_roi_percent: Option<f64>,
    /// `None` when the tool never pays for itself
    pub payback_months: Option<f64>,
}

impl RoiResult {
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("## ROI Estimate\n\n| Metric | Value |\n|--------|-------|\n");
        let rows = [
            ("Hours saved per week", format!("{:.1}", self.weekly_hours_saved)),
            ("Hours saved per year", format!("{:.0}", self.annual_hours_saved)),
            ("Annual value of time saved", format!("{:.2}", self.annual_value)),
            ("Annual tool cost", format!("{:.2}", self.annual_tool_cost)),
            ("Net annual benefit", format!("{:.2}", self.net_annual_benefit)),
            (
                "First-year ROI",
                self.first_year_roi_percent
                    .map_or_else(|| "n/a".to_string(), |p| format!("{p:.0}%")),
            ),
            (
                "Payback period",
                self.payback_months
                    .map_or_else(|| "never".to_string(), |m| format!("{m:.1} months")),
            ),
        ];
        for (metric, value) in rows {
            let _ = writeln!(out, "| {metric} | {value} |");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_default_inputs() {
        let result = RoiInputs::default().calculate().expect("valid");
        // 5h * 10 people * 30%
        assert!(close(result.weekly_hours_saved, 15.0));
        assert!(close(result.annual_hours_saved, 780.0));
        assert!(close(result.annual_value, 39_000.0));
        assert!(close(result.annual_tool_cost, 3_600.0));
        assert!(close(result.net_annual_benefit, 35_400.0));
        assert!(close(result.first_year_roi_percent.expect("has cost"), 983.333_333));
        assert!(close(result.payback_months.expect("pays back"), 0.0));
    }

    #[test]
    fn test_payback_with_implementation_cost() {
        let inputs = RoiInputs {
            implementation_cost: 11_800.0,
            ..RoiInputs::default()
        };
        let result = inputs.calculate().expect("valid");
        // net monthly benefit is 2950
        assert!(close(result.payback_months.expect("pays back"), 4.0));
    }

    #[test]
    fn test_no_payback_when_costs_exceed_savings() {
        let inputs = RoiInputs {
            time_saved_percent: 1.0,
            monthly_tool_cost_per_user: 100.0,
            ..RoiInputs::default()
        };
        let result = inputs.calculate().expect("valid");
        assert!(result.net_annual_benefit < 0.0);
        assert_eq!(result.payback_months, None);
        assert!(result.to_markdown().contains("| Payback period | never |"));
    }

    #[test]
    fn test_free_tool_has_no_roi_percentage() {
        let inputs = RoiInputs {
            monthly_tool_cost_per_user: 0.0,
            ..RoiInputs::default()
        };
        let result = inputs.calculate().expect("valid");
        assert_eq!(result.first_year_roi_percent, None);
        assert!(result.to_markdown().contains("| First-year ROI | n/a |"));
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        for inputs in [
            RoiInputs { hours_per_week: -1.0, ..RoiInputs::default() },
            RoiInputs { hours_per_week: 200.0, ..RoiInputs::default() },
            RoiInputs { time_saved_percent: 120.0, ..RoiInputs::default() },
            RoiInputs { hourly_cost: f64::NAN, ..RoiInputs::default() },
        ] {
            assert!(matches!(inputs.calculate(), Err(PlaybookError::Validation(_))));
        }
    }
}
