//! Month-by-month debt amortization.
//!
//! `simulate` walks a debt forward one month at a time: accrue interest on the
//! outstanding balance, apply the payment, repeat until payoff or until the
//! horizon is hit. The last month pays exactly the residual plus its interest
//! so the schedule never overshoots.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use crate::time::add_months;

/// Default simulation ceiling: 30 years of monthly steps.
pub const DEFAULT_HORIZON_MONTHS: u32 = 360;

/// One month of an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmortizationStep {
    /// 1-indexed month number, sequential with no gaps
    pub month: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Balance after this month's payment, never negative
    pub remaining: f64,
}

/// Outcome of a simulation. Ephemeral; the input `Debt` is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationResult {
    /// Months simulated; equals `history.len()`
    pub months: u32,
    pub total_interest: f64,
    /// Initial balance plus total interest
    pub total_paid: f64,
    /// True when the horizon was hit with a balance still outstanding.
    /// The residual is in `history.last().remaining`.
    pub horizon_reached: bool,
    pub history: Vec<AmortizationStep>,
}

impl SimulationResult {
    /// Balance left after the last simulated month (0 on normal payoff).
    pub fn residual(&self) -> f64 {
        self.history.last().map(|s| s.remaining).unwrap_or(0.0)
    }
}

/// One entry of a `compare_scenarios` run. Savings are relative to the first
/// scenario in the requested list, which always reports exactly 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioSummary {
    pub extra_payment: f64,
    pub months: u32,
    pub total_interest: f64,
    pub interest_saved: f64,
    pub months_saved: i64,
}

/// Signed differences between two payment plans, current minus new.
/// Positive values mean the new plan is better.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsEstimate {
    pub interest_savings: f64,
    pub months_saved: i64,
    pub current_months: u32,
    pub new_months: u32,
}

/// Amortization engine. Stateless apart from the configurable horizon.
#[derive(Debug, Clone)]
pub struct AmortizationSimulator {
    max_horizon_months: u32,
}

impl Default for AmortizationSimulator {
    fn default() -> Self {
        Self {
            max_horizon_months: DEFAULT_HORIZON_MONTHS,
        }
    }
}

impl AmortizationSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the 360-month ceiling.
    pub fn with_horizon(max_horizon_months: u32) -> Self {
        Self { max_horizon_months }
    }

    /// Simulate payoff of `debt` with an optional extra monthly payment.
    ///
    /// Rejects inputs that can never amortize (effective payment <= 0) and
    /// negative balances/extras. A debt that cannot be paid off within the
    /// horizon is not an error: the result comes back with
    /// `horizon_reached == true` and a non-zero residual.
    pub fn simulate(&self, debt: &Debt, extra_payment: f64) -> Result<SimulationResult> {
        if debt.remaining_amount < 0.0 {
            bail!("negative remaining amount: {}", debt.remaining_amount);
        }
        if extra_payment < 0.0 {
            bail!("negative extra payment: {extra_payment}");
        }
        let monthly_payment = debt.installment_value + extra_payment;
        if monthly_payment <= 0.0 {
            bail!(
                "monthly payment {monthly_payment:.2} can never amortize debt '{}'",
                debt.name
            );
        }

        let monthly_rate = debt.monthly_rate();
        let mut remaining = debt.remaining_amount;
        let mut total_interest = 0.0;
        let mut history = Vec::new();
        let mut month = 0u32;

        while remaining > 0.0 && month < self.max_horizon_months {
            month += 1;
            let interest = remaining * monthly_rate;

            if remaining < monthly_payment {
                // Residual smaller than a full installment: close out exactly.
                history.push(AmortizationStep {
                    month,
                    payment: remaining + interest,
                    interest,
                    principal: remaining,
                    remaining: 0.0,
                });
                total_interest += interest;
                remaining = 0.0;
                break;
            }

            let principal = monthly_payment - interest;
            remaining -= principal;
            total_interest += interest;
            history.push(AmortizationStep {
                month,
                payment: monthly_payment,
                interest,
                principal,
                remaining: remaining.max(0.0),
            });
        }

        Ok(SimulationResult {
            months: month,
            total_interest,
            total_paid: debt.remaining_amount + total_interest,
            horizon_reached: remaining > 0.0,
            history,
        })
    }

    /// Re-run the simulation for each extra amount and report savings against
    /// the first scenario. An empty list yields an empty result.
    pub fn compare_scenarios(
        &self,
        debt: &Debt,
        extra_amounts: &[f64],
    ) -> Result<Vec<ScenarioSummary>> {
        let Some(&base_extra) = extra_amounts.first() else {
            return Ok(Vec::new());
        };
        let base = self.simulate(debt, base_extra)?;

        let mut scenarios = Vec::with_capacity(extra_amounts.len());
        for (i, &extra) in extra_amounts.iter().enumerate() {
            let run = self.simulate(debt, extra)?;
            let (interest_saved, months_saved) = if i == 0 {
                (0.0, 0)
            } else {
                (
                    base.total_interest - run.total_interest,
                    i64::from(base.months) - i64::from(run.months),
                )
            };
            scenarios.push(ScenarioSummary {
                extra_payment: extra,
                months: run.months,
                total_interest: run.total_interest,
                interest_saved,
                months_saved,
            });
        }
        Ok(scenarios)
    }

    /// Compare the current extra payment against a proposed one.
    pub fn calculate_savings(
        &self,
        debt: &Debt,
        current_extra: f64,
        new_extra: f64,
    ) -> Result<SavingsEstimate> {
        let current = self.simulate(debt, current_extra)?;
        let new = self.simulate(debt, new_extra)?;
        Ok(SavingsEstimate {
            interest_savings: current.total_interest - new.total_interest,
            months_saved: i64::from(current.months) - i64::from(new.months),
            current_months: current.months,
            new_months: new.months,
        })
    }
}

/// Projected payoff date: `from` plus `months` calendar months.
pub fn payoff_date_from(from: NaiveDate, months: u32) -> Result<NaiveDate> {
    add_months(from, months)
}

/// Projected payoff date counted from today.
pub fn payoff_date(months: u32) -> Result<NaiveDate> {
    payoff_date_from(chrono::Utc::now().date_naive(), months)
}
