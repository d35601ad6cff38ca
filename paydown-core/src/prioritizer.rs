//! Snowball/avalanche debt ordering.
//!
//! Both sorts are pure: they filter to active debts, order them, and hand back
//! fresh `PrioritizedDebt` values with contiguous 1-based ranks. Persisting
//! the ranks is the caller's job.

use serde::{Deserialize, Serialize};

use crate::debt::{Debt, PayoffMethod};

/// A debt tagged with its payoff rank. Recomputed whenever the method changes;
/// never a source of truth on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrioritizedDebt {
    pub debt: Debt,
    /// 1-based rank, contiguous across the returned list
    pub priority: u32,
    pub method: PayoffMethod,
}

/// Order active debts smallest balance first.
pub fn sort_snowball(debts: &[Debt]) -> Vec<PrioritizedDebt> {
    let mut active: Vec<Debt> = debts.iter().filter(|d| d.is_active()).cloned().collect();
    // sort_by is stable: ties keep input order.
    active.sort_by(|a, b| a.remaining_amount.total_cmp(&b.remaining_amount));
    rank(active, PayoffMethod::Snowball)
}

/// Order active debts highest interest rate first.
pub fn sort_avalanche(debts: &[Debt]) -> Vec<PrioritizedDebt> {
    let mut active: Vec<Debt> = debts.iter().filter(|d| d.is_active()).cloned().collect();
    active.sort_by(|a, b| b.interest_rate.total_cmp(&a.interest_rate));
    rank(active, PayoffMethod::Avalanche)
}

/// Order active debts by the given method.
pub fn prioritize(debts: &[Debt], method: PayoffMethod) -> Vec<PrioritizedDebt> {
    match method {
        PayoffMethod::Snowball => sort_snowball(debts),
        PayoffMethod::Avalanche => sort_avalanche(debts),
    }
}

/// Insight figure: Σ remaining × annual rate / 100 over active debts.
///
/// Deliberately not divided by 12. The downstream insight thresholds are
/// calibrated to this annual-rate scale even though the UI labels it
/// "monthly"; keep the formula as-is.
pub fn calculate_monthly_interest(debts: &[Debt]) -> f64 {
    debts
        .iter()
        .filter(|d| d.is_active())
        .map(|d| d.remaining_amount * d.interest_rate / 100.0)
        .sum()
}

fn rank(ordered: Vec<Debt>, method: PayoffMethod) -> Vec<PrioritizedDebt> {
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, debt)| PrioritizedDebt {
            debt,
            priority: i as u32 + 1,
            method,
        })
        .collect()
}
