//! paydown-core: debt amortization, payoff prioritization, and shared value types

pub mod debt;
pub mod prioritizer;
pub mod simulator;
pub mod time;
pub mod transaction;

pub use debt::{Debt, DebtStatus, PayoffMethod};
pub use prioritizer::{
    PrioritizedDebt, calculate_monthly_interest, prioritize, sort_avalanche, sort_snowball,
};
pub use simulator::{
    AmortizationSimulator, AmortizationStep, DEFAULT_HORIZON_MONTHS, SavingsEstimate,
    ScenarioSummary, SimulationResult, payoff_date, payoff_date_from,
};
pub use time::{add_months, days_between};
pub use transaction::{Transaction, TransactionType};
