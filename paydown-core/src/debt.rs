//! Debt value types shared by the simulator and the prioritizer.

use serde::{Deserialize, Serialize};

/// Whether a debt still carries a balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebtStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "paid")]
    Paid,
}

/// Payoff ordering strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PayoffMethod {
    /// Smallest remaining balance first.
    #[serde(rename = "snowball")]
    Snowball,
    /// Highest interest rate first.
    #[serde(rename = "avalanche")]
    Avalanche,
}

/// A debt as persisted by the calling layer. The core only reads these;
/// projections are returned as fresh values, never written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debt {
    /// Unique identifier assigned by the store
    pub id: String,
    /// Human-readable label ("Car loan", "Visa", ...)
    pub name: String,
    /// Outstanding principal, >= 0
    pub remaining_amount: f64,
    /// Contractual monthly payment, > 0
    pub installment_value: f64,
    /// Nominal annual rate in percent (12.0 means 12%/year)
    pub interest_rate: f64,
    pub total_installments: u32,
    pub paid_installments: u32,
    pub status: DebtStatus,
}

impl Debt {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        remaining_amount: f64,
        installment_value: f64,
        interest_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            remaining_amount,
            installment_value,
            interest_rate,
            total_installments: 0,
            paid_installments: 0,
            status: if remaining_amount <= 0.0 {
                DebtStatus::Paid
            } else {
                DebtStatus::Active
            },
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == DebtStatus::Active
    }

    /// Simple monthly rate derived from the annual percent rate.
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 12.0 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_debt_status() {
        let d = Debt::new("d-1", "Car loan", 5000.0, 450.0, 18.0);
        assert_eq!(d.status, DebtStatus::Active);
        assert!(d.is_active());

        let settled = Debt::new("d-2", "Old card", 0.0, 100.0, 24.0);
        assert_eq!(settled.status, DebtStatus::Paid);
    }

    #[test]
    fn test_monthly_rate() {
        let d = Debt::new("d-1", "Visa", 1000.0, 100.0, 12.0);
        assert_eq!(d.monthly_rate(), 0.01);
    }

    #[test]
    fn test_serde_method_tags() {
        assert_eq!(
            serde_json::to_string(&PayoffMethod::Snowball).unwrap(),
            "\"snowball\""
        );
        assert_eq!(
            serde_json::to_string(&PayoffMethod::Avalanche).unwrap(),
            "\"avalanche\""
        );
    }
}
