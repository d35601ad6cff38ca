//! Transaction value type used by duplicate detection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a transaction. Duplicate detection never compares across
/// different kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

/// A single income or expense record. Amounts are absolute; direction lives
/// in `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Absolute amount, >= 0
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        kind: TransactionType,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            kind,
        }
    }
}
