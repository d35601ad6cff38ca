//! Normalized output of statement parsers (format-agnostic).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use paydown_core::transaction::{Transaction, TransactionType};

/// One row of a parsed bank statement, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    pub date: NaiveDate,
    pub description: String,
    /// Signed: negative means money out, positive means money in.
    pub amount: f64,
    /// Category string carried by the statement, if any
    pub raw_category: Option<String>,
}

impl StatementRecord {
    /// Classify by amount sign and produce the core transaction shape
    /// (absolute amount, explicit income/expense kind).
    pub fn to_transaction(&self) -> Transaction {
        let kind = if self.amount < 0.0 {
            TransactionType::Expense
        } else {
            TransactionType::Income
        };
        Transaction::new(self.date, self.description.clone(), self.amount.abs(), kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_classification() {
        let expense = StatementRecord {
            date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            description: "WHOLE FOODS".into(),
            amount: -54.30,
            raw_category: None,
        };
        let t = expense.to_transaction();
        assert_eq!(t.kind, TransactionType::Expense);
        assert_eq!(t.amount, 54.30);

        let income = StatementRecord {
            amount: 2500.0,
            ..expense
        };
        let t = income.to_transaction();
        assert_eq!(t.kind, TransactionType::Income);
        assert_eq!(t.amount, 2500.0);
    }
}
