//! Duplicate detection for incoming statement imports.
//!
//! A new transaction is a duplicate when any stored transaction of the same
//! kind sits within one calendar day, matches the amount to the cent, and has
//! a description similarity above 0.80. The stored window is fetched through
//! the `TransactionStore` collaborator; if that fetch fails the import is not
//! blocked — everything passes through as unique and the failure is logged.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use paydown_core::time::days_between;
use paydown_core::transaction::Transaction;

use crate::similarity::similarity;

/// How far back the existing-transaction window reaches.
pub const WINDOW_DAYS: i64 = 90;

/// Read-side collaborator supplying previously stored transactions.
pub trait TransactionStore {
    /// Fetch all income and expense records dated on or after `since`.
    /// Ordering is irrelevant to the detector.
    fn fetch_transactions(
        &self,
        user_id: &str,
        since: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Transaction>>> + Send;
}

/// A transaction tagged with its classification. No transaction is ever
/// dropped: every input ends up in exactly one of the two report lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlaggedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub is_duplicate: bool,
}

/// Result of classifying one import batch. Both lists preserve the relative
/// order of the input batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DedupeReport {
    pub duplicates: Vec<FlaggedTransaction>,
    pub unique: Vec<FlaggedTransaction>,
}

impl DedupeReport {
    pub fn total(&self) -> usize {
        self.duplicates.len() + self.unique.len()
    }
}

/// Detector with its matching thresholds. Holds no cross-call state beyond
/// the store handle; safe to share across concurrent imports.
#[derive(Debug, Clone)]
pub struct DuplicateDetector<S: TransactionStore> {
    store: S,
    date_tolerance_days: i64,
    amount_tolerance: f64,
    similarity_threshold: f64,
    window_days: i64,
}

impl<S: TransactionStore> DuplicateDetector<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            date_tolerance_days: 1,
            amount_tolerance: 0.01,
            similarity_threshold: 0.80,
            window_days: WINDOW_DAYS,
        }
    }

    /// Classify an import batch against the stored window ending at `now`.
    ///
    /// Never fails: a fetch error degrades to "no duplicates" so the import
    /// can proceed. `duplicates.len() + unique.len()` always equals the input
    /// length and both lists keep input order.
    pub async fn find_duplicates(
        &self,
        user_id: &str,
        new_transactions: Vec<Transaction>,
        now: NaiveDate,
    ) -> DedupeReport {
        if new_transactions.is_empty() {
            return DedupeReport::default();
        }

        let since = now - Duration::days(self.window_days);
        let existing = match self.store.fetch_transactions(user_id, since).await {
            Ok(existing) => existing,
            Err(err) => {
                // Fail open: a broken window fetch must not block the import.
                warn!(error = %err, user_id, "transaction window fetch failed, treating batch as unique");
                return DedupeReport {
                    duplicates: Vec::new(),
                    unique: new_transactions
                        .into_iter()
                        .map(|transaction| FlaggedTransaction {
                            transaction,
                            is_duplicate: false,
                        })
                        .collect(),
                };
            }
        };

        let mut report = DedupeReport::default();
        for transaction in new_transactions {
            let is_duplicate = existing.iter().any(|e| self.matches(&transaction, e));
            let flagged = FlaggedTransaction {
                transaction,
                is_duplicate,
            };
            if is_duplicate {
                report.duplicates.push(flagged);
            } else {
                report.unique.push(flagged);
            }
        }
        report
    }

    fn matches(&self, incoming: &Transaction, existing: &Transaction) -> bool {
        incoming.kind == existing.kind
            && days_between(incoming.date, existing.date) <= self.date_tolerance_days
            && (incoming.amount - existing.amount).abs() < self.amount_tolerance
            && similarity(&incoming.description, &existing.description)
                > self.similarity_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paydown_core::transaction::TransactionType;

    struct FixedStore {
        existing: Vec<Transaction>,
    }

    impl TransactionStore for FixedStore {
        async fn fetch_transactions(
            &self,
            _user_id: &str,
            _since: NaiveDate,
        ) -> Result<Vec<Transaction>> {
            Ok(self.existing.clone())
        }
    }

    struct BrokenStore;

    impl TransactionStore for BrokenStore {
        async fn fetch_transactions(
            &self,
            _user_id: &str,
            _since: NaiveDate,
        ) -> Result<Vec<Transaction>> {
            anyhow::bail!("store unavailable")
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, day).unwrap()
    }

    fn tx(day: u32, description: &str, amount: f64, kind: TransactionType) -> Transaction {
        Transaction::new(d(day), description, amount, kind)
    }

    #[tokio::test]
    async fn test_exact_match_is_duplicate() {
        let existing = vec![tx(10, "UBER EATS SF", 32.50, TransactionType::Expense)];
        let detector = DuplicateDetector::new(FixedStore { existing });

        let batch = vec![tx(10, "UBER EATS SF", 32.50, TransactionType::Expense)];
        let report = detector.find_duplicates("u-1", batch, d(15)).await;
        assert_eq!(report.duplicates.len(), 1);
        assert!(report.unique.is_empty());
        assert!(report.duplicates[0].is_duplicate);
    }

    #[tokio::test]
    async fn test_one_day_window_inclusive() {
        let existing = vec![tx(10, "SPOTIFY", 9.99, TransactionType::Expense)];
        let detector = DuplicateDetector::new(FixedStore { existing });

        let batch = vec![
            tx(9, "SPOTIFY", 9.99, TransactionType::Expense),
            tx(11, "SPOTIFY", 9.99, TransactionType::Expense),
            tx(12, "SPOTIFY", 9.99, TransactionType::Expense),
        ];
        let report = detector.find_duplicates("u-1", batch, d(15)).await;
        assert_eq!(report.duplicates.len(), 2);
        assert_eq!(report.unique.len(), 1);
        assert_eq!(report.unique[0].transaction.date, d(12));
    }

    #[tokio::test]
    async fn test_amount_tolerance() {
        let existing = vec![tx(10, "GAS STATION", 40.00, TransactionType::Expense)];
        let detector = DuplicateDetector::new(FixedStore { existing });

        let batch = vec![
            tx(10, "GAS STATION", 40.005, TransactionType::Expense),
            tx(10, "GAS STATION", 40.02, TransactionType::Expense),
        ];
        let report = detector.find_duplicates("u-1", batch, d(15)).await;
        // Difference must be strictly below one cent.
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.unique.len(), 1);
    }

    #[tokio::test]
    async fn test_types_never_cross_match() {
        let existing = vec![tx(10, "PAYPAL TRANSFER", 120.0, TransactionType::Income)];
        let detector = DuplicateDetector::new(FixedStore { existing });

        let batch = vec![tx(10, "PAYPAL TRANSFER", 120.0, TransactionType::Expense)];
        let report = detector.find_duplicates("u-1", batch, d(15)).await;
        assert!(report.duplicates.is_empty());
        assert_eq!(report.unique.len(), 1);
    }

    #[tokio::test]
    async fn test_fuzzy_description_threshold() {
        let existing = vec![tx(10, "AMAZON MKTPLACE PMTS", 25.0, TransactionType::Expense)];
        let detector = DuplicateDetector::new(FixedStore { existing });

        let batch = vec![
            // One edit apart: similar enough.
            tx(10, "AMAZON MKTPLACE PMT", 25.0, TransactionType::Expense),
            // A different merchant entirely.
            tx(10, "WALMART SUPERCENTER", 25.0, TransactionType::Expense),
        ];
        let report = detector.find_duplicates("u-1", batch, d(15)).await;
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.unique.len(), 1);
        assert_eq!(
            report.unique[0].transaction.description,
            "WALMART SUPERCENTER"
        );
    }

    #[tokio::test]
    async fn test_empty_description_never_matches() {
        let existing = vec![tx(10, "", 25.0, TransactionType::Expense)];
        let detector = DuplicateDetector::new(FixedStore { existing });

        let batch = vec![tx(10, "SOMETHING", 25.0, TransactionType::Expense)];
        let report = detector.find_duplicates("u-1", batch, d(15)).await;
        assert!(report.duplicates.is_empty());
    }

    #[tokio::test]
    async fn test_fail_open_on_fetch_error() {
        let detector = DuplicateDetector::new(BrokenStore);
        let batch = vec![
            tx(10, "UBER EATS SF", 32.50, TransactionType::Expense),
            tx(11, "PAYROLL", 2500.0, TransactionType::Income),
        ];
        let report = detector.find_duplicates("u-1", batch, d(15)).await;
        assert!(report.duplicates.is_empty());
        assert_eq!(report.unique.len(), 2);
        assert!(report.unique.iter().all(|f| !f.is_duplicate));
    }

    #[tokio::test]
    async fn test_output_order_and_completeness() {
        let existing = vec![
            tx(10, "COFFEE SHOP", 5.0, TransactionType::Expense),
            tx(12, "BOOKSTORE", 18.0, TransactionType::Expense),
        ];
        let detector = DuplicateDetector::new(FixedStore { existing });

        let batch = vec![
            tx(20, "RENT", 1200.0, TransactionType::Expense),
            tx(10, "COFFEE SHOP", 5.0, TransactionType::Expense),
            tx(21, "SALARY", 3000.0, TransactionType::Income),
            tx(12, "BOOKSTORE", 18.0, TransactionType::Expense),
        ];
        let report = detector.find_duplicates("u-1", batch.clone(), d(25)).await;
        assert_eq!(report.total(), batch.len());

        let unique: Vec<&str> = report
            .unique
            .iter()
            .map(|f| f.transaction.description.as_str())
            .collect();
        assert_eq!(unique, ["RENT", "SALARY"]);
        let dups: Vec<&str> = report
            .duplicates
            .iter()
            .map(|f| f.transaction.description.as_str())
            .collect();
        assert_eq!(dups, ["COFFEE SHOP", "BOOKSTORE"]);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let detector = DuplicateDetector::new(FixedStore { existing: vec![] });
        let report = detector.find_duplicates("u-1", vec![], d(15)).await;
        assert_eq!(report.total(), 0);
    }
}
