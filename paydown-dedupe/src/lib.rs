//! paydown-dedupe: fuzzy duplicate detection for statement imports

pub mod detector;
pub mod similarity;

pub use detector::{
    DedupeReport, DuplicateDetector, FlaggedTransaction, TransactionStore, WINDOW_DAYS,
};
pub use similarity::{levenshtein, similarity};
