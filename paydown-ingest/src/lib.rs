//! paydown-ingest: bank statement parsing (CSV/OFX) and auto-categorization

pub mod categorizer;
pub mod parsers;
pub mod types;

pub use categorizer::AutoCategorizer;
pub use parsers::{StatementFormat, detect_format, parse_statement};
pub use types::StatementRecord;
