//! Statement parsers and format detection.

pub mod csv_statement;
pub mod ofx;

use anyhow::Result;

use crate::types::StatementRecord;

/// Supported statement file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementFormat {
    Ofx,
    Csv,
}

/// Guess the format from content. OFX files announce themselves with either
/// the SGML header or an `<OFX>` element; everything else is treated as CSV.
pub fn detect_format(text: &str) -> StatementFormat {
    let head: String = text.chars().take(512).collect::<String>().to_uppercase();
    if head.contains("OFXHEADER") || head.contains("<OFX>") {
        StatementFormat::Ofx
    } else {
        StatementFormat::Csv
    }
}

/// Detect the format and parse with the matching parser.
pub fn parse_statement(text: &str) -> Result<Vec<StatementRecord>> {
    match detect_format(text) {
        StatementFormat::Ofx => ofx::parse_ofx(text),
        StatementFormat::Csv => csv_statement::parse_csv_statement(text),
    }
}
