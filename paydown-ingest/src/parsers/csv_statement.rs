//! Generic CSV statement parser with heuristic column mapping.
//!
//! Banks disagree on header names and column order, so the parser first scans
//! for a header row it can map (date + amount columns by synonym, optionally
//! split debit/credit columns). Statements without a usable header fall back
//! to positional inference from the first data row.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use csv::StringRecord;

use crate::types::StatementRecord;

const DATE_HEADERS: &[&str] = &["date", "transaction date", "trans date", "posted date", "post date"];
const DESC_HEADERS: &[&str] = &["description", "memo", "payee", "details", "narrative", "name"];
const AMOUNT_HEADERS: &[&str] = &["amount", "value", "transaction amount"];
const DEBIT_HEADERS: &[&str] = &["debit", "withdrawal", "money out"];
const CREDIT_HEADERS: &[&str] = &["credit", "deposit", "money in"];
const CATEGORY_HEADERS: &[&str] = &["category", "type"];

/// Resolved column positions for one statement layout.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnMap {
    date: usize,
    description: usize,
    /// Single signed amount column, or split debit/credit columns
    amount: AmountColumns,
    category: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AmountColumns {
    Signed(usize),
    Split { debit: usize, credit: usize },
}

/// Parse CSV statement text into normalized records.
///
/// Rows that fail date or amount parsing are skipped, matching how banks pad
/// exports with balance/summary rows.
pub fn parse_csv_statement(text: &str) -> Result<Vec<StatementRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut columns: Option<ColumnMap> = None;
    let mut records = Vec::new();

    for result in rdr.records() {
        let record = result?;

        let Some(map) = &columns else {
            if let Some(map) = map_header(&record) {
                columns = Some(map);
            } else if let Some(map) = infer_columns(&record) {
                // Headerless export: infer from the first parseable data row
                // and keep the row itself.
                if let Some(rec) = parse_row(&record, &map) {
                    records.push(rec);
                }
                columns = Some(map);
            }
            continue;
        };

        if let Some(rec) = parse_row(&record, map) {
            records.push(rec);
        }
    }

    if columns.is_none() {
        bail!("could not detect statement columns in CSV input");
    }
    Ok(records)
}

fn parse_row(record: &StringRecord, map: &ColumnMap) -> Option<StatementRecord> {
    let date = parse_date(record.get(map.date)?.trim())?;
    let amount = match map.amount {
        AmountColumns::Signed(i) => parse_amount(record.get(i)?)?,
        AmountColumns::Split { debit, credit } => {
            let debit = record.get(debit).and_then(parse_amount).unwrap_or(0.0);
            let credit = record.get(credit).and_then(parse_amount).unwrap_or(0.0);
            credit - debit.abs()
        }
    };
    let description = record.get(map.description)?.trim().to_string();
    let raw_category = map
        .category
        .and_then(|i| record.get(i))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Some(StatementRecord {
        date,
        description,
        amount,
        raw_category,
    })
}

/// Try to interpret a record as a header row via column-name synonyms.
fn map_header(record: &StringRecord) -> Option<ColumnMap> {
    let names: Vec<String> = record.iter().map(|s| s.trim().to_lowercase()).collect();

    let find = |synonyms: &[&str]| names.iter().position(|n| synonyms.contains(&n.as_str()));

    let date = find(DATE_HEADERS)?;
    let description = find(DESC_HEADERS)?;
    let amount = if let Some(i) = find(AMOUNT_HEADERS) {
        AmountColumns::Signed(i)
    } else {
        AmountColumns::Split {
            debit: find(DEBIT_HEADERS)?,
            credit: find(CREDIT_HEADERS)?,
        }
    };

    Some(ColumnMap {
        date,
        description,
        amount,
        category: find(CATEGORY_HEADERS),
    })
}

/// Positional fallback for headerless exports: first date-like column is the
/// date, the rightmost numeric column is the amount, and the longest of the
/// remaining cells is the description.
fn infer_columns(record: &StringRecord) -> Option<ColumnMap> {
    let date = record
        .iter()
        .position(|cell| parse_date(cell.trim()).is_some())?;
    let amount = record
        .iter()
        .enumerate()
        .filter(|(i, cell)| *i != date && parse_amount(cell).is_some())
        .map(|(i, _)| i)
        .last()?;
    let description = record
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date && *i != amount)
        .max_by_key(|(_, cell)| cell.trim().len())
        .map(|(i, _)| i)?;

    Some(ColumnMap {
        date,
        description,
        amount: AmountColumns::Signed(amount),
        category: None,
    })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%m/%d/%y", "%Y/%m/%d"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse "1,234.56", "$-12.00", or "(12.00)" (accounting negative).
fn parse_amount(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let negative = s.starts_with('(') && s.ends_with(')');
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let value: f64 = cleaned.parse().ok()?;
    Some(if negative { -value.abs() } else { value })
}
