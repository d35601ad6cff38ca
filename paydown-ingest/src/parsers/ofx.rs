//! Minimal OFX 1.x (SGML) statement parser.
//!
//! Only the STMTTRN list is read: DTPOSTED, TRNAMT, and NAME/MEMO. OFX 1.x
//! leaf elements have no closing tags, so values are regex-extracted up to
//! the next angle bracket.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

use crate::types::StatementRecord;

/// Parse OFX text into normalized records. The colon-header preamble before
/// `<OFX>` is ignored.
pub fn parse_ofx(text: &str) -> Result<Vec<StatementRecord>> {
    let body = extract_ofx_body(text);

    let block_re = Regex::new(r"(?is)<STMTTRN>(.*?)</STMTTRN>")?;
    let mut records = Vec::new();

    for caps in block_re.captures_iter(body) {
        let block = &caps[1];

        let Some(date_raw) = tag_value(block, "DTPOSTED") else {
            continue;
        };
        let date = parse_ofx_date(&date_raw)
            .with_context(|| format!("invalid DTPOSTED value '{date_raw}'"))?;

        let Some(amount_raw) = tag_value(block, "TRNAMT") else {
            continue;
        };
        let amount: f64 = amount_raw
            .parse()
            .with_context(|| format!("invalid TRNAMT value '{amount_raw}'"))?;

        let description = tag_value(block, "NAME")
            .or_else(|| tag_value(block, "MEMO"))
            .unwrap_or_default();

        records.push(StatementRecord {
            date,
            description,
            amount,
            raw_category: tag_value(block, "TRNTYPE"),
        });
    }

    Ok(records)
}

/// Skip the OFXHEADER key:value preamble, if present.
fn extract_ofx_body(text: &str) -> &str {
    match text.find("<OFX>") {
        Some(i) => &text[i..],
        None => text,
    }
}

/// Value of an SGML leaf tag: everything after `<TAG>` up to the next `<`
/// or end of line.
fn tag_value(block: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let start = block.find(&open)? + open.len();
    let rest = &block[start..];
    let end = rest
        .find(|c| c == '<' || c == '\r' || c == '\n')
        .unwrap_or(rest.len());
    let value = rest[..end].trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// DTPOSTED carries YYYYMMDD, optionally followed by time and a timezone
/// suffix. Only the date part matters here.
fn parse_ofx_date(raw: &str) -> Option<NaiveDate> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() < 8 {
        return None;
    }
    NaiveDate::parse_from_str(&digits[..8], "%Y%m%d").ok()
}
