//! Input boundary
//!
//! Turns bulk JSON payloads and single form entries into validated `DailyRecord`s before
//! anything reaches the engine:
//! - a payload must be a JSON array; anything else is rejected whole
//! - an item that is not an object, or lacks a valid `date`, rejects the whole import
//! - numeric fields are coerced leniently and fall back to 0
//! - duplicate dates resolve last-wins, in payload order

use crate::calendar::parse_day;
use crate::error::{JournalError, Result};
use crate::types::DailyRecord;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

const DATE_FIELD: &str = "date";
const VOICE_FIELD: &str = "voiceMinutes";
const MESSAGE_FIELD: &str = "messageCount";

/// Parse a bulk import payload into a deduplicated record list.
///
/// Surviving records keep the position of their last occurrence.
pub fn parse_import(json: &str) -> Result<Vec<DailyRecord>> {
    let items = parse_array(json)?;

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match record_from_value(item) {
            Ok(record) => records.push(record),
            Err(reason) => {
                tracing::warn!(index, %reason, "rejecting import");
                return Err(JournalError::MalformedRecord { index, reason });
            }
        }
    }

    let deduped = dedup_last_wins(records);
    if deduped.len() < items.len() {
        tracing::warn!(
            dropped = items.len() - deduped.len(),
            "duplicate dates in import resolved last-wins"
        );
    }
    tracing::info!(count = deduped.len(), "parsed import payload");
    Ok(deduped)
}

/// Parse one record object with the same rules as a bulk item
pub fn parse_record(json: &str) -> Result<DailyRecord> {
    let value: Value = serde_json::from_str(json)?;
    record_from_value(&value).map_err(|reason| JournalError::MalformedRecord { index: 0, reason })
}

/// A problem found in one payload item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportIssue {
    pub index: usize,
    pub date: Option<String>,
    pub problem: String,
}

/// Report per-item problems without importing anything.
///
/// Duplicate dates are reported against every occurrence but the last.
pub fn validate_import(json: &str) -> Result<Vec<ImportIssue>> {
    let items = parse_array(json)?;
    let mut issues = Vec::new();
    let mut last_index: HashMap<String, usize> = HashMap::new();

    for (index, item) in items.iter().enumerate() {
        match record_from_value(item) {
            Ok(record) => {
                last_index.insert(record.date, index);
            }
            Err(problem) => issues.push(ImportIssue {
                index,
                date: item.get(DATE_FIELD).and_then(Value::as_str).map(String::from),
                problem,
            }),
        }
    }

    for (index, item) in items.iter().enumerate() {
        if let Some(date) = item.get(DATE_FIELD).and_then(Value::as_str) {
            if last_index.get(date).is_some_and(|last| *last != index) {
                issues.push(ImportIssue {
                    index,
                    date: Some(date.to_string()),
                    problem: "duplicate date, superseded by a later item".to_string(),
                });
            }
        }
    }

    issues.sort_by_key(|i| i.index);
    Ok(issues)
}

/// Build a record from single-entry form fields.
///
/// Requires a date and at least one non-empty value; values that do not parse become 0.
pub fn parse_entry(date: &str, voice_minutes: &str, message_count: &str) -> Result<DailyRecord> {
    let date = date.trim();
    if date.is_empty() || (voice_minutes.trim().is_empty() && message_count.trim().is_empty()) {
        return Err(JournalError::EmptyEntry);
    }
    parse_day(date)?;
    Ok(DailyRecord::new(
        date,
        parse_count(voice_minutes),
        parse_count(message_count),
    ))
}

/// Lenient count parsing: leading integer digits, anything else (or negative) is 0
pub fn parse_count(input: &str) -> u32 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if negative || digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().map_or(u32::MAX, saturate)
}

fn parse_array(json: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => Ok(items),
        _ => Err(JournalError::InvalidPayload(
            "expected a JSON array of records".to_string(),
        )),
    }
}

fn record_from_value(item: &Value) -> std::result::Result<DailyRecord, String> {
    let object: &Map<String, Value> = item
        .as_object()
        .ok_or_else(|| "expected an object".to_string())?;

    let date = object
        .get(DATE_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing '{DATE_FIELD}'"))?;
    if parse_day(date).is_err() {
        return Err(format!("invalid date '{date}', expected YYYY-MM-DD"));
    }

    Ok(DailyRecord::new(
        date,
        coerce_count(object.get(VOICE_FIELD)),
        coerce_count(object.get(MESSAGE_FIELD)),
    ))
}

fn coerce_count(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                saturate(v)
            } else {
                // Negative integers and floats; floats truncate toward zero
                n.as_f64()
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .map_or(0, |f| f.trunc().min(f64::from(u32::MAX)) as u32)
            }
        }
        Some(Value::String(s)) => parse_count(s),
        _ => 0,
    }
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn dedup_last_wins(records: Vec<DailyRecord>) -> Vec<DailyRecord> {
    let last: HashMap<&str, usize> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (r.date.as_str(), i))
        .collect();
    let keep: Vec<bool> = records
        .iter()
        .enumerate()
        .map(|(i, r)| last[r.date.as_str()] == i)
        .collect();
    records
        .into_iter()
        .zip(keep)
        .filter_map(|(r, k)| k.then_some(r))
        .collect()
}
