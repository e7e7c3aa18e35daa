// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records and field extraction.

use serde_json::Value;

use crate::error::{ChartError, Result};

/// A data record: field name to JSON value.
pub type Record = serde_json::Map<String, Value>;

/// Reads `field` from `record` as a number.
///
/// Numbers, numeric strings and booleans convert; missing, `null` and anything else yield
/// `None`. Non-finite results are treated as missing.
pub fn field_f64(record: &Record, field: &str) -> Option<f64> {
    let v = match record.get(field)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    v.is_finite().then_some(v)
}

/// Returns `(min, max)` of the numeric `field` values, ignoring records without one.
///
/// Returns `None` if no record has a numeric value.
pub fn field_extent(records: &[Record], field: &str) -> Option<(f64, f64)> {
    extent(records.iter().map(|r| field_f64(r, field)))
}

/// Returns `(min, max)` of the present values.
pub fn extent(values: impl IntoIterator<Item = Option<f64>>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.into_iter().flatten() {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

/// Checks that every record has a numeric value for each of `fields`.
pub(crate) fn require_fields(records: &[Record], fields: &[&str]) -> Result<()> {
    for (row, record) in records.iter().enumerate() {
        for field in fields {
            if field_f64(record, field).is_none() {
                return Err(ChartError::MissingField {
                    row,
                    field: (*field).to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Counts records lacking a numeric value for any of `fields`.
pub(crate) fn count_degraded(records: &[Record], fields: &[&str]) -> usize {
    records
        .iter()
        .filter(|r| fields.iter().any(|f| field_f64(r, f).is_none()))
        .count()
}

/// Parses a JSON array of objects into records.
///
/// Non-object array items are skipped.
pub fn records_from_json(value: Value) -> Vec<Record> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        Value::Object(map) => vec![map],
        _ => Vec::new(),
    }
}
