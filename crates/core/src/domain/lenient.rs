//! Lenient field decoders for task objects produced by a language model.
//!
//! Values are accepted when their meaning is unambiguous (a numeric string for
//! a duration, a lone string where a list is expected) and rejected otherwise.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub(crate) fn task_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a non-empty task id, got {}",
            other
        ))),
    }
}

pub(crate) fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_date(&raw).map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// Parse a calendar date, taking the date part of a timestamp if one is given.
pub(crate) fn parse_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(timestamp.date_naive()));
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(timestamp.date()));
    }
    Err(format!("invalid date '{}', expected YYYY-MM-DD", raw))
}

pub(crate) fn optional_duration<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let days = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match days.and_then(|d| u32::try_from(d).ok()) {
        Some(days) if days >= 1 => Ok(Some(days)),
        _ => Err(de::Error::custom(
            "duration_days must be a positive whole number of days",
        )),
    }
}

pub(crate) fn optional_confidence<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let confidence = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match confidence {
        Some(c) if (0.0..=1.0).contains(&c) => Ok(Some(c)),
        _ => Err(de::Error::custom(
            "confidence must be a number between 0.0 and 1.0",
        )),
    }
}

pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// A list of strings, a single string, or null.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(non_blank(s).into_iter().collect()),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => non_blank(s).map(Ok),
                Value::Number(n) if n.is_u64() || n.is_i64() => Some(Ok(n.to_string())),
                other => Some(Err(de::Error::custom(format!(
                    "expected a string list entry, got {}",
                    other
                )))),
            })
            .collect(),
        other => Err(de::Error::custom(format!(
            "expected a list of strings, got {}",
            other
        ))),
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
