use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::emptiable::{Emptiable, is_none_or_empty};
use crate::error::ModelError;

/// Valid lengths for an HL7 timestamp, from year precision (`YYYY`) down to
/// second precision (`YYYYMMDDHHMMSS`).
const VALID_LENGTHS: &[usize] = &[4, 6, 8, 10, 12, 14];

/// A point-in-time value in HL7 timestamp form (`YYYY[MM[DD[HH[MM[SS]]]]]`),
/// preserving whatever precision the submitter supplied.
///
/// A blank value is permitted and is empty under [`Emptiable`]; the
/// normalization pass collapses it to absence. Non-blank values are validated
/// for digit content and precision length at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateValue(String);

impl DateValue {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self(String::new()));
        }
        if !trimmed.chars().all(|ch| ch.is_ascii_digit())
            || !VALID_LENGTHS.contains(&trimmed.len())
        {
            return Err(ModelError::InvalidTimestamp(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The current UTC time at minute precision, used when stamping defaults.
    pub fn now_minutes() -> Self {
        Self(Utc::now().format("%Y%m%d%H%M").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DateValue {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DateValue> for String {
    fn from(value: DateValue) -> Self {
        value.0
    }
}

impl Emptiable for DateValue {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An interval with optional low/high bounds; service events and encounters
/// may carry either bound alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateRange {
    pub low: Option<DateValue>,
    pub high: Option<DateValue>,
}

impl DateRange {
    pub fn new(low: Option<DateValue>, high: Option<DateValue>) -> Self {
        Self { low, high }
    }
}

impl Emptiable for DateRange {
    fn is_empty(&self) -> bool {
        is_none_or_empty(&self.low) && is_none_or_empty(&self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_precisions() {
        for value in ["2015", "201506", "20150610", "201506101430", "20150610143059"] {
            assert!(DateValue::new(value).is_ok(), "rejected {value}");
        }
    }

    #[test]
    fn rejects_bad_values() {
        for value in ["2015-06-10", "20150", "abcd", "20150610143"] {
            assert!(DateValue::new(value).is_err(), "accepted {value}");
        }
    }

    #[test]
    fn blank_is_allowed_and_empty() {
        let value = DateValue::new("  ").expect("blank timestamp");
        assert!(value.is_empty());
        assert!(!DateValue::new("2015").expect("year").is_empty());
    }

    #[test]
    fn now_is_minute_precision() {
        assert_eq!(DateValue::now_minutes().as_str().len(), 12);
    }

    #[test]
    fn range_empty_only_when_both_bounds_absent() {
        assert!(DateRange::default().is_empty());
        let range = DateRange::new(Some(DateValue::new("2015").expect("year")), None);
        assert!(!range.is_empty());
    }
}
