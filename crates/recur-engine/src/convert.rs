//! Conversions for the task fields that travel alongside the recurrence.
//!
//! The source store numbers priorities 1–4, stamps creation times in an
//! RFC 2822-like format and writes due dates as bare dates or datetimes;
//! the destination store wants `L`/`M`/`H`, RFC 3339 and quoted values with
//! whitespace. All functions are pure.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};

use crate::error::ConvertError;
use crate::parser::DueRecord;

/// Format of the source store's creation timestamps,
/// e.g. `Fri 26 Sep 2014 08:25:05 +0000`.
const ENTRY_DATE_FORMAT: &str = "%a %d %b %Y %H:%M:%S %z";

/// Floating (zone-less) datetime format used for due dates.
const FLOATING_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ── Priority ────────────────────────────────────────────────────────────────

/// Destination priority. The source's lowest level means "unset" and has no
/// counterpart here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn code(self) -> &'static str {
        match self {
            Priority::Low => "L",
            Priority::Medium => "M",
            Priority::High => "H",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Map a source priority (1–4) to a destination priority.
///
/// 1 is the source default and maps to `None`.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidPriority`] outside 1–4.
pub fn parse_priority(priority: u8) -> Result<Option<Priority>, ConvertError> {
    match priority {
        1 => Ok(None),
        2 => Ok(Some(Priority::Low)),
        3 => Ok(Some(Priority::Medium)),
        4 => Ok(Some(Priority::High)),
        other => Err(ConvertError::InvalidPriority(other.to_string())),
    }
}

// ── Dates ───────────────────────────────────────────────────────────────────

/// Convert a source creation timestamp to RFC 3339, keeping its offset.
///
/// Empty input yields `None`.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidDate`] if the timestamp is not in the
/// source format.
pub fn parse_entry_date(date: &str) -> Result<Option<String>, ConvertError> {
    let date = date.trim();
    if date.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_str(date, ENTRY_DATE_FORMAT)
        .map(|dt| Some(dt.to_rfc3339()))
        .map_err(|e| ConvertError::InvalidDate(format!("'{date}': {e}")))
}

/// Convert the date of a source due block.
///
/// - `YYYY-MM-DD` → midnight, floating: `YYYY-MM-DDT00:00:00`
/// - `YYYY-MM-DDTHH:MM:SS` → unchanged, floating
/// - RFC 3339 → UTC RFC 3339
///
/// A missing block or date yields `None`.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidDate`] for anything else.
pub fn parse_due_date(due: Option<&DueRecord>) -> Result<Option<String>, ConvertError> {
    let Some(date) = due.and_then(|d| d.date.as_deref()) else {
        return Ok(None);
    };
    let date = date.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Ok(Some(dt.with_timezone(&Utc).to_rfc3339()));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(date, FLOATING_FORMAT) {
        return Ok(Some(dt.format(FLOATING_FORMAT).to_string()));
    }
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(Some(midnight.format(FLOATING_FORMAT).to_string()));
        }
    }
    Err(ConvertError::InvalidDate(format!("'{date}'")))
}

// ── Strings ─────────────────────────────────────────────────────────────────

/// Wrap `value` in single quotes if it contains a space or tab.
pub fn quote_whitespace(value: &str) -> Cow<'_, str> {
    if value.contains([' ', '\t']) {
        Cow::Owned(format!("'{value}'"))
    } else {
        Cow::Borrowed(value)
    }
}

// ── Renames ─────────────────────────────────────────────────────────────────

/// A rename table for projects or tags, built from `SRC=DST` rules.
///
/// An empty `DST` removes the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Renames {
    map: HashMap<String, Option<String>>,
}

impl Renames {
    /// Build a table from `SRC=DST` rules. Later rules for the same `SRC`
    /// replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidMapping`] for a rule without `=`.
    pub fn from_rules<I, S>(rules: I) -> Result<Self, ConvertError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for rule in rules {
            let (src, dst) = parse_mapping(rule.as_ref())?;
            map.insert(src, dst);
        }
        Ok(Renames { map })
    }

    /// Translate `value`: the mapped value, `None` if mapped to removal,
    /// or `value` itself if unmapped.
    pub fn apply<'a>(&'a self, value: &'a str) -> Option<&'a str> {
        match self.map.get(value) {
            Some(mapped) => mapped.as_deref(),
            None => Some(value),
        }
    }
}

/// Split one `SRC=DST` rule. Only the first `=` separates; an empty `DST`
/// becomes `None`.
pub fn parse_mapping(rule: &str) -> Result<(String, Option<String>), ConvertError> {
    let (src, dst) = rule.split_once('=').ok_or_else(|| {
        ConvertError::InvalidMapping(format!("'{rule}' needs to be of the form SRC=DST"))
    })?;
    let dst = (!dst.is_empty()).then(|| dst.to_string());
    Ok((src.to_string(), dst))
}

// ── Tests ───────────────────────────────────────────────────────────────────
