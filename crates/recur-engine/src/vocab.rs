//! Word tables for the recurrence grammar.
//!
//! Everything here is a compile-time constant; lookups are linear scans over
//! short slices.

use chrono::Weekday;

use crate::recurrence::{Period, Recurrence};

/// Lead words that open every non-adverb phrase ("every day", "ev mon").
pub const EVERY: &[&str] = &["every", "ev"];

/// Stand-alone adverbs accepted without a lead word.
pub const ADVERBS: &[(&str, Period)] = &[
    ("daily", Period::Day),
    ("weekly", Period::Week),
    ("monthly", Period::Month),
    ("yearly", Period::Year),
];

/// Period names in singular form. A trailing `s` is also accepted.
pub const PERIODS: &[(&str, Period)] = &[
    ("hour", Period::Hour),
    ("day", Period::Day),
    ("week", Period::Week),
    ("month", Period::Month),
    ("year", Period::Year),
];

/// Every spelling of each weekday the grammar recognizes, from the
/// two-letter form up to the full name.
pub const WEEKDAYS: &[(Weekday, &[&str])] = &[
    (Weekday::Mon, &["mo", "mon", "monday"]),
    (Weekday::Tue, &["tu", "tue", "tues", "tuesday"]),
    (Weekday::Wed, &["we", "wed", "weds", "wednes", "wednesday"]),
    (Weekday::Thu, &["th", "thu", "thurs", "thursday"]),
    (Weekday::Fri, &["fr", "fri", "friday"]),
    (Weekday::Sat, &["sa", "sat", "saturday"]),
    (Weekday::Sun, &["su", "sun", "sunday"]),
];

/// Fixed labels that follow a lead word, with their cadence. Morning and
/// evening are a daily cadence; the hour lives in the due date.
pub const LABELS: &[(&str, Recurrence)] = &[
    ("morning", Recurrence::Simple(Period::Day)),
    ("evening", Recurrence::Simple(Period::Day)),
    ("weekday", Recurrence::Weekdays),
    ("workday", Recurrence::Weekdays),
    ("last day", Recurrence::Monthly),
];

/// Suffixes that may decorate a cycle count ("2nd", "3rd").
pub const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

/// The word standing in for a count of two.
pub const OTHER: &str = "other";

/// Named times that may follow `at` ("every day at noon").
pub const NAMED_TIMES: &[&str] = &[
    "morning",
    "noon",
    "afternoon",
    "evening",
    "night",
    "midnight",
];

/// Whether `token` is a lead word.
pub fn is_every(token: &str) -> bool {
    EVERY.contains(&token)
}

/// Parse a stand-alone adverb: "daily" → `Period::Day`.
pub fn parse_adverb(token: &str) -> Option<Period> {
    ADVERBS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, period)| *period)
}

/// Parse a period name, singular or plural: "day" / "days" → `Period::Day`.
pub fn parse_period(token: &str) -> Option<Period> {
    let singular = token.strip_suffix('s').unwrap_or(token);
    PERIODS
        .iter()
        .find(|(word, _)| *word == singular)
        .map(|(_, period)| *period)
}

/// Parse any recognized weekday spelling.
pub fn parse_weekday(token: &str) -> Option<Weekday> {
    WEEKDAYS
        .iter()
        .find(|(_, forms)| forms.contains(&token))
        .map(|(weekday, _)| *weekday)
}

/// Look up a fixed label ("weekday", "last day").
pub fn parse_label(label: &str) -> Option<Recurrence> {
    LABELS
        .iter()
        .find(|(word, _)| *word == label)
        .map(|(_, recurrence)| *recurrence)
}

/// Split a cycle token into its digits, dropping an ordinal suffix.
/// `"3rd"` → `"3"`, `"rd"` → `None`, `"3x"` → `None`.
fn cycle_digits(token: &str) -> Option<&str> {
    let digits = ORDINAL_SUFFIXES
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .unwrap_or(token);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

/// Parse a number with an optional ordinal suffix: `"24th"` → 24.
/// Numbers too large for `u64` do not parse.
pub fn parse_count(token: &str) -> Option<u64> {
    cycle_digits(token)?.parse().ok()
}

/// Parse a cycle token to a count: a [`parse_count`] number, or `"other"`
/// for 2.
pub fn parse_cycles(token: &str) -> Option<u64> {
    if token == OTHER {
        return Some(2);
    }
    parse_count(token)
}

/// Whether `s` reads as a time of day: a named time or anything that starts
/// with a digit ("7", "19:00", "9.30", "5 pm"). The clock value itself is
/// not checked.
pub fn looks_like_time(s: &str) -> bool {
    NAMED_TIMES.contains(&s) || s.starts_with(|c: char| c.is_ascii_digit())
}
