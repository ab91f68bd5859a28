//! Recurrence-phrase parsing.
//!
//! Turns the free-text repeat phrase a user typed into the source store
//! ("every other day", "every 3rd monday", "ev tues at 17:00") into a
//! canonical [`Recurrence`] for the destination store's `recur` field.
//!
//! # Design Principle
//!
//! Parsing is total over the grammar below and never guesses: a phrase either
//! maps to exactly one recurrence or fails with
//! [`RecurError::UnsupportedRecurrence`]. Absent or blank input is not an
//! error; it means the task does not repeat, so every entry point returns
//! `Result<Option<Recurrence>>`.
//!
//! # Grammar
//!
//! The phrase is lowercased and its whitespace collapsed. A trailing
//! `at <time>` is dropped when `<time>` is a named time or starts with a
//! digit; the clock value is never checked. The rest is tried against these
//! matchers in order (`<every>` is `every` or `ev`):
//!
//! 1. **Single cycle**: `daily`, `weekly`, `monthly`, `yearly`,
//!    `<every> [1] <period>[s]` → `daily`, ...
//! 2. **Multi cycle**: `<every> (<n>[st|nd|rd|th] | other) <period>[s]` → `n periods`
//! 3. **Day of week**: `<every> [<n>[st|nd|rd|th] | other] <weekday>` → `weekly` / `n weeks`
//! 4. **Day of month**: `<every> <n>[st|nd|rd|th]` → `monthly`
//! 5. **Labels**: `<every> (morning | evening | weekday | workday | last day)`
//!
//! Day lists such as `every mon,tues,weds` are not part of the grammar and
//! are rejected.

use serde::{Deserialize, Serialize};

use crate::error::{RecurError, Result};
use crate::recurrence::Recurrence;
use crate::vocab;

// ── Structured source ───────────────────────────────────────────────────────

/// The due block of a source task.
///
/// Only `is_recurring` and `text` matter for recurrence. The source store
/// names the phrase field `string`, which is accepted as an alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueRecord {
    /// Whether the source store considers the task repeating.
    pub is_recurring: bool,
    /// The phrase as the user typed it. Non-recurring blocks may omit it.
    #[serde(default, alias = "string")]
    pub text: String,
    /// The next due date, `YYYY-MM-DD` or a datetime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

// ── Entry points ────────────────────────────────────────────────────────────

/// Parse a recurrence phrase.
///
/// # Returns
///
/// `Ok(None)` for empty or whitespace-only input, `Ok(Some(_))` when a
/// grammar matches.
///
/// # Errors
///
/// Returns [`RecurError::UnsupportedRecurrence`] carrying `phrase` unchanged
/// when no grammar matches.
///
/// # Examples
///
/// ```
/// use recur_engine::parser::parse_phrase;
///
/// let r = parse_phrase("every other day").unwrap().unwrap();
/// assert_eq!(r.to_string(), "2 days");
/// assert!(parse_phrase("   ").unwrap().is_none());
/// assert!(parse_phrase("every mon,tues").is_err());
/// ```
pub fn parse_phrase(phrase: &str) -> Result<Option<Recurrence>> {
    let normalized = normalize_phrase(phrase);
    if normalized.is_empty() {
        return Ok(None);
    }

    let body = strip_time_suffix(&normalized);
    let tokens: Vec<&str> = body.split(' ').collect();

    let recurrence = try_single_cycle(&tokens)
        .or_else(|| try_multi_cycle(&tokens))
        .or_else(|| try_day_of_week(&tokens))
        .or_else(|| try_day_of_month(&tokens))
        .or_else(|| try_label(&tokens))
        .ok_or_else(|| {
            tracing::debug!(phrase, normalized = %normalized, "unsupported recurrence");
            RecurError::UnsupportedRecurrence(phrase.to_string())
        })?;

    tracing::trace!(phrase, %recurrence, "parsed recurrence");
    Ok(Some(recurrence))
}

/// Parse an optional recurrence phrase. `None` means no recurrence.
pub fn parse_recur(phrase: Option<&str>) -> Result<Option<Recurrence>> {
    match phrase {
        Some(phrase) => parse_phrase(phrase),
        None => Ok(None),
    }
}

/// Parse the recurrence of a source task's due block.
///
/// A missing block, or one with `is_recurring == false`, yields `None`
/// without looking at the text.
pub fn parse_due(due: Option<&DueRecord>) -> Result<Option<Recurrence>> {
    match due {
        Some(due) if due.is_recurring => parse_phrase(&due.text),
        _ => Ok(None),
    }
}

/// Re-check a replacement phrase entered by a person.
///
/// Same grammar and error as [`parse_phrase`]; an empty answer clears the
/// recurrence.
pub fn revalidate(input: &str) -> Result<Option<Recurrence>> {
    let result = parse_phrase(input);
    if let Err(ref e) = result {
        tracing::debug!(error = %e, "replacement recurrence rejected");
    }
    result
}

// ── Normalization ───────────────────────────────────────────────────────────

/// Collapse whitespace runs to one space, trim, lowercase.
pub fn normalize_phrase(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Drop one trailing `at <time>` when `<time>` looks like a time of day.
fn strip_time_suffix(s: &str) -> &str {
    match s.rfind(" at ") {
        Some(idx) if vocab::looks_like_time(&s[idx + 4..]) => &s[..idx],
        _ => s,
    }
}

// ── Matchers ────────────────────────────────────────────────────────────────

/// "daily", "every day", "every 1 days".
fn try_single_cycle(tokens: &[&str]) -> Option<Recurrence> {
    match tokens {
        [word] => vocab::parse_adverb(word).map(Recurrence::Simple),
        [every, period] if vocab::is_every(every) => {
            vocab::parse_period(period).map(Recurrence::Simple)
        }
        [every, "1", period] if vocab::is_every(every) => {
            vocab::parse_period(period).map(Recurrence::Simple)
        }
        _ => None,
    }
}

/// "every 3 days", "every other week", "every 2nd month".
fn try_multi_cycle(tokens: &[&str]) -> Option<Recurrence> {
    match tokens {
        [every, cycles, period] if vocab::is_every(every) => {
            let period = vocab::parse_period(period)?;
            let count = vocab::parse_cycles(cycles)?;
            Recurrence::every(count, period)
        }
        _ => None,
    }
}

/// "every monday", "ev tu", "every other fri", "every 3rd friday".
fn try_day_of_week(tokens: &[&str]) -> Option<Recurrence> {
    match tokens {
        [every, day] if vocab::is_every(every) => {
            vocab::parse_weekday(day)?;
            Recurrence::weekly(1)
        }
        [every, cycles, day] if vocab::is_every(every) => {
            vocab::parse_weekday(day)?;
            Recurrence::weekly(vocab::parse_cycles(cycles)?)
        }
        _ => None,
    }
}

/// "every 1st", "every 24th". The day number itself is not kept, but
/// must be nonzero.
fn try_day_of_month(tokens: &[&str]) -> Option<Recurrence> {
    match tokens {
        [every, day] if vocab::is_every(every) => {
            vocab::parse_count(day).filter(|&n| n > 0)?;
            Some(Recurrence::Monthly)
        }
        _ => None,
    }
}

/// "every weekday", "every last day", ...
fn try_label(tokens: &[&str]) -> Option<Recurrence> {
    match tokens {
        [every, rest @ ..] if vocab::is_every(every) && !rest.is_empty() => {
            vocab::parse_label(&rest.join(" "))
        }
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
