//! # recur-engine
//!
//! Deterministic recurrence parsing for task migration.
//!
//! Source task stores let users type how a task repeats ("every other day",
//! "every 3rd friday", "ev tues at 17:00"). Destination stores want one of a
//! small set of canonical tokens (`daily`, `2 weeks`, `weekdays`, ...). This
//! crate translates between the two and refuses, rather than guesses, when a
//! phrase falls outside its grammar.
//!
//! ## Modules
//!
//! - [`parser`]: Recurrence phrase → canonical [`Recurrence`], plus the structured and revalidation entry points
//! - [`recurrence`]: The canonical recurrence values and their tokens
//! - [`vocab`]: Word tables: periods, weekday spellings, labels, time-of-day forms
//! - [`convert`]: Priority, date, quoting and rename conversions for the other task fields
//! - [`error`]: Error types

pub mod convert;
pub mod error;
pub mod parser;
pub mod recurrence;
pub mod vocab;

pub use convert::{
    parse_due_date, parse_entry_date, parse_mapping, parse_priority, quote_whitespace, Priority,
    Renames,
};
pub use error::{ConvertError, RecurError};
pub use parser::{parse_due, parse_phrase, parse_recur, revalidate, DueRecord};
pub use recurrence::{Period, Recurrence};
