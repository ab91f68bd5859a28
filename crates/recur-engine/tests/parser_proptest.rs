//! Property-based tests for recurrence parsing
//!
//! These cover the quantified guarantees of the grammar:
//! - every interval N >= 2 renders as "N <unit>s"
//! - a trailing "at <digits...>" never changes the result
//! - every weekday spelling, with either lead word, is a weekly cadence
//! - case and whitespace never change the result
//! - any input either parses or fails carrying itself, never panics

use proptest::prelude::*;
use recur_engine::vocab::WEEKDAYS;
use recur_engine::{parse_phrase, Period, RecurError, Recurrence};

fn period_strategy() -> impl Strategy<Value = Period> {
    prop::sample::select(Period::ALL.to_vec())
}

fn weekday_form_strategy() -> impl Strategy<Value = &'static str> {
    let forms: Vec<&'static str> = WEEKDAYS
        .iter()
        .flat_map(|(_, forms)| forms.iter().copied())
        .collect();
    prop::sample::select(forms)
}

fn lead_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["every", "ev"])
}

fn ordinal_suffix_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "st", "nd", "rd", "th"])
}

/// Re-case each character and pad each gap with random whitespace.
fn scramble(phrase: &str, upper: &[bool], pads: &[usize]) -> String {
    let mut out = " ".repeat(pads[0] % 3);
    for (i, word) in phrase.split(' ').enumerate() {
        if i > 0 {
            out.push_str(&" \t".repeat(pads[i % pads.len()] % 3 + 1));
        }
        for (j, ch) in word.chars().enumerate() {
            if upper[(i + j) % upper.len()] {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
        }
    }
    out.push('\n');
    out
}

fn parse_token(s: &str) -> String {
    parse_phrase(s).unwrap().unwrap().to_string()
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_interval_normalization(n in 2u64..=u64::MAX, period in period_strategy(), plural in any::<bool>()) {
            let unit = if plural { format!("{}s", period.name()) } else { period.name().to_string() };
            let phrase = format!("every {n} {unit}");
            prop_assert_eq!(parse_token(&phrase), format!("{n} {}s", period.name()));
        }

        #[test]
        fn test_ordinal_suffix_is_decorative(n in 2u32..1000, suffix in ordinal_suffix_strategy(), period in period_strategy()) {
            let with = parse_phrase(&format!("every {n}{suffix} {}", period.name())).unwrap();
            let without = parse_phrase(&format!("every {n} {}", period.name())).unwrap();
            prop_assert_eq!(with, without);
        }

        #[test]
        fn test_single_cycle_forms_agree(period in period_strategy(), lead in lead_strategy()) {
            let expected = Some(Recurrence::Simple(period));
            prop_assert_eq!(parse_phrase(&format!("{lead} {}", period.name())).unwrap(), expected);
            prop_assert_eq!(parse_phrase(&format!("{lead} 1 {}", period.name())).unwrap(), expected);
            prop_assert_eq!(parse_phrase(&format!("{lead} 1 {}s", period.name())).unwrap(), expected);
        }

        #[test]
        fn test_weekday_forms_are_weekly(form in weekday_form_strategy(), lead in lead_strategy()) {
            prop_assert_eq!(parse_token(&format!("{lead} {form}")), "weekly");
            prop_assert_eq!(parse_token(&format!("{lead} other {form}")), "2 weeks");
        }

        #[test]
        fn test_nth_weekday_is_n_weeks(n in 2u32..60, suffix in ordinal_suffix_strategy(), form in weekday_form_strategy()) {
            prop_assert_eq!(parse_token(&format!("every {n}{suffix} {form}")), format!("{n} weeks"));
        }

        #[test]
        fn test_day_of_month_ignores_value(n in 1u32..=31, suffix in ordinal_suffix_strategy()) {
            prop_assert_eq!(parse_phrase(&format!("every {n}{suffix}")).unwrap(), Some(Recurrence::Monthly));
        }

        #[test]
        fn test_case_and_whitespace_insensitive(
            phrase in prop::sample::select(vec![
                "every other day", "every 3rd friday", "every weekday",
                "every last day", "ev tues", "every 12 months", "monthly",
            ]),
            upper in prop::collection::vec(any::<bool>(), 1..8),
            pads in prop::collection::vec(0usize..5, 1..6),
        ) {
            let scrambled = scramble(phrase, &upper, &pads);
            prop_assert_eq!(parse_phrase(&scrambled).unwrap(), parse_phrase(phrase).unwrap());
        }

        #[test]
        fn test_time_suffix_never_changes_cadence(
            phrase in prop::sample::select(vec!["every day", "every monday", "every other week", "every 2nd"]),
            hour in 0u32..100,
            minute in 0u32..100,
            sep in prop::sample::select(vec![":", ".", ""]),
            meridiem in prop::sample::select(vec!["", "am", " pm"]),
        ) {
            let clock = if sep.is_empty() { hour.to_string() } else { format!("{hour}{sep}{minute:02}") };
            let timed = format!("{phrase} at {clock}{meridiem}");
            prop_assert_eq!(parse_phrase(&timed).unwrap(), parse_phrase(phrase).unwrap());
        }

        #[test]
        fn test_total_over_arbitrary_input(s in "\\PC{0,40}") {
            match parse_phrase(&s) {
                Ok(None) => prop_assert!(s.trim().is_empty()),
                Ok(Some(_)) => {}
                Err(RecurError::UnsupportedRecurrence(phrase)) => prop_assert_eq!(phrase, s),
            }
        }

        #[test]
        fn test_day_lists_rejected(a in weekday_form_strategy(), b in weekday_form_strategy()) {
            let phrase = format!("every {a},{b}");
            prop_assert!(parse_phrase(&phrase).is_err());
        }
    }
}
