//! Canonical recurrence values.
//!
//! A [`Recurrence`] is the closed set of cadences the destination store's
//! `recur` field understands. Its [`Display`](std::fmt::Display) form is the
//! exact token written to that field:
//!
//! | Value                                   | Token       |
//! |-----------------------------------------|-------------|
//! | `Simple(Period::Day)`                   | `daily`     |
//! | `Multi { count: 3, period: Period::Day }` | `3 days`  |
//! | `Weekly(1)`                             | `weekly`    |
//! | `Weekly(2)`                             | `2 weeks`   |
//! | `Monthly`                               | `monthly`   |
//! | `Weekdays`                              | `weekdays`  |

use std::fmt;

use serde::{Serialize, Serializer};

/// The time granularity of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// All periods, shortest first.
    pub const ALL: [Period; 5] = [
        Period::Hour,
        Period::Day,
        Period::Week,
        Period::Month,
        Period::Year,
    ];

    /// Singular unit name: `"hour"`, `"day"`, ...
    pub fn name(self) -> &'static str {
        match self {
            Period::Hour => "hour",
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// Adverb form used for a once-per-period cadence: `"hourly"`, `"daily"`, ...
    pub fn adverb(self) -> &'static str {
        match self {
            Period::Hour => "hourly",
            Period::Day => "daily",
            Period::Week => "weekly",
            Period::Month => "monthly",
            Period::Year => "yearly",
        }
    }
}

/// A canonical recurrence token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recurrence {
    /// Once per period.
    Simple(Period),
    /// Every `count` periods. `count` is always at least 2; build with
    /// [`Recurrence::every`] to keep that true.
    Multi { count: u64, period: Period },
    /// Anchored to a weekday, repeating every `count` weeks (`count >= 1`).
    Weekly(u64),
    /// Anchored to a day of the month.
    Monthly,
    /// Monday through Friday.
    Weekdays,
}

impl Recurrence {
    /// Every `count` periods.
    ///
    /// A count of 1 collapses to [`Recurrence::Simple`]; a count of 0 has no
    /// meaning and returns `None`.
    pub fn every(count: u64, period: Period) -> Option<Recurrence> {
        match count {
            0 => None,
            1 => Some(Recurrence::Simple(period)),
            count => Some(Recurrence::Multi { count, period }),
        }
    }

    /// Weekday-anchored cadence repeating every `count` weeks. 0 returns `None`.
    pub fn weekly(count: u64) -> Option<Recurrence> {
        (count > 0).then_some(Recurrence::Weekly(count))
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Simple(period) => f.write_str(period.adverb()),
            Recurrence::Multi { count, period } => write!(f, "{count} {}s", period.name()),
            Recurrence::Weekly(1) => f.write_str("weekly"),
            Recurrence::Weekly(count) => write!(f, "{count} weeks"),
            Recurrence::Monthly => f.write_str("monthly"),
            Recurrence::Weekdays => f.write_str("weekdays"),
        }
    }
}

impl Serialize for Recurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_prints_adverb() {
        let tokens: Vec<String> = Period::ALL
            .iter()
            .map(|p| Recurrence::Simple(*p).to_string())
            .collect();
        assert_eq!(tokens, ["hourly", "daily", "weekly", "monthly", "yearly"]);
    }

    #[test]
    fn test_multi_prints_plural_unit() {
        let r = Recurrence::Multi {
            count: 3,
            period: Period::Hour,
        };
        assert_eq!(r.to_string(), "3 hours");
    }

    #[test]
    fn test_weekly_count_one_is_weekly() {
        assert_eq!(Recurrence::Weekly(1).to_string(), "weekly");
        assert_eq!(Recurrence::Weekly(4).to_string(), "4 weeks");
    }

    #[test]
    fn test_every_collapses_one_and_rejects_zero() {
        assert_eq!(
            Recurrence::every(1, Period::Month),
            Some(Recurrence::Simple(Period::Month))
        );
        assert_eq!(Recurrence::every(0, Period::Month), None);
        assert_eq!(
            Recurrence::every(12, Period::Month),
            Some(Recurrence::Multi {
                count: 12,
                period: Period::Month
            })
        );
    }

    #[test]
    fn test_counts_beyond_u32() {
        let r = Recurrence::every(4_294_967_296, Period::Week).unwrap();
        assert_eq!(r.to_string(), "4294967296 weeks");
    }

    #[test]
    fn test_weekly_rejects_zero() {
        assert_eq!(Recurrence::weekly(0), None);
        assert_eq!(Recurrence::weekly(2), Some(Recurrence::Weekly(2)));
    }

    #[test]
    fn test_serializes_as_token() {
        let json = serde_json::to_string(&Recurrence::Weekdays).unwrap();
        assert_eq!(json, "\"weekdays\"");
        let json = serde_json::to_string(&Recurrence::Weekly(2)).unwrap();
        assert_eq!(json, "\"2 weeks\"");
    }
}
