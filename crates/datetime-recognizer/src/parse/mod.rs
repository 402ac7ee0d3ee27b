//! Parsers: turn a candidate span into a resolution anchored on the
//! reference instant.
//!
//! Each subtype has one parser. Composite parsers delegate their parts to the
//! simpler parsers and combine the typed intermediate values below, so that
//! a date-time is built from a resolved date and a resolved time rather than
//! from strings.

mod alt;
mod date;
mod date_period;
mod datetime;
mod datetime_period;
mod duration;
mod holiday;
mod set;
mod time;
mod time_period;
mod timezone;

pub use alt::AltParser;
pub use date::DateParser;
pub use date_period::DatePeriodParser;
pub use datetime::DateAndTimeParser;
pub use datetime_period::DateTimePeriodParser;
pub use duration::DurationParser;
pub use holiday::HolidayParser;
pub use set::SetParser;
pub use time::TimeParser;
pub use time_period::TimePeriodParser;
pub use timezone::TimeZoneParser;

use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::ParseError;
use crate::locale::LocalePatternSet;
use crate::options::WeekStartDay;
use crate::resolution::ResolutionValue;
use crate::types::{ExtractedSpan, SubType};

/// Resolves spans of one subtype.
pub trait DateTimeParser: Send + Sync {
    fn subtype(&self) -> SubType;

    /// Resolve `span` against `reference`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` when the span lacks a capture its pattern
    /// promises, names an impossible calendar value ("February 30"), or comes
    /// from a pattern this parser does not handle.
    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolutionValue, ParseError>;
}

/// What every parser needs besides the span: the culture's lexical tables and
/// the week convention.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext {
    pub patterns: &'static LocalePatternSet,
    pub week_start: WeekStartDay,
}

impl ParseContext {
    pub fn new(patterns: &'static LocalePatternSet, week_start: WeekStartDay) -> Self {
        ParseContext {
            patterns,
            week_start,
        }
    }
}

// ── Intermediate values ─────────────────────────────────────────────────────

/// A point value with its past and future readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolved<T> {
    pub timex: String,
    pub past: T,
    pub future: T,
}

impl<T: Copy> Resolved<T> {
    /// A fully specified value: both readings agree.
    pub fn fixed(timex: String, value: T) -> Self {
        Resolved {
            timex,
            past: value,
            future: value,
        }
    }
}

/// An inclusive interval with its past and future readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Interval<T> {
    pub timex: String,
    pub past: (T, T),
    pub future: (T, T),
}

impl<T: Copy + PartialOrd> Interval<T> {
    pub fn fixed(timex: String, start: T, end: T) -> Self {
        Interval {
            timex,
            past: (start, end),
            future: (start, end),
        }
    }

    /// Whether the value is pinned to the calendar: both readings agree and
    /// the timex leaves no part unknown. "Wednesday" read on a Wednesday has
    /// agreeing readings but still recurs.
    pub fn is_fixed(&self) -> bool {
        self.past == self.future && !self.timex.contains('X')
    }

    /// Join a start and an end boundary resolved against the reference.
    ///
    /// The future reading runs from the start's future value to the first
    /// end on or after it (`end_after`). The past reading runs from the last
    /// start on or before the end's past value (`start_before`) to that end.
    /// A fixed boundary pins both readings to the side anchored on it.
    /// Fixed boundaries written backwards swap.
    pub fn join(
        first: &Interval<T>,
        last: &Interval<T>,
        start_before: impl FnOnce(T) -> Result<Interval<T>, ParseError>,
        end_after: impl FnOnce(T) -> Result<Interval<T>, ParseError>,
    ) -> Result<Self, ParseError> {
        let mut future = (first.future.0, end_after(first.future.0)?.future.1);
        let mut past = (start_before(last.past.1)?.past.0, last.past.1);
        if first.is_fixed() {
            past = future;
        } else if last.is_fixed() {
            future = past;
        }
        Ok(Interval {
            timex: String::new(),
            past: ordered(past),
            future: ordered(future),
        })
    }
}

fn ordered<T: PartialOrd>((start, end): (T, T)) -> (T, T) {
    if start > end {
        (end, start)
    } else {
        (start, end)
    }
}

impl<T: Copy + PartialOrd> From<Resolved<T>> for Interval<T> {
    fn from(point: Resolved<T>) -> Self {
        Interval {
            timex: point.timex,
            past: (point.past, point.past),
            future: (point.future, point.future),
        }
    }
}

// ── Span helpers ────────────────────────────────────────────────────────────

/// A capture the span's pattern guarantees.
pub(crate) fn required<'s>(span: &'s ExtractedSpan, name: &'static str) -> Result<&'s str, ParseError> {
    span.capture(name).ok_or(ParseError::MissingCapture(name))
}

/// A numeric capture, if present.
pub(crate) fn numeric<T: FromStr>(span: &ExtractedSpan, name: &'static str) -> Result<Option<T>, ParseError> {
    span.capture(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ParseError::invalid(format!("{name} '{raw}'")))
        })
        .transpose()
}

/// The first part of one of the given subtypes.
pub(crate) fn part_of<'s>(span: &'s ExtractedSpan, subtypes: &[SubType]) -> Option<&'s ExtractedSpan> {
    span.parts.iter().find(|p| subtypes.contains(&p.subtype))
}

/// +1 or -1 for the direction word of a relative duration ("in", "ago",
/// "after", "before").
pub(crate) fn direction_sign(word: &str) -> i64 {
    let word = word.to_ascii_lowercase();
    if ["ago", "earlier", "before", "prior"]
        .iter()
        .any(|w| word.starts_with(w))
    {
        -1
    } else {
        1
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 11, day).unwrap()
    }

    fn point(past: u32, future: u32) -> Interval<NaiveDate> {
        Resolved {
            timex: String::new(),
            past: d(past),
            future: d(future),
        }
        .into()
    }

    /// A weekday seven days apart, as seen from `anchor`.
    fn weekly(first: u32) -> impl Fn(NaiveDate) -> Result<Interval<NaiveDate>, ParseError> {
        move |anchor| {
            let offset = (i64::from(first) - i64::from(anchor.day())).rem_euclid(7);
            let future = anchor + chrono::Duration::days(offset);
            let past = if future == anchor { future } else { future - chrono::Duration::days(7) };
            Ok(Resolved {
                timex: "XXXX-WXX".to_string(),
                past,
                future,
            }
            .into())
        }
    }

    #[test]
    fn test_join_anchors_end_on_future_start() {
        // Reference Wednesday the 9th: Monday is the 7th or 14th, Wednesday the 9th.
        let monday = weekly(7);
        let wednesday = weekly(9);
        let joined = Interval::join(&monday(d(9)).unwrap(), &wednesday(d(9)).unwrap(), &monday, &wednesday).unwrap();
        assert_eq!(joined.future, (d(14), d(16)));
        assert_eq!(joined.past, (d(7), d(9)));
        assert!(joined.future.0 >= d(9));
        assert!(joined.past.1 <= d(9));
    }

    #[test]
    fn test_join_fixed_start_pins_both_readings() {
        let friday = weekly(11);
        let joined = Interval::join(&point(7, 7), &friday(d(7)).unwrap(), |_| Ok(point(7, 7)), &friday).unwrap();
        assert_eq!(joined.future, (d(7), d(11)));
        assert_eq!(joined.past, joined.future);
    }

    #[test]
    fn test_join_swaps_fixed_boundaries_written_backwards() {
        let joined = Interval::join(&point(20, 20), &point(10, 10), |_| Ok(point(20, 20)), |_| Ok(point(10, 10))).unwrap();
        assert_eq!(joined.future, (d(10), d(20)));
        assert_eq!(joined.past, (d(10), d(20)));
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(direction_sign("ago"), -1);
        assert_eq!(direction_sign("prior to"), -1);
        assert_eq!(direction_sign("from now"), 1);
        assert_eq!(direction_sign("in"), 1);
        assert_eq!(direction_sign("after"), 1);
    }
}
