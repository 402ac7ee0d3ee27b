//! Candidate spans produced by the extractors.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// The entity subtype of a recognized temporal expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubType {
    Date,
    Time,
    DateTime,
    DatePeriod,
    TimePeriod,
    DateTimePeriod,
    Duration,
    Set,
    Holiday,
    TimeZone,
}

impl SubType {
    /// Every subtype, in extractor registration order.
    pub const ALL: [SubType; 10] = [
        SubType::Date,
        SubType::Time,
        SubType::DateTime,
        SubType::DatePeriod,
        SubType::TimePeriod,
        SubType::DateTimePeriod,
        SubType::Duration,
        SubType::Set,
        SubType::Holiday,
        SubType::TimeZone,
    ];

    /// Overlap priority used by the merger when two candidates claim the same
    /// text and neither contains the other.
    ///
    /// Composite subtypes outrank the simpler subtypes they are built from. A
    /// recurrence always wraps its anchor ("every Monday at 3pm") so it ranks
    /// first; a holiday outranks a plain date naming the same day ("July 4th").
    pub fn priority(self) -> u8 {
        match self {
            SubType::Set => 100,
            SubType::DateTimePeriod => 90,
            SubType::DatePeriod => 80,
            SubType::TimePeriod => 70,
            SubType::DateTime => 60,
            SubType::Holiday => 50,
            SubType::Date => 40,
            SubType::Duration => 30,
            SubType::Time => 20,
            SubType::TimeZone => 10,
        }
    }

    /// Name used in output records.
    pub fn as_str(self) -> &'static str {
        match self {
            SubType::Date => "date",
            SubType::Time => "time",
            SubType::DateTime => "datetime",
            SubType::DatePeriod => "dateperiod",
            SubType::TimePeriod => "timeperiod",
            SubType::DateTimePeriod => "datetimeperiod",
            SubType::Duration => "duration",
            SubType::Set => "set",
            SubType::Holiday => "holiday",
            SubType::TimeZone => "timezone",
        }
    }
}

impl fmt::Display for SubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pattern family a span was produced by. Parsers branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternTag {
    // Date
    MonthDayYear,
    DayMonthYear,
    IsoDate,
    NumericDate,
    NumericDateWithYear,
    RelativeDay,
    RelativeWeekday,
    Weekday,
    WeekdayOfRelativeWeek,
    OrdinalWeekdayOfMonth,
    DayOfMonth,
    // Time
    HourMinute,
    HourAmPm,
    OClock,
    AtHour,
    NamedTime,
    HalfPast,
    // DateTime
    DateAndTime,
    Now,
    // DatePeriod
    RelativeUnit,
    RelativeMonth,
    MonthYear,
    MonthOnly,
    Year,
    Quarter,
    Season,
    DayRange,
    // TimePeriod
    TimeOfDay,
    HourRange,
    // DateTimePeriod
    RelativeTimeOfDay,
    Tonight,
    DateAndTimePeriod,
    // Duration
    Amount,
    HalfUnit,
    AndAHalf,
    Compound,
    // Set
    Frequency,
    EveryUnit,
    EveryAmount,
    EveryWeekday,
    SetWithTime,
    // Holiday
    Holiday,
    // TimeZone
    UtcOffset,
    ZoneAbbreviation,
    ZoneName,
    CityTime,
    // Shared by several subtypes
    BoundaryRange,
    RelativeSpan,
    DurationRelative,
    Within,
    Alternatives,
}

/// A named capture taken from a pattern match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capture {
    pub name: String,
    pub value: String,
    /// Byte offset of the captured text in the input.
    pub start: usize,
}

/// Metadata flags carried by a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SpanFlags(u8);

impl SpanFlags {
    pub const NONE: SpanFlags = SpanFlags(0);
    /// The span starts with "from" or "between".
    pub const RANGE_PREFIX: SpanFlags = SpanFlags(1);
    /// An hour without am/pm that could be read either way.
    pub const AMBIGUOUS_HOUR: SpanFlags = SpanFlags(1 << 1);
    /// The span is a disjunction; `parts` are the alternatives.
    pub const ALTERNATIVES: SpanFlags = SpanFlags(1 << 2);
    /// A duration anchored to the reference or another span ("in 3 days").
    pub const RELATIVE_DURATION: SpanFlags = SpanFlags(1 << 3);

    pub fn contains(self, other: SpanFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: SpanFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: SpanFlags) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for SpanFlags {
    type Output = SpanFlags;

    fn bitor(self, rhs: SpanFlags) -> SpanFlags {
        SpanFlags(self.0 | rhs.0)
    }
}

/// A candidate temporal expression located in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedSpan {
    pub subtype: SubType,
    /// Byte offset of the first character.
    pub start: usize,
    /// Length in bytes.
    pub length: usize,
    pub text: String,
    pub tag: PatternTag,
    pub captures: Vec<Capture>,
    /// Child spans of multi-part expressions: range boundaries, the date and
    /// time of a fused date-time, a duration and its anchor, alternatives.
    pub parts: Vec<ExtractedSpan>,
    pub flags: SpanFlags,
    /// A time zone span attached by the merger.
    pub time_zone: Option<Box<ExtractedSpan>>,
}

impl ExtractedSpan {
    pub fn new(subtype: SubType, tag: PatternTag, text: &str, start: usize, end: usize) -> Self {
        ExtractedSpan {
            subtype,
            start,
            length: end - start,
            text: text[start..end].to_string(),
            tag,
            captures: Vec::new(),
            parts: Vec::new(),
            flags: SpanFlags::NONE,
            time_zone: None,
        }
    }

    /// Build a span covering `parts`, which must be ordered by position.
    pub fn fused(
        subtype: SubType,
        tag: PatternTag,
        text: &str,
        start: usize,
        end: usize,
        parts: Vec<ExtractedSpan>,
    ) -> Self {
        let mut span = ExtractedSpan::new(subtype, tag, text, start, end);
        span.parts = parts;
        span
    }

    /// Byte offset one past the last character.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Value of the first capture named `name`.
    pub fn capture(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    pub fn has_capture(&self, name: &str) -> bool {
        self.capture(name).is_some()
    }

    /// Add or replace a capture.
    pub fn set_capture(&mut self, name: &str, value: &str, start: usize) {
        match self.captures.iter_mut().find(|c| c.name == name) {
            Some(existing) => {
                existing.value = value.to_string();
                existing.start = start;
            }
            None => self.captures.push(Capture {
                name: name.to_string(),
                value: value.to_string(),
                start,
            }),
        }
    }

    pub fn overlaps(&self, other: &ExtractedSpan) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Whether `other` lies inside this span and is strictly shorter.
    pub fn strictly_contains(&self, other: &ExtractedSpan) -> bool {
        self.start <= other.start && other.end() <= self.end() && self.length > other.length
    }

    /// Re-anchor the span on a wider region of the same text, keeping its
    /// captures and parts.
    pub fn widened(&self, text: &str, start: usize, end: usize) -> ExtractedSpan {
        let mut span = self.clone();
        span.start = start;
        span.length = end - start;
        span.text = text[start..end].to_string();
        span
    }
}

/// Canonical span order: start ascending, then longer first, then the higher
/// subtype priority.
pub fn span_order(a: &ExtractedSpan, b: &ExtractedSpan) -> Ordering {
    a.start
        .cmp(&b.start)
        .then(b.length.cmp(&a.length))
        .then(b.subtype.priority().cmp(&a.subtype.priority()))
}
