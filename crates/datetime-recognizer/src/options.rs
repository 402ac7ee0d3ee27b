//! Request options.

use std::time::Duration;

use chrono::Weekday;
use serde::Serialize;

/// Which day begins a week for period computations ("this week", "next weekend").
///
/// Does **not** affect named-weekday expressions like "next Monday" or "last Friday".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

impl WeekStartDay {
    /// How many days `weekday` is from the week-start day.
    pub fn days_from_start(self, weekday: Weekday) -> i64 {
        match self {
            WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
            WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
        }
    }
}

/// Bitset of recognition flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub struct DateTimeOptions(u32);

impl DateTimeOptions {
    pub const NONE: DateTimeOptions = DateTimeOptions(0);
    /// Do not fuse "from X to Y" / "between X and Y" into one period; the
    /// boundaries are reported separately.
    pub const SKIP_FROM_TO_MERGE: DateTimeOptions = DateTimeOptions(1);
    /// Report a fused date and time ("tomorrow at 3pm") as a date result and a
    /// time result.
    pub const SPLIT_DATE_AND_TIME: DateTimeOptions = DateTimeOptions(1 << 1);
    /// Disable time zone recognition.
    pub const SKIP_TIME_ZONE: DateTimeOptions = DateTimeOptions(1 << 2);

    pub fn from_bits(bits: u32) -> Self {
        DateTimeOptions(bits & 0b111)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: DateTimeOptions) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for DateTimeOptions {
    type Output = DateTimeOptions;

    fn bitor(self, rhs: DateTimeOptions) -> DateTimeOptions {
        DateTimeOptions(self.0 | rhs.0)
    }
}

/// Options for a recognizer instance.
#[derive(Debug, Clone, Default)]
pub struct RecognizerOptions {
    pub flags: DateTimeOptions,
    /// Which day starts the week for period computations.
    pub week_start: WeekStartDay,
    /// Time budget for one request. A request that runs out of time yields no
    /// results at all.
    pub timeout: Option<Duration>,
    /// Run the extractors of the scan phase on the rayon pool.
    pub parallel_scan: bool,
}

impl RecognizerOptions {
    pub fn with_flags(mut self, flags: DateTimeOptions) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_week_start(mut self, week_start: WeekStartDay) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_parallel_scan(mut self, parallel: bool) -> Self {
        self.parallel_scan = parallel;
        self
    }
}
