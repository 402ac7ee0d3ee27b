use chrono::NaiveDateTime;

use super::{
    date_like, fuse_adjacent, fuse_ranges, resolve_overlaps, scan_candidates, unweighted,
    DateAndTimeExtractor, DateExtractor, DateTimeExtractor, HolidayExtractor, TimeExtractor,
    TimePeriodExtractor,
};
use crate::locale::LocalePatternSet;
use crate::types::{ExtractedSpan, PatternTag, SpanFlags, SubType};

/// Spans of date-times: "tonight", "this morning", "Friday afternoon",
/// "tomorrow from 3 to 5pm", "next 3 hours", "from today at 3pm to
/// Friday at noon".
#[derive(Debug, Clone, Copy)]
pub struct DateTimePeriodExtractor {
    patterns: &'static LocalePatternSet,
    date: DateExtractor,
    holiday: HolidayExtractor,
    time: TimeExtractor,
    time_period: TimePeriodExtractor,
    datetime: DateAndTimeExtractor,
    merge_ranges: bool,
}

impl DateTimePeriodExtractor {
    pub fn new(patterns: &'static LocalePatternSet, merge_ranges: bool) -> Self {
        DateTimePeriodExtractor {
            patterns,
            date: DateExtractor::new(patterns),
            holiday: HolidayExtractor::new(patterns),
            time: TimeExtractor::new(patterns),
            time_period: TimePeriodExtractor::new(patterns, merge_ranges),
            datetime: DateAndTimeExtractor::new(patterns),
            merge_ranges,
        }
    }
}

impl DateTimeExtractor for DateTimePeriodExtractor {
    fn subtype(&self) -> SubType {
        SubType::DateTimePeriod
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractedSpan> {
        let connectors = self.patterns.connectors();
        let mut found = scan_candidates(self.patterns, SubType::DateTimePeriod, text);

        let dates = date_like(
            self.date.extract(text, reference),
            self.holiday.extract(text, reference),
        );
        let periods = self.time_period.extract(text, reference);
        for (lefts, rights) in [(&dates, &periods), (&periods, &dates)] {
            found.extend(unweighted(fuse_adjacent(
                text,
                lefts,
                rights,
                &connectors.date_time_period,
                SubType::DateTimePeriod,
                PatternTag::DateAndTimePeriod,
            )));
        }

        if self.merge_ranges {
            let datetimes = self.datetime.extract(text, reference);
            let times = self.time.extract(text, reference);
            for ends in [&datetimes, &times] {
                found.extend(unweighted(fuse_ranges(
                    text,
                    self.patterns,
                    &datetimes,
                    ends,
                    SubType::DateTimePeriod,
                )));
            }
        } else {
            found.retain(|(span, _)| !span.flags.contains(SpanFlags::RANGE_PREFIX));
        }
        resolve_overlaps(found)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn extract(text: &str) -> Vec<ExtractedSpan> {
        DateTimePeriodExtractor::new(english(), true).extract(text, reference())
    }

    #[test]
    fn test_deictic_parts_of_day() {
        let spans = extract("tonight or this morning");
        assert_eq!(texts(&spans), vec!["tonight", "this morning"]);
        assert_eq!(spans[0].tag, PatternTag::Tonight);
        assert_eq!(spans[1].tag, PatternTag::RelativeTimeOfDay);
    }

    #[test]
    fn test_date_with_time_period() {
        let spans = extract("Friday afternoon");
        assert_eq!(texts(&spans), vec!["Friday afternoon"]);
        assert_eq!(spans[0].tag, PatternTag::DateAndTimePeriod);

        let spans = extract("tomorrow from 3-5pm");
        assert_eq!(texts(&spans), vec!["tomorrow from 3-5pm"]);
    }

    #[test]
    fn test_datetime_range() {
        let spans = extract("from today at 3pm to Friday at noon");
        assert_eq!(texts(&spans), vec!["from today at 3pm to Friday at noon"]);
        assert_eq!(spans[0].tag, PatternTag::BoundaryRange);
    }

    #[test]
    fn test_datetime_to_time_range() {
        let spans = extract("tomorrow at 9am until 11am");
        assert_eq!(texts(&spans), vec!["tomorrow at 9am until 11am"]);
    }

    #[test]
    fn test_relative_hours() {
        let spans = extract("in the next 3 hours");
        assert_eq!(texts(&spans), vec!["the next 3 hours"]);
        assert_eq!(spans[0].tag, PatternTag::RelativeSpan);
    }
}
