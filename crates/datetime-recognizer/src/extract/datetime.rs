use chrono::NaiveDateTime;

use super::{
    date_like, fuse_adjacent, resolve_overlaps, scan_candidates, unweighted, DateExtractor,
    DateTimeExtractor, HolidayExtractor, TimeExtractor,
};
use crate::locale::LocalePatternSet;
use crate::types::{ExtractedSpan, PatternTag, SubType};

/// A date and a time of day: "tomorrow at 3pm", "3pm on Friday",
/// "Christmas at noon", plus deictic "now".
#[derive(Debug, Clone, Copy)]
pub struct DateAndTimeExtractor {
    patterns: &'static LocalePatternSet,
    date: DateExtractor,
    time: TimeExtractor,
    holiday: HolidayExtractor,
}

impl DateAndTimeExtractor {
    pub fn new(patterns: &'static LocalePatternSet) -> Self {
        DateAndTimeExtractor {
            patterns,
            date: DateExtractor::new(patterns),
            time: TimeExtractor::new(patterns),
            holiday: HolidayExtractor::new(patterns),
        }
    }
}

impl DateTimeExtractor for DateAndTimeExtractor {
    fn subtype(&self) -> SubType {
        SubType::DateTime
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractedSpan> {
        let dates = date_like(
            self.date.extract(text, reference),
            self.holiday.extract(text, reference),
        );
        let times = self.time.extract(text, reference);
        let connector = &self.patterns.connectors().date_time;

        let mut found = scan_candidates(self.patterns, SubType::DateTime, text);
        found.extend(unweighted(fuse_adjacent(
            text,
            &dates,
            &times,
            connector,
            SubType::DateTime,
            PatternTag::DateAndTime,
        )));
        found.extend(unweighted(fuse_adjacent(
            text,
            &times,
            &dates,
            connector,
            SubType::DateTime,
            PatternTag::DateAndTime,
        )));
        resolve_overlaps(found)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn extract(text: &str) -> Vec<ExtractedSpan> {
        DateAndTimeExtractor::new(english()).extract(text, reference())
    }

    #[test]
    fn test_date_then_time() {
        let spans = extract("see you tomorrow at noon");
        assert_eq!(texts(&spans), vec!["tomorrow at noon"]);
        assert_eq!(spans[0].tag, PatternTag::DateAndTime);
        assert_eq!(spans[0].parts.len(), 2);
        assert_eq!(spans[0].parts[0].subtype, SubType::Date);
        assert_eq!(spans[0].parts[1].subtype, SubType::Time);
    }

    #[test]
    fn test_time_then_date() {
        let spans = extract("3pm on Friday works");
        assert_eq!(texts(&spans), vec!["3pm on Friday"]);
        assert_eq!(spans[0].parts[0].subtype, SubType::Time);
    }

    #[test]
    fn test_holiday_with_time() {
        let spans = extract("Christmas at 10am");
        assert_eq!(texts(&spans), vec!["Christmas at 10am"]);
        assert_eq!(spans[0].parts[0].subtype, SubType::Holiday);
    }

    #[test]
    fn test_now() {
        let spans = extract("call me right now");
        assert_eq!(texts(&spans), vec!["right now"]);
        assert_eq!(spans[0].tag, PatternTag::Now);
    }

    #[test]
    fn test_lone_parts_are_not_datetimes() {
        assert!(extract("tomorrow").is_empty());
        assert!(extract("at 3pm").is_empty());
    }
}
