use chrono::NaiveDateTime;

use super::{scan, DateTimeExtractor};
use crate::locale::LocalePatternSet;
use crate::types::{ExtractedSpan, SubType};

/// Single days: "March 5, 2019", "next Friday", "tomorrow", "the 5th".
#[derive(Debug, Clone, Copy)]
pub struct DateExtractor {
    patterns: &'static LocalePatternSet,
}

impl DateExtractor {
    pub fn new(patterns: &'static LocalePatternSet) -> Self {
        DateExtractor { patterns }
    }
}

impl DateTimeExtractor for DateExtractor {
    fn subtype(&self) -> SubType {
        SubType::Date
    }

    fn extract(&self, text: &str, _reference: NaiveDateTime) -> Vec<ExtractedSpan> {
        scan(self.patterns, SubType::Date, text)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::types::PatternTag;

    fn extract(text: &str) -> Vec<ExtractedSpan> {
        DateExtractor::new(english()).extract(text, reference())
    }

    #[test]
    fn test_month_day_year() {
        let spans = extract("It happened on March 5, 2019.");
        assert_eq!(texts(&spans), vec!["March 5, 2019"]);
        assert_eq!(spans[0].tag, PatternTag::MonthDayYear);
        assert_eq!(spans[0].capture("year"), Some("2019"));
    }

    #[test]
    fn test_relative_weekday_captures_prefix() {
        let spans = extract("see you next Friday");
        assert_eq!(texts(&spans), vec!["next Friday"]);
        assert_eq!(spans[0].tag, PatternTag::RelativeWeekday);
        assert_eq!(spans[0].capture("rel"), Some("next"));
    }

    #[test]
    fn test_relative_prefix_never_alone() {
        assert!(extract("the next one").is_empty());
    }

    #[test]
    fn test_day_month_and_ordinal_weekday() {
        let spans = extract("the 5th of March and the first Monday of April");
        assert_eq!(texts(&spans), vec!["the 5th of March", "the first Monday of April"]);
        assert_eq!(spans[1].tag, PatternTag::OrdinalWeekdayOfMonth);
    }

    #[test]
    fn test_iso_and_numeric() {
        let spans = extract("2019-03-05 or 3/5");
        assert_eq!(texts(&spans), vec!["2019-03-05", "3/5"]);
        assert_eq!(spans[0].tag, PatternTag::IsoDate);
        assert_eq!(spans[1].tag, PatternTag::NumericDate);
    }

    #[test]
    fn test_relative_days() {
        let spans = extract("today or the day after tomorrow");
        assert_eq!(texts(&spans), vec!["today", "the day after tomorrow"]);
    }

    #[test]
    fn test_weekday_of_relative_week() {
        let spans = extract("Friday next week");
        assert_eq!(spans[0].tag, PatternTag::WeekdayOfRelativeWeek);
    }
}
