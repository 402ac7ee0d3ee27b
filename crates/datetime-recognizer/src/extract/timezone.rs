use chrono::NaiveDateTime;

use super::{scan, DateTimeExtractor};
use crate::locale::LocalePatternSet;
use crate::types::{ExtractedSpan, SubType};

/// UTC offsets, zone abbreviations and names, and "<city> time".
///
/// Zone spans never stand alone in the output; the merger attaches them to
/// the expression they follow.
#[derive(Debug, Clone, Copy)]
pub struct TimeZoneExtractor {
    patterns: &'static LocalePatternSet,
}

impl TimeZoneExtractor {
    pub fn new(patterns: &'static LocalePatternSet) -> Self {
        TimeZoneExtractor { patterns }
    }
}

impl DateTimeExtractor for TimeZoneExtractor {
    fn subtype(&self) -> SubType {
        SubType::TimeZone
    }

    fn extract(&self, text: &str, _reference: NaiveDateTime) -> Vec<ExtractedSpan> {
        scan(self.patterns, SubType::TimeZone, text)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::types::PatternTag;

    fn extract(text: &str) -> Vec<ExtractedSpan> {
        TimeZoneExtractor::new(english()).extract(text, reference())
    }

    #[test]
    fn test_abbreviation_is_case_sensitive() {
        assert_eq!(texts(&extract("3pm PST")), vec!["PST"]);
        assert!(extract("the pst was fine").is_empty());
    }

    #[test]
    fn test_offsets_and_names() {
        let spans = extract("UTC+5:30, Pacific Time, Tokyo time");
        assert_eq!(texts(&spans), vec!["UTC+5:30", "Pacific Time", "Tokyo time"]);
        assert_eq!(spans[0].tag, PatternTag::UtcOffset);
        assert_eq!(spans[2].tag, PatternTag::CityTime);
    }
}
