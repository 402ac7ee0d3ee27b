use chrono::NaiveDateTime;

use super::{
    fuse_ranges, resolve_overlaps, scan_candidates, unweighted, DateTimeExtractor, TimeExtractor,
};
use crate::locale::LocalePatternSet;
use crate::types::{ExtractedSpan, SpanFlags, SubType};

/// Spans within a day: "this afternoon" parts, "3-5pm", "from 9am to noon".
#[derive(Debug, Clone, Copy)]
pub struct TimePeriodExtractor {
    patterns: &'static LocalePatternSet,
    time: TimeExtractor,
    merge_ranges: bool,
}

impl TimePeriodExtractor {
    pub fn new(patterns: &'static LocalePatternSet, merge_ranges: bool) -> Self {
        TimePeriodExtractor {
            patterns,
            time: TimeExtractor::new(patterns),
            merge_ranges,
        }
    }
}

impl DateTimeExtractor for TimePeriodExtractor {
    fn subtype(&self) -> SubType {
        SubType::TimePeriod
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractedSpan> {
        let mut found = scan_candidates(self.patterns, SubType::TimePeriod, text);
        if !self.merge_ranges {
            found.retain(|(span, _)| !span.flags.contains(SpanFlags::RANGE_PREFIX));
            return resolve_overlaps(found);
        }
        let times = self.time.extract(text, reference);
        found.extend(unweighted(fuse_ranges(
            text,
            self.patterns,
            &times,
            &times,
            SubType::TimePeriod,
        )));
        resolve_overlaps(found)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::types::PatternTag;

    fn extract(text: &str) -> Vec<ExtractedSpan> {
        TimePeriodExtractor::new(english(), true).extract(text, reference())
    }

    #[test]
    fn test_hour_range_with_shared_marker() {
        let spans = extract("open 3-5pm daily");
        assert_eq!(texts(&spans), vec!["3-5pm"]);
        assert_eq!(spans[0].tag, PatternTag::HourRange);
        assert_eq!(spans[0].capture("end_ampm"), Some("pm"));
    }

    #[test]
    fn test_hour_range_with_prefix() {
        let spans = extract("from 9am to 11am");
        assert_eq!(texts(&spans), vec!["from 9am to 11am"]);
        assert!(spans[0].flags.contains(SpanFlags::RANGE_PREFIX));
    }

    #[test]
    fn test_time_boundary_range() {
        let spans = extract("from 9:30am until noon");
        assert_eq!(texts(&spans), vec!["from 9:30am until noon"]);
        assert_eq!(spans[0].tag, PatternTag::BoundaryRange);
    }

    #[test]
    fn test_part_of_day() {
        let spans = extract("in the evening");
        assert_eq!(texts(&spans), vec!["evening"]);
        assert_eq!(spans[0].tag, PatternTag::TimeOfDay);
    }
}
