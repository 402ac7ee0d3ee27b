use chrono::NaiveDateTime;

use super::{
    date_like, fuse_ranges, resolve_overlaps, scan_candidates, unweighted, DateExtractor,
    DateTimeExtractor, HolidayExtractor,
};
use crate::locale::LocalePatternSet;
use crate::types::{ExtractedSpan, SpanFlags, SubType};

/// Spans of days: "next week", "March 2019", "Q3", "this summer",
/// "March 5-10", and "from Monday to Wednesday" style ranges.
#[derive(Debug, Clone, Copy)]
pub struct DatePeriodExtractor {
    patterns: &'static LocalePatternSet,
    date: DateExtractor,
    holiday: HolidayExtractor,
    merge_ranges: bool,
}

impl DatePeriodExtractor {
    /// With `merge_ranges` off, "from"/"between" ranges are not fused and
    /// their boundaries are left to the simpler extractors.
    pub fn new(patterns: &'static LocalePatternSet, merge_ranges: bool) -> Self {
        DatePeriodExtractor {
            patterns,
            date: DateExtractor::new(patterns),
            holiday: HolidayExtractor::new(patterns),
            merge_ranges,
        }
    }
}

impl DateTimeExtractor for DatePeriodExtractor {
    fn subtype(&self) -> SubType {
        SubType::DatePeriod
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractedSpan> {
        let mut found = scan_candidates(self.patterns, SubType::DatePeriod, text);
        if !self.merge_ranges {
            found.retain(|(span, _)| !span.flags.contains(SpanFlags::RANGE_PREFIX));
            return resolve_overlaps(found);
        }

        let dates = date_like(
            self.date.extract(text, reference),
            self.holiday.extract(text, reference),
        );
        let periods = resolve_overlaps(found.clone());
        let mut ranges = fuse_ranges(text, self.patterns, &dates, &dates, SubType::DatePeriod);
        ranges.extend(fuse_ranges(
            text,
            self.patterns,
            &periods,
            &periods,
            SubType::DatePeriod,
        ));
        found.extend(unweighted(ranges));
        resolve_overlaps(found)
    }
}
