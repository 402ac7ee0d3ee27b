use chrono::NaiveDateTime;

use super::{
    fuse_adjacent, resolve_overlaps, scan, scan_candidates, unweighted, DateTimeExtractor,
    TimeExtractor,
};
use crate::locale::LocalePatternSet;
use crate::types::{ExtractedSpan, PatternTag, SubType};

/// Recurrences: "daily", "every 2 weeks", "every Monday", "on Tuesdays",
/// "every Monday at 3pm".
#[derive(Debug, Clone, Copy)]
pub struct SetExtractor {
    patterns: &'static LocalePatternSet,
    time: TimeExtractor,
}

impl SetExtractor {
    pub fn new(patterns: &'static LocalePatternSet) -> Self {
        SetExtractor {
            patterns,
            time: TimeExtractor::new(patterns),
        }
    }
}

impl DateTimeExtractor for SetExtractor {
    fn subtype(&self) -> SubType {
        SubType::Set
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractedSpan> {
        let sets = scan(self.patterns, SubType::Set, text);
        let times = self.time.extract(text, reference);
        let connector = &self.patterns.connectors().set_time;

        let mut found = scan_candidates(self.patterns, SubType::Set, text);
        for (lefts, rights) in [(&sets, &times), (&times, &sets)] {
            found.extend(unweighted(fuse_adjacent(
                text,
                lefts,
                rights,
                connector,
                SubType::Set,
                PatternTag::SetWithTime,
            )));
        }
        resolve_overlaps(found)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn extract(text: &str) -> Vec<ExtractedSpan> {
        SetExtractor::new(english()).extract(text, reference())
    }

    #[test]
    fn test_frequencies_and_every() {
        let spans = extract("weekly reports, every 2 weeks, every other day");
        assert_eq!(texts(&spans), vec!["weekly", "every 2 weeks", "every other day"]);
        assert_eq!(spans[0].tag, PatternTag::Frequency);
        assert_eq!(spans[1].tag, PatternTag::EveryAmount);
        assert_eq!(spans[2].tag, PatternTag::EveryUnit);
    }

    #[test]
    fn test_weekday_forms() {
        let spans = extract("every Monday and on Tuesdays");
        assert_eq!(texts(&spans), vec!["every Monday", "Tuesdays"]);
        assert!(spans.iter().all(|s| s.tag == PatternTag::EveryWeekday));
    }

    #[test]
    fn test_set_with_time() {
        let spans = extract("every Monday at 3pm");
        assert_eq!(texts(&spans), vec!["every Monday at 3pm"]);
        assert_eq!(spans[0].tag, PatternTag::SetWithTime);

        let spans = extract("at 9am daily");
        assert_eq!(texts(&spans), vec!["9am daily"]);
    }
}
