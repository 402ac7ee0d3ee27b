use chrono::NaiveDateTime;

use super::{scan, DateTimeExtractor};
use crate::locale::LocalePatternSet;
use crate::types::{ExtractedSpan, PatternTag, SpanFlags, SubType};

/// Clock times: "3:30pm", "3pm", "5 o'clock", "at 7", "noon", "half past 3".
#[derive(Debug, Clone, Copy)]
pub struct TimeExtractor {
    patterns: &'static LocalePatternSet,
}

impl TimeExtractor {
    pub fn new(patterns: &'static LocalePatternSet) -> Self {
        TimeExtractor { patterns }
    }

    /// Flag an hour without am/pm that reads either way, recording both
    /// readings as `hour_am` / `hour_pm`.
    fn mark_ambiguous(&self, span: &mut ExtractedSpan) {
        if span.tag == PatternTag::NamedTime
            || span.has_capture("ampm")
            || span.has_capture("daypart")
        {
            return;
        }
        let Some(hour) = span.capture("hour").and_then(|h| self.patterns.number(h)) else {
            return;
        };
        if !(1.0..=12.0).contains(&hour) || hour.fract() != 0.0 {
            return;
        }
        let hour = hour as u32;
        let start = span.start;
        span.flags.insert(SpanFlags::AMBIGUOUS_HOUR);
        span.set_capture("hour_am", &(hour % 12).to_string(), start);
        span.set_capture("hour_pm", &(hour % 12 + 12).to_string(), start);
    }
}

impl DateTimeExtractor for TimeExtractor {
    fn subtype(&self) -> SubType {
        SubType::Time
    }

    fn extract(&self, text: &str, _reference: NaiveDateTime) -> Vec<ExtractedSpan> {
        let mut spans = scan(self.patterns, SubType::Time, text);
        for span in &mut spans {
            self.mark_ambiguous(span);
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn extract(text: &str) -> Vec<ExtractedSpan> {
        TimeExtractor::new(english()).extract(text, reference())
    }

    #[test]
    fn test_am_pm_forms() {
        let spans = extract("at 3pm, 4:30 p.m. or 11 AM");
        assert_eq!(texts(&spans), vec!["3pm", "4:30 p.m.", "11 AM"]);
        assert!(spans.iter().all(|s| !s.flags.contains(SpanFlags::AMBIGUOUS_HOUR)));
    }

    #[test]
    fn test_bare_hour_needs_at() {
        assert!(extract("I have 3 apples").is_empty());
        let spans = extract("meet at 3");
        assert_eq!(texts(&spans), vec!["3"]);
        assert!(spans[0].flags.contains(SpanFlags::AMBIGUOUS_HOUR));
        assert_eq!(spans[0].capture("hour_am"), Some("3"));
        assert_eq!(spans[0].capture("hour_pm"), Some("15"));
    }

    #[test]
    fn test_twenty_four_hour_clock_is_not_ambiguous() {
        let spans = extract("at 15:30");
        assert_eq!(texts(&spans), vec!["15:30"]);
        assert!(!spans[0].flags.contains(SpanFlags::AMBIGUOUS_HOUR));
    }

    #[test]
    fn test_named_and_fractional_times() {
        let spans = extract("noon, half past three and five o'clock in the afternoon");
        assert_eq!(
            texts(&spans),
            vec!["noon", "half past three", "five o'clock in the afternoon"]
        );
        assert!(!spans[0].flags.contains(SpanFlags::AMBIGUOUS_HOUR));
        assert!(spans[1].flags.contains(SpanFlags::AMBIGUOUS_HOUR));
        assert!(!spans[2].flags.contains(SpanFlags::AMBIGUOUS_HOUR));
    }
}
