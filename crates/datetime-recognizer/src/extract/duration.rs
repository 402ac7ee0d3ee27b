use chrono::NaiveDateTime;

use super::{gap, scan, DateTimeExtractor};
use crate::locale::LocalePatternSet;
use crate::types::{ExtractedSpan, PatternTag, SubType};

/// Lengths of time: "3 days", "half an hour", "2 and a half hours",
/// "1 hour and 30 minutes".
#[derive(Debug, Clone, Copy)]
pub struct DurationExtractor {
    patterns: &'static LocalePatternSet,
}

impl DurationExtractor {
    pub fn new(patterns: &'static LocalePatternSet) -> Self {
        DurationExtractor { patterns }
    }

    /// Chain consecutive durations joined by "and" or a comma into one
    /// compound span.
    fn chain(&self, text: &str, spans: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        let joiner = &self.patterns.connectors().duration_joiner;
        let mut groups: Vec<Vec<ExtractedSpan>> = Vec::new();
        for span in spans {
            let joined = groups
                .last()
                .and_then(|g| g.last())
                .and_then(|prev| gap(text, prev, &span))
                .is_some_and(|between| joiner.is_match(between));
            match groups.last_mut() {
                Some(group) if joined => group.push(span),
                _ => groups.push(vec![span]),
            }
        }

        groups
            .into_iter()
            .filter_map(|mut group| {
                if group.len() == 1 {
                    return group.pop();
                }
                let start = group.first()?.start;
                let end = group.last()?.end();
                Some(ExtractedSpan::fused(
                    SubType::Duration,
                    PatternTag::Compound,
                    text,
                    start,
                    end,
                    group,
                ))
            })
            .collect()
    }
}

impl DateTimeExtractor for DurationExtractor {
    fn subtype(&self) -> SubType {
        SubType::Duration
    }

    fn extract(&self, text: &str, _reference: NaiveDateTime) -> Vec<ExtractedSpan> {
        let spans = scan(self.patterns, SubType::Duration, text);
        self.chain(text, spans)
    }
}
