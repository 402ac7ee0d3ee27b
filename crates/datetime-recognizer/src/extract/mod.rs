//! Extractors: locate candidate spans of one subtype.
//!
//! Simple extractors apply their culture's pattern family. Composite
//! extractors also run the simpler extractors and fuse adjacent spans whose
//! gap matches a connector ("tomorrow" + "at" + "3pm").

mod alt;
mod date;
mod date_period;
mod datetime;
mod datetime_period;
mod duration;
mod holiday;
mod set;
mod time;
mod time_period;
mod timezone;

pub use alt::AltExtractor;
pub use date::DateExtractor;
pub use date_period::DatePeriodExtractor;
pub use datetime::DateAndTimeExtractor;
pub use datetime_period::DateTimePeriodExtractor;
pub use duration::DurationExtractor;
pub use holiday::HolidayExtractor;
pub use set::SetExtractor;
pub use time::TimeExtractor;
pub use time_period::TimePeriodExtractor;
pub use timezone::TimeZoneExtractor;

use chrono::NaiveDateTime;
use regex::{Captures, Regex};

use crate::locale::{LocalePatternSet, PatternEntry};
use crate::types::{span_order, Capture, ExtractedSpan, PatternTag, SpanFlags, SubType};

/// Locates candidate spans of one subtype.
///
/// Implementations are pure: the same text and reference always yield the
/// same spans, and a call never mutates shared state.
pub trait DateTimeExtractor: Send + Sync {
    fn subtype(&self) -> SubType;

    /// Candidate spans ordered by start, non-overlapping.
    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractedSpan>;
}

/// How far back a context check ("from", "before") looks, in bytes.
const LOOKBEHIND: usize = 48;

/// Longest gap two spans may have and still be fused.
const MAX_GAP: usize = 24;

/// A span and the weight of the pattern that produced it.
pub(crate) type Weighted = (ExtractedSpan, u8);

/// Every match of the subtype's patterns, before overlap resolution.
pub(crate) fn scan_candidates(
    patterns: &LocalePatternSet,
    subtype: SubType,
    text: &str,
) -> Vec<Weighted> {
    let mut found = Vec::new();
    for entry in patterns.entries(subtype) {
        for caps in entry.matcher.captures_iter(text) {
            if let Some(span) = span_from_captures(entry, &caps, text) {
                found.push((span, entry.weight));
            }
        }
    }
    found
}

/// Matches of the subtype's patterns with overlaps resolved.
pub(crate) fn scan(patterns: &LocalePatternSet, subtype: SubType, text: &str) -> Vec<ExtractedSpan> {
    resolve_overlaps(scan_candidates(patterns, subtype, text))
}

fn span_from_captures(entry: &PatternEntry, caps: &Captures<'_>, text: &str) -> Option<ExtractedSpan> {
    let whole = caps.get(0)?;
    // A `lead` group is context ("at 3", "in March"), not part of the span.
    let from = caps.name("lead").map_or(whole.start(), |lead| lead.end());
    let region = &text[from..whole.end()];
    let start = from + (region.len() - region.trim_start().len());
    let end = start + text[start..whole.end()].trim_end().len();
    if start >= end {
        return None;
    }

    let mut span = ExtractedSpan::new(entry.subtype, entry.tag, text, start, end);
    for name in entry.matcher.capture_names().flatten() {
        if name == "lead" {
            continue;
        }
        if let Some(m) = caps.name(name) {
            span.captures.push(Capture {
                name: name.to_string(),
                value: m.as_str().to_string(),
                start: m.start(),
            });
        }
    }
    if span.has_capture("prefix") {
        span.flags.insert(SpanFlags::RANGE_PREFIX);
    }
    Some(span)
}

/// Keep the longest span at the leftmost start; equal lengths prefer the
/// higher weight. Output is in span order.
pub(crate) fn resolve_overlaps(mut found: Vec<Weighted>) -> Vec<ExtractedSpan> {
    found.sort_by(|(a, wa), (b, wb)| {
        a.start
            .cmp(&b.start)
            .then(b.length.cmp(&a.length))
            .then(wb.cmp(wa))
    });
    let mut kept: Vec<ExtractedSpan> = Vec::new();
    for (span, _) in found {
        if kept.iter().all(|k| !k.overlaps(&span)) {
            kept.push(span);
        }
    }
    kept.sort_by(span_order);
    kept
}

/// Lift resolved spans back into the weighted pool used by composites.
pub(crate) fn unweighted(spans: Vec<ExtractedSpan>) -> impl Iterator<Item = Weighted> {
    spans.into_iter().map(|s| (s, 0))
}

/// Match `re` (anchored with `$`) against the text just before `pos`.
pub(crate) fn match_before<'t>(re: &Regex, text: &'t str, pos: usize) -> Option<Captures<'t>> {
    let head = &text[..pos];
    let mut from = pos.saturating_sub(LOOKBEHIND);
    while !head.is_char_boundary(from) {
        from -= 1;
    }
    re.captures_at(head, from)
}

/// Match `re` (anchored with `^`) against the text from `pos` on. Offsets in
/// the returned captures are relative to `pos`.
pub(crate) fn match_after<'t>(re: &Regex, text: &'t str, pos: usize) -> Option<Captures<'t>> {
    re.captures(&text[pos..])
}

/// Text between two spans, if `right` starts at or after the end of `left`
/// and the gap is short enough to be a connector.
pub(crate) fn gap<'t>(text: &'t str, left: &ExtractedSpan, right: &ExtractedSpan) -> Option<&'t str> {
    (left.end() <= right.start && right.start - left.end() <= MAX_GAP)
        .then(|| &text[left.end()..right.start])
}

/// Fuse every `left` + `right` pair whose gap matches `connector`.
pub(crate) fn fuse_adjacent(
    text: &str,
    lefts: &[ExtractedSpan],
    rights: &[ExtractedSpan],
    connector: &Regex,
    subtype: SubType,
    tag: PatternTag,
) -> Vec<ExtractedSpan> {
    let mut fused = Vec::new();
    for left in lefts {
        for right in rights {
            match gap(text, left, right) {
                Some(between) if connector.is_match(between) => {
                    fused.push(ExtractedSpan::fused(
                        subtype,
                        tag,
                        text,
                        left.start,
                        right.end(),
                        vec![left.clone(), right.clone()],
                    ));
                }
                _ => {}
            }
        }
    }
    fused
}

/// Fuse boundary pairs into range spans: "Monday to Wednesday", "from 3pm
/// until 5pm", "between 2018 and 2019". A leading "from"/"between" becomes
/// part of the span.
pub(crate) fn fuse_ranges(
    text: &str,
    patterns: &LocalePatternSet,
    starts: &[ExtractedSpan],
    ends: &[ExtractedSpan],
    subtype: SubType,
) -> Vec<ExtractedSpan> {
    let connectors = patterns.connectors();
    let mut fused = Vec::new();
    for first in starts {
        let prefix = match_before(&connectors.range_prefix, text, first.start)
            .and_then(|caps| caps.name("prefix"))
            .map(|m| (m.start(), m.as_str().to_ascii_lowercase()));
        let between = prefix.as_ref().is_some_and(|(_, word)| word == "between");
        for last in ends {
            let Some(middle) = gap(text, first, last) else {
                continue;
            };
            let joined = connectors.range.is_match(middle)
                || (between && connectors.between.is_match(middle));
            if !joined {
                continue;
            }
            let start = prefix.as_ref().map_or(first.start, |(at, _)| *at);
            let mut span = ExtractedSpan::fused(
                subtype,
                PatternTag::BoundaryRange,
                text,
                start,
                last.end(),
                vec![first.clone(), last.clone()],
            );
            if let Some((at, word)) = &prefix {
                span.flags.insert(SpanFlags::RANGE_PREFIX);
                span.set_capture("prefix", word, *at);
            }
            fused.push(span);
        }
    }
    fused
}

/// Dates and holidays as one list. A date with the same extent as a holiday
/// ("July 4th") is left out.
pub(crate) fn date_like(dates: Vec<ExtractedSpan>, holidays: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
    let mut all = holidays;
    for date in dates {
        if !all
            .iter()
            .any(|h| h.start == date.start && h.length == date.length)
        {
            all.push(date);
        }
    }
    all.sort_by(span_order);
    all
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::locale::{pattern_set, Culture, LocalePatternSet};

    pub fn english() -> &'static LocalePatternSet {
        pattern_set(Culture::English).unwrap()
    }

    pub fn british() -> &'static LocalePatternSet {
        pattern_set(Culture::EnglishOthers).unwrap()
    }

    /// Monday 2016-11-07 16:12:00.
    pub fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 11, 7)
            .unwrap()
            .and_hms_opt(16, 12, 0)
            .unwrap()
    }

    pub fn texts(spans: &[crate::types::ExtractedSpan]) -> Vec<&str> {
        spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_lead_group_is_trimmed() {
        let spans = scan(english(), SubType::Time, "see you at 3 then");
        assert_eq!(texts(&spans), vec!["3"]);
        assert_eq!(spans[0].start, 11);
    }

    #[test]
    fn test_overlaps_prefer_longest_at_leftmost_start() {
        let spans = scan(english(), SubType::Date, "on March 5, 2019 we met");
        assert_eq!(texts(&spans), vec!["March 5, 2019"]);
    }

    #[test]
    fn test_fuse_ranges_takes_from_prefix() {
        let set = english();
        let text = "from Monday to Wednesday";
        let dates = scan(set, SubType::Date, text);
        let ranges = fuse_ranges(text, set, &dates, &dates, SubType::DatePeriod);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].text, "from Monday to Wednesday");
        assert!(ranges[0].flags.contains(SpanFlags::RANGE_PREFIX));
        assert_eq!(ranges[0].parts.len(), 2);
    }

    #[test]
    fn test_and_joins_only_after_between() {
        let set = english();
        let text = "Monday and Wednesday";
        let dates = scan(set, SubType::Date, text);
        assert!(fuse_ranges(text, set, &dates, &dates, SubType::DatePeriod).is_empty());

        let text = "between Monday and Wednesday";
        let dates = scan(set, SubType::Date, text);
        let ranges = fuse_ranges(text, set, &dates, &dates, SubType::DatePeriod);
        assert_eq!(texts(&ranges), vec!["between Monday and Wednesday"]);
    }

    #[test]
    fn test_match_before_respects_char_boundaries() {
        let set = english();
        let text = "ééééééééééééééééééééééééééééé from Monday";
        let pos = text.find("Monday").unwrap();
        let caps = match_before(&set.connectors().range_prefix, text, pos).unwrap();
        assert_eq!(&caps["prefix"], "from");
    }
}
