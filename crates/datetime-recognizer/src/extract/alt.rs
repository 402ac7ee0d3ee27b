//! Disjunctions: "3pm or 4pm", "March 5 or 6", "next Monday or Tuesday".
//!
//! Runs on the pooled candidates of the other extractors. Spans of one
//! family joined by "or", "and" or commas become one span flagged
//! `ALTERNATIVES` whose parts are the alternatives. Incomplete alternatives
//! borrow what they lack from their neighbours: a bare day takes the month of
//! the date before it, a bare hour takes the am/pm of the time after it, a
//! weekday takes the "next"/"last" of the weekday before it, a time after a
//! date-time takes its day ("tomorrow at 3 or 4pm").

use super::{gap, match_after, match_before, resolve_overlaps, unweighted};
use crate::locale::LocalePatternSet;
use crate::types::{span_order, ExtractedSpan, PatternTag, SpanFlags, SubType};

const FAMILIES: [SubType; 3] = [SubType::Date, SubType::Time, SubType::DateTime];

#[derive(Debug, Clone, Copy)]
pub struct AltExtractor {
    patterns: &'static LocalePatternSet,
}

impl AltExtractor {
    pub fn new(patterns: &'static LocalePatternSet) -> Self {
        AltExtractor { patterns }
    }

    /// Alternative spans found among `candidates`. The candidates themselves
    /// are not returned.
    pub fn extract(&self, text: &str, candidates: &[ExtractedSpan]) -> Vec<ExtractedSpan> {
        let mut found = Vec::new();
        for family in FAMILIES {
            let members: Vec<ExtractedSpan> = candidates
                .iter()
                .filter(|s| s.subtype == family && !s.flags.contains(SpanFlags::ALTERNATIVES))
                .cloned()
                .collect();
            let mut members = resolve_overlaps(unweighted(members).collect());
            let fragments = match family {
                SubType::Date => self.day_fragments(text, &members, candidates),
                SubType::Time => self.hour_fragments(text, &members, candidates),
                SubType::DateTime => self.clock_fragments(text, &members, candidates),
                _ => Vec::new(),
            };
            // A fragment replaces the bare "the 6th" it was built over.
            members.retain(|m| !fragments.iter().any(|f| f.overlaps(m)));
            members.extend(fragments);
            members.sort_by(span_order);

            for chain in self.chains(text, members) {
                if chain.len() >= 2 {
                    found.push(self.build(family, text, chain));
                }
            }
        }
        found
    }

    /// Bare days after a month date: "March 5, 6 or 7".
    fn day_fragments(
        &self,
        text: &str,
        dates: &[ExtractedSpan],
        taken: &[ExtractedSpan],
    ) -> Vec<ExtractedSpan> {
        let re = &self.patterns.connectors().day_fragment;
        let mut fragments: Vec<ExtractedSpan> = Vec::new();
        let anchors = dates
            .iter()
            .filter(|s| matches!(s.tag, PatternTag::MonthDayYear | PatternTag::DayMonthYear));
        for anchor in anchors {
            let mut end = anchor.end();
            while let Some(caps) = match_after(re, text, end) {
                let (Some(whole), Some(day)) = (caps.name("fragment"), caps.name("day")) else {
                    break;
                };
                let mut fragment =
                    ExtractedSpan::new(SubType::Date, anchor.tag, text, end + whole.start(), end + whole.end());
                let blocked = taken
                    .iter()
                    .filter(|s| s.tag != PatternTag::DayOfMonth)
                    .chain(&fragments)
                    .any(|s| s.overlaps(&fragment));
                if blocked {
                    break;
                }
                fragment.set_capture("day", day.as_str(), end + day.start());
                for name in ["month", "year"] {
                    if let Some(value) = anchor.capture(name) {
                        fragment.set_capture(name, value, anchor.start);
                    }
                }
                end = fragment.end();
                fragments.push(fragment);
            }
        }
        fragments
    }

    /// Bare hours before a time with am/pm: "2, 3 or 4pm".
    fn hour_fragments(
        &self,
        text: &str,
        times: &[ExtractedSpan],
        taken: &[ExtractedSpan],
    ) -> Vec<ExtractedSpan> {
        let re = &self.patterns.connectors().hour_fragment;
        let mut fragments: Vec<ExtractedSpan> = Vec::new();
        for anchor in times {
            let Some(ampm) = anchor.capture("ampm") else {
                continue;
            };
            let mut start = anchor.start;
            while let Some(caps) = match_before(re, text, start) {
                let Some(hour) = caps.name("hour") else {
                    break;
                };
                let minute = caps.name("minute");
                let end = minute.map_or(hour.end(), |m| m.end());
                let mut fragment =
                    ExtractedSpan::new(SubType::Time, PatternTag::HourAmPm, text, hour.start(), end);
                if taken.iter().chain(&fragments).any(|s| s.overlaps(&fragment)) {
                    break;
                }
                fragment.set_capture("hour", hour.as_str(), hour.start());
                if let Some(m) = minute {
                    fragment.set_capture("minute", m.as_str(), m.start());
                }
                fragment.set_capture("ampm", ampm, anchor.start);
                start = fragment.start;
                fragments.push(fragment);
            }
        }
        fragments
    }

    /// Times after a fused date-time, each paired with the host's day:
    /// "tomorrow at 3 or 4pm", "Friday at noon, 2pm or 5pm".
    fn clock_fragments(
        &self,
        text: &str,
        hosts: &[ExtractedSpan],
        taken: &[ExtractedSpan],
    ) -> Vec<ExtractedSpan> {
        let connector = &self.patterns.connectors().alternatives;
        let times = resolve_overlaps(
            unweighted(taken.iter().filter(|s| s.subtype == SubType::Time).cloned().collect()).collect(),
        );
        let mut fragments = Vec::new();
        for host in hosts.iter().filter(|h| h.tag == PatternTag::DateAndTime) {
            let Some(day) = host
                .parts
                .iter()
                .find(|p| matches!(p.subtype, SubType::Date | SubType::Holiday))
            else {
                continue;
            };
            let mut end = host.clone();
            for time in times.iter().filter(|t| t.start >= host.end()) {
                let joined = gap(text, &end, time).is_some_and(|between| connector.is_match(between));
                if !joined || hosts.iter().any(|h| h.overlaps(time)) {
                    break;
                }
                let fragment = ExtractedSpan::fused(
                    SubType::DateTime,
                    PatternTag::DateAndTime,
                    text,
                    time.start,
                    time.end(),
                    vec![day.clone(), time.clone()],
                );
                end = fragment.clone();
                fragments.push(fragment);
            }
        }
        fragments
    }

    /// Maximal runs of spans separated by an alternatives connector.
    fn chains(&self, text: &str, members: Vec<ExtractedSpan>) -> Vec<Vec<ExtractedSpan>> {
        let connector = &self.patterns.connectors().alternatives;
        let mut chains: Vec<Vec<ExtractedSpan>> = Vec::new();
        for span in members {
            let joined = chains
                .last()
                .and_then(|c| c.last())
                .and_then(|prev| gap(text, prev, &span))
                .is_some_and(|between| connector.is_match(between));
            match chains.last_mut() {
                Some(chain) if joined => chain.push(span),
                _ => chains.push(vec![span]),
            }
        }
        chains
    }

    fn build(&self, family: SubType, text: &str, mut parts: Vec<ExtractedSpan>) -> ExtractedSpan {
        match family {
            SubType::Time => inherit_meridiem(&mut parts),
            SubType::Date => {
                inherit_relative(&mut parts);
                inherit_year(&mut parts);
            }
            SubType::DateTime => inherit_clock_meridiem(&mut parts),
            _ => {}
        }
        let start = parts.first().map_or(0, |p| p.start);
        let end = parts.last().map_or(start, |p| p.end());
        let mut span =
            ExtractedSpan::fused(family, PatternTag::Alternatives, text, start, end, parts);
        span.flags.insert(SpanFlags::ALTERNATIVES);
        span
    }
}

/// A time without am/pm takes the marker of the nearest alternative that has
/// one, looking right first.
fn inherit_meridiem(parts: &mut [ExtractedSpan]) {
    for i in 0..parts.len() {
        if parts[i].has_capture("ampm") || parts[i].has_capture("daypart") {
            continue;
        }
        let donor = parts[i + 1..]
            .iter()
            .chain(parts[..i].iter().rev())
            .find_map(|p| p.capture("ampm").map(str::to_string));
        if let Some(ampm) = donor {
            let at = parts[i].start;
            parts[i].set_capture("ampm", &ampm, at);
            parts[i].flags.remove(SpanFlags::AMBIGUOUS_HOUR);
        }
    }
}

/// The clocks of fused date-times share am/pm the way bare times do.
fn inherit_clock_meridiem(parts: &mut [ExtractedSpan]) {
    let slots: Vec<(usize, usize)> = parts
        .iter()
        .enumerate()
        .filter(|(_, p)| p.tag == PatternTag::DateAndTime)
        .filter_map(|(i, p)| p.parts.iter().position(|c| c.subtype == SubType::Time).map(|j| (i, j)))
        .collect();
    let mut clocks: Vec<ExtractedSpan> = slots.iter().map(|&(i, j)| parts[i].parts[j].clone()).collect();
    inherit_meridiem(&mut clocks);
    for ((i, j), clock) in slots.into_iter().zip(clocks) {
        parts[i].parts[j] = clock;
    }
}

/// "next Monday or Tuesday": a bare weekday after a relative weekday is
/// relative too.
fn inherit_relative(parts: &mut [ExtractedSpan]) {
    let mut rel: Option<String> = None;
    for part in parts.iter_mut() {
        match part.tag {
            PatternTag::RelativeWeekday => rel = part.capture("rel").map(str::to_string),
            PatternTag::Weekday => {
                if let Some(word) = &rel {
                    let at = part.start;
                    part.set_capture("rel", word, at);
                    part.tag = PatternTag::RelativeWeekday;
                }
            }
            _ => rel = None,
        }
    }
}

/// "March 5 or April 6, 2019": a month date without a year takes the year of
/// the next alternative that has one.
fn inherit_year(parts: &mut [ExtractedSpan]) {
    for i in 0..parts.len() {
        let is_month_date = matches!(parts[i].tag, PatternTag::MonthDayYear | PatternTag::DayMonthYear);
        if !is_month_date || parts[i].has_capture("year") {
            continue;
        }
        let donor = parts[i + 1..]
            .iter()
            .find_map(|p| p.capture("year").map(|y| (y.to_string(), p.start)));
        if let Some((year, at)) = donor {
            parts[i].set_capture("year", &year, at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{DateAndTimeExtractor, DateExtractor, DateTimeExtractor, TimeExtractor};
    use super::*;

    fn candidates(text: &str) -> Vec<ExtractedSpan> {
        let mut all = DateExtractor::new(english()).extract(text, reference());
        all.extend(TimeExtractor::new(english()).extract(text, reference()));
        all.extend(DateAndTimeExtractor::new(english()).extract(text, reference()));
        all
    }

    fn extract(text: &str) -> Vec<ExtractedSpan> {
        AltExtractor::new(english()).extract(text, &candidates(text))
    }

    #[test]
    fn test_times_joined_by_or() {
        let spans = extract("3pm or 4pm");
        assert_eq!(texts(&spans), vec!["3pm or 4pm"]);
        assert_eq!(spans[0].subtype, SubType::Time);
        assert!(spans[0].flags.contains(SpanFlags::ALTERNATIVES));
        assert_eq!(spans[0].parts.len(), 2);
    }

    #[test]
    fn test_hour_fragments_take_the_marker() {
        let spans = extract("2, 3 or 4pm");
        assert_eq!(texts(&spans), vec!["2, 3 or 4pm"]);
        let parts = &spans[0].parts;
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.capture("ampm") == Some("pm")));
    }

    #[test]
    fn test_day_fragments_take_the_month() {
        let spans = extract("March 5 or the 6th");
        assert_eq!(texts(&spans), vec!["March 5 or the 6th"]);
        let fragment = &spans[0].parts[1];
        assert_eq!(fragment.capture("day"), Some("6"));
        assert_eq!(fragment.capture("month"), Some("March"));
    }

    #[test]
    fn test_weekday_takes_the_relative_word() {
        let spans = extract("next Monday or Tuesday");
        let parts = &spans[0].parts;
        assert_eq!(parts[1].tag, PatternTag::RelativeWeekday);
        assert_eq!(parts[1].capture("rel"), Some("next"));
    }

    #[test]
    fn test_year_is_shared() {
        let spans = extract("March 5 or April 6, 2019");
        assert_eq!(spans[0].parts[0].capture("year"), Some("2019"));
    }

    #[test]
    fn test_ambiguous_hour_takes_the_marker() {
        let spans = extract("at 3 or 4pm");
        let first = &spans[0].parts[0];
        assert_eq!(first.capture("ampm"), Some("pm"));
        assert!(!first.flags.contains(SpanFlags::AMBIGUOUS_HOUR));
    }

    #[test]
    fn test_time_after_a_date_time_takes_its_day() {
        let spans = extract("tomorrow at 3 or 4pm");
        let hosted: Vec<&ExtractedSpan> = spans.iter().filter(|s| s.subtype == SubType::DateTime).collect();
        assert_eq!(hosted.len(), 1);
        assert_eq!(hosted[0].text, "tomorrow at 3 or 4pm");
        let parts = &hosted[0].parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].text, "4pm");
        assert_eq!(parts[1].parts[0].text, "tomorrow");
        let clock = &parts[0].parts[1];
        assert_eq!(clock.capture("ampm"), Some("pm"));
        assert!(!clock.flags.contains(SpanFlags::AMBIGUOUS_HOUR));
    }

    #[test]
    fn test_single_spans_are_not_alternatives() {
        assert!(extract("3pm then lunch").is_empty());
        assert!(extract("Monday to Friday").is_empty());
    }
}
