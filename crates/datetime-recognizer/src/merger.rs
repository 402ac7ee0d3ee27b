//! The recognition pipeline.
//!
//! A request moves through a fixed sequence of phases:
//!
//! 1. **Scan**: every enabled extractor runs over the text.
//! 2. **Collect**: relative durations ("in 3 days", "2 hours ago", "a week
//!    before Christmas") are fused with their context, then disjunctions are
//!    found among the pooled candidates.
//! 3. **Deduplicate**: overlaps are resolved by subtype priority, a span
//!    inside a surviving one is dropped; time zones and modifier words attach
//!    to their hosts.
//! 4. **Dispatch**: each survivor goes to the parser of its subtype.
//! 5. **Assemble**: results are ordered by position.
//!
//! The deadline, if any, is checked between phases and before each parse.

use std::time::Instant;

use chrono::{NaiveDateTime, NaiveTime};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::Result;
use crate::extract::{
    gap, match_after, match_before, AltExtractor, DateAndTimeExtractor, DateExtractor,
    DatePeriodExtractor, DateTimeExtractor, DateTimePeriodExtractor, DurationExtractor,
    HolidayExtractor, SetExtractor, TimeExtractor, TimePeriodExtractor, TimeZoneExtractor,
};
use crate::locale::{pattern_set, Culture, LocalePatternSet};
use crate::options::{DateTimeOptions, RecognizerOptions};
use crate::parse::{
    AltParser, DateAndTimeParser, DateParser, DatePeriodParser, DateTimeParser,
    DateTimePeriodParser, DurationParser, HolidayParser, ParseContext, SetParser, TimeParser,
    TimePeriodParser, TimeZoneParser,
};
use crate::resolution::{DroppedSpan, ModelResult, ParsedResult, Recognition, ResolutionValue};
use crate::types::{span_order, ExtractedSpan, PatternTag, SpanFlags, SubType};

/// Recognizes temporal expressions in text for one culture.
///
/// Construction compiles (or fetches the already compiled) pattern set of
/// the culture; a recognizer is immutable afterwards and can be shared
/// across threads.
pub struct DateTimeRecognizer {
    patterns: &'static LocalePatternSet,
    options: RecognizerOptions,
    extractors: Vec<Box<dyn DateTimeExtractor>>,
    alt: AltExtractor,
    parsers: Parsers,
}

struct Parsers {
    date: DateParser,
    time: TimeParser,
    datetime: DateAndTimeParser,
    date_period: DatePeriodParser,
    time_period: TimePeriodParser,
    datetime_period: DateTimePeriodParser,
    duration: DurationParser,
    set: SetParser,
    holiday: HolidayParser,
    time_zone: TimeZoneParser,
    alt: AltParser,
}

impl Parsers {
    fn new(ctx: ParseContext) -> Self {
        Parsers {
            date: DateParser::new(ctx),
            time: TimeParser::new(ctx),
            datetime: DateAndTimeParser::new(ctx),
            date_period: DatePeriodParser::new(ctx),
            time_period: TimePeriodParser::new(ctx),
            datetime_period: DateTimePeriodParser::new(ctx),
            duration: DurationParser::new(ctx),
            set: SetParser::new(ctx),
            holiday: HolidayParser::new(ctx),
            time_zone: TimeZoneParser::new(ctx),
            alt: AltParser::new(ctx),
        }
    }

    fn for_subtype(&self, subtype: SubType) -> &dyn DateTimeParser {
        match subtype {
            SubType::Date => &self.date,
            SubType::Time => &self.time,
            SubType::DateTime => &self.datetime,
            SubType::DatePeriod => &self.date_period,
            SubType::TimePeriod => &self.time_period,
            SubType::DateTimePeriod => &self.datetime_period,
            SubType::Duration => &self.duration,
            SubType::Set => &self.set,
            SubType::Holiday => &self.holiday,
            SubType::TimeZone => &self.time_zone,
        }
    }
}

enum Phase {
    Scan,
    Collect(Vec<ExtractedSpan>),
    Deduplicate(Vec<ExtractedSpan>),
    Dispatch(Vec<ExtractedSpan>),
    Assemble(Vec<ParsedResult>),
    Done(Recognition),
}

/// Per-request state.
struct Run<'t> {
    text: &'t str,
    reference: NaiveDateTime,
    deadline: Option<Instant>,
    dropped: Vec<DroppedSpan>,
}

impl Run<'_> {
    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn drop_span(&mut self, span: &ExtractedSpan, reason: String) {
        debug!(subtype = %span.subtype, text = %span.text, start = span.start, %reason, "span dropped");
        self.dropped.push(DroppedSpan {
            subtype: span.subtype,
            text: span.text.clone(),
            start: span.start,
            reason,
        });
    }
}

impl DateTimeRecognizer {
    /// Create a recognizer for `culture`.
    ///
    /// # Errors
    ///
    /// Returns the locale compilation error if the culture's pattern set is
    /// invalid.
    pub fn new(culture: Culture, options: RecognizerOptions) -> Result<Self> {
        let patterns = pattern_set(culture)?;
        let merge_ranges = !options.flags.contains(DateTimeOptions::SKIP_FROM_TO_MERGE);
        let mut extractors: Vec<Box<dyn DateTimeExtractor>> = vec![
            Box::new(DateExtractor::new(patterns)),
            Box::new(TimeExtractor::new(patterns)),
            Box::new(DateAndTimeExtractor::new(patterns)),
            Box::new(DatePeriodExtractor::new(patterns, merge_ranges)),
            Box::new(TimePeriodExtractor::new(patterns, merge_ranges)),
            Box::new(DateTimePeriodExtractor::new(patterns, merge_ranges)),
            Box::new(DurationExtractor::new(patterns)),
            Box::new(SetExtractor::new(patterns)),
            Box::new(HolidayExtractor::new(patterns)),
        ];
        if !options.flags.contains(DateTimeOptions::SKIP_TIME_ZONE) {
            extractors.push(Box::new(TimeZoneExtractor::new(patterns)));
        }
        let ctx = ParseContext::new(patterns, options.week_start);
        Ok(DateTimeRecognizer {
            patterns,
            alt: AltExtractor::new(patterns),
            parsers: Parsers::new(ctx),
            extractors,
            options,
        })
    }

    pub fn culture(&self) -> Culture {
        self.patterns.culture()
    }

    pub fn options(&self) -> &RecognizerOptions {
        &self.options
    }

    /// Recognized expressions in `text`, ordered by position and
    /// non-overlapping.
    pub fn recognize(&self, text: &str, reference: NaiveDateTime) -> Vec<ModelResult> {
        self.recognize_detailed(text, reference).results
    }

    /// Like [`recognize`](Self::recognize), also reporting the candidates
    /// that could not be resolved and whether the deadline expired.
    pub fn recognize_detailed(&self, text: &str, reference: NaiveDateTime) -> Recognition {
        let mut run = Run {
            text,
            reference,
            deadline: self.options.timeout.map(|t| Instant::now() + t),
            dropped: Vec::new(),
        };
        let mut phase = Phase::Scan;
        loop {
            phase = match phase {
                Phase::Done(recognition) => return recognition,
                _ if run.expired() => {
                    warn!(text_len = text.len(), "recognition timed out, discarding results");
                    return Recognition {
                        timed_out: true,
                        ..Recognition::default()
                    };
                }
                Phase::Scan => Phase::Collect(self.scan(&run)),
                Phase::Collect(candidates) => Phase::Deduplicate(self.collect(&run, candidates)),
                Phase::Deduplicate(candidates) => Phase::Dispatch(self.deduplicate(&mut run, candidates)),
                Phase::Dispatch(spans) => Phase::Assemble(self.dispatch(&mut run, spans)),
                Phase::Assemble(mut parsed) => {
                    parsed.sort_by(|a, b| span_order(&a.span, &b.span));
                    Phase::Done(Recognition {
                        results: parsed.into_iter().map(ModelResult::from).collect(),
                        dropped: std::mem::take(&mut run.dropped),
                        timed_out: false,
                    })
                }
            };
        }
    }

    // ── Scan ────────────────────────────────────────────────────────────────

    fn scan(&self, run: &Run<'_>) -> Vec<ExtractedSpan> {
        let (text, reference) = (run.text, run.reference);
        let candidates: Vec<ExtractedSpan> = if self.options.parallel_scan {
            self.extractors
                .par_iter()
                .flat_map_iter(|e| e.extract(text, reference))
                .collect()
        } else {
            self.extractors
                .iter()
                .flat_map(|e| e.extract(text, reference))
                .collect()
        };
        debug!(candidates = candidates.len(), "scan finished");
        candidates
    }

    // ── Collect ─────────────────────────────────────────────────────────────

    fn collect(&self, run: &Run<'_>, mut candidates: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        let relative = self.relative_durations(run.text, &candidates);
        candidates.extend(relative);
        let alternatives = self.alt.extract(run.text, &candidates);
        candidates.extend(alternatives);
        candidates.sort_by(span_order);
        debug!(candidates = candidates.len(), "collect finished");
        candidates
    }

    /// Durations read as offsets from the reference or from an anchor.
    fn relative_durations(&self, text: &str, candidates: &[ExtractedSpan]) -> Vec<ExtractedSpan> {
        let connectors = self.patterns.connectors();
        let mut fused = Vec::new();
        for duration in candidates.iter().filter(|c| c.subtype == SubType::Duration) {
            let Ok(parts) = self.parsers.duration.parts(duration) else {
                continue;
            };
            let date_level = parts.is_date_level();

            if let Some(start) = match_before(&connectors.duration_in, text, duration.start)
                .and_then(|caps| caps.get(0))
                .map(|m| m.start())
            {
                let subtype = if date_level { SubType::Date } else { SubType::DateTime };
                fused.push(relative_span(text, subtype, start, duration.end(), "in", vec![duration.clone()]));
            }

            if let Some(start) = match_before(&connectors.duration_within, text, duration.start)
                .and_then(|caps| caps.get(0))
                .map(|m| m.start())
            {
                let subtype = if date_level {
                    SubType::DatePeriod
                } else {
                    SubType::DateTimePeriod
                };
                let mut span =
                    ExtractedSpan::fused(subtype, PatternTag::Within, text, start, duration.end(), vec![duration.clone()]);
                span.flags.insert(SpanFlags::RELATIVE_DURATION);
                fused.push(span);
            }

            let Some(caps) = match_after(&connectors.duration_suffix, text, duration.end()) else {
                continue;
            };
            let (Some(whole), Some(word)) = (caps.get(0), caps.name("direction")) else {
                continue;
            };
            let direction = word.as_str().to_ascii_lowercase();
            let direction = direction.split_whitespace().collect::<Vec<_>>().join(" ");
            let suffix_end = duration.end() + whole.end();
            if matches!(direction.as_str(), "ago" | "earlier" | "later" | "hence" | "from now") {
                let subtype = if date_level { SubType::Date } else { SubType::DateTime };
                fused.push(relative_span(text, subtype, duration.start, suffix_end, &direction, vec![duration.clone()]));
                continue;
            }

            let anchor = candidates
                .iter()
                .filter(|c| matches!(c.subtype, SubType::Date | SubType::Holiday | SubType::DateTime))
                .filter(|c| c.start >= suffix_end && connectors.anchor_gap.is_match(&text[suffix_end..c.start]))
                .max_by(|a, b| a.length.cmp(&b.length).then(a.subtype.priority().cmp(&b.subtype.priority())));
            if let Some(anchor) = anchor {
                let subtype = if date_level && anchor.subtype != SubType::DateTime {
                    SubType::Date
                } else {
                    SubType::DateTime
                };
                fused.push(relative_span(
                    text,
                    subtype,
                    duration.start,
                    anchor.end(),
                    &direction,
                    vec![duration.clone(), anchor.clone()],
                ));
            }
        }
        fused
    }

    // ── Deduplicate ─────────────────────────────────────────────────────────

    fn deduplicate(&self, run: &mut Run<'_>, candidates: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        let (zones, spans): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|s| s.subtype == SubType::TimeZone);

        // The digits of "UTC+5:30" are an offset, not a clock time.
        let offsets: Vec<&ExtractedSpan> = zones.iter().filter(|z| z.tag == PatternTag::UtcOffset).collect();
        let spans: Vec<ExtractedSpan> = spans
            .into_iter()
            .filter(|s| !offsets.iter().any(|z| z.overlaps(s) && !s.strictly_contains(z)))
            .collect();

        let mut kept = select(spans);
        kept.sort_by(span_order);

        self.attach_zones(run, &mut kept, zones);
        self.attach_modifiers(run.text, &mut kept);
        debug!(survivors = kept.len(), "deduplicate finished");
        kept
    }

    /// A zone joins the date/time expression right before it ("noon PST",
    /// "3pm in Tokyo time"). Zones with no such host are dropped.
    fn attach_zones(&self, run: &mut Run<'_>, kept: &mut [ExtractedSpan], zones: Vec<ExtractedSpan>) {
        let connector = &self.patterns.connectors().zone;
        for zone in zones {
            let clear = kept.iter().all(|k| !k.overlaps(&zone));
            let host = kept.iter().position(|k| {
                matches!(
                    k.subtype,
                    SubType::Time | SubType::DateTime | SubType::TimePeriod | SubType::DateTimePeriod
                ) && k.time_zone.is_none()
                    && gap(run.text, k, &zone).is_some_and(|between| connector.is_match(between))
            });
            match host {
                Some(i) if clear => {
                    let mut widened = kept[i].widened(run.text, kept[i].start, zone.end());
                    widened.time_zone = Some(Box::new(zone));
                    kept[i] = widened;
                }
                _ => run.drop_span(&zone, "time zone without a date or time to attach to".to_string()),
            }
        }
    }

    /// "before March", "since 2019", "around noon", "2015 or later".
    fn attach_modifiers(&self, text: &str, kept: &mut [ExtractedSpan]) {
        let connectors = self.patterns.connectors();
        for i in 0..kept.len() {
            if matches!(kept[i].subtype, SubType::Duration | SubType::Set) {
                continue;
            }
            let floor = if i == 0 { 0 } else { kept[i - 1].end() };
            let ceiling = kept.get(i + 1).map_or(text.len(), |next| next.start);

            let prefix = match_before(&connectors.modifier_prefix, text, kept[i].start)
                .and_then(|caps| caps.name("modifier").map(|m| (m.start(), m.as_str().to_string())))
                .filter(|(start, _)| *start >= floor);
            if let Some((start, word)) = prefix {
                let mut widened = kept[i].widened(text, start, kept[i].end());
                widened.set_capture("modifier", &word, start);
                kept[i] = widened;
                continue;
            }

            let end = kept[i].end();
            let suffix = match_after(&connectors.modifier_suffix, text, end)
                .and_then(|caps| caps.name("modifier").map(|m| (end + m.start(), end + m.end(), m.as_str().to_string())))
                .filter(|(_, stop, _)| *stop <= ceiling);
            if let Some((at, stop, word)) = suffix {
                let mut widened = kept[i].widened(text, kept[i].start, stop);
                widened.set_capture("modifier", &word, at);
                kept[i] = widened;
            }
        }
    }

    // ── Dispatch ────────────────────────────────────────────────────────────

    fn dispatch(&self, run: &mut Run<'_>, spans: Vec<ExtractedSpan>) -> Vec<ParsedResult> {
        let split = self.options.flags.contains(DateTimeOptions::SPLIT_DATE_AND_TIME);
        let mut parsed = Vec::with_capacity(spans.len());
        for span in spans {
            if run.expired() {
                break;
            }
            if split && span.tag == PatternTag::DateAndTime && span.parts.len() == 2 {
                for (index, mut part) in span.parts.iter().cloned().enumerate() {
                    if index == 0 {
                        if let Some(word) = span.capture("modifier") {
                            part.set_capture("modifier", word, span.start);
                        }
                    }
                    if part.subtype == SubType::Time {
                        part.time_zone.clone_from(&span.time_zone);
                    }
                    if let Some(result) = self.resolve(run, part) {
                        parsed.push(result);
                    }
                }
                continue;
            }
            if let Some(result) = self.resolve(run, span) {
                parsed.push(result);
            }
        }
        debug!(results = parsed.len(), dropped = run.dropped.len(), "dispatch finished");
        parsed
    }

    fn resolve(&self, run: &mut Run<'_>, span: ExtractedSpan) -> Option<ParsedResult> {
        let parser: &dyn DateTimeParser = if span.flags.contains(SpanFlags::ALTERNATIVES) {
            &self.parsers.alt
        } else {
            self.parsers.for_subtype(span.subtype)
        };
        let mut value = match parser.parse(&span, run.reference) {
            Ok(value) => value,
            Err(err) => {
                run.drop_span(&span, err.to_string());
                return None;
            }
        };

        let time_zone = span.time_zone.as_deref().and_then(|zone| {
            let host = host_instant(&value, run.reference);
            match self.parsers.time_zone.attachment(zone, host) {
                Ok(attachment) => Some(attachment),
                Err(err) => {
                    debug!(text = %zone.text, %err, "time zone not resolved");
                    None
                }
            }
        });
        if let Some(modifier) = span.capture("modifier").and_then(|w| self.patterns.modifier(w)) {
            value = value.map(|r| r.with_modifier(modifier));
        }
        Some(ParsedResult {
            span,
            value,
            time_zone,
        })
    }
}

fn relative_span(
    text: &str,
    subtype: SubType,
    start: usize,
    end: usize,
    direction: &str,
    parts: Vec<ExtractedSpan>,
) -> ExtractedSpan {
    let mut span = ExtractedSpan::fused(subtype, PatternTag::DurationRelative, text, start, end, parts);
    span.flags.insert(SpanFlags::RELATIVE_DURATION);
    span.set_capture("direction", direction, start);
    span
}

/// The local instant a zone is evaluated at: the host's future value or
/// start, else the reference.
fn host_instant(value: &ResolutionValue, reference: NaiveDateTime) -> NaiveDateTime {
    let raw = value
        .primary()
        .and_then(|r| r.future_value("value").or_else(|| r.future_value("start")));
    raw.and_then(|s| {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .ok()
            .or_else(|| {
                NaiveTime::parse_from_str(s, "%H:%M:%S")
                    .ok()
                    .map(|t| reference.date().and_time(t))
            })
    })
    .unwrap_or(reference)
}

/// Greedy selection by subtype priority, then length, then position. A span
/// strictly inside another live candidate waits for it; when the container
/// loses to an overlapping survivor, its contents compete again.
fn select(mut live: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
    loop {
        let mut pool: Vec<usize> = (0..live.len())
            .filter(|&i| !live.iter().any(|other| other.strictly_contains(&live[i])))
            .collect();
        pool.sort_by(|&a, &b| {
            let (a, b) = (&live[a], &live[b]);
            b.subtype
                .priority()
                .cmp(&a.subtype.priority())
                .then(b.length.cmp(&a.length))
                .then(a.start.cmp(&b.start))
        });
        let mut kept: Vec<usize> = Vec::new();
        let mut lost: Vec<usize> = Vec::new();
        for i in pool {
            if kept.iter().all(|&k| !live[k].overlaps(&live[i])) {
                kept.push(i);
            } else {
                lost.push(i);
            }
        }
        if lost.is_empty() {
            let mut slots: Vec<Option<ExtractedSpan>> = live.into_iter().map(Some).collect();
            return kept.into_iter().filter_map(|i| slots[i].take()).collect();
        }
        let mut index = 0;
        live.retain(|_| {
            let keep = !lost.contains(&index);
            index += 1;
            keep
        });
    }
}
