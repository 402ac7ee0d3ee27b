use chrono::{NaiveDateTime, NaiveTime};

use super::time::meridiem_of;
use super::{numeric, required, DateTimeParser, Interval, ParseContext, TimeParser};
use crate::error::ParseError;
use crate::resolution::{Resolution, ResolutionKind, ResolutionValue};
use crate::timex::{clock_timex, format_time, range_timex, time_timex};
use crate::types::{ExtractedSpan, PatternTag, SubType};

/// Resolves spans within a single day.
#[derive(Debug, Clone, Copy)]
pub struct TimePeriodParser {
    ctx: ParseContext,
    time: TimeParser,
}

impl TimePeriodParser {
    pub fn new(ctx: ParseContext) -> Self {
        TimePeriodParser {
            ctx,
            time: TimeParser::new(ctx),
        }
    }

    pub(crate) fn interval(&self, span: &ExtractedSpan) -> Result<Interval<NaiveTime>, ParseError> {
        match span.tag {
            PatternTag::TimeOfDay => {
                let raw = required(span, "tod")?;
                let part = self
                    .ctx
                    .patterns
                    .day_part(raw)
                    .ok_or_else(|| ParseError::invalid(format!("part of day '{raw}'")))?;
                let (start, end) = part
                    .bounds()
                    .ok_or_else(|| ParseError::invalid(format!("part of day '{raw}'")))?;
                Ok(Interval::fixed(part.timex().to_string(), start, end))
            }
            PatternTag::HourRange => self.hour_range(span),
            PatternTag::BoundaryRange => self.boundaries(span),
            tag => Err(ParseError::UnsupportedPattern(tag)),
        }
    }

    /// "3-5pm", "11-1pm", "between 9:30 and 11am". A marker written on one
    /// side applies to both; when that leaves the start after the end the
    /// start takes the other marker. A pm start with an am end runs past
    /// midnight ("10pm-2am"); a range written backwards under one marker is
    /// swapped.
    fn hour_range(&self, span: &ExtractedSpan) -> Result<Interval<NaiveTime>, ParseError> {
        let own_start = meridiem_of(self.ctx, span.capture("ampm"), None);
        let own_end = meridiem_of(self.ctx, span.capture("end_ampm"), None);
        let start_marker = own_start.or(own_end).ok_or(ParseError::MissingCapture("ampm"))?;
        let end_marker = own_end.unwrap_or(start_marker);

        let hour = clock_hour(span, "hour")?;
        let end_hour = clock_hour(span, "end_hour")?;
        let minute = numeric::<u32>(span, "minute")?.unwrap_or(0);
        let end_minute = numeric::<u32>(span, "end_minute")?.unwrap_or(0);

        let end = at(end_marker.apply(end_hour), end_minute)?;
        let mut start_marker = start_marker;
        let mut start = at(start_marker.apply(hour), minute)?;
        if start > end && own_start.is_none() {
            start_marker = start_marker.flipped();
            start = at(start_marker.apply(hour), minute)?;
        }
        let (start, end) = if start > end && start_marker.marker == end_marker.marker {
            (end, start)
        } else {
            (start, end)
        };
        Ok(Interval::fixed(span_timex(start, end), start, end))
    }

    /// "from 9:30am until noon": the first pair of readings that runs
    /// forward. Otherwise the range runs past midnight ("from 10pm until
    /// 2am"), unless both ends carry the same marker and it was written
    /// backwards.
    fn boundaries(&self, span: &ExtractedSpan) -> Result<Interval<NaiveTime>, ParseError> {
        let [first, last] = span.parts.as_slice() else {
            return Err(ParseError::MissingCapture("boundary"));
        };
        let starts = self.time.readings(first)?;
        let ends = self.time.readings(last)?;
        let forward = starts
            .iter()
            .flat_map(|s| ends.iter().map(move |e| (s.future, e.future)))
            .find(|(s, e)| s <= e);
        let (start, end) = match forward {
            Some(pair) => pair,
            None => {
                let (s, e) = starts
                    .first()
                    .zip(ends.first())
                    .map(|(s, e)| (s.future, e.future))
                    .ok_or(ParseError::MissingCapture("boundary"))?;
                let same_marker = match (self.time.meridiem(first), self.time.meridiem(last)) {
                    (Some(a), Some(b)) => a.marker == b.marker,
                    _ => false,
                };
                if same_marker {
                    (e, s)
                } else {
                    (s, e)
                }
            }
        };
        Ok(Interval::fixed(span_timex(start, end), start, end))
    }
}

fn clock_hour(span: &ExtractedSpan, name: &'static str) -> Result<u32, ParseError> {
    numeric::<u32>(span, name)?.ok_or(ParseError::MissingCapture(name))
}

fn at(hour: u32, minute: u32) -> Result<NaiveTime, ParseError> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| ParseError::invalid(format!("{hour}:{minute:02}")))
}

/// An end before the start falls on the next day.
fn span_timex(start: NaiveTime, end: NaiveTime) -> String {
    range_timex(
        &time_timex(start),
        &time_timex(end),
        &clock_timex((end - start).num_seconds().rem_euclid(86_400)),
    )
}

impl DateTimeParser for TimePeriodParser {
    fn subtype(&self) -> SubType {
        SubType::TimePeriod
    }

    fn parse(&self, span: &ExtractedSpan, _reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        let range = self.interval(span)?;
        let fmt = |(s, e): (NaiveTime, NaiveTime)| (format_time(s), format_time(e));
        Ok(ResolutionValue::Single(Resolution::range(
            range.timex,
            ResolutionKind::TimeRange,
            fmt(range.past),
            fmt(range.future),
        )))
    }
}
