use chrono::{NaiveDateTime, NaiveTime};

use super::{numeric, required, DateTimeParser, ParseContext, Resolved};
use crate::error::ParseError;
use crate::locale::{AmPm, DayPart};
use crate::resolution::{Resolution, ResolutionKind, ResolutionValue};
use crate::timex::{format_time, time_timex};
use crate::types::{ExtractedSpan, PatternTag, SubType};

/// Resolves clock times. An hour without am/pm yields two readings, the
/// morning one first.
#[derive(Debug, Clone, Copy)]
pub struct TimeParser {
    ctx: ParseContext,
}

/// The am/pm reading of a time and the part of day that implied it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Meridiem {
    pub marker: AmPm,
    pub day_part: Option<DayPart>,
}

impl Meridiem {
    pub fn flipped(self) -> Meridiem {
        Meridiem {
            marker: match self.marker {
                AmPm::Am => AmPm::Pm,
                AmPm::Pm => AmPm::Am,
            },
            day_part: None,
        }
    }

    /// 24-hour clock hour of a 12-hour clock `hour`.
    pub fn apply(self, hour: u32) -> u32 {
        if hour > 12 {
            return hour;
        }
        match (self.marker, self.day_part) {
            (AmPm::Am, _) => hour % 12,
            // "12 at night" is midnight, "2 at night" is early morning.
            (AmPm::Pm, Some(DayPart::Night)) if hour == 12 => 0,
            (AmPm::Pm, Some(DayPart::Night)) if hour < 5 => hour,
            (AmPm::Pm, _) => hour % 12 + 12,
        }
    }
}

impl TimeParser {
    pub fn new(ctx: ParseContext) -> Self {
        TimeParser { ctx }
    }

    /// Every reading of a time span.
    pub(crate) fn readings(&self, span: &ExtractedSpan) -> Result<Vec<Resolved<NaiveTime>>, ParseError> {
        let (hour, minute, second) = match span.tag {
            PatternTag::HourMinute | PatternTag::HourAmPm | PatternTag::OClock | PatternTag::AtHour => (
                self.hour(span)?,
                numeric::<u32>(span, "minute")?.unwrap_or(0),
                numeric::<u32>(span, "second")?.unwrap_or(0),
            ),
            PatternTag::HalfPast => {
                let (hour, minute) = self.fraction_of_hour(span)?;
                (hour, minute, 0)
            }
            PatternTag::NamedTime => {
                let name = required(span, "named")?;
                let time = self
                    .ctx
                    .patterns
                    .named_time(name)
                    .ok_or_else(|| ParseError::invalid(format!("time '{name}'")))?;
                return Ok(vec![Resolved::fixed(time_timex(time), time)]);
            }
            tag => return Err(ParseError::UnsupportedPattern(tag)),
        };

        let hours = match self.meridiem(span) {
            Some(m) => vec![m.apply(hour)],
            None if (1..=12).contains(&hour) => vec![hour % 12, hour % 12 + 12],
            None => vec![hour],
        };
        hours
            .into_iter()
            .map(|h| {
                NaiveTime::from_hms_opt(h, minute, second)
                    .map(|t| Resolved::fixed(time_timex(t), t))
                    .ok_or_else(|| ParseError::invalid(format!("{h}:{minute:02}:{second:02}")))
            })
            .collect()
    }

    /// The marker written on the span: "pm", or implied by "in the morning".
    pub(crate) fn meridiem(&self, span: &ExtractedSpan) -> Option<Meridiem> {
        meridiem_of(self.ctx, span.capture("ampm"), span.capture("daypart"))
    }

    fn hour(&self, span: &ExtractedSpan) -> Result<u32, ParseError> {
        let raw = required(span, "hour")?;
        let value = self
            .ctx
            .patterns
            .number(raw)
            .ok_or_else(|| ParseError::invalid(format!("hour '{raw}'")))?;
        if value.fract() != 0.0 || !(0.0..=23.0).contains(&value) {
            return Err(ParseError::invalid(format!("hour '{raw}'")));
        }
        Ok(value as u32)
    }

    /// "half past 3" = 3:30, "quarter to 4" = 3:45, "ten minutes after 5".
    fn fraction_of_hour(&self, span: &ExtractedSpan) -> Result<(u32, u32), ParseError> {
        let fraction = required(span, "fraction")?.to_ascii_lowercase();
        let minutes = if fraction == "half" {
            30
        } else if fraction.contains("quarter") {
            15
        } else {
            self.minutes(&fraction)?
        };
        let hour = self.hour(span)?;
        let direction = required(span, "direction")?.to_ascii_lowercase();
        if matches!(direction.as_str(), "past" | "after") {
            return Ok((hour, minutes));
        }
        let total = (hour * 60 + 12 * 60 - minutes) % (12 * 60);
        let before = total / 60;
        Ok((if before == 0 { 12 } else { before }, total % 60))
    }

    fn minutes(&self, fraction: &str) -> Result<u32, ParseError> {
        let words: Vec<&str> = fraction
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|w| !w.is_empty() && !w.starts_with("minute"))
            .collect();
        let total = words
            .iter()
            .map(|w| self.ctx.patterns.number(w))
            .sum::<Option<f64>>()
            .ok_or_else(|| ParseError::invalid(format!("minutes '{fraction}'")))?;
        if total.fract() != 0.0 || !(1.0..60.0).contains(&total) {
            return Err(ParseError::invalid(format!("minutes '{fraction}'")));
        }
        Ok(total as u32)
    }
}

/// Marker from an "ampm" capture ("pm", "a.m.") or a "daypart" capture
/// ("in the morning", "at night").
pub(crate) fn meridiem_of(ctx: ParseContext, ampm: Option<&str>, daypart: Option<&str>) -> Option<Meridiem> {
    if let Some(raw) = ampm {
        let marker = if raw.trim_start().to_ascii_lowercase().starts_with('a') {
            AmPm::Am
        } else {
            AmPm::Pm
        };
        return Some(Meridiem {
            marker,
            day_part: None,
        });
    }
    let part = ctx.patterns.day_part(daypart?.split_whitespace().last()?)?;
    Some(Meridiem {
        marker: part.meridiem(),
        day_part: Some(part),
    })
}

impl DateTimeParser for TimeParser {
    fn subtype(&self) -> SubType {
        SubType::Time
    }

    fn parse(&self, span: &ExtractedSpan, _reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        let readings = self
            .readings(span)?
            .into_iter()
            .map(|t| {
                Resolution::point(
                    t.timex,
                    ResolutionKind::Time,
                    format_time(t.past),
                    format_time(t.future),
                )
            })
            .collect();
        ResolutionValue::from_readings(readings).ok_or(ParseError::MissingCapture("hour"))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::extract::TimeExtractor;

    fn parse(text: &str) -> ResolutionValue {
        let ctx = context();
        let span = only_span(&TimeExtractor::new(ctx.patterns), text);
        TimeParser::new(ctx).parse(&span, reference()).unwrap()
    }

    fn single(text: &str) -> Resolution {
        match parse(text) {
            ResolutionValue::Single(r) => r,
            other => panic!("expected a single value for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_am_pm() {
        assert_eq!(single("3pm").timex, "T15");
        assert_eq!(single("12am").future_value("value"), Some("00:00:00"));
        assert_eq!(single("12 pm").future_value("value"), Some("12:00:00"));
        assert_eq!(single("4:30 p.m.").timex, "T16:30");
    }

    #[test]
    fn test_ambiguous_hour_has_two_readings() {
        let ResolutionValue::Ambiguous(readings) = parse("at 3") else {
            panic!("expected ambiguity");
        };
        let timexes: Vec<&str> = readings.iter().map(|r| r.timex.as_str()).collect();
        assert_eq!(timexes, vec!["T03", "T15"]);
    }

    #[test]
    fn test_twenty_four_hour_clock() {
        assert_eq!(single("15:45").timex, "T15:45");
        assert_eq!(single("at 0:30").timex, "T00:30");
    }

    #[test]
    fn test_day_part_implies_marker() {
        assert_eq!(single("7 o'clock in the evening").timex, "T19");
        assert_eq!(single("8 o'clock in the morning").timex, "T08");
        assert_eq!(single("at 12 at night").timex, "T00");
    }

    #[test]
    fn test_named_times() {
        assert_eq!(single("noon").timex, "T12");
        assert_eq!(single("midnight").timex, "T00");
    }

    #[test]
    fn test_fractions_of_hours() {
        assert_eq!(single("half past 3pm").timex, "T15:30");
        assert_eq!(single("quarter to 4 pm").timex, "T15:45");
        assert_eq!(single("twenty five minutes past 10 am").timex, "T10:25");
        assert_eq!(single("quarter to 1am").timex, "T00:45");
    }

    #[test]
    fn test_meridiem_apply() {
        let pm = Meridiem {
            marker: AmPm::Pm,
            day_part: None,
        };
        assert_eq!(pm.apply(3), 15);
        assert_eq!(pm.apply(12), 12);
        assert_eq!(pm.flipped().apply(12), 0);
        assert_eq!(pm.apply(15), 15);
    }
}
