use chrono::{NaiveDateTime, NaiveTime, Timelike, Weekday};
use rrule::RRuleSet;

use super::duration::scale;
use super::{part_of, required, DateTimeParser, ParseContext, TimeParser};
use crate::error::ParseError;
use crate::locale::UnitDef;
use crate::resolution::{Resolution, ResolutionKind, ResolutionValue, ValueMap};
use crate::timex::{duration_timex, format_datetime, weekday_timex};
use crate::types::{ExtractedSpan, PatternTag, SubType};

/// Resolves recurrences to an RRULE and the next occurrence after the
/// reference. Past and future carry the same values.
#[derive(Debug, Clone, Copy)]
pub struct SetParser {
    ctx: ParseContext,
    time: TimeParser,
}

/// A recurrence before it is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Recurrence {
    timex: String,
    rule: String,
    /// Whether occurrences fall at fixed clock times or on whole days, in
    /// which case expansion starts at midnight of the reference day.
    day_aligned: bool,
}

impl SetParser {
    pub fn new(ctx: ParseContext) -> Self {
        SetParser {
            ctx,
            time: TimeParser::new(ctx),
        }
    }

    fn recurrence(&self, span: &ExtractedSpan) -> Result<Recurrence, ParseError> {
        match span.tag {
            PatternTag::Frequency => {
                let raw = required(span, "freq")?;
                let freq = self
                    .ctx
                    .patterns
                    .frequency(raw)
                    .ok_or_else(|| ParseError::invalid(format!("frequency '{raw}'")))?;
                every(freq.unit, freq.interval)
            }
            PatternTag::EveryUnit => match span.capture("tod") {
                Some(tod) => {
                    let part = self
                        .ctx
                        .patterns
                        .day_part(tod)
                        .ok_or_else(|| ParseError::invalid(format!("part of day '{tod}'")))?;
                    let (start, _) = part
                        .bounds()
                        .ok_or_else(|| ParseError::invalid(format!("part of day '{tod}'")))?;
                    Ok(Recurrence {
                        timex: part.timex().to_string(),
                        rule: format!("FREQ=DAILY{}", at_clock(start)),
                        day_aligned: true,
                    })
                }
                None => {
                    let unit = self.unit(span)?;
                    let times = if span.has_capture("other") { 2 } else { 1 };
                    every(unit, times)
                }
            },
            PatternTag::EveryAmount => {
                let raw = required(span, "amount")?;
                let amount = self
                    .ctx
                    .patterns
                    .number(raw)
                    .filter(|n| n.fract() == 0.0 && *n >= 1.0 && *n <= f64::from(u16::MAX))
                    .ok_or_else(|| ParseError::invalid(format!("interval '{raw}'")))?;
                every(self.unit(span)?, amount as u32)
            }
            PatternTag::EveryWeekday => {
                let raw = required(span, "weekday")?;
                let weekday = self
                    .ctx
                    .patterns
                    .weekday(raw)
                    .ok_or_else(|| ParseError::invalid(format!("weekday '{raw}'")))?;
                Ok(Recurrence {
                    timex: weekday_timex(weekday),
                    rule: format!("FREQ=WEEKLY;BYDAY={}", byday(weekday)),
                    day_aligned: true,
                })
            }
            tag => Err(ParseError::UnsupportedPattern(tag)),
        }
    }

    /// "every Monday at 3pm", "9am daily". One recurrence per reading of
    /// the time.
    fn with_time(&self, span: &ExtractedSpan) -> Result<Vec<Recurrence>, ParseError> {
        let set = part_of(span, &[SubType::Set]).ok_or(ParseError::MissingCapture("set"))?;
        let clock = part_of(span, &[SubType::Time]).ok_or(ParseError::MissingCapture("time"))?;
        let base = self.recurrence(set)?;
        Ok(self
            .time
            .readings(clock)?
            .into_iter()
            .map(|time| Recurrence {
                timex: if base.timex.starts_with("XXXX") {
                    format!("{}{}", base.timex, time.timex)
                } else {
                    time.timex
                },
                rule: format!("{}{}", base.rule, at_clock(time.future)),
                day_aligned: true,
            })
            .collect())
    }

    fn unit(&self, span: &ExtractedSpan) -> Result<UnitDef, ParseError> {
        let raw = required(span, "unit")?;
        self.ctx
            .patterns
            .unit(raw)
            .ok_or_else(|| ParseError::invalid(format!("unit '{raw}'")))
    }
}

fn every(unit: UnitDef, times: u32) -> Result<Recurrence, ParseError> {
    let interval = unit
        .interval
        .checked_mul(times)
        .ok_or_else(|| ParseError::invalid(format!("interval {times}")))?;
    let length = scale(unit.parts, f64::from(times))
        .ok_or_else(|| ParseError::invalid(format!("interval {times}")))?;
    let mut rule = format!("FREQ={}", unit.freq.as_str());
    if interval > 1 {
        rule.push_str(&format!(";INTERVAL={interval}"));
    }
    Ok(Recurrence {
        timex: duration_timex(&length),
        rule,
        day_aligned: false,
    })
}

fn at_clock(time: NaiveTime) -> String {
    format!(
        ";BYHOUR={};BYMINUTE={};BYSECOND={}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

fn byday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// First occurrence strictly after `reference`.
fn next_occurrence(recurrence: &Recurrence, reference: NaiveDateTime) -> Result<NaiveDateTime, ParseError> {
    let start = if recurrence.day_aligned {
        reference.date().and_time(NaiveTime::MIN)
    } else {
        reference
    };
    let source = format!(
        "DTSTART:{}Z\nRRULE:{}",
        start.format("%Y%m%dT%H%M%S"),
        recurrence.rule
    );
    let set: RRuleSet = source
        .parse()
        .map_err(|e| ParseError::invalid(format!("rule '{}': {e}", recurrence.rule)))?;
    let after = reference.and_utc().with_timezone(&rrule::Tz::UTC);
    set.after(after)
        .all(3)
        .dates
        .into_iter()
        .map(|dt| dt.naive_utc())
        .find(|dt| *dt > reference)
        .ok_or_else(|| ParseError::invalid(format!("rule '{}' has no next occurrence", recurrence.rule)))
}

fn resolve(recurrence: Recurrence, reference: NaiveDateTime) -> Result<Resolution, ParseError> {
    let next = next_occurrence(&recurrence, reference)?;
    let mut values = ValueMap::new();
    values.insert("value".to_string(), recurrence.rule);
    values.insert("next".to_string(), format_datetime(next));
    Ok(Resolution {
        timex: recurrence.timex,
        kind: ResolutionKind::Set,
        past: values.clone(),
        future: values,
        modifier: None,
    })
}

impl DateTimeParser for SetParser {
    fn subtype(&self) -> SubType {
        SubType::Set
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        let recurrences = match span.tag {
            PatternTag::SetWithTime => self.with_time(span)?,
            _ => vec![self.recurrence(span)?],
        };
        let readings = recurrences
            .into_iter()
            .map(|r| resolve(r, reference))
            .collect::<Result<Vec<_>, _>>()?;
        ResolutionValue::from_readings(readings).ok_or(ParseError::MissingCapture("set"))
    }
}
