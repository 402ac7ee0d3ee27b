use chrono::{NaiveDateTime, NaiveTime};

use super::{
    direction_sign, part_of, required, DateParser, DateTimeParser, DurationParser, ParseContext,
    Resolved, TimeParser,
};
use crate::error::ParseError;
use crate::resolution::{Resolution, ResolutionKind, ResolutionValue};
use crate::timex::{datetime_timex, format_datetime, PRESENT_REF};
use crate::types::{ExtractedSpan, PatternTag, SubType};

/// Resolves a day combined with a time of day.
#[derive(Debug, Clone, Copy)]
pub struct DateAndTimeParser {
    date: DateParser,
    time: TimeParser,
    duration: DurationParser,
}

impl DateAndTimeParser {
    pub fn new(ctx: ParseContext) -> Self {
        DateAndTimeParser {
            date: DateParser::new(ctx),
            time: TimeParser::new(ctx),
            duration: DurationParser::new(ctx),
        }
    }

    /// Every reading of a date-time span; more than one when the time part
    /// lacks am/pm.
    pub(crate) fn readings(
        &self,
        span: &ExtractedSpan,
        reference: NaiveDateTime,
    ) -> Result<Vec<Resolved<NaiveDateTime>>, ParseError> {
        match span.tag {
            PatternTag::Now => Ok(vec![Resolved::fixed(PRESENT_REF.to_string(), reference)]),
            PatternTag::DateAndTime => {
                let day = part_of(span, &[SubType::Date, SubType::Holiday])
                    .ok_or(ParseError::MissingCapture("date"))?;
                let clock = part_of(span, &[SubType::Time]).ok_or(ParseError::MissingCapture("time"))?;
                let date = self.date.resolve(day, reference)?;
                Ok(self
                    .time
                    .readings(clock)?
                    .into_iter()
                    .map(|time| Resolved {
                        timex: format!("{}{}", date.timex, time.timex),
                        past: date.past.and_time(time.past),
                        future: date.future.and_time(time.future),
                    })
                    .collect())
            }
            PatternTag::DurationRelative => self.shifted(span, reference),
            tag => Err(ParseError::UnsupportedPattern(tag)),
        }
    }

    /// "in 3 hours", "2 hours after noon tomorrow", "a week before
    /// Christmas at 10am".
    fn shifted(
        &self,
        span: &ExtractedSpan,
        reference: NaiveDateTime,
    ) -> Result<Vec<Resolved<NaiveDateTime>>, ParseError> {
        let length = part_of(span, &[SubType::Duration]).ok_or(ParseError::MissingCapture("duration"))?;
        let parts = self.duration.parts(length)?;
        let sign = direction_sign(required(span, "direction")?);
        let anchors = if let Some(anchor) = part_of(span, &[SubType::DateTime]) {
            self.readings(anchor, reference)?
        } else if let Some(anchor) = part_of(span, &[SubType::Date, SubType::Holiday]) {
            let day = self.date.resolve(anchor, reference)?;
            vec![Resolved {
                timex: day.timex,
                past: day.past.and_time(NaiveTime::MIN),
                future: day.future.and_time(NaiveTime::MIN),
            }]
        } else {
            vec![Resolved::fixed(String::new(), reference)]
        };
        anchors
            .into_iter()
            .map(|anchor| {
                let past = parts.shift(anchor.past, sign);
                let future = parts.shift(anchor.future, sign);
                match (past, future) {
                    (Some(past), Some(future)) => Ok(Resolved {
                        timex: datetime_timex(future),
                        past,
                        future,
                    }),
                    _ => Err(ParseError::invalid("shifted instant out of range")),
                }
            })
            .collect()
    }
}

impl DateTimeParser for DateAndTimeParser {
    fn subtype(&self) -> SubType {
        SubType::DateTime
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        let readings = self
            .readings(span, reference)?
            .into_iter()
            .map(|dt| {
                Resolution::point(
                    dt.timex,
                    ResolutionKind::DateTime,
                    format_datetime(dt.past),
                    format_datetime(dt.future),
                )
            })
            .collect();
        ResolutionValue::from_readings(readings).ok_or(ParseError::MissingCapture("time"))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::extract::DateAndTimeExtractor;

    fn parse(text: &str) -> ResolutionValue {
        let ctx = context();
        let span = only_span(&DateAndTimeExtractor::new(ctx.patterns), text);
        DateAndTimeParser::new(ctx).parse(&span, reference()).unwrap()
    }

    #[test]
    fn test_tomorrow_at_noon() {
        let value = parse("tomorrow at noon");
        let r = value.primary().unwrap();
        assert_eq!(r.timex, "2016-11-08T12");
        assert_eq!(r.future_value("value"), Some("2016-11-08 12:00:00"));
        assert!(r.is_determined());
    }

    #[test]
    fn test_weekday_with_time_keeps_both_readings() {
        let value = parse("Friday at 3pm");
        let r = value.primary().unwrap();
        assert_eq!(r.timex, "XXXX-WXX-5T15");
        assert_eq!(r.past_value("value"), Some("2016-11-04 15:00:00"));
        assert_eq!(r.future_value("value"), Some("2016-11-11 15:00:00"));
    }

    #[test]
    fn test_time_before_date() {
        let value = parse("3:30pm on March 5, 2019");
        assert_eq!(value.primary().unwrap().timex, "2019-03-05T15:30");
    }

    #[test]
    fn test_ambiguous_hour_gives_two_readings() {
        let value = parse("tomorrow at 3");
        let timexes: Vec<&str> = value.candidates().iter().map(|r| r.timex.as_str()).collect();
        assert_eq!(timexes, vec!["2016-11-08T03", "2016-11-08T15"]);
        assert!(matches!(value, ResolutionValue::Ambiguous(_)));
    }

    #[test]
    fn test_now_is_the_reference() {
        let value = parse("right now");
        let r = value.primary().unwrap();
        assert_eq!(r.timex, PRESENT_REF);
        assert_eq!(r.future_value("value"), Some("2016-11-07 16:12:00"));
    }
}
