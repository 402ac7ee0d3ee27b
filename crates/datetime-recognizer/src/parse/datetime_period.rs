use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::{
    part_of, required, DateAndTimeParser, DateParser, DateTimeParser, DurationParser, Interval,
    ParseContext, Resolved, TimeParser, TimePeriodParser,
};
use crate::calendar::DurationParts;
use crate::error::ParseError;
use crate::locale::DayPart;
use crate::resolution::{Resolution, ResolutionKind, ResolutionValue};
use crate::timex::{
    date_timex, datetime_timex, duration_timex, format_date, format_datetime, range_timex, time_timex,
    PRESENT_REF,
};
use crate::types::{ExtractedSpan, PatternTag, SubType};

type Instants = (NaiveDateTime, NaiveDateTime);

/// Resolves spans of date-times: parts of a particular day, hour ranges on
/// a day, and ranges between two date-times.
#[derive(Debug, Clone, Copy)]
pub struct DateTimePeriodParser {
    ctx: ParseContext,
    date: DateParser,
    time: TimeParser,
    time_period: TimePeriodParser,
    datetime: DateAndTimeParser,
    duration: DurationParser,
}

impl DateTimePeriodParser {
    pub fn new(ctx: ParseContext) -> Self {
        DateTimePeriodParser {
            ctx,
            date: DateParser::new(ctx),
            time: TimeParser::new(ctx),
            time_period: TimePeriodParser::new(ctx),
            datetime: DateAndTimeParser::new(ctx),
            duration: DurationParser::new(ctx),
        }
    }

    pub(crate) fn interval(
        &self,
        span: &ExtractedSpan,
        reference: NaiveDateTime,
    ) -> Result<Interval<NaiveDateTime>, ParseError> {
        let today = reference.date();
        match span.tag {
            PatternTag::Tonight => day_part_on(today, DayPart::Night),
            PatternTag::RelativeTimeOfDay => {
                let raw = required(span, "rel")?;
                let shift = self
                    .ctx
                    .patterns
                    .relative(raw)
                    .ok_or_else(|| ParseError::invalid(format!("relative '{raw}'")))?;
                let tod = required(span, "tod")?;
                let part = self
                    .ctx
                    .patterns
                    .day_part(tod)
                    .ok_or_else(|| ParseError::invalid(format!("part of day '{tod}'")))?;
                day_part_on(today + Duration::days(shift.offset()), part)
            }
            PatternTag::RelativeSpan => {
                let parts = self.duration.parts(span)?;
                let forward = span
                    .capture("rel")
                    .is_some_and(|w| !matches!(w.to_ascii_lowercase().as_str(), "past" | "last" | "previous"));
                let sign = if forward { 1 } else { -1 };
                let other = parts
                    .shift(reference, sign)
                    .ok_or_else(|| ParseError::invalid("span out of range"))?;
                let (start, end) = if forward { (reference, other) } else { (other, reference) };
                Ok(Interval::fixed(elapsed_timex(start, end, &parts), start, end))
            }
            PatternTag::Within => {
                let length = part_of(span, &[SubType::Duration]).ok_or(ParseError::MissingCapture("duration"))?;
                let parts = self.duration.parts(length)?;
                let end = parts
                    .shift(reference, 1)
                    .ok_or_else(|| ParseError::invalid("span out of range"))?;
                Ok(Interval::fixed(elapsed_timex(reference, end, &parts), reference, end))
            }
            PatternTag::DateAndTimePeriod => self.day_with_period(span, reference),
            PatternTag::BoundaryRange => self.boundaries(span, reference),
            tag => Err(ParseError::UnsupportedPattern(tag)),
        }
    }

    /// "Friday afternoon", "tomorrow from 3-5pm". An hour range that runs
    /// past midnight ends on the following day.
    fn day_with_period(
        &self,
        span: &ExtractedSpan,
        reference: NaiveDateTime,
    ) -> Result<Interval<NaiveDateTime>, ParseError> {
        let day = part_of(span, &[SubType::Date, SubType::Holiday]).ok_or(ParseError::MissingCapture("date"))?;
        let period = part_of(span, &[SubType::TimePeriod]).ok_or(ParseError::MissingCapture("time period"))?;
        let date = self.date.resolve(day, reference)?;
        let clock = self.time_period.interval(period)?;

        let past = on_day(date.past, clock.past)?;
        let future = on_day(date.future, clock.future)?;
        let timex = if period.tag == PatternTag::TimeOfDay {
            format!("{}{}", date.timex, clock.timex)
        } else {
            let (start, end) = clock.future;
            let end_day = if end < start && !date.timex.contains('X') {
                let day = future.1.date();
                date_timex(Some(day.year()), Some(day.month()), Some(day.day()))
            } else {
                date.timex.clone()
            };
            range_timex(
                &format!("{}{}", date.timex, time_timex(start)),
                &format!("{end_day}{}", time_timex(end)),
                &clock_span(future.1 - future.0),
            )
        };
        Ok(Interval { timex, past, future })
    }

    /// "from today at 3pm to Friday at noon", "tomorrow at 9am until 11am".
    /// A bare time as the end falls on the start's day.
    fn boundaries(
        &self,
        span: &ExtractedSpan,
        reference: NaiveDateTime,
    ) -> Result<Interval<NaiveDateTime>, ParseError> {
        let [first, last] = span.parts.as_slice() else {
            return Err(ParseError::MissingCapture("boundary"));
        };
        let missing = || ParseError::MissingCapture("boundary");
        let starts_at = |anchor: NaiveDateTime| self.datetime.readings(first, anchor);
        let ends_at = |start: &Resolved<NaiveDateTime>, anchor: NaiveDateTime| match last.subtype {
            SubType::Time => self.on_day_of(start, last),
            _ => self.datetime.readings(last, anchor),
        };

        // Readings of an hour without am/pm: the first pair that runs forward.
        let starts = starts_at(reference)?;
        let mut chosen = None;
        for (i, start) in starts.iter().enumerate() {
            let ends = ends_at(start, reference)?;
            if let Some(j) = ends.iter().position(|end| start.future <= end.future) {
                chosen = Some((i, j));
                break;
            }
        }
        let (i, j) = chosen.unwrap_or((0, 0));
        let start = starts.get(i).ok_or_else(missing)?;
        let end = ends_at(start, reference)?.into_iter().nth(j).ok_or_else(missing)?;

        let mut joined = Interval::join(
            &Interval::from(start.clone()),
            &Interval::from(end.clone()),
            |anchor| starts_at(anchor)?.into_iter().nth(i).map(Interval::from).ok_or_else(missing),
            |anchor| ends_at(start, anchor)?.into_iter().nth(j).map(Interval::from).ok_or_else(missing),
        )?;
        joined.timex = range_timex(&start.timex, &end.timex, &clock_span(joined.future.1 - joined.future.0));
        Ok(joined)
    }

    /// Readings of a bare time on the day of `start`.
    fn on_day_of(
        &self,
        start: &Resolved<NaiveDateTime>,
        clock: &ExtractedSpan,
    ) -> Result<Vec<Resolved<NaiveDateTime>>, ParseError> {
        let day_timex = date_part(start);
        Ok(self
            .time
            .readings(clock)?
            .into_iter()
            .map(|time| Resolved {
                timex: format!("{day_timex}{}", time.timex),
                past: start.past.date().and_time(time.past),
                future: start.future.date().and_time(time.future),
            })
            .collect())
    }
}

fn day_part_on(day: NaiveDate, part: DayPart) -> Result<Interval<NaiveDateTime>, ParseError> {
    let (start, end) = part
        .bounds()
        .ok_or_else(|| ParseError::invalid(format!("part of day {}", part.timex())))?;
    Ok(Interval::fixed(
        format!("{}{}", format_date(day), part.timex()),
        day.and_time(start),
        day.and_time(end),
    ))
}

/// Date portion of a date-time timex: `2016-11-08` of `2016-11-08T09`.
fn date_part(point: &Resolved<NaiveDateTime>) -> String {
    match point.timex.split_once('T') {
        Some((day, _)) if point.timex != PRESENT_REF => day.to_string(),
        _ => format_date(point.future.date()),
    }
}

/// Clock bounds placed on `day`; an end before the start falls on the next
/// day.
fn on_day(day: NaiveDate, (start, end): (NaiveTime, NaiveTime)) -> Result<Instants, ParseError> {
    let end_day = if end < start {
        day.succ_opt().ok_or_else(|| ParseError::invalid(format!("day after {day}")))?
    } else {
        day
    };
    Ok((day.and_time(start), end_day.and_time(end)))
}

fn clock_span(delta: Duration) -> String {
    let seconds = delta.num_seconds();
    duration_timex(&DurationParts {
        days: seconds / 86_400,
        seconds: seconds % 86_400,
        ..Default::default()
    })
}

fn elapsed_timex(start: NaiveDateTime, end: NaiveDateTime, parts: &DurationParts) -> String {
    range_timex(&datetime_timex(start), &datetime_timex(end), &duration_timex(parts))
}

impl DateTimeParser for DateTimePeriodParser {
    fn subtype(&self) -> SubType {
        SubType::DateTimePeriod
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        let range = self.interval(span, reference)?;
        let fmt = |(s, e): Instants| (format_datetime(s), format_datetime(e));
        Ok(ResolutionValue::Single(Resolution::range(
            range.timex,
            ResolutionKind::DateTimeRange,
            fmt(range.past),
            fmt(range.future),
        )))
    }
}
