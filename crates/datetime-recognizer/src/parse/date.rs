use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use super::{
    direction_sign, numeric, part_of, required, DateTimeParser, DurationParser, HolidayParser,
    ParseContext, Resolved,
};
use crate::calendar::{
    find_nth_weekday_in_month, first_of_month, iso_weekday_number, last_of_month,
    next_day_of_month, next_month_day, previous_day_of_month, previous_month_day, shift_months,
    week_start, weekday_on_or_after, weekday_on_or_before,
};
use crate::error::ParseError;
use crate::locale::RelativeShift;
use crate::resolution::{Resolution, ResolutionKind, ResolutionValue};
use crate::timex::{date_timex, format_date, weekday_timex};
use crate::types::{ExtractedSpan, PatternTag, SubType};

/// Resolves single days.
///
/// A date without a year has two readings: the nearest occurrence on or
/// before the reference day (past) and on or after it (future). Relative
/// weekdays resolve as follows:
///
/// - `next X`: future is the first X after the reference day, past is one week
///   earlier.
/// - `last X`: past is the last X before the reference day, future is one week
///   later.
/// - `this X`: X in the current week, mirrored one week to the other side.
#[derive(Debug, Clone, Copy)]
pub struct DateParser {
    ctx: ParseContext,
    holiday: HolidayParser,
    duration: DurationParser,
}

impl DateParser {
    pub fn new(ctx: ParseContext) -> Self {
        DateParser {
            ctx,
            holiday: HolidayParser::new(ctx),
            duration: DurationParser::new(ctx),
        }
    }

    /// Resolve a date or holiday span.
    pub(crate) fn resolve(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<Resolved<NaiveDate>, ParseError> {
        let today = reference.date();
        match span.tag {
            PatternTag::Holiday => self.holiday.resolve(span, today),
            PatternTag::MonthDayYear | PatternTag::DayMonthYear => {
                let month = self.month(span)?;
                let day = day_of(span)?;
                self.month_day(numeric(span, "year")?, month, day, today)
            }
            PatternTag::IsoDate => {
                let year = numeric::<i32>(span, "year")?.ok_or(ParseError::MissingCapture("year"))?;
                let month = numeric::<u32>(span, "month_num")?.ok_or(ParseError::MissingCapture("month_num"))?;
                self.month_day(Some(year), month, day_of(span)?, today)
            }
            PatternTag::NumericDate | PatternTag::NumericDateWithYear => self.numeric_date(span, today),
            PatternTag::RelativeDay => {
                let word = required(span, "relday")?;
                let offset = self
                    .ctx
                    .patterns
                    .relative_day(word)
                    .ok_or_else(|| ParseError::invalid(format!("day '{word}'")))?;
                let date = today + Duration::days(offset);
                Ok(Resolved::fixed(format_date(date), date))
            }
            PatternTag::RelativeWeekday => {
                let shift = self.relative(span)?;
                Ok(self.relative_weekday(shift, self.weekday(span)?, today))
            }
            PatternTag::Weekday => {
                let weekday = self.weekday(span)?;
                Ok(Resolved {
                    timex: weekday_timex(weekday),
                    past: weekday_on_or_before(today, weekday),
                    future: weekday_on_or_after(today, weekday),
                })
            }
            PatternTag::WeekdayOfRelativeWeek => {
                let shift = self.relative(span)?;
                let weekday = self.weekday(span)?;
                let monday = week_start(today, self.ctx.week_start) + Duration::weeks(shift.offset());
                let date = monday + Duration::days(self.ctx.week_start.days_from_start(weekday));
                Ok(Resolved::fixed(format_date(date), date))
            }
            PatternTag::OrdinalWeekdayOfMonth => self.ordinal_of_month(span, today),
            PatternTag::DayOfMonth => {
                let day = day_of(span)?;
                let past = previous_day_of_month(today, day);
                let future = next_day_of_month(today, day);
                match (past, future) {
                    (Some(past), Some(future)) => Ok(Resolved {
                        timex: date_timex(None, None, Some(day)),
                        past,
                        future,
                    }),
                    _ => Err(ParseError::invalid(format!("day {day}"))),
                }
            }
            PatternTag::DurationRelative => self.shifted(span, reference),
            tag => Err(ParseError::UnsupportedPattern(tag)),
        }
    }

    /// "3 days ago", "in 2 weeks", "3 days after Christmas".
    fn shifted(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<Resolved<NaiveDate>, ParseError> {
        let length = part_of(span, &[SubType::Duration]).ok_or(ParseError::MissingCapture("duration"))?;
        let parts = self.duration.parts(length)?;
        let sign = direction_sign(required(span, "direction")?);
        let anchor = match part_of(span, &[SubType::Date, SubType::Holiday]) {
            Some(anchor) => self.resolve(anchor, reference)?,
            None => Resolved::fixed(String::new(), reference.date()),
        };
        let shift = |date: NaiveDate| {
            parts
                .shift(date.and_time(NaiveTime::MIN), sign)
                .map(|dt| dt.date())
                .ok_or_else(|| ParseError::invalid("shifted date out of range"))
        };
        let past = shift(anchor.past)?;
        let future = shift(anchor.future)?;
        Ok(Resolved {
            timex: format_date(future),
            past,
            future,
        })
    }

    fn month_day(&self, year: Option<i32>, month: u32, day: u32, today: NaiveDate) -> Result<Resolved<NaiveDate>, ParseError> {
        if let Some(year) = year {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| ParseError::invalid(format!("{year}-{month:02}-{day:02}")))?;
            return Ok(Resolved::fixed(format_date(date), date));
        }
        match (previous_month_day(today, month, day), next_month_day(today, month, day)) {
            (Some(past), Some(future)) => Ok(Resolved {
                timex: date_timex(None, Some(month), Some(day)),
                past,
                future,
            }),
            _ => Err(ParseError::invalid(format!("month {month} day {day}"))),
        }
    }

    fn numeric_date(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Resolved<NaiveDate>, ParseError> {
        let first = numeric::<u32>(span, "first")?.ok_or(ParseError::MissingCapture("first"))?;
        let second = numeric::<u32>(span, "second")?.ok_or(ParseError::MissingCapture("second"))?;
        let (month, day) = if self.ctx.patterns.day_first() {
            (second, first)
        } else {
            (first, second)
        };
        let year = span.capture("year").map(|raw| {
            let value: i32 = raw.parse().unwrap_or_default();
            match raw.len() {
                2 if value < 50 => 2000 + value,
                2 => 1900 + value,
                _ => value,
            }
        });
        self.month_day(year, month, day, today)
    }

    /// "next Friday", "last Friday", "this Friday". The relative word picks
    /// the day one reading lands on; the other reading is a week away, so the
    /// timex stays the recurring weekday.
    fn relative_weekday(&self, shift: RelativeShift, weekday: Weekday, today: NaiveDate) -> Resolved<NaiveDate> {
        let week = Duration::weeks(1);
        let (past, future) = match shift {
            RelativeShift::Next => {
                let future = weekday_on_or_after(today + Duration::days(1), weekday);
                (future - week, future)
            }
            RelativeShift::Last => {
                let past = weekday_on_or_before(today - Duration::days(1), weekday);
                (past, past + week)
            }
            RelativeShift::This => {
                let date = week_start(today, self.ctx.week_start)
                    + Duration::days(self.ctx.week_start.days_from_start(weekday));
                if date >= today {
                    (date - week, date)
                } else {
                    (date, date + week)
                }
            }
        };
        Resolved {
            timex: weekday_timex(weekday),
            past,
            future,
        }
    }

    /// "first Monday of March", "last Friday of next month", "last day of
    /// the month".
    fn ordinal_of_month(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Resolved<NaiveDate>, ParseError> {
        let raw = required(span, "ordinal")?;
        let ordinal = self
            .ctx
            .patterns
            .ordinal(raw)
            .ok_or_else(|| ParseError::invalid(format!("ordinal '{raw}'")))?;
        let weekday = match span.capture("weekday") {
            Some(_) => Some(self.weekday(span)?),
            None => None,
        };
        let day_in = |year: i32, month: u32| -> Option<NaiveDate> {
            match weekday {
                Some(wd) => find_nth_weekday_in_month(year, month, wd, ordinal),
                None if ordinal > 0 => NaiveDate::from_ymd_opt(year, month, ordinal as u32),
                None => last_of_month(year, month),
            }
        };
        let missing = || ParseError::invalid(format!("{raw} of month in '{}'", span.text));

        // Month fixed by "next month" / "the month" / an explicit year.
        let anchored = if let Some(rel) = span.capture("rel") {
            let shift = self
                .ctx
                .patterns
                .relative(rel)
                .ok_or_else(|| ParseError::invalid(format!("relative '{rel}'")))?;
            let first = first_of_month(today.year(), today.month()).ok_or_else(missing)?;
            Some(shift_months(first, shift.offset()).ok_or_else(missing)?)
        } else if span.has_capture("current") {
            first_of_month(today.year(), today.month())
        } else {
            let month = self.month(span)?;
            match numeric::<i32>(span, "year")? {
                Some(year) => first_of_month(year, month),
                None => {
                    let future = [today.year(), today.year() + 1]
                        .into_iter()
                        .filter_map(|y| day_in(y, month))
                        .find(|d| *d >= today)
                        .ok_or_else(missing)?;
                    let past = [today.year(), today.year() - 1]
                        .into_iter()
                        .filter_map(|y| day_in(y, month))
                        .find(|d| *d <= today)
                        .ok_or_else(missing)?;
                    let timex = match weekday {
                        Some(wd) => {
                            let nth = if ordinal > 0 { ordinal } else { 5 };
                            format!("XXXX-{month:02}-WXX-{}-{nth}", iso_weekday_number(wd))
                        }
                        None => format_date(future),
                    };
                    return Ok(Resolved {
                        timex,
                        past,
                        future,
                    });
                }
            }
        };
        let first = anchored.ok_or_else(missing)?;
        let date = day_in(first.year(), first.month()).ok_or_else(missing)?;
        Ok(Resolved::fixed(format_date(date), date))
    }

    fn month(&self, span: &ExtractedSpan) -> Result<u32, ParseError> {
        let raw = required(span, "month")?;
        self.ctx
            .patterns
            .month(raw)
            .ok_or_else(|| ParseError::invalid(format!("month '{raw}'")))
    }

    fn weekday(&self, span: &ExtractedSpan) -> Result<Weekday, ParseError> {
        let raw = required(span, "weekday")?;
        self.ctx
            .patterns
            .weekday(raw)
            .ok_or_else(|| ParseError::invalid(format!("weekday '{raw}'")))
    }

    fn relative(&self, span: &ExtractedSpan) -> Result<RelativeShift, ParseError> {
        let raw = required(span, "rel")?;
        self.ctx
            .patterns
            .relative(raw)
            .ok_or_else(|| ParseError::invalid(format!("relative '{raw}'")))
    }
}

fn day_of(span: &ExtractedSpan) -> Result<u32, ParseError> {
    numeric::<u32>(span, "day")?.ok_or(ParseError::MissingCapture("day"))
}

impl DateTimeParser for DateParser {
    fn subtype(&self) -> SubType {
        SubType::Date
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        let date = self.resolve(span, reference)?;
        Ok(ResolutionValue::Single(Resolution::point(
            date.timex,
            ResolutionKind::Date,
            format_date(date.past),
            format_date(date.future),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::extract::DateExtractor;

    fn parse_at(ctx: ParseContext, text: &str, reference: NaiveDateTime) -> Resolution {
        let span = only_span(&DateExtractor::new(ctx.patterns), text);
        let value = DateParser::new(ctx).parse(&span, reference).unwrap();
        value.primary().unwrap().clone()
    }

    fn parse(text: &str) -> Resolution {
        parse_at(context(), text, reference())
    }

    #[test]
    fn test_full_date_is_determined() {
        let r = parse_at(context(), "March 5, 2019", at(2020, 1, 1, 0, 0));
        assert_eq!(r.timex, "2019-03-05");
        assert_eq!(r.past_value("value"), Some("2019-03-05"));
        assert!(r.is_determined());
    }

    #[test]
    fn test_date_without_year_has_two_readings() {
        let r = parse("March 5");
        assert_eq!(r.timex, "XXXX-03-05");
        assert_eq!(r.past_value("value"), Some("2016-03-05"));
        assert_eq!(r.future_value("value"), Some("2017-03-05"));
    }

    #[test]
    fn test_today_matches_both_readings() {
        let r = parse("November 7");
        assert_eq!(r.past_value("value"), Some("2016-11-07"));
        assert_eq!(r.future_value("value"), Some("2016-11-07"));
    }

    #[test]
    fn test_next_friday_from_wednesday() {
        let r = parse_at(context(), "next Friday", at(2016, 11, 9, 10, 0));
        assert_eq!(r.future_value("value"), Some("2016-11-11"));
        assert_eq!(r.past_value("value"), Some("2016-11-04"));
    }

    #[test]
    fn test_last_and_this_weekday() {
        let r = parse("last Friday");
        assert_eq!(r.timex, "XXXX-WXX-5");
        assert_eq!(r.past_value("value"), Some("2016-11-04"));
        assert_eq!(r.future_value("value"), Some("2016-11-11"));

        let r = parse("this Wednesday");
        assert_eq!(r.timex, "XXXX-WXX-3");
        assert_eq!(r.future_value("value"), Some("2016-11-09"));
        assert_eq!(r.past_value("value"), Some("2016-11-02"));
    }

    #[test]
    fn test_relative_weekday_timex_is_recurring_while_readings_differ() {
        for text in ["next Friday", "this Friday", "last Friday"] {
            let r = parse(text);
            assert_ne!(r.past_value("value"), r.future_value("value"), "{text}");
            assert_eq!(r.timex, "XXXX-WXX-5", "{text}");
        }
    }

    #[test]
    fn test_bare_weekday() {
        let r = parse("Friday");
        assert_eq!(r.timex, "XXXX-WXX-5");
        assert_eq!(r.past_value("value"), Some("2016-11-04"));
        assert_eq!(r.future_value("value"), Some("2016-11-11"));
    }

    #[test]
    fn test_relative_days() {
        assert_eq!(parse("tomorrow").future_value("value"), Some("2016-11-08"));
        assert_eq!(parse("the day before yesterday").timex, "2016-11-05");
    }

    #[test]
    fn test_weekday_of_relative_week() {
        let r = parse("Friday next week");
        assert_eq!(r.timex, "2016-11-18");
        assert!(r.is_determined());
    }

    #[test]
    fn test_numeric_dates_follow_culture() {
        assert_eq!(parse("3/5/2019").timex, "2019-03-05");
        assert_eq!(parse_at(british(), "3/5/2019", reference()).timex, "2019-05-03");
        assert_eq!(parse("12/25/16").timex, "2016-12-25");
    }

    #[test]
    fn test_impossible_dates_are_errors() {
        let ctx = context();
        let span = only_span(&DateExtractor::new(ctx.patterns), "February 30, 2019");
        assert!(matches!(
            DateParser::new(ctx).parse(&span, reference()),
            Err(ParseError::InvalidCalendarValue(_))
        ));
    }

    #[test]
    fn test_ordinal_weekday_of_month() {
        let r = parse("the first Monday of March 2019");
        assert_eq!(r.timex, "2019-03-04");

        let r = parse("the last Friday of November");
        assert_eq!(r.timex, "XXXX-11-WXX-5-5");
        assert_eq!(r.future_value("value"), Some("2016-11-25"));
        assert_eq!(r.past_value("value"), Some("2015-11-27"));

        let r = parse("the last day of next month");
        assert_eq!(r.timex, "2016-12-31");
    }

    #[test]
    fn test_day_of_month() {
        let r = parse("the 5th");
        assert_eq!(r.timex, "XXXX-XX-05");
        assert_eq!(r.past_value("value"), Some("2016-11-05"));
        assert_eq!(r.future_value("value"), Some("2016-12-05"));
    }
}
