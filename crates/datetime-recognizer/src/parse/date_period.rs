use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::{
    numeric, part_of, required, DateParser, DateTimeParser, DurationParser, Interval, ParseContext,
};
use crate::calendar::{
    first_of_month, last_of_month, month_bounds, quarter_bounds, quarter_of, shift_months,
    week_start, year_bounds, DurationParts,
};
use crate::error::ParseError;
use crate::locale::{RelativeShift, Season};
use crate::options::WeekStartDay;
use crate::resolution::{Resolution, ResolutionKind, ResolutionValue};
use crate::timex::{
    date_timex, days_timex, duration_timex, format_date, month_timex, quarter_timex, range_timex,
    week_timex, year_timex,
};
use crate::types::{ExtractedSpan, PatternTag, SubType};

/// Resolves spans of whole days to inclusive start/end dates.
///
/// Periods that name a year, or are anchored on the reference ("next
/// week"), resolve the same in both directions. Recurring periods ("in
/// May", "March 5-10", "the summer") resolve to the latest occurrence that
/// has started (past) and the earliest that has not ended (future).
#[derive(Debug, Clone, Copy)]
pub struct DatePeriodParser {
    ctx: ParseContext,
    date: DateParser,
    duration: DurationParser,
}

type Days = (NaiveDate, NaiveDate);

impl DatePeriodParser {
    pub fn new(ctx: ParseContext) -> Self {
        DatePeriodParser {
            ctx,
            date: DateParser::new(ctx),
            duration: DurationParser::new(ctx),
        }
    }

    pub(crate) fn interval(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<Interval<NaiveDate>, ParseError> {
        let today = reference.date();
        match span.tag {
            PatternTag::RelativeUnit => self.relative_unit(span, today),
            PatternTag::RelativeMonth => {
                let shift = self.relative(span)?;
                let month = self.month(span)?;
                let year = today.year() + shift.offset() as i32;
                let (start, end) = month_bounds(year, month).ok_or_else(|| out_of_range(span))?;
                Ok(Interval::fixed(month_timex(Some(year), month), start, end))
            }
            PatternTag::MonthYear => {
                let month = self.month(span)?;
                let year = year_of(span)?;
                let (start, end) = month_bounds(year, month).ok_or_else(|| out_of_range(span))?;
                Ok(Interval::fixed(month_timex(Some(year), month), start, end))
            }
            PatternTag::MonthOnly => self.month_only(span, today),
            PatternTag::Year => {
                let year = year_of(span)?;
                let (start, end) = year_bounds(year).ok_or_else(|| out_of_range(span))?;
                Ok(Interval::fixed(year_timex(year), start, end))
            }
            PatternTag::Quarter => self.quarter(span, today),
            PatternTag::Season => self.season(span, today),
            PatternTag::DayRange => self.day_range(span, today),
            PatternTag::RelativeSpan => {
                let parts = self.duration.parts(span)?;
                let forward = span
                    .capture("rel")
                    .is_some_and(|w| !matches!(w.to_ascii_lowercase().as_str(), "past" | "last" | "previous"));
                let (start, end) = if forward {
                    (today + Duration::days(1), shift(today, &parts, 1, span)?)
                } else {
                    (shift(today, &parts, -1, span)?, today - Duration::days(1))
                };
                let timex = range_timex(&format_date(start), &format_date(end), &duration_timex(&parts));
                Ok(Interval::fixed(timex, start, end))
            }
            PatternTag::Within => {
                let length = part_of(span, &[SubType::Duration]).ok_or(ParseError::MissingCapture("duration"))?;
                let parts = self.duration.parts(length)?;
                let end = shift(today, &parts, 1, span)?;
                let timex = range_timex(&format_date(today), &format_date(end), &duration_timex(&parts));
                Ok(Interval::fixed(timex, today, end))
            }
            PatternTag::BoundaryRange => {
                let [first, last] = span.parts.as_slice() else {
                    return Err(ParseError::MissingCapture("boundary"));
                };
                let (start, end) = (first, last);
                let first = self.boundary(start, reference)?;
                let last = self.boundary(end, reference)?;
                let mut joined = Interval::join(
                    &first,
                    &last,
                    |day| self.boundary(start, day.and_time(NaiveTime::MIN)),
                    |day| self.boundary(end, day.and_time(NaiveTime::MIN)),
                )?;
                joined.timex = range_timex(
                    &first.timex,
                    &last.timex,
                    &days_timex(joined.future.0, joined.future.1),
                );
                Ok(joined)
            }
            tag => Err(ParseError::UnsupportedPattern(tag)),
        }
    }

    fn boundary(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<Interval<NaiveDate>, ParseError> {
        match span.subtype {
            SubType::Date | SubType::Holiday => Ok(self.date.resolve(span, reference)?.into()),
            _ => self.interval(span, reference),
        }
    }

    /// "this week", "next month", "last year", "next quarter", "this
    /// weekend".
    fn relative_unit(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Interval<NaiveDate>, ParseError> {
        let offset = self.relative(span)?.offset();
        let unit = required(span, "unit")?.to_ascii_lowercase();
        let (timex, start, end) = match unit.as_str() {
            "week" => {
                let start = week_start(today, self.ctx.week_start) + Duration::weeks(offset);
                (week_timex(today + Duration::weeks(offset)), start, start + Duration::days(6))
            }
            "weekend" => {
                let monday = week_start(today, WeekStartDay::Monday) + Duration::weeks(offset);
                let saturday = monday + Duration::days(5);
                (format!("{}-WE", week_timex(saturday)), saturday, saturday + Duration::days(1))
            }
            "month" => {
                let first = first_of_month(today.year(), today.month())
                    .and_then(|d| shift_months(d, offset))
                    .ok_or_else(|| out_of_range(span))?;
                let (start, end) = month_bounds(first.year(), first.month()).ok_or_else(|| out_of_range(span))?;
                (month_timex(Some(first.year()), first.month()), start, end)
            }
            "year" => {
                let year = today.year() + offset as i32;
                let (start, end) = year_bounds(year).ok_or_else(|| out_of_range(span))?;
                (year_timex(year), start, end)
            }
            "quarter" => {
                let index = i64::from(today.year()) * 4 + i64::from(quarter_of(today.month())) - 1 + offset;
                let year = index.div_euclid(4) as i32;
                let quarter = index.rem_euclid(4) as u32 + 1;
                let (start, end) = quarter_bounds(year, quarter).ok_or_else(|| out_of_range(span))?;
                (quarter_timex(Some(year), quarter), start, end)
            }
            other => return Err(ParseError::invalid(format!("unit '{other}'"))),
        };
        Ok(Interval::fixed(timex, start, end))
    }

    /// "in May", "early March", "late December".
    fn month_only(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Interval<NaiveDate>, ParseError> {
        let month = self.month(span)?;
        let part = span.capture("part").map(str::to_ascii_lowercase);
        let bounds = |year: i32| -> Option<Days> {
            let (first, last) = month_bounds(year, month)?;
            match part.as_deref() {
                Some("early") => Some((first, first + Duration::days(9))),
                Some("mid") => Some((first + Duration::days(10), first + Duration::days(19))),
                Some("late") => Some((first + Duration::days(20), last)),
                _ => Some((first, last)),
            }
        };
        let (past, future) = recurring(today, bounds).ok_or_else(|| out_of_range(span))?;
        let timex = match part {
            Some(_) => range_timex(
                &date_timex(None, Some(month), Some(future.0.day())),
                &date_timex(None, Some(month), Some(future.1.day())),
                &days_timex(future.0, future.1),
            ),
            None => month_timex(None, month),
        };
        Ok(Interval {
            timex,
            past,
            future,
        })
    }

    /// "Q3", "Q1 2019", "the second quarter of next year".
    fn quarter(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Interval<NaiveDate>, ParseError> {
        let quarter = match numeric::<u32>(span, "quarter")? {
            Some(q) => q,
            None => {
                let raw = required(span, "ordinal")?;
                match self.ctx.patterns.ordinal(raw) {
                    Some(-1) => 4,
                    Some(n @ 1..=4) => n as u32,
                    _ => return Err(ParseError::invalid(format!("quarter '{raw}'"))),
                }
            }
        };
        let year = match (numeric::<i32>(span, "year")?, span.capture("rel")) {
            (Some(year), _) => Some(year),
            (None, Some(_)) => Some(today.year() + self.relative(span)?.offset() as i32),
            (None, None) => None,
        };
        if let Some(year) = year {
            let (start, end) = quarter_bounds(year, quarter).ok_or_else(|| out_of_range(span))?;
            return Ok(Interval::fixed(quarter_timex(Some(year), quarter), start, end));
        }
        let (past, future) =
            recurring(today, |y| quarter_bounds(y, quarter)).ok_or_else(|| out_of_range(span))?;
        Ok(Interval {
            timex: quarter_timex(None, quarter),
            past,
            future,
        })
    }

    /// "summer 2019", "next winter", "in the fall". Winter runs from
    /// December into the following year.
    fn season(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Interval<NaiveDate>, ParseError> {
        let raw = required(span, "season")?;
        let season = self
            .ctx
            .patterns
            .season(raw)
            .ok_or_else(|| ParseError::invalid(format!("season '{raw}'")))?;
        let year = match (numeric::<i32>(span, "year")?, span.capture("rel")) {
            (Some(year), _) => Some(year),
            (None, Some(_)) => Some(today.year() + self.relative(span)?.offset() as i32),
            (None, None) => None,
        };
        if let Some(year) = year {
            let (start, end) = season_bounds(season, year).ok_or_else(|| out_of_range(span))?;
            return Ok(Interval::fixed(format!("{year}-{}", season.timex()), start, end));
        }
        let (past, future) = recurring(today, |y| season_bounds(season, y)).ok_or_else(|| out_of_range(span))?;
        Ok(Interval {
            timex: season.timex().to_string(),
            past,
            future,
        })
    }

    /// "March 5-10", "between the 5th and 10th of May 2019".
    fn day_range(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Interval<NaiveDate>, ParseError> {
        let month = self.month(span)?;
        let first = numeric::<u32>(span, "day")?.ok_or(ParseError::MissingCapture("day"))?;
        let last = numeric::<u32>(span, "end_day")?.ok_or(ParseError::MissingCapture("end_day"))?;
        let (first, last) = if first > last { (last, first) } else { (first, last) };
        let bounds = |year: i32| -> Option<Days> {
            Some((
                NaiveDate::from_ymd_opt(year, month, first)?,
                NaiveDate::from_ymd_opt(year, month, last)?,
            ))
        };

        if let Some(year) = numeric::<i32>(span, "year")? {
            let (start, end) = bounds(year).ok_or_else(|| out_of_range(span))?;
            let timex = range_timex(&format_date(start), &format_date(end), &days_timex(start, end));
            return Ok(Interval::fixed(timex, start, end));
        }
        let (past, future) = recurring(today, bounds).ok_or_else(|| out_of_range(span))?;
        let timex = range_timex(
            &date_timex(None, Some(month), Some(first)),
            &date_timex(None, Some(month), Some(last)),
            &days_timex(future.0, future.1),
        );
        Ok(Interval {
            timex,
            past,
            future,
        })
    }

    fn month(&self, span: &ExtractedSpan) -> Result<u32, ParseError> {
        let raw = required(span, "month")?;
        self.ctx
            .patterns
            .month(raw)
            .ok_or_else(|| ParseError::invalid(format!("month '{raw}'")))
    }

    fn relative(&self, span: &ExtractedSpan) -> Result<RelativeShift, ParseError> {
        let raw = required(span, "rel")?;
        self.ctx
            .patterns
            .relative(raw)
            .ok_or_else(|| ParseError::invalid(format!("relative '{raw}'")))
    }
}

/// Latest occurrence that has started and earliest that has not ended.
fn recurring(today: NaiveDate, bounds: impl Fn(i32) -> Option<Days>) -> Option<(Days, Days)> {
    let year = today.year();
    let past = [year + 1, year, year - 1, year - 2]
        .into_iter()
        .filter_map(&bounds)
        .find(|(start, _)| *start <= today)?;
    let future = [year - 1, year, year + 1, year + 2]
        .into_iter()
        .filter_map(&bounds)
        .find(|(_, end)| *end >= today)?;
    Some((past, future))
}

fn season_bounds(season: Season, year: i32) -> Option<Days> {
    let start = first_of_month(year, season.start_month())?;
    let last = shift_months(start, 2)?;
    Some((start, last_of_month(last.year(), last.month())?))
}

fn shift(day: NaiveDate, parts: &DurationParts, sign: i64, span: &ExtractedSpan) -> Result<NaiveDate, ParseError> {
    parts
        .shift(day.and_time(NaiveTime::MIN), sign)
        .map(|dt| dt.date())
        .ok_or_else(|| out_of_range(span))
}

fn year_of(span: &ExtractedSpan) -> Result<i32, ParseError> {
    numeric::<i32>(span, "year")?.ok_or(ParseError::MissingCapture("year"))
}

fn out_of_range(span: &ExtractedSpan) -> ParseError {
    ParseError::invalid(format!("no such period: '{}'", span.text))
}

impl DateTimeParser for DatePeriodParser {
    fn subtype(&self) -> SubType {
        SubType::DatePeriod
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        let range = self.interval(span, reference)?;
        let fmt = |(s, e): Days| (format_date(s), format_date(e));
        Ok(ResolutionValue::Single(Resolution::range(
            range.timex,
            ResolutionKind::DateRange,
            fmt(range.past),
            fmt(range.future),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::extract::DatePeriodExtractor;

    fn parse_with(ctx: ParseContext, text: &str) -> Resolution {
        let span = only_span(&DatePeriodExtractor::new(ctx.patterns, true), text);
        let value = DatePeriodParser::new(ctx).parse(&span, reference()).unwrap();
        value.primary().unwrap().clone()
    }

    fn parse(text: &str) -> Resolution {
        parse_with(context(), text)
    }

    fn future(r: &Resolution) -> (&str, &str) {
        (r.future_value("start").unwrap(), r.future_value("end").unwrap())
    }

    fn past(r: &Resolution) -> (&str, &str) {
        (r.past_value("start").unwrap(), r.past_value("end").unwrap())
    }

    #[test]
    fn test_relative_weeks_follow_week_start() {
        let r = parse("next week");
        assert_eq!(r.timex, "2016-W46");
        assert_eq!(future(&r), ("2016-11-14", "2016-11-20"));
        assert!(r.is_determined());

        let sunday = ParseContext::new(context().patterns, WeekStartDay::Sunday);
        let r = parse_with(sunday, "this week");
        assert_eq!(future(&r), ("2016-11-06", "2016-11-12"));
    }

    #[test]
    fn test_weekend() {
        let r = parse("this weekend");
        assert_eq!(r.timex, "2016-W45-WE");
        assert_eq!(future(&r), ("2016-11-12", "2016-11-13"));
    }

    #[test]
    fn test_relative_month_year_quarter() {
        assert_eq!(future(&parse("last month")), ("2016-10-01", "2016-10-31"));
        assert_eq!(parse("next year").timex, "2017");

        let r = parse("next quarter");
        assert_eq!(r.timex, "2017-Q1");
        assert_eq!(future(&r), ("2017-01-01", "2017-03-31"));
    }

    #[test]
    fn test_next_named_month_is_next_year() {
        let r = parse("next March");
        assert_eq!(r.timex, "2017-03");
        assert_eq!(future(&r), ("2017-03-01", "2017-03-31"));
    }

    #[test]
    fn test_month_without_year() {
        let r = parse("in May");
        assert_eq!(r.timex, "XXXX-05");
        assert_eq!(past(&r), ("2016-05-01", "2016-05-31"));
        assert_eq!(future(&r), ("2017-05-01", "2017-05-31"));

        let r = parse("in November");
        assert_eq!(past(&r), future(&r));
    }

    #[test]
    fn test_part_of_month() {
        let r = parse("early March");
        assert_eq!(r.timex, "(XXXX-03-01,XXXX-03-10,P9D)");
        assert_eq!(future(&r), ("2017-03-01", "2017-03-10"));
        assert_eq!(future(&parse("late February")), ("2017-02-21", "2017-02-28"));
    }

    #[test]
    fn test_quarters() {
        let r = parse("Q3 2019");
        assert_eq!(r.timex, "2019-Q3");
        assert_eq!(future(&r), ("2019-07-01", "2019-09-30"));

        let r = parse("the second quarter of next year");
        assert_eq!(r.timex, "2017-Q2");

        let r = parse("the fourth quarter");
        assert_eq!(r.timex, "XXXX-Q4");
        assert_eq!(future(&r), ("2016-10-01", "2016-12-31"));
    }

    #[test]
    fn test_seasons() {
        let r = parse("summer 2019");
        assert_eq!(r.timex, "2019-SU");
        assert_eq!(future(&r), ("2019-06-01", "2019-08-31"));

        let r = parse("in the summer");
        assert_eq!(r.timex, "SU");
        assert_eq!(past(&r), ("2016-06-01", "2016-08-31"));
        assert_eq!(future(&r), ("2017-06-01", "2017-08-31"));

        let r = parse("next winter");
        assert_eq!(future(&r), ("2017-12-01", "2018-02-28"));
    }

    #[test]
    fn test_day_range() {
        let r = parse("March 5-10");
        assert_eq!(r.timex, "(XXXX-03-05,XXXX-03-10,P5D)");
        assert_eq!(past(&r), ("2016-03-05", "2016-03-10"));
        assert_eq!(future(&r), ("2017-03-05", "2017-03-10"));

        let r = parse("5th to 9th of June 2019");
        assert_eq!(r.timex, "(2019-06-05,2019-06-09,P4D)");
    }

    #[test]
    fn test_relative_spans() {
        let r = parse("the next 3 days");
        assert_eq!(r.timex, "(2016-11-08,2016-11-10,P3D)");
        assert_eq!(future(&r), ("2016-11-08", "2016-11-10"));

        let r = parse("the past 2 weeks");
        assert_eq!(future(&r), ("2016-10-24", "2016-11-06"));
    }

    fn parse_at(text: &str, reference: NaiveDateTime) -> Resolution {
        let ctx = context();
        let span = only_span(&DatePeriodExtractor::new(ctx.patterns, true), text);
        let value = DatePeriodParser::new(ctx).parse(&span, reference).unwrap();
        value.primary().unwrap().clone()
    }

    #[test]
    fn test_weekday_boundaries() {
        let r = parse("from Monday to Wednesday");
        assert_eq!(future(&r), ("2016-11-07", "2016-11-09"));
        assert_eq!(past(&r), ("2016-10-31", "2016-11-02"));
    }

    #[test]
    fn test_weekday_boundaries_straddle_the_reference() {
        // Wednesday: this week's Monday has passed, next Monday has not come.
        for text in ["from Monday to Wednesday", "between Monday and Wednesday"] {
            let r = parse_at(text, at(2019, 11, 6, 10, 0));
            assert_eq!(future(&r), ("2019-11-11", "2019-11-13"), "{text}");
            assert_eq!(past(&r), ("2019-11-04", "2019-11-06"), "{text}");
            assert!(!r.is_determined());
        }
    }

    #[test]
    fn test_month_day_boundaries_across_the_year() {
        let r = parse("from March 10 to March 5");
        assert_eq!(future(&r), ("2017-03-10", "2018-03-05"));
        assert_eq!(past(&r), ("2015-03-10", "2016-03-05"));
    }

    #[test]
    fn test_fixed_start_with_recurring_end() {
        let r = parse("from today to Friday");
        assert_eq!(future(&r), ("2016-11-07", "2016-11-11"));
        assert!(r.is_determined());
    }

    #[test]
    fn test_year_boundaries() {
        let r = parse("between 2018 and 2019");
        assert_eq!(r.timex, "(2018,2019,P729D)");
        assert_eq!(future(&r), ("2018-01-01", "2019-12-31"));
    }
}
