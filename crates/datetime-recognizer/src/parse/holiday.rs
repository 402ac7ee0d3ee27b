use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::{numeric, required, DateTimeParser, ParseContext, Resolved};
use crate::calendar::{easter_sunday, find_nth_weekday_in_month, iso_weekday_number};
use crate::error::ParseError;
use crate::locale::HolidayRule;
use crate::resolution::{Resolution, ResolutionKind, ResolutionValue};
use crate::timex::{date_timex, format_date};
use crate::types::{ExtractedSpan, SubType};

/// Resolves named holidays to the day they fall on.
#[derive(Debug, Clone, Copy)]
pub struct HolidayParser {
    ctx: ParseContext,
}

impl HolidayParser {
    pub fn new(ctx: ParseContext) -> Self {
        HolidayParser { ctx }
    }

    pub(crate) fn resolve(&self, span: &ExtractedSpan, reference: NaiveDate) -> Result<Resolved<NaiveDate>, ParseError> {
        let name = required(span, "holiday")?;
        let rule = self
            .ctx
            .patterns
            .holiday(name)
            .ok_or_else(|| ParseError::invalid(format!("holiday '{name}'")))?;

        let relative_year = span
            .capture("rel")
            .and_then(|w| self.ctx.patterns.relative(w))
            .map(|rel| reference.year() + rel.offset() as i32);
        if let Some(year) = numeric::<i32>(span, "year")?.or(relative_year) {
            let date = observance(rule, year)
                .ok_or_else(|| ParseError::invalid(format!("{name} in {year}")))?;
            return Ok(Resolved::fixed(format_date(date), date));
        }

        let this_year = reference.year();
        let past = [this_year, this_year - 1]
            .into_iter()
            .filter_map(|y| observance(rule, y))
            .find(|d| *d <= reference);
        let future = [this_year, this_year + 1]
            .into_iter()
            .filter_map(|y| observance(rule, y))
            .find(|d| *d >= reference);
        match (past, future) {
            (Some(past), Some(future)) => Ok(Resolved {
                timex: recurring_timex(rule, future),
                past,
                future,
            }),
            _ => Err(ParseError::invalid(format!("no occurrence of {name}"))),
        }
    }
}

/// The day `rule` falls on in `year`.
pub(crate) fn observance(rule: HolidayRule, year: i32) -> Option<NaiveDate> {
    match rule {
        HolidayRule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
        HolidayRule::NthWeekday {
            month,
            weekday,
            ordinal,
            offset_days,
        } => find_nth_weekday_in_month(year, month, weekday, ordinal)?
            .checked_add_signed(chrono::Duration::days(offset_days)),
        HolidayRule::Easter { offset_days } => {
            easter_sunday(year)?.checked_add_signed(chrono::Duration::days(offset_days))
        }
    }
}

/// Year-free timex of a holiday: `XXXX-12-25`, or `XXXX-11-WXX-4-4` for
/// "fourth Thursday of November". Moving feasts use the upcoming date.
fn recurring_timex(rule: HolidayRule, upcoming: NaiveDate) -> String {
    match rule {
        HolidayRule::Fixed { month, day } => date_timex(None, Some(month), Some(day)),
        HolidayRule::NthWeekday {
            month,
            weekday,
            ordinal,
            offset_days: 0,
        } => {
            let nth = if ordinal > 0 { ordinal } else { 5 };
            format!("XXXX-{month:02}-WXX-{}-{nth}", iso_weekday_number(weekday))
        }
        _ => format_date(upcoming),
    }
}

impl DateTimeParser for HolidayParser {
    fn subtype(&self) -> SubType {
        SubType::Holiday
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        let day = self.resolve(span, reference.date())?;
        Ok(ResolutionValue::Single(Resolution::point(
            day.timex,
            ResolutionKind::Date,
            format_date(day.past),
            format_date(day.future),
        )))
    }
}
