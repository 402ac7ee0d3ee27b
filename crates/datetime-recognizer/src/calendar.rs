//! Calendar arithmetic shared by the parsers.
//!
//! Pure functions over `chrono` values. Nothing here reads the system clock;
//! every computation is anchored on dates the caller passes in.

use chrono::{
    Datelike, Months, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Weekday,
};
use chrono_tz::Tz;

use crate::options::WeekStartDay;

// ── Weeks and weekdays ──────────────────────────────────────────────────────

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate, ws: WeekStartDay) -> NaiveDate {
    date - chrono::Duration::days(ws.days_from_start(date.weekday()))
}

/// The first `weekday` on or after `date`.
pub fn weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (weekday.num_days_from_monday() as i64
        - date.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    date + chrono::Duration::days(ahead)
}

/// The last `weekday` on or before `date`.
pub fn weekday_on_or_before(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let back = (date.weekday().num_days_from_monday() as i64
        - weekday.num_days_from_monday() as i64
        + 7)
        % 7;
    date - chrono::Duration::days(back)
}

/// ISO weekday number, Monday = 1.
pub fn iso_weekday_number(weekday: Weekday) -> u32 {
    weekday.number_from_monday()
}

// ── Months, quarters, years ─────────────────────────────────────────────────

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// Inclusive bounds of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    Some((first_of_month(year, month)?, last_of_month(year, month)?))
}

/// Shift a date by whole months (negative goes back), clamping the day.
pub fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// Quarter number (1-4) of a month.
pub fn quarter_of(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

/// Inclusive bounds of quarter `quarter` (1-4) of `year`.
pub fn quarter_bounds(year: i32, quarter: u32) -> Option<(NaiveDate, NaiveDate)> {
    if !(1..=4).contains(&quarter) {
        return None;
    }
    let first_month = (quarter - 1) * 3 + 1;
    Some((
        first_of_month(year, first_month)?,
        last_of_month(year, first_month + 2)?,
    ))
}

pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// Find the Nth weekday in a month. ordinal < 0 means "last" (-1), "second to last" (-2), etc.
pub fn find_nth_weekday_in_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    ordinal: i32,
) -> Option<NaiveDate> {
    if ordinal > 0 {
        let first = first_of_month(year, month)?;
        let first_occurrence = weekday_on_or_after(first, weekday);
        let target = first_occurrence + chrono::Duration::weeks((ordinal - 1) as i64);
        (target.month() == month).then_some(target)
    } else if ordinal < 0 {
        let last = last_of_month(year, month)?;
        let last_occurrence = weekday_on_or_before(last, weekday);
        let target = last_occurrence - chrono::Duration::weeks((-ordinal - 1) as i64);
        (target.month() == month).then_some(target)
    } else {
        None
    }
}

/// Easter Sunday (Gregorian calendar, anonymous computus).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Month and day in a given year, or `None` when the year lacks the day
/// (February 29).
pub fn month_day_in_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Nearest occurrence of month/day on or after `reference`, skipping years
/// that lack the day.
pub fn next_month_day(reference: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    (0..=8).find_map(|offset| {
        month_day_in_year(reference.year() + offset, month, day).filter(|d| *d >= reference)
    })
}

/// Nearest occurrence of month/day on or before `reference`.
pub fn previous_month_day(reference: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    (0..=8).find_map(|offset| {
        month_day_in_year(reference.year() - offset, month, day).filter(|d| *d <= reference)
    })
}

/// Nearest date with day-of-month `day` on or after `reference`.
pub fn next_day_of_month(reference: NaiveDate, day: u32) -> Option<NaiveDate> {
    (0..=12).find_map(|offset| {
        let first = shift_months(first_of_month(reference.year(), reference.month())?, offset)?;
        NaiveDate::from_ymd_opt(first.year(), first.month(), day).filter(|d| *d >= reference)
    })
}

/// Nearest date with day-of-month `day` on or before `reference`.
pub fn previous_day_of_month(reference: NaiveDate, day: u32) -> Option<NaiveDate> {
    (0..=12).find_map(|offset| {
        let first = shift_months(first_of_month(reference.year(), reference.month())?, -offset)?;
        NaiveDate::from_ymd_opt(first.year(), first.month(), day).filter(|d| *d <= reference)
    })
}

// ── Durations ───────────────────────────────────────────────────────────────

/// A calendar-aware duration. Years and months are applied with month
/// arithmetic; days and seconds as fixed lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationParts {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
}

impl DurationParts {
    /// Fixed-length magnitude: months count 30 days, years 365 days. `None`
    /// when the total does not fit in an `i64`.
    pub fn total_seconds(&self) -> Option<i64> {
        let years = self.years.checked_mul(365 * 86_400)?;
        let months = self.months.checked_mul(30 * 86_400)?;
        let days = self.days.checked_mul(86_400)?;
        years
            .checked_add(months)?
            .checked_add(days)?
            .checked_add(self.seconds)
    }

    /// Whether the duration has no sub-day component.
    pub fn is_date_level(&self) -> bool {
        self.seconds == 0
    }

    pub fn checked_add(self, other: DurationParts) -> Option<DurationParts> {
        Some(DurationParts {
            years: self.years.checked_add(other.years)?,
            months: self.months.checked_add(other.months)?,
            days: self.days.checked_add(other.days)?,
            seconds: self.seconds.checked_add(other.seconds)?,
        })
    }

    /// `anchor` moved forward (`sign` = 1) or back (`sign` = -1). `None` when
    /// the result leaves chrono's range.
    pub fn shift(&self, anchor: NaiveDateTime, sign: i64) -> Option<NaiveDateTime> {
        let months = self.years.checked_mul(12)?.checked_add(self.months)?.checked_mul(sign)?;
        let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
        let moved = if months >= 0 {
            anchor.checked_add_months(magnitude)?
        } else {
            anchor.checked_sub_months(magnitude)?
        };
        let days = TimeDelta::try_days(self.days.checked_mul(sign)?)?;
        let seconds = TimeDelta::try_seconds(self.seconds.checked_mul(sign)?)?;
        moved.checked_add_signed(days.checked_add(&seconds)?)
    }
}

// ── Time zones ──────────────────────────────────────────────────────────────

/// UTC offset of `tz` in minutes at the given local wall-clock time.
///
/// Local times skipped by a DST transition resolve with the offset in force
/// just before the gap.
pub fn utc_offset_minutes(tz: Tz, local: NaiveDateTime) -> Option<i32> {
    let resolved = tz
        .from_local_datetime(&local)
        .earliest()
        .or_else(|| {
            let later = local.checked_add_signed(TimeDelta::hours(1))?;
            tz.from_local_datetime(&later).earliest()
        })?;
    Some(resolved.offset().fix().local_minus_utc() / 60)
}

/// Format an offset as `UTC-08:00` / `UTC+05:30`.
pub fn format_utc_offset(minutes: i32) -> String {
    let sign = if minutes >= 0 { "+" } else { "-" };
    let abs = minutes.unsigned_abs();
    format!("UTC{sign}{:02}:{:02}", abs / 60, abs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_monday_and_sunday() {
        // 2016-11-09 is a Wednesday
        let wed = date(2016, 11, 9);
        assert_eq!(week_start(wed, WeekStartDay::Monday), date(2016, 11, 7));
        assert_eq!(week_start(wed, WeekStartDay::Sunday), date(2016, 11, 6));
    }

    #[test]
    fn test_weekday_on_or_after_is_inclusive() {
        let mon = date(2016, 11, 7);
        assert_eq!(weekday_on_or_after(mon, Weekday::Mon), mon);
        assert_eq!(weekday_on_or_after(mon, Weekday::Fri), date(2016, 11, 11));
        assert_eq!(weekday_on_or_before(mon, Weekday::Fri), date(2016, 11, 4));
    }

    #[test]
    fn test_nth_weekday_thanksgiving() {
        // Fourth Thursday of November 2016
        assert_eq!(
            find_nth_weekday_in_month(2016, 11, Weekday::Thu, 4),
            Some(date(2016, 11, 24))
        );
    }

    #[test]
    fn test_last_weekday_memorial_day() {
        assert_eq!(
            find_nth_weekday_in_month(2019, 5, Weekday::Mon, -1),
            Some(date(2019, 5, 27))
        );
    }

    #[test]
    fn test_fifth_weekday_may_not_exist() {
        // February 2019 has only four Fridays
        assert_eq!(find_nth_weekday_in_month(2019, 2, Weekday::Fri, 5), None);
    }

    #[test]
    fn test_easter() {
        assert_eq!(easter_sunday(2016), Some(date(2016, 3, 27)));
        assert_eq!(easter_sunday(2019), Some(date(2019, 4, 21)));
        assert_eq!(easter_sunday(2024), Some(date(2024, 3, 31)));
    }

    #[test]
    fn test_month_bounds_and_quarters() {
        assert_eq!(month_bounds(2016, 2), Some((date(2016, 2, 1), date(2016, 2, 29))));
        assert_eq!(
            quarter_bounds(2016, 4),
            Some((date(2016, 10, 1), date(2016, 12, 31)))
        );
        assert_eq!(quarter_bounds(2016, 5), None);
        assert_eq!(quarter_of(11), 4);
    }

    #[test]
    fn test_next_and_previous_month_day() {
        let reference = date(2020, 1, 1);
        assert_eq!(next_month_day(reference, 3, 5), Some(date(2020, 3, 5)));
        assert_eq!(previous_month_day(reference, 3, 5), Some(date(2019, 3, 5)));
        // Inclusive of the reference day itself
        assert_eq!(next_month_day(reference, 1, 1), Some(reference));
        assert_eq!(previous_month_day(reference, 1, 1), Some(reference));
        // Leap day skips to the next leap year
        assert_eq!(next_month_day(date(2021, 1, 1), 2, 29), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_day_of_month_skips_short_months() {
        let reference = date(2019, 1, 31);
        assert_eq!(next_day_of_month(reference, 31), Some(reference));
        assert_eq!(next_day_of_month(date(2019, 2, 1), 31), Some(date(2019, 3, 31)));
        assert_eq!(previous_day_of_month(date(2019, 3, 1), 30), Some(date(2019, 1, 30)));
    }

    #[test]
    fn test_duration_shift_months_clamps() {
        let anchor = date(2016, 1, 31).and_hms_opt(9, 0, 0).unwrap();
        let one_month = DurationParts {
            months: 1,
            ..Default::default()
        };
        assert_eq!(
            one_month.shift(anchor, 1),
            Some(date(2016, 2, 29).and_hms_opt(9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_duration_shift_back_with_seconds() {
        let anchor = date(2016, 11, 7).and_hms_opt(1, 0, 0).unwrap();
        let two_hours = DurationParts {
            seconds: 7200,
            ..Default::default()
        };
        assert_eq!(
            two_hours.shift(anchor, -1),
            Some(date(2016, 11, 6).and_hms_opt(23, 0, 0).unwrap())
        );
        assert!(!two_hours.is_date_level());
    }

    #[test]
    fn test_total_seconds() {
        let parts = DurationParts {
            years: 1,
            months: 1,
            days: 1,
            seconds: 1,
        };
        assert_eq!(parts.total_seconds(), Some(31_536_000 + 2_592_000 + 86_400 + 1));
    }

    #[test]
    fn test_huge_durations_do_not_overflow() {
        let anchor = date(2016, 11, 7).and_hms_opt(16, 12, 0).unwrap();
        let days = DurationParts {
            days: 99_999_999_999_999,
            ..Default::default()
        };
        assert_eq!(days.shift(anchor, 1), None);
        assert_eq!(days.shift(anchor, -1), None);

        let years = DurationParts {
            years: 99_999_999_999_999,
            ..Default::default()
        };
        assert_eq!(years.total_seconds(), None);
        assert_eq!(years.shift(anchor, 1), None);
        assert_eq!(years.checked_add(years), Some(DurationParts {
            years: 199_999_999_999_998,
            ..Default::default()
        }));
        assert_eq!(
            DurationParts {
                seconds: i64::MAX,
                ..Default::default()
            }
            .checked_add(DurationParts {
                seconds: 1,
                ..Default::default()
            }),
            None
        );
    }

    #[test]
    fn test_utc_offset_follows_dst() {
        let winter = date(2026, 1, 15).and_hms_opt(12, 0, 0).unwrap();
        let summer = date(2026, 7, 15).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(utc_offset_minutes(Tz::America__New_York, winter), Some(-300));
        assert_eq!(utc_offset_minutes(Tz::America__New_York, summer), Some(-240));
        assert_eq!(utc_offset_minutes(Tz::Asia__Tokyo, summer), Some(540));
    }

    #[test]
    fn test_format_utc_offset() {
        assert_eq!(format_utc_offset(-480), "UTC-08:00");
        assert_eq!(format_utc_offset(330), "UTC+05:30");
        assert_eq!(format_utc_offset(0), "UTC+00:00");
    }
}
