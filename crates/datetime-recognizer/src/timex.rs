//! Timex formatting: the compact expression strings carried by resolutions,
//! and the concrete value strings of past/future maps.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::calendar::{iso_weekday_number, DurationParts};

pub const PRESENT_REF: &str = "PRESENT_REF";

/// Concrete date value: `2019-03-05`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Concrete time value: `15:30:00`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Concrete date-time value: `2019-03-05 15:30:00`.
pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Date timex with unknown parts as X: `XXXX-03-05`, `2019-03-05`, `XXXX-XX-05`.
pub fn date_timex(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> String {
    let year = year.map_or_else(|| "XXXX".to_string(), |y| format!("{y:04}"));
    let month = month.map_or_else(|| "XX".to_string(), |m| format!("{m:02}"));
    let day = day.map_or_else(|| "XX".to_string(), |d| format!("{d:02}"));
    format!("{year}-{month}-{day}")
}

/// Recurring weekday: `XXXX-WXX-5` for Friday.
pub fn weekday_timex(weekday: Weekday) -> String {
    format!("XXXX-WXX-{}", iso_weekday_number(weekday))
}

/// Time timex dropping trailing zero components: `T15`, `T15:30`, `T15:30:20`.
pub fn time_timex(time: NaiveTime) -> String {
    match (time.minute(), time.second()) {
        (0, 0) => format!("T{:02}", time.hour()),
        (m, 0) => format!("T{:02}:{m:02}", time.hour()),
        (m, s) => format!("T{:02}:{m:02}:{s:02}", time.hour()),
    }
}

/// Concrete date-time timex: `2016-11-07T16:12:00`.
pub fn datetime_timex(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn month_timex(year: Option<i32>, month: u32) -> String {
    match year {
        Some(y) => format!("{y:04}-{month:02}"),
        None => format!("XXXX-{month:02}"),
    }
}

pub fn year_timex(year: i32) -> String {
    format!("{year:04}")
}

/// ISO week of a date: `2016-W46`.
pub fn week_timex(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{:04}-W{:02}", week.year(), week.week())
}

pub fn quarter_timex(year: Option<i32>, quarter: u32) -> String {
    match year {
        Some(y) => format!("{y:04}-Q{quarter}"),
        None => format!("XXXX-Q{quarter}"),
    }
}

/// Range timex: `(start,end,duration)`.
pub fn range_timex(start: &str, end: &str, duration: &str) -> String {
    format!("({start},{end},{duration})")
}

/// Whole-day span as a duration timex: `P3D`.
pub fn days_timex(start: NaiveDate, end: NaiveDate) -> String {
    format!("P{}D", (end - start).num_days())
}

/// Sub-day span as a duration timex: `PT2H`, `PT1H30M`.
pub fn clock_timex(seconds: i64) -> String {
    let parts = DurationParts {
        seconds,
        ..Default::default()
    };
    duration_timex(&parts)
}

/// ISO-8601 duration of calendar parts: `P1Y2M3DT4H5M6S`. Whole weeks with
/// no other component render as `P2W`.
pub fn duration_timex(parts: &DurationParts) -> String {
    let mut out = String::from("P");
    if parts.years == 0 && parts.months == 0 && parts.seconds == 0 && parts.days != 0 && parts.days % 7 == 0 {
        out.push_str(&format!("{}W", parts.days / 7));
        return out;
    }
    if parts.years != 0 {
        out.push_str(&format!("{}Y", parts.years));
    }
    if parts.months != 0 {
        out.push_str(&format!("{}M", parts.months));
    }
    if parts.days != 0 {
        out.push_str(&format!("{}D", parts.days));
    }
    if parts.seconds != 0 {
        out.push('T');
        let hours = parts.seconds / 3600;
        let minutes = (parts.seconds % 3600) / 60;
        let seconds = parts.seconds % 60;
        if hours != 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes != 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if seconds != 0 {
            out.push_str(&format!("{seconds}S"));
        }
    }
    if out.len() == 1 {
        out.push_str("T0S");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_timex_with_unknowns() {
        assert_eq!(date_timex(None, Some(3), Some(5)), "XXXX-03-05");
        assert_eq!(date_timex(Some(2019), Some(3), Some(5)), "2019-03-05");
        assert_eq!(date_timex(None, None, Some(5)), "XXXX-XX-05");
    }

    #[test]
    fn test_time_timex_trims_zeroes() {
        let t = |h, m, s| NaiveTime::from_hms_opt(h, m, s).unwrap();
        assert_eq!(time_timex(t(15, 0, 0)), "T15");
        assert_eq!(time_timex(t(15, 30, 0)), "T15:30");
        assert_eq!(time_timex(t(15, 30, 20)), "T15:30:20");
        assert_eq!(time_timex(t(0, 0, 0)), "T00");
    }

    #[test]
    fn test_weekday_and_week_timex() {
        assert_eq!(weekday_timex(Weekday::Fri), "XXXX-WXX-5");
        let d = NaiveDate::from_ymd_opt(2016, 11, 7).unwrap();
        assert_eq!(week_timex(d), "2016-W45");
    }

    #[test]
    fn test_duration_timex() {
        let p = |years, months, days, seconds| DurationParts {
            years,
            months,
            days,
            seconds,
        };
        assert_eq!(duration_timex(&p(0, 0, 3, 0)), "P3D");
        assert_eq!(duration_timex(&p(0, 0, 14, 0)), "P2W");
        assert_eq!(duration_timex(&p(0, 0, 0, 5400)), "PT1H30M");
        assert_eq!(duration_timex(&p(1, 6, 0, 0)), "P1Y6M");
        assert_eq!(duration_timex(&p(0, 0, 1, 43_200)), "P1DT12H");
        assert_eq!(duration_timex(&p(0, 0, 0, 0)), "PT0S");
    }

    #[test]
    fn test_value_formats() {
        let dt = NaiveDate::from_ymd_opt(2016, 11, 7)
            .unwrap()
            .and_hms_opt(16, 12, 0)
            .unwrap();
        assert_eq!(format_datetime(dt), "2016-11-07 16:12:00");
        assert_eq!(datetime_timex(dt), "2016-11-07T16:12:00");
        assert_eq!(format_time(dt.time()), "16:12:00");
    }
}
