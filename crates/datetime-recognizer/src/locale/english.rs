//! English pattern templates and lexical tables.

use chrono::Weekday;
use chrono_tz::Tz;

use super::{
    ConnectorDefs, Culture, DayPart, FrequencyDef, HolidayRule, LexicalTables, LocaleDefinition,
    PatternDef, RecurrenceFreq, RelativeShift, Season, UnitDef, ZoneRule,
};
use crate::calendar::DurationParts;
use crate::resolution::Modifier;
use crate::types::{PatternTag as T, SubType as S};

pub(super) fn definition(culture: Culture) -> LocaleDefinition {
    LocaleDefinition {
        culture,
        day_first: culture == Culture::EnglishOthers,
        patterns: patterns(),
        connectors: CONNECTORS,
        tables: LexicalTables {
            months: months(),
            weekdays: weekdays(),
            relatives: vec![
                ("next", RelativeShift::Next),
                ("coming", RelativeShift::Next),
                ("upcoming", RelativeShift::Next),
                ("following", RelativeShift::Next),
                ("last", RelativeShift::Last),
                ("previous", RelativeShift::Last),
                ("past", RelativeShift::Last),
                ("this", RelativeShift::This),
            ],
            numbers: numbers(),
            ordinals: vec![
                ("first", 1),
                ("1st", 1),
                ("second", 2),
                ("2nd", 2),
                ("third", 3),
                ("3rd", 3),
                ("fourth", 4),
                ("4th", 4),
                ("fifth", 5),
                ("5th", 5),
                ("last", -1),
            ],
            relative_days: vec![
                ("today", 0),
                ("tomorrow", 1),
                ("tmrw", 1),
                ("tmr", 1),
                ("yesterday", -1),
                ("the day after tomorrow", 2),
                ("day after tomorrow", 2),
                ("the day before yesterday", -2),
                ("day before yesterday", -2),
            ],
            units: units(),
            day_parts: vec![
                ("morning", DayPart::Morning),
                ("afternoon", DayPart::Afternoon),
                ("evening", DayPart::Evening),
                ("night", DayPart::Night),
                ("business hours", DayPart::BusinessHours),
                ("working hours", DayPart::BusinessHours),
                ("work hours", DayPart::BusinessHours),
            ],
            seasons: vec![
                ("spring", Season::Spring),
                ("summer", Season::Summer),
                ("fall", Season::Fall),
                ("autumn", Season::Fall),
                ("winter", Season::Winter),
            ],
            holidays: holidays(culture),
            zone_abbreviations: zone_abbreviations(),
            zone_names: zone_names(),
            cities: cities(),
            named_times: vec![("noon", (12, 0)), ("midday", (12, 0)), ("midnight", (0, 0))],
            frequencies: frequencies(),
            modifiers: vec![
                ("before", Modifier::Before),
                ("prior to", Modifier::Before),
                ("until", Modifier::Before),
                ("till", Modifier::Before),
                ("by", Modifier::Before),
                ("no later than", Modifier::Before),
                ("after", Modifier::After),
                ("later than", Modifier::After),
                ("no earlier than", Modifier::After),
                ("since", Modifier::Since),
                ("starting", Modifier::Since),
                ("starting from", Modifier::Since),
                ("starting on", Modifier::Since),
                ("as of", Modifier::Since),
                ("around", Modifier::Around),
                ("about", Modifier::Around),
                ("approximately", Modifier::Around),
                ("roughly", Modifier::Around),
                ("circa", Modifier::Around),
            ],
            modifier_suffixes: vec![
                ("or later", Modifier::Since),
                ("or after", Modifier::Since),
                ("and later", Modifier::Since),
                ("onwards", Modifier::Since),
                ("onward", Modifier::Since),
                ("or earlier", Modifier::Before),
                ("or before", Modifier::Before),
                ("and earlier", Modifier::Before),
            ],
        },
    }
}

// ── Patterns ────────────────────────────────────────────────────────────────

const CONNECTORS: ConnectorDefs = ConnectorDefs {
    range: r"^\s*(?:to|till|til|until|through|thru|-|–|~)\s*$",
    between: r"^\s*and\s*$",
    range_prefix: r"\b(?P<prefix>from|between)\s+$",
    date_time: r"^\s*(?:,\s*)?(?:at|@|on)?\s*$",
    date_time_period: r"^\s*(?:,\s*)?(?:in\s+the|during\s+the|on|of|from)?\s*$",
    alternatives: r"^\s*(?:,\s*(?:or|and)?|or|and)\s*$",
    duration_joiner: r"^\s*(?:,\s*)?(?:and\s*)?$",
    set_time: r"^\s*(?:,\s*)?(?:at|@|on)?\s*$",
    zone: r"^\s*(?:,\s*)?(?:in|at)?\s*$",
    duration_in: r"\bin\s+$",
    duration_within: r"\bwithin\s+(?:the\s+next\s+)?$",
    duration_suffix: r"^\s+(?P<direction>ago|earlier|from\s+now|later|hence|before|after|prior\s+to|from)\b",
    anchor_gap: r"^\s*$",
    modifier_prefix: r"\b(?P<modifier>{{MODIFIER}})\s+$",
    modifier_suffix: r"^\s*(?P<modifier>{{MODIFIER_SUFFIX}})\b",
    day_fragment: r"^\s*(?:,\s*(?:or|and)?|or|and)\s*(?P<fragment>(?:the\s+)?(?P<day>{{DAY}})(?:st|nd|rd|th)?)\b",
    hour_fragment: r"\b(?P<hour>{{HOUR12}})(?::(?P<minute>{{MINUTE}}))?\s*(?:,\s*(?:or|and)?|or|and)\s*$",
};

fn def(subtype: S, tag: T, weight: u8, template: &'static str) -> PatternDef {
    PatternDef {
        subtype,
        tag,
        weight,
        template,
    }
}

fn patterns() -> Vec<PatternDef> {
    let mut p = Vec::new();

    // Date
    p.push(def(
        S::Date,
        T::IsoDate,
        100,
        r"\b(?P<year>{{YEAR}})[-/.](?P<month_num>1[0-2]|0?[1-9])[-/.](?P<day>{{DAY}})\b",
    ));
    p.push(def(
        S::Date,
        T::NumericDateWithYear,
        95,
        r"\b(?P<first>[0-3]?[0-9])[/.-](?P<second>[0-3]?[0-9])[/.-](?P<year>[0-9]{4}|[0-9]{2})\b",
    ));
    p.push(def(
        S::Date,
        T::OrdinalWeekdayOfMonth,
        92,
        r"\b(?:the\s+)?(?P<ordinal>{{ORDINAL}})\s+(?P<weekday>{{WEEKDAY}})\s+(?:of|in)\s+(?:(?P<month>{{MONTH}})\b(?:\s+(?P<year>{{YEAR}})\b)?|(?P<rel>{{REL}})\s+month\b|(?P<current>the)\s+month\b)",
    ));
    p.push(def(
        S::Date,
        T::OrdinalWeekdayOfMonth,
        91,
        r"\b(?:the\s+)?(?P<ordinal>{{ORDINAL}})\s+(?P<dayword>day)\s+of\s+(?:(?P<month>{{MONTH}})\b(?:\s+(?P<year>{{YEAR}})\b)?|(?P<rel>{{REL}})\s+month\b|(?P<current>the)\s+month\b)",
    ));
    p.push(def(
        S::Date,
        T::MonthDayYear,
        90,
        r"\b(?:(?P<weekday>{{WEEKDAY}}),?\s+)?(?P<month>{{MONTH}})\.?\s+(?:the\s+)?(?P<day>{{DAY}})(?:st|nd|rd|th)?\b(?:,?\s*(?P<year>{{YEAR}})\b)?",
    ));
    p.push(def(
        S::Date,
        T::DayMonthYear,
        89,
        r"\b(?:(?P<weekday>{{WEEKDAY}}),?\s+)?(?:the\s+)?(?P<day>{{DAY}})(?:st|nd|rd|th)?\s+(?:of\s+)?(?P<month>{{MONTH}})\b(?:,?\s*(?P<year>{{YEAR}})\b)?",
    ));
    p.push(def(
        S::Date,
        T::WeekdayOfRelativeWeek,
        88,
        r"\b(?P<weekday>{{WEEKDAY}})\s+(?:of\s+)?(?P<rel>{{REL}})\s+week\b",
    ));
    p.push(def(
        S::Date,
        T::RelativeWeekday,
        85,
        r"\b(?P<rel>{{REL}})\s+(?P<weekday>{{WEEKDAY}})\b",
    ));
    p.push(def(
        S::Date,
        T::NumericDate,
        82,
        r"\b(?P<first>[0-3]?[0-9])/(?P<second>[0-3]?[0-9])\b",
    ));
    p.push(def(S::Date, T::RelativeDay, 80, r"\b(?P<relday>{{RELDAY}})\b"));
    p.push(def(S::Date, T::Weekday, 60, r"\b(?P<weekday>{{WEEKDAY}})\b"));
    p.push(def(
        S::Date,
        T::DayOfMonth,
        50,
        r"\bthe\s+(?P<day>{{DAY}})(?:st|nd|rd|th)\b",
    ));

    // Time
    p.push(def(
        S::Time,
        T::HourMinute,
        90,
        r"\b(?P<hour>{{HOUR24}}):(?P<minute>{{MINUTE}})(?::(?P<second>{{MINUTE}}))?(?:\s*(?P<ampm>{{AMPM}})|\b)(?:\s+(?P<daypart>in\s+the\s+(?:morning|afternoon|evening)|at\s+night))?",
    ));
    p.push(def(
        S::Time,
        T::HalfPast,
        88,
        r"\b(?P<fraction>half|(?:a\s+)?quarter|(?:[0-5]?[0-9]|{{HOUR_WORD}}|twenty[-\s]five|twenty)\s+minutes?)\s+(?P<direction>past|after|to|before|till|til)\s+(?P<hour>{{HOUR12}}|{{HOUR_WORD}})(?:\s*(?P<ampm>{{AMPM}})|\b)",
    ));
    p.push(def(
        S::Time,
        T::HourAmPm,
        85,
        r"\b(?P<hour>{{HOUR12}})\s*(?P<ampm>{{AMPM}})",
    ));
    p.push(def(
        S::Time,
        T::OClock,
        80,
        r"\b(?P<hour>{{HOUR12}}|{{HOUR_WORD}})\s+o['’]?\s*clock\b(?:\s*(?P<ampm>{{AMPM}}))?(?:\s+(?P<daypart>in\s+the\s+(?:morning|afternoon|evening)|at\s+night))?",
    ));
    p.push(def(
        S::Time,
        T::NamedTime,
        70,
        r"\b(?:12\s+)?(?P<named>{{NAMED_TIME}})\b",
    ));
    p.push(def(
        S::Time,
        T::AtHour,
        60,
        r"(?P<lead>\bat|@)\s*(?P<hour>{{HOUR24}})\b(?:\s+(?P<daypart>in\s+the\s+(?:morning|afternoon|evening)|at\s+night))?",
    ));

    // DateTime
    p.push(def(
        S::DateTime,
        T::Now,
        90,
        r"\b(?P<now>right\s+now|now|asap|as\s+soon\s+as\s+possible|at\s+the\s+moment|at\s+present)\b",
    ));

    // DatePeriod
    p.push(def(
        S::DatePeriod,
        T::DayRange,
        92,
        r"\b(?:(?P<prefix>from)\s+)?(?P<month>{{MONTH}})\.?\s+(?P<day>{{DAY}})(?:st|nd|rd|th)?\s*(?:-|–|to|through|thru|till|until)\s*(?P<end_day>{{DAY}})(?:st|nd|rd|th)?\b(?:,?\s*(?P<year>{{YEAR}})\b)?",
    ));
    p.push(def(
        S::DatePeriod,
        T::DayRange,
        92,
        r"\b(?P<prefix>between)\s+(?P<month>{{MONTH}})\.?\s+(?P<day>{{DAY}})(?:st|nd|rd|th)?\s+and\s+(?P<end_day>{{DAY}})(?:st|nd|rd|th)?\b(?:,?\s*(?P<year>{{YEAR}})\b)?",
    ));
    p.push(def(
        S::DatePeriod,
        T::DayRange,
        91,
        r"\b(?:(?P<prefix>from|between)\s+)?(?:the\s+)?(?P<day>{{DAY}})(?:st|nd|rd|th)?\s*(?:-|–|to|through|thru|till|until|and)\s*(?:the\s+)?(?P<end_day>{{DAY}})(?:st|nd|rd|th)?\s+(?:of\s+)?(?P<month>{{MONTH}})\b(?:,?\s*(?P<year>{{YEAR}})\b)?",
    ));
    p.push(def(
        S::DatePeriod,
        T::Quarter,
        90,
        r"\bq(?P<quarter>[1-4])\b(?:\s*(?P<year>{{YEAR}})\b)?",
    ));
    p.push(def(
        S::DatePeriod,
        T::MonthYear,
        88,
        r"\b(?P<month>{{MONTH}})\.?,?\s+(?:of\s+)?(?P<year>{{YEAR}})\b",
    ));
    p.push(def(
        S::DatePeriod,
        T::RelativeSpan,
        87,
        r"\b(?:the\s+)?(?P<rel>next|past|last|previous|coming|following|upcoming)\s+(?P<amount>{{NUMBER}})\s+(?P<unit>{{DATE_UNIT}})\b",
    ));
    p.push(def(
        S::DatePeriod,
        T::RelativeMonth,
        86,
        r"\b(?P<rel>{{REL}})\s+(?P<month>{{MONTH}})\b",
    ));
    p.push(def(
        S::DatePeriod,
        T::Season,
        86,
        r"\b(?P<season>{{SEASON}})\s+(?:of\s+)?(?P<year>{{YEAR}})\b",
    ));
    p.push(def(
        S::DatePeriod,
        T::RelativeUnit,
        85,
        r"\b(?P<rel>{{REL}})\s+(?P<unit>week|month|year|quarter|weekend)\b",
    ));
    p.push(def(
        S::DatePeriod,
        T::Season,
        85,
        r"\b(?P<rel>{{REL}})\s+(?P<season>{{SEASON}})\b",
    ));
    p.push(def(
        S::DatePeriod,
        T::Quarter,
        84,
        r"\b(?:the\s+)?(?P<ordinal>{{ORDINAL}})\s+quarter\b(?:\s+(?:of\s+)?(?:(?P<year>{{YEAR}})\b|(?P<rel>{{REL}})\s+year\b))?",
    ));
    p.push(def(
        S::DatePeriod,
        T::Season,
        70,
        r"\b(?P<lead>(?:in|during|throughout|since|until|till|before|after|by|for|through|over)(?:\s+the)?)\s+(?P<season>{{SEASON}})\b",
    ));
    p.push(def(
        S::DatePeriod,
        T::Year,
        52,
        r"\b(?:the\s+)?year\s+(?P<year>{{YEAR}})\b",
    ));
    p.push(def(
        S::DatePeriod,
        T::Year,
        50,
        r"\b(?P<lead>in|during|throughout|since|until|till|before|after|by|for|from|between|and|through|to|of)\s+(?P<year>{{YEAR}})\b",
    ));
    p.push(def(
        S::DatePeriod,
        T::MonthOnly,
        45,
        r"\b(?P<lead>in|during|throughout|since|until|till|before|after|by|for|from|through|to|of|around)\s+(?:(?P<part>early|mid|late)[-\s]+)?(?P<month>{{MONTH}})\b",
    ));
    p.push(def(
        S::DatePeriod,
        T::MonthOnly,
        44,
        r"\b(?P<part>early|mid|late)[-\s]+(?P<month>{{MONTH}})\b",
    ));

    // TimePeriod
    p.push(def(
        S::TimePeriod,
        T::HourRange,
        88,
        r"\b(?:(?P<prefix>from)\s+)?(?P<hour>{{HOUR12}})(?::(?P<minute>{{MINUTE}}))?\s*(?:-|–|to|till|until)\s*(?P<end_hour>{{HOUR12}})(?::(?P<end_minute>{{MINUTE}}))?\s*(?P<end_ampm>{{AMPM}})",
    ));
    p.push(def(
        S::TimePeriod,
        T::HourRange,
        88,
        r"\b(?P<prefix>between)\s+(?P<hour>{{HOUR12}})(?::(?P<minute>{{MINUTE}}))?\s*(?:(?P<ampm>{{AMPM}})\s*)?and\s*(?P<end_hour>{{HOUR12}})(?::(?P<end_minute>{{MINUTE}}))?\s*(?P<end_ampm>{{AMPM}})",
    ));
    p.push(def(
        S::TimePeriod,
        T::HourRange,
        87,
        r"\b(?:(?P<prefix>from)\s+)?(?P<hour>{{HOUR12}})(?::(?P<minute>{{MINUTE}}))?\s*(?P<ampm>{{AMPM}})\s*(?:-|–|to|till|until)\s*(?P<end_hour>{{HOUR12}})(?::(?P<end_minute>{{MINUTE}}))?(?:\s*(?P<end_ampm>{{AMPM}})|\b)",
    ));
    p.push(def(
        S::TimePeriod,
        T::HourRange,
        87,
        r"\b(?P<prefix>between)\s+(?P<hour>{{HOUR12}})(?::(?P<minute>{{MINUTE}}))?\s*(?P<ampm>{{AMPM}})\s*and\s*(?P<end_hour>{{HOUR12}})(?::(?P<end_minute>{{MINUTE}}))?\b",
    ));
    p.push(def(S::TimePeriod, T::TimeOfDay, 60, r"\b(?P<tod>{{DAY_PART}})\b"));

    // DateTimePeriod
    p.push(def(
        S::DateTimePeriod,
        T::Tonight,
        90,
        r"\b(?P<tonight>tonight|tonite)\b",
    ));
    p.push(def(
        S::DateTimePeriod,
        T::RelativeSpan,
        87,
        r"\b(?:the\s+)?(?P<rel>next|past|last|previous|coming|following|upcoming)\s+(?P<amount>{{NUMBER}})\s+(?P<unit>{{TIME_UNIT}})\b",
    ));
    p.push(def(
        S::DateTimePeriod,
        T::RelativeTimeOfDay,
        85,
        r"\b(?P<rel>{{REL}})\s+(?P<tod>{{DAY_PART}})\b",
    ));

    // Duration
    p.push(def(
        S::Duration,
        T::AndAHalf,
        88,
        r"\b(?P<amount>{{NUMBER}})\s+and\s+a\s+half\s+(?P<unit>{{UNIT}})\b",
    ));
    p.push(def(
        S::Duration,
        T::AndAHalf,
        88,
        r"\b(?P<amount>{{NUMBER}})\s+(?P<unit>{{UNIT}})\s+and\s+a\s+half\b",
    ));
    p.push(def(
        S::Duration,
        T::HalfUnit,
        85,
        r"\b(?:a\s+|one\s+)?half\s+(?:an?\s+)?(?P<unit>{{UNIT}})\b",
    ));
    p.push(def(
        S::Duration,
        T::Amount,
        80,
        r"\b(?P<amount>{{NUMBER}})\s*-?\s*(?P<unit>{{UNIT}})\b",
    ));

    // Set
    p.push(def(
        S::Set,
        T::EveryAmount,
        88,
        r"\b(?:every|each)\s+(?P<amount>{{NUMBER}})\s+(?P<unit>{{UNIT}})\b",
    ));
    p.push(def(
        S::Set,
        T::EveryWeekday,
        86,
        r"\b(?:every|each)\s+(?P<weekday>{{WEEKDAY}})\b",
    ));
    p.push(def(
        S::Set,
        T::EveryUnit,
        85,
        r"\b(?:every|each|once\s+an?|once\s+per|once\s+every|per)\s+(?P<other>other\s+)?(?P<unit>{{UNIT}})\b",
    ));
    p.push(def(
        S::Set,
        T::EveryUnit,
        85,
        r"\b(?:every|each)\s+(?P<tod>{{DAY_PART}})\b",
    ));
    p.push(def(
        S::Set,
        T::EveryWeekday,
        84,
        r"\b(?:(?P<lead>on)\s+)?(?P<weekday>{{WEEKDAY_FULL}})s\b",
    ));
    p.push(def(S::Set, T::Frequency, 80, r"\b(?P<freq>{{FREQUENCY}})\b"));

    // Holiday
    p.push(def(
        S::Holiday,
        T::Holiday,
        80,
        r"\b(?:(?P<rel>{{REL}})\s+)?(?:the\s+)?(?P<holiday>{{HOLIDAY}})\b(?:,?\s+(?:of\s+)?(?P<year>{{YEAR}})\b)?",
    ));

    // TimeZone
    p.push(def(
        S::TimeZone,
        T::UtcOffset,
        90,
        r"\b(?P<base>utc|gmt)\s*(?P<sign>[+-])\s*(?P<tz_hour>[01]?[0-9])(?::?(?P<tz_minute>[0-5][0-9]))?\b",
    ));
    p.push(def(
        S::TimeZone,
        T::ZoneName,
        80,
        r"\b(?P<zone_name>{{ZONE_NAME}})\b",
    ));
    p.push(def(
        S::TimeZone,
        T::CityTime,
        80,
        r"\b(?P<city>{{CITY}})\s+time\b",
    ));
    p.push(def(
        S::TimeZone,
        T::ZoneAbbreviation,
        70,
        r"\b(?P<abbr>{{ZONE_ABBR}})\b",
    ));

    p
}

// ── Lexical tables ──────────────────────────────────────────────────────────

fn months() -> Vec<(&'static str, u32)> {
    vec![
        ("january", 1),
        ("jan", 1),
        ("february", 2),
        ("feb", 2),
        ("march", 3),
        ("mar", 3),
        ("april", 4),
        ("apr", 4),
        ("may", 5),
        ("june", 6),
        ("jun", 6),
        ("july", 7),
        ("jul", 7),
        ("august", 8),
        ("aug", 8),
        ("september", 9),
        ("sept", 9),
        ("sep", 9),
        ("october", 10),
        ("oct", 10),
        ("november", 11),
        ("nov", 11),
        ("december", 12),
        ("dec", 12),
    ]
}

// "sat" and "sun" are left out: as words they are far more often verbs and
// nouns than weekdays.
fn weekdays() -> Vec<(&'static str, Weekday)> {
    vec![
        ("monday", Weekday::Mon),
        ("mon", Weekday::Mon),
        ("tuesday", Weekday::Tue),
        ("tues", Weekday::Tue),
        ("tue", Weekday::Tue),
        ("wednesday", Weekday::Wed),
        ("wed", Weekday::Wed),
        ("thursday", Weekday::Thu),
        ("thurs", Weekday::Thu),
        ("thur", Weekday::Thu),
        ("thu", Weekday::Thu),
        ("friday", Weekday::Fri),
        ("fri", Weekday::Fri),
        ("saturday", Weekday::Sat),
        ("sunday", Weekday::Sun),
    ]
}

fn numbers() -> Vec<(&'static str, f64)> {
    vec![
        ("a", 1.0),
        ("an", 1.0),
        ("one", 1.0),
        ("two", 2.0),
        ("three", 3.0),
        ("four", 4.0),
        ("five", 5.0),
        ("six", 6.0),
        ("seven", 7.0),
        ("eight", 8.0),
        ("nine", 9.0),
        ("ten", 10.0),
        ("eleven", 11.0),
        ("twelve", 12.0),
        ("thirteen", 13.0),
        ("fourteen", 14.0),
        ("fifteen", 15.0),
        ("sixteen", 16.0),
        ("seventeen", 17.0),
        ("eighteen", 18.0),
        ("nineteen", 19.0),
        ("twenty", 20.0),
        ("thirty", 30.0),
        ("forty", 40.0),
        ("fifty", 50.0),
        ("sixty", 60.0),
        ("ninety", 90.0),
        ("a couple of", 2.0),
        ("couple of", 2.0),
        ("a couple", 2.0),
    ]
}

const fn unit(years: i64, months: i64, days: i64, seconds: i64, freq: RecurrenceFreq, interval: u32) -> UnitDef {
    UnitDef {
        parts: DurationParts {
            years,
            months,
            days,
            seconds,
        },
        freq,
        interval,
    }
}

const DECADE: UnitDef = unit(10, 0, 0, 0, RecurrenceFreq::Yearly, 10);
const YEAR: UnitDef = unit(1, 0, 0, 0, RecurrenceFreq::Yearly, 1);
const MONTH: UnitDef = unit(0, 1, 0, 0, RecurrenceFreq::Monthly, 1);
const FORTNIGHT: UnitDef = unit(0, 0, 14, 0, RecurrenceFreq::Weekly, 2);
const WEEK: UnitDef = unit(0, 0, 7, 0, RecurrenceFreq::Weekly, 1);
const DAY: UnitDef = unit(0, 0, 1, 0, RecurrenceFreq::Daily, 1);
const HOUR: UnitDef = unit(0, 0, 0, 3600, RecurrenceFreq::Hourly, 1);
const MINUTE: UnitDef = unit(0, 0, 0, 60, RecurrenceFreq::Minutely, 1);
const SECOND: UnitDef = unit(0, 0, 0, 1, RecurrenceFreq::Secondly, 1);

fn units() -> Vec<(&'static str, UnitDef)> {
    vec![
        ("decades", DECADE),
        ("decade", DECADE),
        ("years", YEAR),
        ("year", YEAR),
        ("yrs", YEAR),
        ("yr", YEAR),
        ("months", MONTH),
        ("month", MONTH),
        ("fortnights", FORTNIGHT),
        ("fortnight", FORTNIGHT),
        ("weeks", WEEK),
        ("week", WEEK),
        ("wks", WEEK),
        ("wk", WEEK),
        ("days", DAY),
        ("day", DAY),
        ("hours", HOUR),
        ("hour", HOUR),
        ("hrs", HOUR),
        ("hr", HOUR),
        ("minutes", MINUTE),
        ("minute", MINUTE),
        ("mins", MINUTE),
        ("min", MINUTE),
        ("seconds", SECOND),
        ("second", SECOND),
        ("secs", SECOND),
        ("sec", SECOND),
    ]
}

fn frequencies() -> Vec<(&'static str, FrequencyDef)> {
    let every = |unit, interval| FrequencyDef { unit, interval };
    vec![
        ("hourly", every(HOUR, 1)),
        ("daily", every(DAY, 1)),
        ("nightly", every(DAY, 1)),
        ("weekly", every(WEEK, 1)),
        ("biweekly", every(WEEK, 2)),
        ("fortnightly", every(WEEK, 2)),
        ("monthly", every(MONTH, 1)),
        ("quarterly", every(MONTH, 3)),
        ("yearly", every(YEAR, 1)),
        ("annually", every(YEAR, 1)),
    ]
}

fn holidays(culture: Culture) -> Vec<(&'static str, HolidayRule)> {
    let fixed = |month, day| HolidayRule::Fixed { month, day };
    let nth = |month, weekday, ordinal, offset_days| HolidayRule::NthWeekday {
        month,
        weekday,
        ordinal,
        offset_days,
    };
    let easter = |offset_days| HolidayRule::Easter { offset_days };

    let mut h = vec![
        ("new year's day", fixed(1, 1)),
        ("new year", fixed(1, 1)),
        ("new year's", fixed(1, 1)),
        ("new year's eve", fixed(12, 31)),
        ("valentine's day", fixed(2, 14)),
        ("st patrick's day", fixed(3, 17)),
        ("saint patrick's day", fixed(3, 17)),
        ("halloween", fixed(10, 31)),
        ("christmas eve", fixed(12, 24)),
        ("christmas day", fixed(12, 25)),
        ("christmas", fixed(12, 25)),
        ("xmas", fixed(12, 25)),
        ("independence day", fixed(7, 4)),
        ("july 4th", fixed(7, 4)),
        ("july 4", fixed(7, 4)),
        ("july fourth", fixed(7, 4)),
        ("4th of july", fixed(7, 4)),
        ("fourth of july", fixed(7, 4)),
        ("juneteenth", fixed(6, 19)),
        ("veterans day", fixed(11, 11)),
        ("martin luther king day", nth(1, Weekday::Mon, 3, 0)),
        ("mlk day", nth(1, Weekday::Mon, 3, 0)),
        ("presidents day", nth(2, Weekday::Mon, 3, 0)),
        ("president's day", nth(2, Weekday::Mon, 3, 0)),
        ("mother's day", nth(5, Weekday::Sun, 2, 0)),
        ("memorial day", nth(5, Weekday::Mon, -1, 0)),
        ("father's day", nth(6, Weekday::Sun, 3, 0)),
        ("labor day", nth(9, Weekday::Mon, 1, 0)),
        ("labour day", nth(9, Weekday::Mon, 1, 0)),
        ("columbus day", nth(10, Weekday::Mon, 2, 0)),
        ("thanksgiving", nth(11, Weekday::Thu, 4, 0)),
        ("thanksgiving day", nth(11, Weekday::Thu, 4, 0)),
        ("black friday", nth(11, Weekday::Thu, 4, 1)),
        ("easter", easter(0)),
        ("easter sunday", easter(0)),
        ("easter monday", easter(1)),
        ("good friday", easter(-2)),
        ("ash wednesday", easter(-46)),
        ("pentecost", easter(49)),
    ];
    if culture == Culture::EnglishOthers {
        h.extend([
            ("boxing day", fixed(12, 26)),
            ("remembrance day", fixed(11, 11)),
            ("guy fawkes night", fixed(11, 5)),
            ("bonfire night", fixed(11, 5)),
        ]);
    }
    h
}

fn zone_abbreviations() -> Vec<(&'static str, ZoneRule)> {
    use ZoneRule::{Fixed, Iana};
    vec![
        ("PST", Fixed(-480)),
        ("PDT", Fixed(-420)),
        ("PT", Iana(Tz::America__Los_Angeles)),
        ("MST", Fixed(-420)),
        ("MDT", Fixed(-360)),
        ("MT", Iana(Tz::America__Denver)),
        ("CST", Fixed(-360)),
        ("CDT", Fixed(-300)),
        ("CT", Iana(Tz::America__Chicago)),
        ("EST", Fixed(-300)),
        ("EDT", Fixed(-240)),
        ("ET", Iana(Tz::America__New_York)),
        ("AKST", Fixed(-540)),
        ("AKDT", Fixed(-480)),
        ("HST", Fixed(-600)),
        ("GMT", Fixed(0)),
        ("UTC", Fixed(0)),
        ("BST", Fixed(60)),
        ("CET", Fixed(60)),
        ("CEST", Fixed(120)),
        ("IST", Fixed(330)),
        ("JST", Fixed(540)),
        ("AEST", Fixed(600)),
        ("AEDT", Fixed(660)),
    ]
}

fn zone_names() -> Vec<(&'static str, ZoneRule)> {
    use ZoneRule::{Fixed, Iana};
    vec![
        ("pacific time", Iana(Tz::America__Los_Angeles)),
        ("pacific standard time", Fixed(-480)),
        ("pacific daylight time", Fixed(-420)),
        ("mountain time", Iana(Tz::America__Denver)),
        ("mountain standard time", Fixed(-420)),
        ("mountain daylight time", Fixed(-360)),
        ("central time", Iana(Tz::America__Chicago)),
        ("central standard time", Fixed(-360)),
        ("central daylight time", Fixed(-300)),
        ("eastern time", Iana(Tz::America__New_York)),
        ("eastern standard time", Fixed(-300)),
        ("eastern daylight time", Fixed(-240)),
        ("greenwich mean time", Fixed(0)),
        ("coordinated universal time", Fixed(0)),
        ("universal time", Fixed(0)),
        ("british summer time", Fixed(60)),
        ("central european time", Iana(Tz::Europe__Berlin)),
        ("central european summer time", Fixed(120)),
        ("india standard time", Fixed(330)),
        ("japan standard time", Fixed(540)),
        ("australian eastern time", Iana(Tz::Australia__Sydney)),
    ]
}

fn cities() -> Vec<(&'static str, Tz)> {
    vec![
        ("new york", Tz::America__New_York),
        ("boston", Tz::America__New_York),
        ("los angeles", Tz::America__Los_Angeles),
        ("san francisco", Tz::America__Los_Angeles),
        ("seattle", Tz::America__Los_Angeles),
        ("chicago", Tz::America__Chicago),
        ("denver", Tz::America__Denver),
        ("toronto", Tz::America__Toronto),
        ("vancouver", Tz::America__Vancouver),
        ("london", Tz::Europe__London),
        ("paris", Tz::Europe__Paris),
        ("berlin", Tz::Europe__Berlin),
        ("madrid", Tz::Europe__Madrid),
        ("rome", Tz::Europe__Rome),
        ("moscow", Tz::Europe__Moscow),
        ("dubai", Tz::Asia__Dubai),
        ("mumbai", Tz::Asia__Kolkata),
        ("delhi", Tz::Asia__Kolkata),
        ("singapore", Tz::Asia__Singapore),
        ("hong kong", Tz::Asia__Hong_Kong),
        ("beijing", Tz::Asia__Shanghai),
        ("shanghai", Tz::Asia__Shanghai),
        ("tokyo", Tz::Asia__Tokyo),
        ("seoul", Tz::Asia__Seoul),
        ("sydney", Tz::Australia__Sydney),
        ("melbourne", Tz::Australia__Melbourne),
        ("auckland", Tz::Pacific__Auckland),
    ]
}
