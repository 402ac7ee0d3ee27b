//! Per-culture pattern sets.
//!
//! A [`LocaleDefinition`] is static data: pattern templates with
//! `{{PLACEHOLDER}}` slots and the lexical tables that fill them. Compiling it
//! yields a [`LocalePatternSet`], the immutable matcher collection every
//! extractor and parser of that culture shares. Compilation happens once per
//! culture per process; a definition that does not compile is a configuration
//! error reported from [`pattern_set`].

mod english;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};
use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::calendar::DurationParts;
use crate::error::{RecognizerError, Result};
use crate::resolution::Modifier;
use crate::types::{PatternTag, SubType};

// ── Cultures ────────────────────────────────────────────────────────────────

/// A supported culture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Culture {
    /// US English: month-first numeric dates.
    English,
    /// British, Australian, Indian, Irish, New Zealand and South African
    /// English: day-first numeric dates.
    EnglishOthers,
}

impl Culture {
    /// Resolve a culture code such as `en-us` or `en-GB`.
    ///
    /// # Errors
    ///
    /// Returns `RecognizerError::UnsupportedCulture` for any other code.
    pub fn from_code(code: &str) -> Result<Culture> {
        match code.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(Culture::English),
            "en-gb" | "en-au" | "en-in" | "en-nz" | "en-ie" | "en-za" => {
                Ok(Culture::EnglishOthers)
            }
            _ => Err(RecognizerError::UnsupportedCulture(code.to_string())),
        }
    }

    /// Canonical code of the culture.
    pub fn code(self) -> &'static str {
        match self {
            Culture::English => "en-us",
            Culture::EnglishOthers => "en-gb",
        }
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Culture {
    type Err = RecognizerError;

    fn from_str(s: &str) -> Result<Self> {
        Culture::from_code(s)
    }
}

// ── Lexical values ──────────────────────────────────────────────────────────

/// Direction of a relative prefix ("next", "last", "this").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeShift {
    Last,
    This,
    Next,
}

impl RelativeShift {
    pub fn offset(self) -> i64 {
        match self {
            RelativeShift::Last => -1,
            RelativeShift::This => 0,
            RelativeShift::Next => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmPm {
    Am,
    Pm,
}

/// A named part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
    BusinessHours,
}

impl DayPart {
    pub fn timex(self) -> &'static str {
        match self {
            DayPart::Morning => "TMO",
            DayPart::Afternoon => "TAF",
            DayPart::Evening => "TEV",
            DayPart::Night => "TNI",
            DayPart::BusinessHours => "TBH",
        }
    }

    /// Inclusive clock bounds.
    pub fn bounds(self) -> Option<(NaiveTime, NaiveTime)> {
        let (start, end) = match self {
            DayPart::Morning => ((8, 0, 0), (12, 0, 0)),
            DayPart::Afternoon => ((12, 0, 0), (16, 0, 0)),
            DayPart::Evening => ((16, 0, 0), (20, 0, 0)),
            DayPart::Night => ((20, 0, 0), (23, 59, 59)),
            DayPart::BusinessHours => ((8, 0, 0), (18, 0, 0)),
        };
        Some((
            NaiveTime::from_hms_opt(start.0, start.1, start.2)?,
            NaiveTime::from_hms_opt(end.0, end.1, end.2)?,
        ))
    }

    /// The am/pm marker implied by "in the morning", "at night" and so on.
    pub fn meridiem(self) -> AmPm {
        match self {
            DayPart::Morning => AmPm::Am,
            _ => AmPm::Pm,
        }
    }
}

/// Meteorological seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn timex(self) -> &'static str {
        match self {
            Season::Spring => "SP",
            Season::Summer => "SU",
            Season::Fall => "FA",
            Season::Winter => "WI",
        }
    }

    /// First month of the season. Winter starts in December of the named year.
    pub fn start_month(self) -> u32 {
        match self {
            Season::Spring => 3,
            Season::Summer => 6,
            Season::Fall => 9,
            Season::Winter => 12,
        }
    }
}

/// How a holiday's date is computed for a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayRule {
    Fixed {
        month: u32,
        day: u32,
    },
    /// The `ordinal`-th `weekday` of `month` (negative counts from the end),
    /// moved by `offset_days`.
    NthWeekday {
        month: u32,
        weekday: Weekday,
        ordinal: i32,
        offset_days: i64,
    },
    /// Days relative to Easter Sunday.
    Easter {
        offset_days: i64,
    },
}

/// How a time zone's offset is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRule {
    /// Minutes east of UTC.
    Fixed(i32),
    /// A region whose offset depends on the date.
    Iana(Tz),
}

/// RRULE frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceFreq {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            RecurrenceFreq::Secondly => "SECONDLY",
            RecurrenceFreq::Minutely => "MINUTELY",
            RecurrenceFreq::Hourly => "HOURLY",
            RecurrenceFreq::Daily => "DAILY",
            RecurrenceFreq::Weekly => "WEEKLY",
            RecurrenceFreq::Monthly => "MONTHLY",
            RecurrenceFreq::Yearly => "YEARLY",
        }
    }
}

/// A duration unit word: its length and the recurrence it implies after
/// "every".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDef {
    pub parts: DurationParts,
    pub freq: RecurrenceFreq,
    pub interval: u32,
}

/// A frequency adverb ("daily", "biweekly").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyDef {
    pub unit: UnitDef,
    pub interval: u32,
}

// ── Definitions ─────────────────────────────────────────────────────────────

/// One pattern template.
#[derive(Debug, Clone, Copy)]
pub struct PatternDef {
    pub subtype: SubType,
    pub tag: PatternTag,
    /// Tie-breaker between equal-length matches of one extractor.
    pub weight: u8,
    pub template: &'static str,
}

/// Templates for the gap and context checks used during fusion.
#[derive(Debug, Clone, Copy)]
pub struct ConnectorDefs {
    pub range: &'static str,
    pub between: &'static str,
    pub range_prefix: &'static str,
    pub date_time: &'static str,
    pub date_time_period: &'static str,
    pub alternatives: &'static str,
    pub duration_joiner: &'static str,
    pub set_time: &'static str,
    pub zone: &'static str,
    pub duration_in: &'static str,
    pub duration_within: &'static str,
    pub duration_suffix: &'static str,
    pub anchor_gap: &'static str,
    pub modifier_prefix: &'static str,
    pub modifier_suffix: &'static str,
    pub day_fragment: &'static str,
    pub hour_fragment: &'static str,
}

/// Lexical tables, keyed by surface form.
#[derive(Debug, Clone)]
pub struct LexicalTables {
    pub months: Vec<(&'static str, u32)>,
    pub weekdays: Vec<(&'static str, Weekday)>,
    pub relatives: Vec<(&'static str, RelativeShift)>,
    pub numbers: Vec<(&'static str, f64)>,
    pub ordinals: Vec<(&'static str, i32)>,
    pub relative_days: Vec<(&'static str, i64)>,
    pub units: Vec<(&'static str, UnitDef)>,
    pub day_parts: Vec<(&'static str, DayPart)>,
    pub seasons: Vec<(&'static str, Season)>,
    pub holidays: Vec<(&'static str, HolidayRule)>,
    /// Case-sensitive abbreviations.
    pub zone_abbreviations: Vec<(&'static str, ZoneRule)>,
    pub zone_names: Vec<(&'static str, ZoneRule)>,
    pub cities: Vec<(&'static str, Tz)>,
    pub named_times: Vec<(&'static str, (u32, u32))>,
    pub frequencies: Vec<(&'static str, FrequencyDef)>,
    pub modifiers: Vec<(&'static str, Modifier)>,
    pub modifier_suffixes: Vec<(&'static str, Modifier)>,
}

/// Everything needed to compile a culture's pattern set.
#[derive(Debug, Clone)]
pub struct LocaleDefinition {
    pub culture: Culture,
    /// Numeric dates read day first (`05/03` is 5 March).
    pub day_first: bool,
    pub patterns: Vec<PatternDef>,
    pub connectors: ConnectorDefs,
    pub tables: LexicalTables,
}

impl LocaleDefinition {
    pub fn for_culture(culture: Culture) -> LocaleDefinition {
        english::definition(culture)
    }
}

// ── Compiled set ────────────────────────────────────────────────────────────

/// A compiled pattern.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    pub matcher: Regex,
    pub subtype: SubType,
    pub tag: PatternTag,
    pub weight: u8,
}

/// Compiled gap and context matchers.
#[derive(Debug, Clone)]
pub struct Connectors {
    pub range: Regex,
    pub between: Regex,
    pub range_prefix: Regex,
    pub date_time: Regex,
    pub date_time_period: Regex,
    pub alternatives: Regex,
    pub duration_joiner: Regex,
    pub set_time: Regex,
    pub zone: Regex,
    pub duration_in: Regex,
    pub duration_within: Regex,
    pub duration_suffix: Regex,
    pub anchor_gap: Regex,
    pub modifier_prefix: Regex,
    pub modifier_suffix: Regex,
    pub day_fragment: Regex,
    pub hour_fragment: Regex,
}

/// The compiled, immutable pattern set of one culture.
#[derive(Debug)]
pub struct LocalePatternSet {
    culture: Culture,
    day_first: bool,
    entries: Vec<PatternEntry>,
    connectors: Connectors,
    months: HashMap<String, u32>,
    weekdays: HashMap<String, Weekday>,
    relatives: HashMap<String, RelativeShift>,
    numbers: HashMap<String, f64>,
    ordinals: HashMap<String, i32>,
    relative_days: HashMap<String, i64>,
    units: HashMap<String, UnitDef>,
    day_parts: HashMap<String, DayPart>,
    seasons: HashMap<String, Season>,
    holidays: HashMap<String, HolidayRule>,
    zone_abbreviations: HashMap<String, ZoneRule>,
    zone_names: HashMap<String, ZoneRule>,
    cities: HashMap<String, Tz>,
    named_times: HashMap<String, (u32, u32)>,
    frequencies: HashMap<String, FrequencyDef>,
    modifiers: HashMap<String, Modifier>,
}

impl LocalePatternSet {
    /// Compile a definition.
    ///
    /// # Errors
    ///
    /// Returns `RecognizerError::UnknownPlaceholder` when a template names a
    /// slot with no table behind it, and `RecognizerError::Configuration`
    /// when an expanded template is not a valid regular expression.
    pub fn compile(def: &LocaleDefinition) -> Result<LocalePatternSet> {
        let fragments = fragments(&def.tables);
        let compiler = Compiler {
            culture: def.culture,
            fragments: &fragments,
        };

        let mut entries = def
            .patterns
            .iter()
            .map(|p| {
                Ok(PatternEntry {
                    matcher: compiler.compile(p.template)?,
                    subtype: p.subtype,
                    tag: p.tag,
                    weight: p.weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by(|a, b| b.weight.cmp(&a.weight));

        let c = &def.connectors;
        let connectors = Connectors {
            range: compiler.compile(c.range)?,
            between: compiler.compile(c.between)?,
            range_prefix: compiler.compile(c.range_prefix)?,
            date_time: compiler.compile(c.date_time)?,
            date_time_period: compiler.compile(c.date_time_period)?,
            alternatives: compiler.compile(c.alternatives)?,
            duration_joiner: compiler.compile(c.duration_joiner)?,
            set_time: compiler.compile(c.set_time)?,
            zone: compiler.compile(c.zone)?,
            duration_in: compiler.compile(c.duration_in)?,
            duration_within: compiler.compile(c.duration_within)?,
            duration_suffix: compiler.compile(c.duration_suffix)?,
            anchor_gap: compiler.compile(c.anchor_gap)?,
            modifier_prefix: compiler.compile(c.modifier_prefix)?,
            modifier_suffix: compiler.compile(c.modifier_suffix)?,
            day_fragment: compiler.compile(c.day_fragment)?,
            hour_fragment: compiler.compile(c.hour_fragment)?,
        };

        let t = &def.tables;
        let mut modifiers = table(&t.modifiers);
        modifiers.extend(table(&t.modifier_suffixes));
        Ok(LocalePatternSet {
            culture: def.culture,
            day_first: def.day_first,
            entries,
            connectors,
            months: table(&t.months),
            weekdays: table(&t.weekdays),
            relatives: table(&t.relatives),
            numbers: table(&t.numbers),
            ordinals: table(&t.ordinals),
            relative_days: table(&t.relative_days),
            units: table(&t.units),
            day_parts: table(&t.day_parts),
            seasons: table(&t.seasons),
            holidays: table(&t.holidays),
            zone_abbreviations: t
                .zone_abbreviations
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            zone_names: table(&t.zone_names),
            cities: table(&t.cities),
            named_times: table(&t.named_times),
            frequencies: table(&t.frequencies),
            modifiers,
        })
    }

    pub fn culture(&self) -> Culture {
        self.culture
    }

    pub fn day_first(&self) -> bool {
        self.day_first
    }

    /// Compiled patterns of one subtype, highest weight first.
    pub fn entries(&self, subtype: SubType) -> impl Iterator<Item = &PatternEntry> {
        self.entries.iter().filter(move |e| e.subtype == subtype)
    }

    pub fn connectors(&self) -> &Connectors {
        &self.connectors
    }

    pub fn month(&self, word: &str) -> Option<u32> {
        self.months.get(&normalize(word)).copied()
    }

    pub fn weekday(&self, word: &str) -> Option<Weekday> {
        self.weekdays.get(&normalize(word)).copied()
    }

    pub fn relative(&self, word: &str) -> Option<RelativeShift> {
        self.relatives.get(&normalize(word)).copied()
    }

    /// A number written with digits or words.
    pub fn number(&self, word: &str) -> Option<f64> {
        word.trim()
            .parse::<f64>()
            .ok()
            .or_else(|| self.numbers.get(&normalize(word)).copied())
    }

    pub fn ordinal(&self, word: &str) -> Option<i32> {
        self.ordinals.get(&normalize(word)).copied()
    }

    pub fn relative_day(&self, word: &str) -> Option<i64> {
        self.relative_days.get(&normalize(word)).copied()
    }

    pub fn unit(&self, word: &str) -> Option<UnitDef> {
        self.units.get(&normalize(word)).copied()
    }

    pub fn day_part(&self, word: &str) -> Option<DayPart> {
        self.day_parts.get(&normalize(word)).copied()
    }

    pub fn season(&self, word: &str) -> Option<Season> {
        self.seasons.get(&normalize(word)).copied()
    }

    pub fn holiday(&self, word: &str) -> Option<HolidayRule> {
        self.holidays.get(&normalize(word)).copied()
    }

    /// A zone abbreviation (exact case) or a zone name.
    pub fn zone(&self, word: &str) -> Option<ZoneRule> {
        self.zone_abbreviations
            .get(word.trim())
            .or_else(|| self.zone_names.get(&normalize(word)))
            .copied()
    }

    pub fn city(&self, word: &str) -> Option<Tz> {
        self.cities.get(&normalize(word)).copied()
    }

    pub fn named_time(&self, word: &str) -> Option<NaiveTime> {
        let (h, m) = self.named_times.get(&normalize(word)).copied()?;
        NaiveTime::from_hms_opt(h, m, 0)
    }

    pub fn frequency(&self, word: &str) -> Option<FrequencyDef> {
        self.frequencies.get(&normalize(word)).copied()
    }

    /// Modifier for a prefix or suffix word ("before", "or later").
    pub fn modifier(&self, word: &str) -> Option<Modifier> {
        self.modifiers.get(&normalize(word)).copied()
    }
}

/// Lookup key of a surface form: lowercase, no apostrophes or periods, single
/// spaces.
pub fn normalize(word: &str) -> String {
    word.chars()
        .filter(|c| !matches!(c, '\'' | '’' | '.'))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn table<V: Copy>(rows: &[(&'static str, V)]) -> HashMap<String, V> {
    rows.iter().map(|(k, v)| (normalize(k), *v)).collect()
}

// ── Template compilation ────────────────────────────────────────────────────

struct Compiler<'a> {
    culture: Culture,
    fragments: &'a HashMap<&'static str, String>,
}

impl Compiler<'_> {
    fn compile(&self, template: &str) -> Result<Regex> {
        let expanded = self.expand(template)?;
        Regex::new(&format!("(?i){expanded}")).map_err(|e| RecognizerError::Configuration {
            culture: self.culture.code().to_string(),
            pattern: template.to_string(),
            source: Box::new(e),
        })
    }

    fn expand(&self, template: &str) -> Result<String> {
        let mut out = String::with_capacity(template.len() * 4);
        let mut rest = template;
        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                return Err(self.unknown(template, after));
            };
            let name = &after[..close];
            match self.fragments.get(name) {
                Some(fragment) => out.push_str(fragment),
                None => return Err(self.unknown(template, name)),
            }
            rest = &after[close + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn unknown(&self, template: &str, placeholder: &str) -> RecognizerError {
        RecognizerError::UnknownPlaceholder {
            culture: self.culture.code().to_string(),
            pattern: template.to_string(),
            placeholder: placeholder.to_string(),
        }
    }
}

/// Regex alternation of surface forms, longest first so that "june" is tried
/// before "jun".
fn alternation<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    let mut words: Vec<&str> = words.into_iter().collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words.dedup();
    let alternatives: Vec<String> = words
        .iter()
        .map(|w| {
            regex::escape(w)
                .replace('\'', "['’]?")
                .replace(' ', r"\s+")
        })
        .collect();
    format!("(?:{})", alternatives.join("|"))
}

fn keys<'a, V>(rows: &'a [(&'static str, V)]) -> impl Iterator<Item = &'static str> + 'a {
    rows.iter().map(|(k, _)| *k)
}

fn fragments(t: &LexicalTables) -> HashMap<&'static str, String> {
    let number_words = alternation(keys(&t.numbers));
    let hour_words = alternation(
        t.numbers
            .iter()
            .filter(|(k, v)| (1.0..=12.0).contains(v) && k.chars().all(|c| c.is_ascii_alphabetic()) && k.len() > 2)
            .map(|(k, _)| *k),
    );
    let date_units = alternation(
        t.units
            .iter()
            .filter(|(_, u)| u.parts.is_date_level())
            .map(|(k, _)| *k),
    );
    let time_units = alternation(
        t.units
            .iter()
            .filter(|(_, u)| !u.parts.is_date_level())
            .map(|(k, _)| *k),
    );
    let abbreviations: Vec<String> = keys(&t.zone_abbreviations).map(regex::escape).collect();

    let mut f = HashMap::new();
    f.insert("MONTH", alternation(keys(&t.months)));
    f.insert("WEEKDAY", alternation(keys(&t.weekdays)));
    f.insert(
        "WEEKDAY_FULL",
        alternation(keys(&t.weekdays).filter(|k| k.ends_with("day"))),
    );
    f.insert("REL", alternation(keys(&t.relatives)));
    f.insert("RELDAY", alternation(keys(&t.relative_days)));
    f.insert("NUMBER", format!(r"(?:\d+(?:\.\d+)?|{number_words})"));
    f.insert("HOUR_WORD", hour_words);
    f.insert("ORDINAL", alternation(keys(&t.ordinals)));
    f.insert("UNIT", alternation(keys(&t.units)));
    f.insert("DATE_UNIT", date_units);
    f.insert("TIME_UNIT", time_units);
    f.insert("DAY_PART", alternation(keys(&t.day_parts)));
    f.insert("SEASON", alternation(keys(&t.seasons)));
    f.insert("HOLIDAY", alternation(keys(&t.holidays)));
    f.insert("NAMED_TIME", alternation(keys(&t.named_times)));
    f.insert("FREQUENCY", alternation(keys(&t.frequencies)));
    f.insert("ZONE_ABBR", format!("(?-i:{})", abbreviations.join("|")));
    f.insert("ZONE_NAME", alternation(keys(&t.zone_names)));
    f.insert("CITY", alternation(keys(&t.cities)));
    f.insert("MODIFIER", alternation(keys(&t.modifiers)));
    f.insert("MODIFIER_SUFFIX", alternation(keys(&t.modifier_suffixes)));
    f.insert("DAY", r"(?:3[01]|[12][0-9]|0?[1-9])".to_string());
    f.insert("YEAR", r"(?:1[89][0-9]{2}|2[0-9]{3})".to_string());
    f.insert("HOUR12", r"(?:1[0-2]|0?[1-9])".to_string());
    f.insert("HOUR24", r"(?:2[0-3]|[01]?[0-9])".to_string());
    f.insert("MINUTE", r"(?:[0-5][0-9])".to_string());
    f.insert("AMPM", r"(?:[ap]\.m\.|[ap]\.?m\b)".to_string());
    f
}

// ── Registry ────────────────────────────────────────────────────────────────

static ENGLISH: OnceCell<LocalePatternSet> = OnceCell::new();
static ENGLISH_OTHERS: OnceCell<LocalePatternSet> = OnceCell::new();

/// The process-wide pattern set of `culture`, compiled on first use.
///
/// # Errors
///
/// Returns the compilation error if the culture's definition is invalid. A
/// failed compilation is retried on the next call.
pub fn pattern_set(culture: Culture) -> Result<&'static LocalePatternSet> {
    let cell = match culture {
        Culture::English => &ENGLISH,
        Culture::EnglishOthers => &ENGLISH_OTHERS,
    };
    cell.get_or_try_init(|| {
        tracing::debug!(culture = culture.code(), "compiling locale pattern set");
        LocalePatternSet::compile(&LocaleDefinition::for_culture(culture))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_culture_codes() {
        assert_eq!(Culture::from_code("en-US").unwrap(), Culture::English);
        assert_eq!(Culture::from_code("en").unwrap(), Culture::English);
        assert_eq!(Culture::from_code("en_GB").unwrap(), Culture::EnglishOthers);
        assert_eq!("en-au".parse::<Culture>().unwrap(), Culture::EnglishOthers);
        assert!(matches!(
            Culture::from_code("fr-fr"),
            Err(RecognizerError::UnsupportedCulture(_))
        ));
    }

    #[test]
    fn test_both_cultures_compile() {
        let us = pattern_set(Culture::English).unwrap();
        let gb = pattern_set(Culture::EnglishOthers).unwrap();
        assert!(!us.day_first());
        assert!(gb.day_first());
        assert!(us.entries(SubType::Date).count() > 5);
    }

    #[test]
    fn test_entries_sorted_by_weight() {
        let set = pattern_set(Culture::English).unwrap();
        let weights: Vec<u8> = set.entries(SubType::Time).map(|e| e.weight).collect();
        assert!(weights.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_lookups_normalize() {
        let set = pattern_set(Culture::English).unwrap();
        assert_eq!(set.month("Sept."), Some(9));
        assert_eq!(set.weekday("FRIDAY"), Some(Weekday::Fri));
        assert_eq!(set.number("two"), Some(2.0));
        assert_eq!(set.number("1.5"), Some(1.5));
        assert_eq!(set.relative("Next"), Some(RelativeShift::Next));
        assert!(set.holiday("New Year’s Day").is_some());
        assert!(set.holiday("new years  day").is_some());
    }

    #[test]
    fn test_zone_abbreviations_are_case_sensitive() {
        let set = pattern_set(Culture::English).unwrap();
        assert_eq!(set.zone("PST"), Some(ZoneRule::Fixed(-480)));
        assert_eq!(set.zone("pst"), None);
        assert!(set.zone("Pacific Time").is_some());
    }

    #[test]
    fn test_unknown_placeholder_is_reported() {
        let mut def = LocaleDefinition::for_culture(Culture::English);
        def.patterns.push(PatternDef {
            subtype: SubType::Date,
            tag: PatternTag::Weekday,
            weight: 1,
            template: r"\b{{NOPE}}\b",
        });
        let err = LocalePatternSet::compile(&def).unwrap_err();
        assert!(matches!(
            err,
            RecognizerError::UnknownPlaceholder { ref placeholder, .. } if placeholder == "NOPE"
        ));
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let mut def = LocaleDefinition::for_culture(Culture::English);
        def.patterns.push(PatternDef {
            subtype: SubType::Date,
            tag: PatternTag::Weekday,
            weight: 1,
            template: r"(unclosed",
        });
        let err = LocalePatternSet::compile(&def).unwrap_err();
        assert!(matches!(err, RecognizerError::Configuration { .. }));
    }

    #[test]
    fn test_alternation_longest_first() {
        let alt = alternation(["jun", "june", "new year's"]);
        assert!(alt.starts_with("(?:new\\s+year['’]?s|june|jun)"));
    }
}
