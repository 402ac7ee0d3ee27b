//! Normalized values produced by the parsers, and the output records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{ExtractedSpan, SubType};

/// Semantic field name ("value", "start", "end", "next") to a concrete string.
pub type ValueMap = BTreeMap<String, String>;

/// The shape of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionKind {
    Date,
    Time,
    DateTime,
    DateRange,
    TimeRange,
    DateTimeRange,
    Duration,
    Set,
}

/// A modifier word attached to an expression ("before March", "since 2019").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Before,
    After,
    Since,
    Around,
}

/// One normalized value of a span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Compact expression encoding granularity and value, e.g. `XXXX-03-05`.
    pub timex: String,
    pub kind: ResolutionKind,
    /// Nearest instant on or before the reference.
    pub past: ValueMap,
    /// Nearest instant on or after the reference.
    pub future: ValueMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Modifier>,
}

impl Resolution {
    /// A point resolution (`value` key).
    pub fn point(timex: String, kind: ResolutionKind, past: String, future: String) -> Self {
        Resolution {
            timex,
            kind,
            past: single("value", past),
            future: single("value", future),
            modifier: None,
        }
    }

    /// A range resolution (`start` / `end` keys).
    pub fn range(
        timex: String,
        kind: ResolutionKind,
        past: (String, String),
        future: (String, String),
    ) -> Self {
        Resolution {
            timex,
            kind,
            past: pair(past.0, past.1),
            future: pair(future.0, future.1),
            modifier: None,
        }
    }

    /// Whether both resolutions agree, i.e. the expression is fully specified.
    pub fn is_determined(&self) -> bool {
        self.past == self.future
    }

    pub fn past_value(&self, key: &str) -> Option<&str> {
        self.past.get(key).map(String::as_str)
    }

    pub fn future_value(&self, key: &str) -> Option<&str> {
        self.future.get(key).map(String::as_str)
    }

    /// Rewrite the value maps for a modifier: "before X" ends at X, "after X"
    /// and "since X" start at X.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.past = modify_map(self.past, modifier);
        self.future = modify_map(self.future, modifier);
        self.modifier = Some(modifier);
        self
    }
}

fn single(key: &str, value: String) -> ValueMap {
    let mut map = ValueMap::new();
    map.insert(key.to_string(), value);
    map
}

fn pair(start: String, end: String) -> ValueMap {
    let mut map = ValueMap::new();
    map.insert("start".to_string(), start);
    map.insert("end".to_string(), end);
    map
}

fn modify_map(map: ValueMap, modifier: Modifier) -> ValueMap {
    let point = map.get("value").cloned();
    let start = map.get("start").cloned();
    let end = map.get("end").cloned();
    match modifier {
        Modifier::Before => match start.or(point) {
            Some(bound) => single("end", bound),
            None => map,
        },
        Modifier::After => match end.or(point) {
            Some(bound) => single("start", bound),
            None => map,
        },
        Modifier::Since => match start.or(point) {
            Some(bound) => single("start", bound),
            None => map,
        },
        Modifier::Around => map,
    }
}

/// A span's resolution: a single value, a set of readings of an
/// under-specified expression, or a list of alternatives joined by "or".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", content = "values", rename_all = "lowercase")]
pub enum ResolutionValue {
    Single(Resolution),
    /// Readings of an hour without am/pm, morning reading first.
    Ambiguous(Vec<Resolution>),
    Alternatives(Vec<Resolution>),
}

impl ResolutionValue {
    /// Every concrete resolution carried by this value.
    pub fn candidates(&self) -> &[Resolution] {
        match self {
            ResolutionValue::Single(r) => std::slice::from_ref(r),
            ResolutionValue::Ambiguous(list) | ResolutionValue::Alternatives(list) => list,
        }
    }

    pub fn into_candidates(self) -> Vec<Resolution> {
        match self {
            ResolutionValue::Single(r) => vec![r],
            ResolutionValue::Ambiguous(list) | ResolutionValue::Alternatives(list) => list,
        }
    }

    /// The first candidate.
    pub fn primary(&self) -> Option<&Resolution> {
        self.candidates().first()
    }

    /// Build a value from one or more readings.
    pub fn from_readings(mut readings: Vec<Resolution>) -> Option<Self> {
        match readings.len() {
            0 => None,
            1 => readings.pop().map(ResolutionValue::Single),
            _ => Some(ResolutionValue::Ambiguous(readings)),
        }
    }

    pub fn map(self, f: impl Fn(Resolution) -> Resolution) -> Self {
        match self {
            ResolutionValue::Single(r) => ResolutionValue::Single(f(r)),
            ResolutionValue::Ambiguous(list) => {
                ResolutionValue::Ambiguous(list.into_iter().map(f).collect())
            }
            ResolutionValue::Alternatives(list) => {
                ResolutionValue::Alternatives(list.into_iter().map(f).collect())
            }
        }
    }
}

/// A fixed UTC offset attached to a date/time result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeZoneAttachment {
    /// The zone text as written ("PST", "pacific time").
    pub text: String,
    /// Offset in `UTC±HH:MM` form.
    pub value: String,
    pub utc_offset_mins: i32,
    /// IANA zone name when the expression named a region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iana: Option<String>,
}

/// A span together with its resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResult {
    pub span: ExtractedSpan,
    pub value: ResolutionValue,
    pub time_zone: Option<TimeZoneAttachment>,
}

/// One recognized temporal expression, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelResult {
    #[serde(rename = "type")]
    pub subtype: SubType,
    pub text: String,
    /// Byte offset of the expression in the input.
    pub start: usize,
    /// Length in bytes.
    pub length: usize,
    pub resolution: ResolutionValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<TimeZoneAttachment>,
}

impl ModelResult {
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

impl From<ParsedResult> for ModelResult {
    fn from(parsed: ParsedResult) -> Self {
        ModelResult {
            subtype: parsed.span.subtype,
            text: parsed.span.text,
            start: parsed.span.start,
            length: parsed.span.length,
            resolution: parsed.value,
            time_zone: parsed.time_zone,
        }
    }
}

/// A candidate that survived overlap resolution but could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedSpan {
    pub subtype: SubType,
    pub text: String,
    pub start: usize,
    pub reason: String,
}

/// Results plus the spans that were dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recognition {
    pub results: Vec<ModelResult>,
    pub dropped: Vec<DroppedSpan>,
    /// Set when the request ran out of time; `results` is then empty.
    pub timed_out: bool,
}
