use chrono::NaiveDateTime;

use super::{numeric, required, DateTimeParser, ParseContext};
use crate::calendar::{format_utc_offset, utc_offset_minutes};
use crate::error::ParseError;
use crate::locale::ZoneRule;
use crate::resolution::{ResolutionValue, TimeZoneAttachment};
use crate::types::{ExtractedSpan, PatternTag, SubType};

/// Resolves zone spans to a UTC offset. Zones only describe another
/// expression, so `parse` always fails; the merger calls
/// [`TimeZoneParser::attachment`] with the host's instant instead.
#[derive(Debug, Clone, Copy)]
pub struct TimeZoneParser {
    ctx: ParseContext,
}

impl TimeZoneParser {
    pub fn new(ctx: ParseContext) -> Self {
        TimeZoneParser { ctx }
    }

    /// The offset of `span` at the host's local wall-clock time. Region
    /// names ("Pacific time", "Tokyo time") are evaluated with their DST
    /// rules; explicit abbreviations ("PDT") and offsets are fixed.
    pub fn attachment(&self, span: &ExtractedSpan, host: NaiveDateTime) -> Result<TimeZoneAttachment, ParseError> {
        let rule = match span.tag {
            PatternTag::UtcOffset => {
                let hours = numeric::<i32>(span, "tz_hour")?.ok_or(ParseError::MissingCapture("tz_hour"))?;
                let minutes = numeric::<i32>(span, "tz_minute")?.unwrap_or(0);
                if hours > 14 || minutes > 59 {
                    return Err(ParseError::invalid(format!("offset '{}'", span.text)));
                }
                let sign = if required(span, "sign")? == "-" { -1 } else { 1 };
                ZoneRule::Fixed(sign * (hours * 60 + minutes))
            }
            PatternTag::ZoneAbbreviation | PatternTag::ZoneName => {
                let name = span
                    .capture("abbr")
                    .or_else(|| span.capture("zone_name"))
                    .ok_or(ParseError::MissingCapture("zone"))?;
                self.ctx
                    .patterns
                    .zone(name)
                    .ok_or_else(|| ParseError::invalid(format!("zone '{name}'")))?
            }
            PatternTag::CityTime => {
                let city = required(span, "city")?;
                ZoneRule::Iana(
                    self.ctx
                        .patterns
                        .city(city)
                        .ok_or_else(|| ParseError::invalid(format!("city '{city}'")))?,
                )
            }
            tag => return Err(ParseError::UnsupportedPattern(tag)),
        };

        let (minutes, iana) = match rule {
            ZoneRule::Fixed(minutes) => (minutes, None),
            ZoneRule::Iana(tz) => {
                let minutes = utc_offset_minutes(tz, host)
                    .ok_or_else(|| ParseError::invalid(format!("{} at {host}", tz.name())))?;
                (minutes, Some(tz.name().to_string()))
            }
        };
        Ok(TimeZoneAttachment {
            text: span.text.clone(),
            value: format_utc_offset(minutes),
            utc_offset_mins: minutes,
            iana,
        })
    }
}

impl DateTimeParser for TimeZoneParser {
    fn subtype(&self) -> SubType {
        SubType::TimeZone
    }

    fn parse(&self, _span: &ExtractedSpan, _reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        Err(ParseError::Standalone(SubType::TimeZone))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::extract::TimeZoneExtractor;

    fn attach(text: &str, host: NaiveDateTime) -> TimeZoneAttachment {
        let ctx = context();
        let span = only_span(&TimeZoneExtractor::new(ctx.patterns), text);
        TimeZoneParser::new(ctx).attachment(&span, host).unwrap()
    }

    #[test]
    fn test_abbreviations_are_fixed() {
        let zone = attach("PST", at(2016, 7, 1, 12, 0));
        assert_eq!(zone.utc_offset_mins, -480);
        assert_eq!(zone.value, "UTC-08:00");
        assert_eq!(zone.iana, None);
    }

    #[test]
    fn test_numeric_offsets() {
        assert_eq!(attach("UTC+5:30", reference()).utc_offset_mins, 330);
        assert_eq!(attach("GMT-3", reference()).value, "UTC-03:00");
    }

    #[test]
    fn test_region_names_follow_daylight_saving() {
        let summer = attach("Pacific time", at(2016, 7, 1, 12, 0));
        assert_eq!(summer.utc_offset_mins, -420);
        assert_eq!(summer.iana.as_deref(), Some("America/Los_Angeles"));

        let winter = attach("Pacific time", reference());
        assert_eq!(winter.utc_offset_mins, -480);
    }

    #[test]
    fn test_city_time() {
        let zone = attach("Tokyo time", reference());
        assert_eq!(zone.value, "UTC+09:00");
        assert_eq!(zone.text, "Tokyo time");
    }

    #[test]
    fn test_zone_never_resolves_alone() {
        let ctx = context();
        let span = only_span(&TimeZoneExtractor::new(ctx.patterns), "PST");
        assert_eq!(
            TimeZoneParser::new(ctx).parse(&span, reference()),
            Err(ParseError::Standalone(SubType::TimeZone))
        );
    }
}
