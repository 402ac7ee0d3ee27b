use chrono::NaiveDateTime;

use super::{required, DateTimeParser, ParseContext};
use crate::calendar::DurationParts;
use crate::error::ParseError;
use crate::resolution::{Resolution, ResolutionKind, ResolutionValue};
use crate::timex::duration_timex;
use crate::types::{ExtractedSpan, PatternTag, SubType};

const MONTHS_PER_YEAR: f64 = 12.0;
const DAYS_PER_MONTH: f64 = 30.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Resolves lengths of time. The value is the magnitude in seconds; there is
/// no past/future distinction.
#[derive(Debug, Clone, Copy)]
pub struct DurationParser {
    ctx: ParseContext,
}

impl DurationParser {
    pub fn new(ctx: ParseContext) -> Self {
        DurationParser { ctx }
    }

    /// Calendar parts of a duration span.
    pub(crate) fn parts(&self, span: &ExtractedSpan) -> Result<DurationParts, ParseError> {
        let parts = match span.tag {
            PatternTag::Amount | PatternTag::RelativeSpan => {
                let amount = self.amount(span)?;
                scale(self.unit(span)?, amount)
            }
            PatternTag::AndAHalf => {
                let amount = self.amount(span)? + 0.5;
                scale(self.unit(span)?, amount)
            }
            PatternTag::HalfUnit => scale(self.unit(span)?, 0.5),
            PatternTag::Compound => {
                return span.parts.iter().try_fold(DurationParts::default(), |total, part| {
                    total
                        .checked_add(self.parts(part)?)
                        .ok_or_else(|| too_long(span))
                });
            }
            tag => return Err(ParseError::UnsupportedPattern(tag)),
        };
        parts.ok_or_else(|| too_long(span))
    }

    fn amount(&self, span: &ExtractedSpan) -> Result<f64, ParseError> {
        let raw = required(span, "amount")?;
        self.ctx
            .patterns
            .number(raw)
            .ok_or_else(|| ParseError::invalid(format!("amount '{raw}'")))
    }

    fn unit(&self, span: &ExtractedSpan) -> Result<DurationParts, ParseError> {
        let raw = required(span, "unit")?;
        self.ctx
            .patterns
            .unit(raw)
            .map(|u| u.parts)
            .ok_or_else(|| ParseError::invalid(format!("unit '{raw}'")))
    }
}

/// `amount` times `unit`, with fractions cascading into smaller parts:
/// half a year is 6 months, 1.5 days is 1 day and 12 hours. `None` when a
/// part does not fit in an `i64`.
pub(crate) fn scale(unit: DurationParts, amount: f64) -> Option<DurationParts> {
    let years = unit.years as f64 * amount;
    let months = unit.months as f64 * amount + years.fract() * MONTHS_PER_YEAR;
    let days = unit.days as f64 * amount + months.fract() * DAYS_PER_MONTH;
    let seconds = unit.seconds as f64 * amount + days.fract() * SECONDS_PER_DAY;
    Some(DurationParts {
        years: whole(years.trunc())?,
        months: whole(months.trunc())?,
        days: whole(days.trunc())?,
        seconds: whole(seconds.round())?,
    })
}

fn whole(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    (value.is_finite() && value.abs() < i64::MAX as f64).then_some(value as i64)
}

fn too_long(span: &ExtractedSpan) -> ParseError {
    ParseError::invalid(format!("duration '{}' is too long", span.text))
}

impl DateTimeParser for DurationParser {
    fn subtype(&self) -> SubType {
        SubType::Duration
    }

    fn parse(&self, span: &ExtractedSpan, _reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        let parts = self.parts(span)?;
        let seconds = parts.total_seconds().ok_or_else(|| too_long(span))?.to_string();
        Ok(ResolutionValue::Single(Resolution::point(
            duration_timex(&parts),
            ResolutionKind::Duration,
            seconds.clone(),
            seconds,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::extract::DurationExtractor;

    fn parse(text: &str) -> Resolution {
        let ctx = context();
        let span = only_span(&DurationExtractor::new(ctx.patterns), text);
        let value = DurationParser::new(ctx).parse(&span, reference()).unwrap();
        value.primary().unwrap().clone()
    }

    #[test]
    fn test_amount_and_unit() {
        let r = parse("3 days");
        assert_eq!(r.timex, "P3D");
        assert_eq!(r.future_value("value"), Some("259200"));
        assert!(r.is_determined());
    }

    #[test]
    fn test_half_an_hour() {
        let r = parse("half an hour");
        assert_eq!(r.timex, "PT30M");
        assert_eq!(r.future_value("value"), Some("1800"));
    }

    #[test]
    fn test_and_a_half() {
        assert_eq!(parse("2 and a half hours").timex, "PT2H30M");
        assert_eq!(parse("a year and a half").timex, "P1Y6M");
    }

    #[test]
    fn test_compound_sums_parts() {
        let r = parse("1 hour and 30 minutes");
        assert_eq!(r.timex, "PT1H30M");
        assert_eq!(r.future_value("value"), Some("5400"));
    }

    #[test]
    fn test_weeks_and_months_use_fixed_lengths() {
        assert_eq!(parse("two weeks").timex, "P2W");
        assert_eq!(parse("2 months").future_value("value"), Some("5184000"));
    }

    #[test]
    fn test_fraction_cascades() {
        let parts = scale(
            DurationParts {
                days: 1,
                ..Default::default()
            },
            1.5,
        )
        .unwrap();
        assert_eq!(parts.days, 1);
        assert_eq!(parts.seconds, 43_200);
    }

    #[test]
    fn test_oversized_amounts_are_errors() {
        let ctx = context();
        let parser = DurationParser::new(ctx);
        for text in ["99999999999999999 hours", "99999999999999 years"] {
            let span = only_span(&DurationExtractor::new(ctx.patterns), text);
            assert!(
                matches!(parser.parse(&span, reference()), Err(ParseError::InvalidCalendarValue(_))),
                "{text}"
            );
        }
    }
}
