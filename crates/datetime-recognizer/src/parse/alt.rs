use chrono::NaiveDateTime;
use tracing::debug;

use super::{DateAndTimeParser, DateParser, DateTimeParser, ParseContext, TimeParser};
use crate::error::ParseError;
use crate::resolution::ResolutionValue;
use crate::types::{ExtractedSpan, SubType};

/// Resolves a disjunction by resolving each alternative with the parser of
/// its subtype. Readings of an ambiguous alternative are listed in place.
/// Alternatives that fail are left out; the span fails only when none
/// resolves.
#[derive(Debug, Clone, Copy)]
pub struct AltParser {
    date: DateParser,
    time: TimeParser,
    datetime: DateAndTimeParser,
}

impl AltParser {
    pub fn new(ctx: ParseContext) -> Self {
        AltParser {
            date: DateParser::new(ctx),
            time: TimeParser::new(ctx),
            datetime: DateAndTimeParser::new(ctx),
        }
    }

    fn parser_for(&self, subtype: SubType) -> Option<&dyn DateTimeParser> {
        match subtype {
            SubType::Date => Some(&self.date),
            SubType::Time => Some(&self.time),
            SubType::DateTime => Some(&self.datetime),
            _ => None,
        }
    }
}

impl DateTimeParser for AltParser {
    /// Alternatives keep the subtype of their family; the merger routes them
    /// here by flag, not by subtype.
    fn subtype(&self) -> SubType {
        SubType::Date
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolutionValue, ParseError> {
        let mut list = Vec::new();
        for part in &span.parts {
            let Some(parser) = self.parser_for(part.subtype) else {
                continue;
            };
            match parser.parse(part, reference) {
                Ok(value) => list.extend(value.into_candidates()),
                Err(err) => debug!(text = %part.text, %err, "alternative dropped"),
            }
        }
        if list.is_empty() {
            return Err(ParseError::NoAlternatives);
        }
        Ok(ResolutionValue::Alternatives(list))
    }
}
