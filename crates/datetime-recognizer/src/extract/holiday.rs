use chrono::NaiveDateTime;

use super::{scan, DateTimeExtractor};
use crate::locale::LocalePatternSet;
use crate::types::{ExtractedSpan, SubType};

/// Named holidays, optionally with a relative prefix or a year.
#[derive(Debug, Clone, Copy)]
pub struct HolidayExtractor {
    patterns: &'static LocalePatternSet,
}

impl HolidayExtractor {
    pub fn new(patterns: &'static LocalePatternSet) -> Self {
        HolidayExtractor { patterns }
    }
}

impl DateTimeExtractor for HolidayExtractor {
    fn subtype(&self) -> SubType {
        SubType::Holiday
    }

    fn extract(&self, text: &str, _reference: NaiveDateTime) -> Vec<ExtractedSpan> {
        scan(self.patterns, SubType::Holiday, text)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_holiday_with_prefix_and_year() {
        let ex = HolidayExtractor::new(english());
        let spans = ex.extract("next Thanksgiving and Christmas 2019", reference());
        assert_eq!(texts(&spans), vec!["next Thanksgiving", "Christmas 2019"]);
        assert_eq!(spans[1].capture("year"), Some("2019"));
    }

    #[test]
    fn test_apostrophe_variants() {
        let ex = HolidayExtractor::new(english());
        let spans = ex.extract("New Year’s Eve and Valentines Day", reference());
        assert_eq!(texts(&spans), vec!["New Year’s Eve", "Valentines Day"]);
    }

    #[test]
    fn test_culture_specific_holidays() {
        let text = "Boxing Day";
        assert!(HolidayExtractor::new(english()).extract(text, reference()).is_empty());
        assert_eq!(
            HolidayExtractor::new(british()).extract(text, reference()).len(),
            1
        );
    }
}
