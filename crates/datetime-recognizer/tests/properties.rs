use chrono::{NaiveDate, NaiveDateTime};
use datetime_recognizer::{
    Culture, DateTimeOptions, DateTimeRecognizer, ModelResult, RecognizerOptions, ResolutionKind,
};
use once_cell::sync::Lazy;
use proptest::prelude::*;

static RECOGNIZER: Lazy<DateTimeRecognizer> =
    Lazy::new(|| DateTimeRecognizer::new(Culture::English, RecognizerOptions::default()).unwrap());

static PARALLEL: Lazy<DateTimeRecognizer> = Lazy::new(|| {
    DateTimeRecognizer::new(Culture::English, RecognizerOptions::default().with_parallel_scan(true)).unwrap()
});

static UNMERGED: Lazy<DateTimeRecognizer> = Lazy::new(|| {
    DateTimeRecognizer::new(
        Culture::English,
        RecognizerOptions::default().with_flags(DateTimeOptions::SKIP_FROM_TO_MERGE),
    )
    .unwrap()
});

const FRAGMENTS: &[&str] = &[
    "tomorrow",
    "at 3pm",
    "next Friday",
    "this Friday",
    "last Friday",
    "last week",
    "March 5, 2019",
    "from Monday to Wednesday",
    "between 2pm and 4pm",
    "from 10pm to 2am",
    "3pm or 4pm",
    "in 3 days",
    "2 hours ago",
    "for 90 minutes",
    "in 99999999999999 days",
    "for 99999999999999 years",
    "every Monday",
    "weekly",
    "Christmas",
    "in PST",
    "before June",
    "this weekend",
    "the 5th",
    "tonight",
    "we should meet",
    "and then",
    "or",
    ",",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..8).prop_map(|words| words.join(" "))
}

fn reference() -> impl Strategy<Value = NaiveDateTime> {
    (1990i32..2060, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60).prop_map(|(y, m, d, h, min)| {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    })
}

fn assert_well_formed(text: &str, results: &[ModelResult]) {
    for pair in results.windows(2) {
        assert!(pair[0].end() <= pair[1].start, "overlap in {results:?}");
    }
    for r in results {
        assert_eq!(&text[r.start..r.end()], r.text);
        assert!(!r.resolution.candidates().is_empty());
    }
}

/// A clock range may only run backwards from the afternoon or evening into
/// the small hours of the next day.
fn runs_past_midnight(start: &str, end: &str) -> bool {
    start >= "12:00:00" && end < "12:00:00"
}

proptest! {
    #[test]
    fn results_are_disjoint_ordered_and_anchored(text in sentence(), reference in reference()) {
        let results = RECOGNIZER.recognize(&text, reference);
        assert_well_formed(&text, &results);
    }

    #[test]
    fn recognition_is_deterministic(text in sentence(), reference in reference()) {
        let first = RECOGNIZER.recognize(&text, reference);
        let second = RECOGNIZER.recognize(&text, reference);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, PARALLEL.recognize(&text, reference));
    }

    #[test]
    fn ranges_are_ordered(text in sentence(), reference in reference()) {
        for result in RECOGNIZER.recognize(&text, reference) {
            for r in result.resolution.candidates() {
                let ranged = matches!(
                    r.kind,
                    ResolutionKind::DateRange | ResolutionKind::TimeRange | ResolutionKind::DateTimeRange
                );
                if !ranged || r.modifier.is_some() {
                    continue;
                }
                for map in [&r.past, &r.future] {
                    let (start, end) = (&map["start"], &map["end"]);
                    if r.kind == ResolutionKind::TimeRange && start > end {
                        prop_assert!(runs_past_midnight(start, end), "{:?}", r);
                    } else {
                        prop_assert!(start <= end, "{:?}", r);
                    }
                }
            }
        }
    }

    #[test]
    fn determined_expressions_have_one_reading(text in sentence(), reference in reference()) {
        for result in RECOGNIZER.recognize(&text, reference) {
            for r in result.resolution.candidates() {
                if matches!(r.kind, ResolutionKind::Set | ResolutionKind::Duration) || r.timex.contains('X') {
                    continue;
                }
                prop_assert_eq!(&r.past, &r.future, "{:?}", r);
            }
        }
    }

    #[test]
    fn open_dates_bracket_the_reference(text in sentence(), reference in reference()) {
        let today = reference.date().format("%Y-%m-%d").to_string();
        for result in RECOGNIZER.recognize(&text, reference) {
            for r in result.resolution.candidates() {
                if r.kind != ResolutionKind::Date || !r.timex.contains('X') || r.modifier.is_some() {
                    continue;
                }
                let (past, future) = (&r.past["value"], &r.future["value"]);
                prop_assert!(past.as_str() <= today.as_str(), "{:?} at {}", r, reference);
                prop_assert!(today.as_str() <= future.as_str(), "{:?} at {}", r, reference);
            }
        }
    }

    #[test]
    fn skipping_range_merge_never_adds_prefixed_ranges(text in sentence(), reference in reference()) {
        let results = UNMERGED.recognize(&text, reference);
        assert_well_formed(&text, &results);
        for r in &results {
            prop_assert!(!r.text.starts_with("from ") && !r.text.starts_with("between "), "{:?}", r);
        }
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,64}", reference in reference()) {
        let results = RECOGNIZER.recognize(&text, reference);
        assert_well_formed(&text, &results);
    }
}
