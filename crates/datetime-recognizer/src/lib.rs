//! # datetime-recognizer
//!
//! Deterministic recognition of temporal expressions in natural-language
//! text.
//!
//! Given a text and a reference instant, the recognizer locates every date,
//! time, date-time, period, duration, recurrence, holiday and time zone
//! expression and resolves each one to normalized values: a timex string
//! plus concrete past and future readings relative to the reference.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use datetime_recognizer::{recognize, RecognizerOptions};
//!
//! let reference = NaiveDate::from_ymd_opt(2016, 11, 7)
//!     .and_then(|d| d.and_hms_opt(16, 12, 0))
//!     .expect("valid reference");
//! let results = recognize("tomorrow at noon", "en-us", reference, RecognizerOptions::default())?;
//! assert_eq!(results[0].resolution.primary().map(|r| r.timex.as_str()), Some("2016-11-08T12"));
//! # Ok::<(), datetime_recognizer::RecognizerError>(())
//! ```
//!
//! ## Modules
//!
//! - [`locale`]: per-culture pattern sets and lexical tables
//! - [`extract`]: candidate span extraction, one extractor per subtype
//! - [`parse`]: span resolution, one parser per subtype
//! - [`merger`]: the pipeline tying extraction and parsing together
//! - [`resolution`]: output records
//! - [`calendar`] / [`timex`]: calendar arithmetic and timex formatting
//! - [`error`]: error types

pub mod calendar;
pub mod error;
pub mod extract;
pub mod locale;
pub mod merger;
pub mod options;
pub mod parse;
pub mod resolution;
pub mod timex;
pub mod types;

use chrono::NaiveDateTime;

pub use error::{ParseError, RecognizerError, Result};
pub use locale::Culture;
pub use merger::DateTimeRecognizer;
pub use options::{DateTimeOptions, RecognizerOptions, WeekStartDay};
pub use resolution::{
    DroppedSpan, Modifier, ModelResult, Recognition, Resolution, ResolutionKind, ResolutionValue,
    TimeZoneAttachment,
};
pub use types::SubType;

/// Recognize the temporal expressions of `text` for the culture named by
/// `culture` (`en-us`, `en-gb`, ...).
///
/// # Errors
///
/// Returns `RecognizerError::UnsupportedCulture` for an unknown culture code.
pub fn recognize(
    text: &str,
    culture: &str,
    reference: NaiveDateTime,
    options: RecognizerOptions,
) -> Result<Vec<ModelResult>> {
    let recognizer = DateTimeRecognizer::new(Culture::from_code(culture)?, options)?;
    Ok(recognizer.recognize(text, reference))
}
