//! Error types for datetime-recognizer operations.

use thiserror::Error;

use crate::types::{PatternTag, SubType};

/// Load-time and configuration failures.
///
/// These are the only errors a caller can observe. Once a culture's pattern set
/// has been compiled, recognition itself never fails: a span that cannot be
/// resolved is dropped, and "no results" is a valid outcome.
#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("Unsupported culture: {0}")]
    UnsupportedCulture(String),

    #[error("Invalid pattern '{pattern}' for culture {culture}: {source}")]
    Configuration {
        culture: String,
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("Unknown placeholder '{placeholder}' in pattern '{pattern}' for culture {culture}")]
    UnknownPlaceholder {
        culture: String,
        pattern: String,
        placeholder: String,
    },
}

/// Why a candidate span could not be turned into a resolution.
///
/// Parse errors never reach the caller. The merger logs them and records the
/// span as dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing capture '{0}'")]
    MissingCapture(&'static str),

    #[error("invalid calendar value: {0}")]
    InvalidCalendarValue(String),

    #[error("pattern {0:?} is not handled by this parser")]
    UnsupportedPattern(PatternTag),

    #[error("{0:?} spans never resolve on their own")]
    Standalone(SubType),

    #[error("no alternative could be resolved")]
    NoAlternatives,
}

impl ParseError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        ParseError::InvalidCalendarValue(what.into())
    }
}

pub type Result<T> = std::result::Result<T, RecognizerError>;
