//! Checks on the raw text coming from the input collaborator.
//!
//! The function check is a character filter only. A string made of admissible
//! characters can still be malformed (`"x++"`, `"(x"`); that is caught later by
//! the parser.
use crate::plotter::errors::PlotError;
use log::{debug, warn};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// digits, x, + - * / ^, parentheses, dot and space; at least one character
pub const ADMISSIBLE_FUNCTION_PATTERN: &str = r"^[0-9x+\-*/^(). ]+$";

static ADMISSIBLE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ADMISSIBLE_FUNCTION_PATTERN).expect("admissible function pattern is a valid regex")
});

/// x-range as entered; `min > max` and non-finite ends are allowed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }
}

impl From<(f64, f64)> for Range {
    fn from((min, max): (f64, f64)) -> Self {
        Range { min, max }
    }
}

/// Function text that passed [`validate_function`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFunction(String);

impl ValidatedFunction {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_bound(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Parses both ends of the range independently. Either failing rejects the whole range.
pub fn validate_range(min_text: &str, max_text: &str) -> Result<Range, PlotError> {
    match (parse_bound(min_text), parse_bound(max_text)) {
        (Some(min), Some(max)) => {
            debug!("range of x: [{}, {}]", min, max);
            Ok(Range { min, max })
        }
        _ => {
            warn!("invalid range of x: '{}' & '{}'", min_text, max_text);
            Err(PlotError::InvalidRange)
        }
    }
}

/// Whole-string character class match against [`ADMISSIBLE_FUNCTION_PATTERN`].
pub fn validate_function(text: &str) -> Result<ValidatedFunction, PlotError> {
    if ADMISSIBLE_FUNCTION.is_match(text) {
        Ok(ValidatedFunction(text.to_string()))
    } else {
        warn!("function '{}' contains inadmissible characters", text);
        Err(PlotError::InvalidFunction)
    }
}

/// Accepts `1..=max_samples`.
pub fn validate_sample_count(count: i64, max_samples: usize) -> Result<usize, PlotError> {
    match usize::try_from(count) {
        Ok(n) if n >= 1 && n <= max_samples => Ok(n),
        _ => {
            warn!("number of samples {} outside 1..={}", count, max_samples);
            Err(PlotError::SampleCount(count))
        }
    }
}
