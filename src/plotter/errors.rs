use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_engine::EvalError;
use thiserror::Error;

pub const INVALID_RANGE_MESSAGE: &str = "Enter a valid range of x.";
pub const INVALID_FUNCTION_MESSAGE: &str = "Enter a valid function of x.";
/// title of the warning shown for any rejected input
pub const INVALID_INPUT_TITLE: &str = "Invalid input";

/// Everything that can stop a draw request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("{}", INVALID_RANGE_MESSAGE)]
    InvalidRange,
    #[error("{}", INVALID_FUNCTION_MESSAGE)]
    InvalidFunction,
    #[error("cannot parse the function: {0}")]
    ExpressionParse(#[from] ParseError),
    #[error("invalid number of samples: {0}")]
    SampleCount(i64),
    #[error("the function is undefined at x = {x}: {source}")]
    DomainEvaluation { x: f64, source: EvalError },
    #[error("rendering failed: {0}")]
    Render(String),
}

impl PlotError {
    /// Message shown to the user by an error sink.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// true for the errors caught before any parsing or sampling took place
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PlotError::InvalidRange | PlotError::InvalidFunction | PlotError::SampleCount(_)
        )
    }
}
