//! # Expression sampler
//!
//! Turns a function of x into two index-aligned coordinate arrays:
//! the text is parsed once, then every grid point is substituted and the
//! expression reduced to a number.
//!
//! ```
//! use RustedPlotter::plotter::sampler::sample;
//! use RustedPlotter::plotter::validation::Range;
//! let samples = sample("2*x + 3", Range::new(0.0, 10.0), 5).unwrap();
//! assert_eq!(samples.x, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
//! assert_eq!(samples.y, vec![3.0, 7.0, 11.0, 15.0, 19.0, 23.0]);
//! ```
use crate::plotter::errors::PlotError;
use crate::plotter::validation::{Range, ValidatedFunction};
use crate::symbolic::parse_expr::FREE_VARIABLE;
use crate::symbolic::symbolic_engine::Expr;
use itertools::{Itertools, MinMaxResult};
use log::{debug, info};

/// Index-aligned x and y coordinates, `x.len() == y.len()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleSet {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (x_i, y_i) pairs in order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// smallest and largest finite x, None if there is none
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        finite_extent(&self.x)
    }

    /// smallest and largest finite y, None if there is none
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        finite_extent(&self.y)
    }
}

fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    match values.iter().copied().filter(|v| v.is_finite()).minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
    }
}

/// `^` is the exponent users type, the parser expects `**`.
pub fn prepare_function_text(text: &str) -> String {
    text.replace('^', "**")
}

/// `sample_count + 1` evenly spaced points from `range.min` to `range.max`, both included.
pub fn x_samples(range: Range, sample_count: usize) -> Result<Vec<f64>, PlotError> {
    if sample_count == 0 {
        return Err(PlotError::SampleCount(0));
    }
    let n = sample_count as f64;
    let x = (0..=sample_count)
        .map(|i| range.min + (range.max - range.min) * i as f64 / n)
        .collect();
    Ok(x)
}

/// Parses `expression_text` and evaluates it at `sample_count + 1` points of `range`.
///
/// # Errors
/// * `SampleCount` if `sample_count` is zero
/// * `ExpressionParse` if the text is not a valid expression of x
/// * `DomainEvaluation` at the first point where the expression is undefined;
///   no partial sample set is returned
pub fn sample(
    expression_text: &str,
    range: Range,
    sample_count: usize,
) -> Result<SampleSet, PlotError> {
    let x = x_samples(range, sample_count)?;
    let prepared = prepare_function_text(expression_text);
    let expr = Expr::parse_expression(&prepared)?;
    info!("sampling {} at {} points", expr, x.len());

    let y = x
        .iter()
        .map(|&xi| {
            expr.eval_at(FREE_VARIABLE, xi)
                .map_err(|source| PlotError::DomainEvaluation { x: xi, source })
        })
        .collect::<Result<Vec<f64>, PlotError>>()?;
    debug!("first point ({}, {})", x[0], y[0]);
    Ok(SampleSet { x, y })
}

/// [`sample`] for text that already passed the character filter.
pub fn sample_validated(
    function: &ValidatedFunction,
    range: Range,
    sample_count: usize,
) -> Result<SampleSet, PlotError> {
    sample(function.as_str(), range, sample_count)
}
