//! # Symbolic Engine Module
//!
//! Symbolic expressions of a single free variable, built by the parser in
//! [`crate::symbolic::parse_expr`] and consumed by the sampler.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - the free variable, normally "x"
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//!
//! Negation has no variant of its own, `-e` is stored as `(-1) * e`.
//!
//! ### Key Methods
//! - `set_variable(var, value)` - substitute a variable with a constant
//! - `evaluate()` - reduce a variable-free tree to a number, with strict
//!   domain checks
//! - `eval_at(var, value)` - substitution followed by reduction
//!
//! Evaluation is strict: a division by zero, zero raised to a negative power
//! or a negative base raised to a non-integer power is an [`EvalError`], not
//! an infinity or NaN.

#![allow(non_camel_case_types)]

use std::fmt;
use thiserror::Error;

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```rust, ignore
/// use RustedPlotter::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(expr.eval_at("x", 1.0).unwrap(), 3.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
}

/// Reasons a numeric reduction of an expression can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("zero raised to the negative power {0}")]
    ZeroToNegativePower(f64),
    #[error("negative base {base} raised to the non-integer power {exponent}")]
    NegativeBaseFractionalPower { base: f64, exponent: f64 },
    #[error("variable '{0}' has no value")]
    UnboundVariable(String),
}

/// Display implementation for pretty printing symbolic expressions.
///
/// Every binary operation is wrapped in parentheses, so the printed form can be
/// fed back to the parser without precedence surprises.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) if *val < 0.0 => write!(f, "({})", val),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// Recursively traverses the expression tree and replaces all occurrences
    /// of the specified variable with the given constant value.
    ///
    /// # Arguments
    /// * `var` - Name of the variable to substitute
    /// * `value` - Numerical value to substitute for the variable
    ///
    /// # Returns
    /// New expression with the variable substituted
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            Expr::Add(lhs, rhs) => Expr::Add(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Sub(lhs, rhs) => Expr::Sub(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Mul(lhs, rhs) => Expr::Mul(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Pow(base, exp) => Expr::Pow(
                Box::new(base.set_variable(var, value)),
                Box::new(exp.set_variable(var, value)),
            ),
            _ => self.clone(),
        }
    }

    /// Reduces an expression without free variables to a number.
    ///
    /// # Errors
    /// * `UnboundVariable` if a `Var` survived substitution
    /// * `DivisionByZero`, `ZeroToNegativePower`, `NegativeBaseFractionalPower`
    ///   for operations that are undefined over the reals
    pub fn evaluate(&self) -> Result<f64, EvalError> {
        match self {
            Expr::Var(name) => Err(EvalError::UnboundVariable(name.clone())),
            Expr::Const(val) => Ok(*val),
            Expr::Add(lhs, rhs) => Ok(lhs.evaluate()? + rhs.evaluate()?),
            Expr::Sub(lhs, rhs) => Ok(lhs.evaluate()? - rhs.evaluate()?),
            Expr::Mul(lhs, rhs) => Ok(lhs.evaluate()? * rhs.evaluate()?),
            Expr::Div(lhs, rhs) => {
                let numerator = lhs.evaluate()?;
                let denominator = rhs.evaluate()?;
                if denominator == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(numerator / denominator)
            }
            Expr::Pow(base, exp) => power(base.evaluate()?, exp.evaluate()?),
        }
    }

    /// Substitutes `value` for `var` and reduces the result to a number.
    pub fn eval_at(&self, var: &str, value: f64) -> Result<f64, EvalError> {
        self.set_variable(var, value).evaluate()
    }
}

/// Real power with the same domain as a symbolic engine working over the reals.
///
/// Integer exponents go through `powi` so that e.g. `10^2` is exactly `100`.
fn power(base: f64, exponent: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::ZeroToNegativePower(exponent));
    }
    let is_integer = exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64;
    if is_integer {
        return Ok(base.powi(exponent as i32));
    }
    if base < 0.0 && exponent.is_finite() {
        return Err(EvalError::NegativeBaseFractionalPower { base, exponent });
    }
    Ok(base.powf(exponent))
}
