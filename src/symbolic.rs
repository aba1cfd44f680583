#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedPlotter::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("x**2 - 1").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert_eq!(parsed_expression.eval_at("x", 3.0).unwrap(), 8.0);
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree of a function of x
/// 2) substitutes a value for x and reduces the tree to a number
/// 3) turns a symbolic expression into a string expression for printing and control results
///# Example#
/// ```
/// use RustedPlotter::symbolic::symbolic_engine::{EvalError, Expr};
/// let f = Expr::parse_expression("1/x").unwrap();
/// assert_eq!(f.eval_at("x", 4.0), Ok(0.25));
/// assert_eq!(f.eval_at("x", 0.0), Err(EvalError::DivisionByZero));
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
mod symbolic_engine_tests;
