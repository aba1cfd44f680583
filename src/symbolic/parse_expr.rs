//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use RustedPlotter::symbolic::symbolic_engine::Expr;
//! let parsed_expression = Expr::parse_expression("2*x**2 + 3").unwrap();
//! assert_eq!(parsed_expression.eval_at("x", 2.0).unwrap(), 11.0);
//! ```
use crate::symbolic::symbolic_engine::Expr;
use log::debug;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, alphanumeric0, char, digit1},
    combinator::{map, map_res, opt, recognize},
    sequence::pair,
};
use std::fmt;
use thiserror::Error;
//  two stages: the input is cut into tokens with nom, then the tokens go through
//  a recursive descent with one function per precedence level
//
//                sum      := product (('+' | '-') product)*
//                product  := unary (('*' | '/') unary)*
//                unary    := ('+' | '-') unary | power
//                power    := atom ('**' unary)?
//                atom     := number | x | '(' sum ')'
//
//  so "-x**2" is -(x**2), "2**3**2" is 2**(3**2) and "2**-1" is 0.5

/// the only free variable a plotted function may contain
pub const FREE_VARIABLE: &str = "x";
/// deepest nesting of parentheses, signs and exponents the parser descends into
pub const MAX_NESTING: usize = 100;
/// longest accepted expression, in tokens; bounds the depth of the tree the evaluator walks
pub const MAX_TOKENS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// the value and the literal as typed
    Number { value: f64, text: String },
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number { text, .. } => write!(f, "{}", text),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Power => write!(f, "**"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// Syntax errors; positions are byte offsets into the parsed text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },
    #[error("unknown symbol '{name}' at position {position}, only '{}' is allowed", FREE_VARIABLE)]
    UnknownSymbol { name: String, position: usize },
    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },
    #[error("expression ends unexpectedly")]
    UnexpectedEnd,
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },
    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
    #[error("expression has {tokens} tokens, at most {limit} are allowed")]
    TooLong { tokens: usize, limit: usize },
}

/// "12", "1.5", "5." and ".5"
fn number_literal(input: &str) -> IResult<&str, &str> {
    recognize(alt((
        recognize(pair(
            digit1,
            opt(pair(char('.'), take_while(|c: char| c.is_ascii_digit()))),
        )),
        recognize(pair(char('.'), digit1)),
    )))
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(alpha1, alphanumeric0)).parse(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        map_res(number_literal, |s: &str| {
            s.parse::<f64>().map(|value| Token::Number {
                value,
                text: s.to_string(),
            })
        }),
        map(identifier, |s: &str| Token::Ident(s.to_string())),
        // "**" must be tried before "*"
        map(tag("**"), |_| Token::Power),
        map(char('+'), |_| Token::Plus),
        map(char('-'), |_| Token::Minus),
        map(char('*'), |_| Token::Star),
        map(char('/'), |_| Token::Slash),
        map(char('('), |_| Token::LParen),
        map(char(')'), |_| Token::RParen),
    ))
    .parse(input)
}

/// Cuts the input into tokens, each paired with its byte offset.
pub fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, ParseError> {
    let mut tokens = Vec::new();
    let mut rest = input;
    loop {
        rest = rest.trim_start();
        let position = input.len() - rest.len();
        let Some(ch) = rest.chars().next() else {
            break;
        };
        match token(rest) {
            Ok((remaining, tok)) => {
                tokens.push((position, tok));
                rest = remaining;
            }
            Err(_) => return Err(ParseError::UnexpectedCharacter { ch, position }),
        }
    }
    Ok(tokens)
}

struct ExprParser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    depth: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, tok)| tok)
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn unexpected(position: usize, tok: &Token) -> ParseError {
        match tok {
            Token::RParen => ParseError::UnbalancedParenthesis { position },
            _ => ParseError::UnexpectedToken {
                token: tok.to_string(),
                position,
            },
        }
    }

    fn sum(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.product()?;
        while let Some(op) = self.peek() {
            let op = op.clone();
            match op {
                Token::Plus => {
                    self.pos += 1;
                    left = left + self.product()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    left = left - self.product()?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn product(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.unary()?;
        while let Some(op) = self.peek() {
            let op = op.clone();
            match op {
                Token::Star => {
                    self.pos += 1;
                    left = left * self.unary()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    left = left / self.unary()?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    /// every recursive path of the descent passes through here, so this is where nesting is counted
    fn unary(&mut self) -> Result<Expr, ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ParseError::TooDeep { limit: MAX_NESTING });
        }
        let result = self.signed();
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                let operand = self.unary()?;
                Ok(match operand {
                    Expr::Const(val) => Expr::Const(-val),
                    other => -other,
                })
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.atom()?;
        if let Some(Token::Power) = self.peek() {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(base.pow(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        let Some((position, tok)) = self.next() else {
            return Err(ParseError::UnexpectedEnd);
        };
        match tok {
            Token::Number { value, .. } => Ok(Expr::Const(value)),
            Token::Ident(name) if name == FREE_VARIABLE => Ok(Expr::Var(name)),
            Token::Ident(name) => Err(ParseError::UnknownSymbol { name, position }),
            Token::LParen => {
                let inner = self.sum()?;
                match self.next() {
                    Some((_, Token::RParen)) => Ok(inner),
                    Some((pos, other)) => Err(Self::unexpected(pos, &other)),
                    None => Err(ParseError::UnbalancedParenthesis { position }),
                }
            }
            other => Err(Self::unexpected(position, &other)),
        }
    }
}

/// Parses `input` into an expression of [`FREE_VARIABLE`].
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    debug!("tokens of '{}': {:?}", input, tokens);
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    if tokens.len() > MAX_TOKENS {
        return Err(ParseError::TooLong {
            tokens: tokens.len(),
            limit: MAX_TOKENS,
        });
    }
    let mut parser = ExprParser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.sum()?;
    if let Some((position, tok)) = parser.next() {
        return Err(ExprParser::unexpected(position, &tok));
    }
    Ok(expr)
}

impl Expr {
    /// EXPRESSION PARSING FROM STRINGS

    /// Parses a mathematical expression from string representation.
    ///
    /// # Supported Syntax
    /// - Variable: x
    /// - Constants: 3, 3.14, .5, 5.
    /// - Operators: +, -, *, /, ** (power, right associative), unary + and -
    /// - Parentheses for grouping
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        let expr = parse_expression_func(input)?;
        debug!("parsed '{}' into {}", input, expr);
        Ok(expr)
    }
}
