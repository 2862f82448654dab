//! Parameterized numeric formulas for attack profiles
//!
//! Damage, pain, and stun amounts come from content data as small arithmetic
//! expressions over named parameters (`degree`, `quality`, custom keys). The
//! engine parses them once and evaluates them per strike.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Binary operators supported in formulas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// Formula AST node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal (e.g., 42.5)
    Literal(f64),
    /// A parameter reference (e.g., "degree")
    Param(String),
    /// A binary operation
    BinOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary negation
    Neg(Box<Expr>),
    /// A function call (e.g., max(a, b))
    Function { name: String, args: Vec<Expr> },
}

/// Error type for formula evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Unknown parameter: {0}")]
    UnknownParam(String),
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Function {func} expected {expected} args, got {got}")]
    InvalidArgCount {
        func: String,
        expected: usize,
        got: usize,
    },
}

/// Error type for formula parsing
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Expr {
    /// Parse a formula from its source text
    pub fn parse(source: &str) -> Result<Expr, ParseError> {
        let tokens = tokenize(source)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.additive()?;
        if parser.pos != parser.tokens.len() {
            return Err(ParseError::new(format!(
                "Unexpected trailing input at token {}",
                parser.pos
            )));
        }
        Ok(expr)
    }

    /// Evaluate against a parameter list
    pub fn evaluate(&self, params: &[(&str, f64)]) -> Result<f64, EvalError> {
        match self {
            Expr::Literal(value) => Ok(*value),
            Expr::Param(name) => params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| EvalError::UnknownParam(name.clone())),
            Expr::Neg(operand) => Ok(-operand.evaluate(params)?),
            Expr::BinOp { op, left, right } => {
                let lhs = left.evaluate(params)?;
                let rhs = right.evaluate(params)?;
                match op {
                    BinOp::Add => Ok(lhs + rhs),
                    BinOp::Sub => Ok(lhs - rhs),
                    BinOp::Mul => Ok(lhs * rhs),
                    BinOp::Div => {
                        if rhs == 0.0 {
                            Err(EvalError::DivisionByZero)
                        } else {
                            Ok(lhs / rhs)
                        }
                    }
                    BinOp::Mod => {
                        if rhs == 0.0 {
                            Err(EvalError::DivisionByZero)
                        } else {
                            Ok(lhs % rhs)
                        }
                    }
                }
            }
            Expr::Function { name, args } => {
                let values: Result<Vec<f64>, EvalError> =
                    args.iter().map(|arg| arg.evaluate(params)).collect();
                let values = values?;
                let expect = |expected: usize| -> Result<(), EvalError> {
                    if values.len() == expected {
                        Ok(())
                    } else {
                        Err(EvalError::InvalidArgCount {
                            func: name.clone(),
                            expected,
                            got: values.len(),
                        })
                    }
                };
                match name.as_str() {
                    "min" => {
                        expect(2)?;
                        Ok(values[0].min(values[1]))
                    }
                    "max" => {
                        expect(2)?;
                        Ok(values[0].max(values[1]))
                    }
                    "abs" => {
                        expect(1)?;
                        Ok(values[0].abs())
                    }
                    "floor" => {
                        expect(1)?;
                        Ok(values[0].floor())
                    }
                    "ceil" => {
                        expect(1)?;
                        Ok(values[0].ceil())
                    }
                    "sqrt" => {
                        expect(1)?;
                        Ok(values[0].max(0.0).sqrt())
                    }
                    "clamp" => {
                        expect(3)?;
                        Ok(values[0].clamp(values[1], values[2]))
                    }
                    _ => Err(EvalError::UnknownFunction(name.clone())),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
    Comma,
}

fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '0'..='9' | '.' => {
                let mut text = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        text.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 = text
                    .parse()
                    .map_err(|_| ParseError::new(format!("Bad number: {}", text)))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut text = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        text.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(text));
            }
            other => {
                return Err(ParseError::new(format!("Unexpected character: {}", other)));
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.multiplicative()?;
        while let Some(token) = self.peek() {
            let op = match token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.next();
            let right = self.multiplicative()?;
            left = Expr::BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.unary()?;
        while let Some(token) = self.peek() {
            let op = match token {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                Token::Percent => BinOp::Mod,
                _ => break,
            };
            self.next();
            let right = self.unary()?;
            left = Expr::BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.peek(), Some(Token::Minus)) {
            self.next();
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.next() {
            Some(Token::Number(value)) => Ok(Expr::Literal(value)),
            Some(Token::Ident(name)) => {
                if matches!(self.peek(), Some(Token::LParen)) {
                    self.next();
                    let mut args = Vec::new();
                    if !matches!(self.peek(), Some(Token::RParen)) {
                        loop {
                            args.push(self.additive()?);
                            match self.next() {
                                Some(Token::Comma) => continue,
                                Some(Token::RParen) => break,
                                _ => {
                                    return Err(ParseError::new(
                                        "Expected ',' or ')' in argument list",
                                    ))
                                }
                            }
                        }
                    } else {
                        self.next();
                    }
                    Ok(Expr::Function { name, args })
                } else {
                    Ok(Expr::Param(name))
                }
            }
            Some(Token::LParen) => {
                let inner = self.additive()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(ParseError::new("Expected ')'")),
                }
            }
            other => Err(ParseError::new(format!("Unexpected token: {:?}", other))),
        }
    }
}

/// A parsed formula with its source text retained
///
/// Serializes as the source string so attack profiles stay readable in TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    pub fn parse(source: &str) -> Result<Formula, ParseError> {
        Ok(Formula {
            source: source.to_string(),
            expr: Expr::parse(source)?,
        })
    }

    /// Evaluate with the given named parameters
    pub fn evaluate(&self, params: &[(&str, f64)]) -> Result<f64, EvalError> {
        self.expr.evaluate(params)
    }

    /// Evaluate, treating any evaluation failure as zero
    ///
    /// Content errors must not abort a resolution mid-exchange; a broken
    /// formula deals no damage and gets logged by the caller.
    pub fn evaluate_or_zero(&self, params: &[(&str, f64)]) -> f64 {
        self.evaluate(params).unwrap_or(0.0)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// A formula that always evaluates to zero
    pub fn zero() -> Formula {
        Formula {
            source: "0".to_string(),
            expr: Expr::Literal(0.0),
        }
    }
}

impl TryFrom<String> for Formula {
    type Error = ParseError;

    fn try_from(source: String) -> Result<Self, ParseError> {
        Formula::parse(&source)
    }
}

impl From<Formula> for String {
    fn from(formula: Formula) -> String {
        formula.source
    }
}
