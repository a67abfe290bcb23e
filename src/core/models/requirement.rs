//! Requirement expression parser/evaluator.
//!
//! Parses boolean expressions over course-code atoms (`[A-Z]{4}-\d{3}`) with
//! infix, fully parenthesized `AND`/`OR`/`NOT` operators, or the literal
//! `NONE`. `NOT` binds tightest, then `AND`, then `OR`; parentheses override.

use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A parsed boolean formula over course-code atoms, or the vacuous `NONE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// No restriction; vacuously satisfied.
    None,
    /// A boolean formula over course codes.
    Expr(Expr),
}

impl Default for Requirement {
    fn default() -> Self {
        Self::None
    }
}

/// Syntax tree for a requirement expression, ready for structural recursion
/// by the requirement encoder.
#[derive(Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare course-code atom, e.g. `"MATH-101"`.
    Atom(String),
    /// Negation.
    Not(Box<Expr>),
    /// Conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Disjunction.
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// The set of course-code atoms mentioned anywhere in this expression.
    #[must_use]
    pub fn atoms(&self) -> HashSet<String> {
        let mut out = HashSet::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms(&self, out: &mut HashSet<String>) {
        match self {
            Self::Atom(code) => {
                out.insert(code.clone());
            }
            Self::Not(inner) => inner.collect_atoms(out),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                lhs.collect_atoms(out);
                rhs.collect_atoms(out);
            }
        }
    }

    /// Evaluate the expression given a predicate deciding atom truth. Used by
    /// the scenario test suite to check exclusion/prereq correctness
    /// against a concrete model, independent of the encoder's clause shapes.
    pub fn evaluate(&self, atom_value: &impl Fn(&str) -> bool) -> bool {
        match self {
            Self::Atom(code) => atom_value(code),
            Self::Not(inner) => !inner.evaluate(atom_value),
            Self::And(lhs, rhs) => lhs.evaluate(atom_value) && rhs.evaluate(atom_value),
            Self::Or(lhs, rhs) => lhs.evaluate(atom_value) || rhs.evaluate(atom_value),
        }
    }
}

impl Requirement {
    /// The set of course-code atoms mentioned, empty for `NONE`.
    #[must_use]
    pub fn atoms(&self) -> HashSet<String> {
        match self {
            Self::None => HashSet::new(),
            Self::Expr(expr) => expr.atoms(),
        }
    }
}

/// A malformed requirement expression; fatal at ingestion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequirementParseError {
    /// Ran out of input mid-expression.
    #[error("unexpected end of requirement expression")]
    UnexpectedEof,
    /// Found a token where it did not belong.
    #[error("unexpected token {0:?} in requirement expression")]
    UnexpectedToken(String),
    /// An atom did not match `[A-Z]{4}-\d{3}`.
    #[error("malformed course-code atom {0:?}")]
    MalformedAtom(String),
    /// Closing parenthesis with none open, or vice versa.
    #[error("unbalanced parentheses in requirement expression")]
    UnbalancedParens,
    /// Trailing tokens after a complete expression.
    #[error("trailing tokens after requirement expression: {0:?}")]
    TrailingTokens(String),
}

#[derive(Clone, PartialEq, Eq)]
enum Token {
    Atom(String),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(code) => write!(f, "{code}"),
            Self::Not(inner) => write!(f, "NOT ({inner:?})"),
            Self::And(lhs, rhs) => write!(f, "({lhs:?} AND {rhs:?})"),
            Self::Or(lhs, rhs) => write!(f, "({lhs:?} OR {rhs:?})"),
        }
    }
}

fn is_atom_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-'
}

fn validate_atom(raw: &str) -> Result<String, RequirementParseError> {
    let bytes = raw.as_bytes();
    let valid = bytes.len() == 8
        && bytes[0..4].iter().all(u8::is_ascii_uppercase)
        && bytes[4] == b'-'
        && bytes[5..8].iter().all(u8::is_ascii_digit);
    if valid {
        Ok(raw.to_string())
    } else {
        Err(RequirementParseError::MalformedAtom(raw.to_string()))
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, RequirementParseError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        match c {
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            _ if is_atom_char(c) => {
                let start = i;
                while i < chars.len() && is_atom_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                match word.as_str() {
                    "AND" => tokens.push(Token::And),
                    "OR" => tokens.push(Token::Or),
                    "NOT" => tokens.push(Token::Not),
                    _ => tokens.push(Token::Atom(validate_atom(&word)?)),
                }
            }
            _ => return Err(RequirementParseError::UnexpectedToken(c.to_string())),
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

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    /// `OR` — lowest precedence.
    fn parse_or(&mut self) -> Result<Expr, RequirementParseError> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// `AND` — middle precedence.
    fn parse_and(&mut self) -> Result<Expr, RequirementParseError> {
        let mut lhs = self.parse_not()?;
        while matches!(self.peek(), Some(Token::And)) {
            self.advance();
            let rhs = self.parse_not()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// `NOT` — tightest-binding, right-associative (prefix).
    fn parse_not(&mut self) -> Result<Expr, RequirementParseError> {
        if matches!(self.peek(), Some(Token::Not)) {
            self.advance();
            let inner = self.parse_not()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_atom_or_group()
    }

    fn parse_atom_or_group(&mut self) -> Result<Expr, RequirementParseError> {
        match self.advance() {
            Some(Token::Atom(code)) => Ok(Expr::Atom(code)),
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(RequirementParseError::UnbalancedParens),
                }
            }
            Some(other) => Err(RequirementParseError::UnexpectedToken(format!("{other:?}"))),
            None => Err(RequirementParseError::UnexpectedEof),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(a) => write!(f, "{a}"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Not => write!(f, "NOT"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}

/// Parse a requirement expression string, or the literal `NONE`.
///
/// # Errors
///
/// Returns [`RequirementParseError`] on malformed input. This
/// is a fatal ingestion error; the encoder never catches it at solve time.
pub fn parse(input: &str) -> Result<Requirement, RequirementParseError> {
    let trimmed = input.trim();
    if trimmed == "NONE" {
        return Ok(Requirement::None);
    }
    let tokens = tokenize(trimmed)?;
    if tokens.is_empty() {
        return Err(RequirementParseError::UnexpectedEof);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        let rest: Vec<String> = parser.tokens[parser.pos..]
            .iter()
            .map(|t| format!("{t:?}"))
            .collect();
        return Err(RequirementParseError::TrailingTokens(rest.join(" ")));
    }
    Ok(Requirement::Expr(expr))
}
