use std::fmt::Display;

use crate::scanner::TokenType;

/// A syntax error with the line it was found on.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}: {type}")]
pub struct ParseError {
	line:   usize,
	r#type: ParseErrorType,
}

impl ParseError {
	pub fn new(line: usize, r#type: ParseErrorType) -> Self { Self { line, r#type } }

	pub fn line(&self) -> usize { self.line }

	pub fn error_type(&self) -> &ParseErrorType { &self.r#type }
}

/// Types of syntax errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
	/// The parser needed one token and found another.
	UnexpectedToken { expected: TokenType, found: TokenType },
	/// The token can't begin an expression.
	NoPrefixRule(TokenType),
	/// The scanner didn't understand this text.
	IllegalToken(String),
	/// Integer literal that doesn't fit in 64 bits.
	InvalidInteger(String),
}

impl Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			UnexpectedToken { expected, found } => {
				write!(f, "expected next token to be '{expected}', got '{found}' instead")
			}
			NoPrefixRule(r#type) => {
				write!(f, "no prefix parse rule for '{type}' found")
			}
			IllegalToken(literal) => {
				write!(f, "illegal token '{literal}'")
			}
			InvalidInteger(literal) => {
				write!(f, "could not parse {literal} as integer")
			}
		}
	}
}
