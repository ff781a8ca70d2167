//! Represents a lexical token in the Monkey language.
//!
//! Keywords are part of the shape of the language's grammar, so the parser
//! often has code like "if the next token is `let` then do ...". That means the
//! parser wants to know not just that it has a lexeme for some identifier, but
//! that it has a reserved word, and which keyword it is.
//!
//! The scanner is a pure forward cursor. It never fails: a character it does
//! not understand becomes an `Illegal` token and scanning carries on, leaving
//! the parser to report it. Once the source is exhausted every call yields
//! `Eof`, so the parser may probe past the end safely.
//!
//! We can't easily detect a `reserved word` until we've reached the end of what
//! might instead be an identifier, this is `maximal munch`.
mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
pub use token::*;

/// A scanner for Monkey source code
pub struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points at the character currently being considered
	cursor:      usize,
	/// Tracks what source line `cursor` is on so we can produce tokens that know
	/// their location.
	line:        usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1 }
	}

	/// Scan all tokens up to and including the first `Eof`.
	pub fn scan_tokens(&mut self) -> Vec<Token> {
		let mut tokens = Vec::new();
		loop {
			let token = self.next_token();
			let at_end = token.r#type == Eof;
			tokens.push(token);
			if at_end {
				return tokens;
			}
		}
	}

	/// Scan the next token, skipping whitespace.
	pub fn next_token(&mut self) -> Token {
		self.skip_whitespace();
		self.start = self.source_iter.peek().map_or(self.source.len(), |&(index, _)| index);
		self.cursor = self.start;

		let Some(next_char) = self.advance() else {
			return Token::new(Eof, "", self.line);
		};

		#[rustfmt::skip]
		let r#type = match next_char {
			'(' => LeftParen,
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			'[' => LeftBracket,
			']' => RightBracket,
			',' => Comma,
			';' => Semicolon,
			':' => Colon,
			'+' => Plus,
			'-' => Minus,
			'*' => Star,
			'/' => Slash,
			'%' => Percent,
			'&' => if self.match_next('&') { And } else { Ampersand },
			'|' => if self.match_next('|') { Or } else { Pipe },
			'!' => if self.match_next('=') { BangEqual } else { Bang },
			'=' => if self.match_next('=') { EqualEqual } else { Assign },
			'<' => if self.match_next('=') { LessEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			'"' => return self.string(),
			c if c.is_ascii_digit() => self.number(),
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			_ => Illegal,
		};

		Token::new(r#type, &self.source[self.start..self.cursor], self.line)
	}

	fn skip_whitespace(&mut self) {
		while let Some(c) = self.peek() {
			if !c.is_whitespace() {
				break;
			}
			if c == '\n' {
				self.line += 1;
			}
			self.advance();
		}
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Scan a string literal, the opening `"` is already consumed.
	///
	/// The literal carries the decoded text. A string that runs into the end of
	/// input becomes `Illegal` carrying everything from the opening quote.
	fn string(&mut self) -> Token {
		let line = self.line;
		let mut value = String::new();
		while let Some(c) = self.advance() {
			match c {
				'"' => return Token::new(StringLiteral, value, line),
				'\\' => match self.advance() {
					Some('n') => value.push('\n'),
					Some('t') => value.push('\t'),
					Some('r') => value.push('\r'),
					Some(escaped) => value.push(escaped),
					None => break,
				},
				'\n' => {
					self.line += 1;
					value.push(c);
				}
				_ => value.push(c),
			}
		}
		Token::new(Illegal, &self.source[self.start..self.cursor], line)
	}

	/// Scan an integer literal
	fn number(&mut self) -> TokenType {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}
		Integer
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> TokenType {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		TokenType::keyword_or_identifier(text)
	}
}
