//! The `Scanner` use `Lexical grammar`, implement `alphabet` as `Characters`,
//! `string` as `Lexeme` or `Token`
//! The `Parser` use `Syntactic grammar`, implement `alphabet` as `Tokens`,
//! `string` as `Expression`
//!
//! Statements are parsed by recursive descent, expressions by operator
//! precedence (Pratt parsing): every token that can start an expression has a
//! prefix rule, every binary operator has a binding power, and an operator is
//! only absorbed into the left operand while its power is higher than the one
//! the caller asked for.
//!
//! |Precedence|Operators|Associates
//! --|--|--
//! Logical|&& \|\||Left
//! Equals|== !=|Left
//! LessGreater|< > <= >=|Left
//! Sum|+ - \||Left
//! Product|* / % &|Left
//! Prefix|! -|Right
//! Call|f(x) a[i]|Left
//!
//! Statement grammar:
//!
//! ``` BNF
//! program        → statement* EOF ;
//! statement      → letStmt | returnStmt | exprStmt ;
//! letStmt        → "let" IDENTIFIER "=" expression ";"? ;
//! returnStmt     → "return" expression? ";"? ;
//! exprStmt       → expression ";"? ;
//! block          → "{" statement* "}" ;
//! ```
//!
//! A statement that fails to parse is reported and skipped up to the next `;`,
//! so one pass collects as many errors as possible.

pub mod expression;

use std::rc::Rc;

use TokenType::*;
use tracing::debug;

use crate::{error::parser::{ParseError, ParseErrorType}, parser::expression::{Expression, FunctionLiteral, IfExpression}, scanner::{Scanner, Token, TokenType}, statement::{BlockStatement, Program, Statement}};

/// Binding power of operators, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Lowest,
	Logical,
	Equals,
	LessGreater,
	Sum,
	Product,
	Prefix,
	Call,
}

impl Precedence {
	fn of(r#type: TokenType) -> Self {
		match r#type {
			And | Or => Precedence::Logical,
			EqualEqual | BangEqual => Precedence::Equals,
			Less | LessEqual | Greater | GreaterEqual => Precedence::LessGreater,
			Plus | Minus | Pipe => Precedence::Sum,
			Star | Slash | Percent | Ampersand => Precedence::Product,
			LeftParen | LeftBracket => Precedence::Call,
			_ => Precedence::Lowest,
		}
	}
}

type ParseResult<T> = Result<T, ParseError>;

/// Pratt parser over a token stream, one token of lookahead.
pub struct Parser<'a> {
	scanner: Scanner<'a>,
	current: Token,
	peek:    Token,
}

impl<'a> Parser<'a> {
	pub fn new(mut scanner: Scanner<'a>) -> Self {
		let current = scanner.next_token();
		let peek = scanner.next_token();
		Self { scanner, current, peek }
	}

	/// Parse the whole token stream, collecting every syntax error.
	pub fn parse_program(&mut self) -> (Program, Vec<ParseError>) {
		let mut program = Program::default();
		let mut errors = Vec::new();

		while !self.current_is(Eof) {
			match self.statement() {
				Ok(statement) => program.statements.push(statement),
				Err(error) => {
					debug!(%error, "syntax error, skipping to next statement");
					errors.push(error);
					self.synchronize();
				}
			}
			self.advance();
		}

		(program, errors)
	}

	/// Parse one statement. Leaves `current` on its last token.
	fn statement(&mut self) -> ParseResult<Statement> {
		match self.current.r#type {
			Let => self.let_statement(),
			Return => self.return_statement(),
			_ => self.expression_statement(),
		}
	}

	fn let_statement(&mut self) -> ParseResult<Statement> {
		self.expect_peek(Identifier)?;
		let name = self.current.literal.clone();
		self.expect_peek(Assign)?;
		self.advance();

		let value = self.expression(Precedence::Lowest)?;
		self.skip_semicolon();
		Ok(Statement::Let { name, value })
	}

	fn return_statement(&mut self) -> ParseResult<Statement> {
		if matches!(self.peek.r#type, Semicolon | RightBrace | Eof) {
			self.skip_semicolon();
			return Ok(Statement::Return(None));
		}
		self.advance();

		let value = self.expression(Precedence::Lowest)?;
		self.skip_semicolon();
		Ok(Statement::Return(Some(value)))
	}

	fn expression_statement(&mut self) -> ParseResult<Statement> {
		let expression = self.expression(Precedence::Lowest)?;
		self.skip_semicolon();
		Ok(Statement::Expression(expression))
	}

	/// Parse `{ statement* }`, `current` must be the `{`.
	fn block(&mut self) -> ParseResult<BlockStatement> {
		let mut block = BlockStatement::default();
		self.advance();

		while !self.current_is(RightBrace) {
			if self.current_is(Eof) {
				return Err(self.unexpected(RightBrace, &self.current));
			}
			block.statements.push(self.statement()?);
			self.advance();
		}

		Ok(block)
	}

	/// Parse an expression whose operators all bind tighter than `precedence`.
	fn expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
		let mut left = self.prefix()?;

		while !self.peek_is(Semicolon) && precedence < Precedence::of(self.peek.r#type) {
			self.advance();
			left = self.infix(left)?;
		}

		Ok(left)
	}

	/// Prefix rules, one for each token that can begin an expression.
	fn prefix(&mut self) -> ParseResult<Expression> {
		let token = &self.current;
		match token.r#type {
			Identifier => Ok(Expression::Identifier(token.literal.clone())),
			Integer => token
				.literal
				.parse()
				.map(Expression::Integer)
				.map_err(|_| ParseError::new(token.line, ParseErrorType::InvalidInteger(token.literal.clone()))),
			StringLiteral => Ok(Expression::StringLiteral(token.literal.clone())),
			True => Ok(Expression::Boolean(true)),
			False => Ok(Expression::Boolean(false)),
			Bang | Minus => {
				let operator = token.r#type;
				self.advance();
				Ok(Expression::prefix(operator, self.expression(Precedence::Prefix)?))
			}
			LeftParen => {
				self.advance();
				let expression = self.expression(Precedence::Lowest)?;
				self.expect_peek(RightParen)?;
				Ok(expression)
			}
			LeftBracket => Ok(Expression::Array(self.expression_list(RightBracket)?)),
			LeftBrace => self.hash(),
			If => self.if_expression(),
			Function => self.function(),
			Illegal => Err(ParseError::new(token.line, ParseErrorType::IllegalToken(token.literal.clone()))),
			other => Err(ParseError::new(token.line, ParseErrorType::NoPrefixRule(other))),
		}
	}

	/// Infix rules, `current` is the operator and `left` is already parsed.
	fn infix(&mut self, left: Expression) -> ParseResult<Expression> {
		match self.current.r#type {
			LeftParen => Ok(Expression::call(left, self.expression_list(RightParen)?)),
			LeftBracket => {
				self.advance();
				let index = self.expression(Precedence::Lowest)?;
				self.expect_peek(RightBracket)?;
				Ok(Expression::index(left, index))
			}
			operator => {
				let precedence = Precedence::of(operator);
				self.advance();
				Ok(Expression::infix(left, operator, self.expression(precedence)?))
			}
		}
	}

	/// Parse `expression ("," expression)*` up to `end`, the opening delimiter
	/// is `current`. The list may be empty.
	fn expression_list(&mut self, end: TokenType) -> ParseResult<Vec<Expression>> {
		let mut list = Vec::new();
		if self.peek_is(end) {
			self.advance();
			return Ok(list);
		}

		self.advance();
		list.push(self.expression(Precedence::Lowest)?);
		while self.peek_is(Comma) {
			self.advance();
			self.advance();
			list.push(self.expression(Precedence::Lowest)?);
		}
		self.expect_peek(end)?;

		Ok(list)
	}

	fn hash(&mut self) -> ParseResult<Expression> {
		let mut pairs = Vec::new();
		while !self.peek_is(RightBrace) {
			self.advance();
			let key = self.expression(Precedence::Lowest)?;
			self.expect_peek(Colon)?;
			self.advance();
			let value = self.expression(Precedence::Lowest)?;
			pairs.push((key, value));

			if !self.peek_is(RightBrace) {
				self.expect_peek(Comma)?;
			}
		}
		self.advance();

		Ok(Expression::Hash(pairs))
	}

	/// Parse `if c1 {..} else if c2 {..} else {..}`, `current` is the first `if`.
	fn if_expression(&mut self) -> ParseResult<Expression> {
		let mut conditions = Vec::new();
		let mut blocks = Vec::new();

		loop {
			self.advance();
			conditions.push(self.expression(Precedence::Lowest)?);
			self.expect_peek(LeftBrace)?;
			blocks.push(self.block()?);

			if !self.peek_is(Else) {
				break;
			}
			self.advance();
			if self.peek_is(If) {
				self.advance();
				continue;
			}
			self.expect_peek(LeftBrace)?;
			blocks.push(self.block()?);
			break;
		}

		Ok(Expression::If(IfExpression { conditions, blocks }))
	}

	fn function(&mut self) -> ParseResult<Expression> {
		self.expect_peek(LeftParen)?;

		let mut parameters = Vec::new();
		if self.peek_is(RightParen) {
			self.advance();
		} else {
			self.expect_peek(Identifier)?;
			parameters.push(self.current.literal.clone());
			while self.peek_is(Comma) {
				self.advance();
				self.expect_peek(Identifier)?;
				parameters.push(self.current.literal.clone());
			}
			self.expect_peek(RightParen)?;
		}

		self.expect_peek(LeftBrace)?;
		let body = self.block()?;

		Ok(Expression::Function(FunctionLiteral { parameters: Rc::new(parameters), body: Rc::new(body) }))
	}

	/// Shift `peek` into `current` and pull a fresh token.
	fn advance(&mut self) { self.current = std::mem::replace(&mut self.peek, self.scanner.next_token()); }

	fn current_is(&self, r#type: TokenType) -> bool { self.current.r#type == r#type }

	fn peek_is(&self, r#type: TokenType) -> bool { self.peek.r#type == r#type }

	/// Advance only when `peek` has the expected type.
	fn expect_peek(&mut self, expected: TokenType) -> ParseResult<()> {
		if self.peek_is(expected) {
			self.advance();
			Ok(())
		} else {
			Err(self.unexpected(expected, &self.peek))
		}
	}

	fn skip_semicolon(&mut self) {
		if self.peek_is(Semicolon) {
			self.advance();
		}
	}

	fn unexpected(&self, expected: TokenType, found: &Token) -> ParseError {
		match found.r#type {
			Illegal => ParseError::new(found.line, ParseErrorType::IllegalToken(found.literal.clone())),
			r#type => ParseError::new(found.line, ParseErrorType::UnexpectedToken { expected, found: r#type }),
		}
	}

	/// Skip tokens up to the next `;` or the end of input.
	fn synchronize(&mut self) {
		while !self.current_is(Semicolon) && !self.current_is(Eof) {
			self.advance();
		}
	}
}
