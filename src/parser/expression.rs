//! Expression AST nodes
//!
//! An `Expression` is a tree structure representing code like `-123 * (45 +
//! x)` as nested nodes. Every node renders itself back to source text that the
//! parser accepts again, with prefix and infix expressions fully parenthesized.

use std::{fmt::Display, rc::Rc};

use Expression::*;

use crate::{scanner::TokenType, statement::BlockStatement};

/// Expression AST nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
	Identifier(String),
	Boolean(bool),
	Integer(i64),
	StringLiteral(String),
	Array(Vec<Expression>),
	/// Key/value pairs in source order.
	Hash(Vec<(Expression, Expression)>),
	Function(FunctionLiteral),
	Prefix { operator: TokenType, right: Box<Expression> },
	Infix { left: Box<Expression>, operator: TokenType, right: Box<Expression> },
	Call { callee: Box<Expression>, arguments: Vec<Expression> },
	Index { target: Box<Expression>, index: Box<Expression> },
	If(IfExpression),
}

impl Expression {
	pub fn prefix(operator: TokenType, right: Self) -> Self { Prefix { operator, right: Box::new(right) } }

	pub fn infix(left: Self, operator: TokenType, right: Self) -> Self {
		Infix { left: Box::new(left), operator, right: Box::new(right) }
	}

	pub fn call(callee: Self, arguments: Vec<Self>) -> Self { Call { callee: Box::new(callee), arguments } }

	pub fn index(target: Self, index: Self) -> Self { Index { target: Box::new(target), index: Box::new(index) } }
}

/// `fn(a, b) { ... }`, shared with every function value created from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
	pub parameters: Rc<Vec<String>>,
	pub body:       Rc<BlockStatement>,
}

/// An `if` / `else if` / `else` chain.
///
/// `blocks` has either as many entries as `conditions`, or one more when the
/// chain ends with a plain `else`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
	pub conditions: Vec<Expression>,
	pub blocks:     Vec<BlockStatement>,
}

impl IfExpression {
	pub fn else_block(&self) -> Option<&BlockStatement> { self.blocks.get(self.conditions.len()) }
}

impl Display for Expression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Identifier(name) => write!(f, "{name}"),
			Boolean(b) => write!(f, "{b}"),
			Integer(n) => write!(f, "{n}"),
			StringLiteral(s) => write_quoted(f, s),
			Array(elements) => write!(f, "[{}]", join(elements)),
			Hash(pairs) => {
				let pairs = pairs.iter().map(|(key, value)| format!("{key}: {value}")).collect::<Vec<_>>();
				write!(f, "{{{}}}", pairs.join(", "))
			}
			Function(function) => write!(f, "{function}"),
			Prefix { operator, right } => write!(f, "({operator}{right})"),
			Infix { left, operator, right } => write!(f, "({left} {operator} {right})"),
			Call { callee, arguments } => write!(f, "{callee}({})", join(arguments)),
			Index { target, index } => write!(f, "({target}[{index}])"),
			If(if_expression) => write!(f, "{if_expression}"),
		}
	}
}

impl Display for FunctionLiteral {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "fn({}) {}", self.parameters.join(", "), self.body)
	}
}

impl Display for IfExpression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for (i, (condition, block)) in self.conditions.iter().zip(&self.blocks).enumerate() {
			if i != 0 {
				write!(f, " else ")?;
			}
			write!(f, "if {condition} {block}")?;
		}
		if let Some(block) = self.else_block() {
			write!(f, " else {block}")?;
		}
		Ok(())
	}
}

fn join(expressions: &[Expression]) -> String {
	expressions.iter().map(|expression| expression.to_string()).collect::<Vec<_>>().join(", ")
}

fn write_quoted(f: &mut std::fmt::Formatter<'_>, s: &str) -> std::fmt::Result {
	write!(f, "\"")?;
	for c in s.chars() {
		match c {
			'"' => write!(f, "\\\"")?,
			'\\' => write!(f, "\\\\")?,
			'\n' => write!(f, "\\n")?,
			'\t' => write!(f, "\\t")?,
			'\r' => write!(f, "\\r")?,
			_ => write!(f, "{c}")?,
		}
	}
	write!(f, "\"")
}
