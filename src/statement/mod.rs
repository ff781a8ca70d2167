//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. The body of a function is always a block of statements.
//!
//! Blocks don't carry a scope of their own, the interpreter decides where a new
//! environment begins.

use std::fmt::Display;

use crate::parser::expression::Expression;

/// A statement in the programming language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
	/// A variable declaration statement.
	Let {
		/// The name being declared.
		name:  String,
		/// The initializer expression.
		value: Expression,
	},
	/// A return statement, the value is optional.
	Return(Option<Expression>),
	/// An expression used as a statement.
	Expression(Expression),
}

/// `{ ... }` after an `if`, `else` or function parameter list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStatement {
	pub statements: Vec<Statement>,
}

/// The root of every parsed source text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
	pub statements: Vec<Statement>,
}

impl Display for Statement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Statement::Let { name, value } => write!(f, "let {name} = {value};"),
			Statement::Return(Some(value)) => write!(f, "return {value};"),
			Statement::Return(None) => write!(f, "return;"),
			Statement::Expression(expression) => write!(f, "{expression};"),
		}
	}
}

impl Display for BlockStatement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{{ ")?;
		for statement in &self.statements {
			write!(f, "{statement} ")?;
		}
		write!(f, "}}")
	}
}

impl Display for Program {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let statements = self.statements.iter().map(|statement| statement.to_string()).collect::<Vec<_>>();
		write!(f, "{}", statements.join("\n"))
	}
}
