use crate::scanner::TokenType;

/// Errors that can occur during evaluation
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EvalError {
	/// Name not bound in any enclosing scope nor a builtin
	#[error("identifier not found: {0}")]
	UnknownIdentifier(String),
	/// `let` on a name already bound in the same scope
	#[error("variable '{0}' already declared in this scope")]
	Redeclaration(String),
	/// Infix operator without a rule for these operand types
	#[error("type mismatch: {left} {operator} {right}")]
	TypeMismatch { left: &'static str, operator: TokenType, right: &'static str },
	/// Prefix operator without a rule for this operand type
	#[error("unknown operator: {operator}{operand}")]
	UnknownPrefix { operator: TokenType, operand: &'static str },
	#[error("division by zero")]
	DivisionByZero,
	#[error("modulo by zero")]
	ModuloByZero,
	#[error("not a function: {0}")]
	NotCallable(&'static str),
	#[error("wrong number of arguments: want={expected}, got={got}")]
	WrongArgumentCount { expected: usize, got: usize },
	#[error("index operator not supported: {target}[{index}]")]
	IndexNotSupported { target: &'static str, index: &'static str },
	#[error("unusable as hash key: {0}")]
	UnusableHashKey(&'static str),
	/// Error object returned by a builtin function
	#[error("{0}")]
	Builtin(String),
}
