//! # How Monkey source text becomes a value
//!
//! User's source code: `let average = (min + max) / 2;`

//! ## Scanning
//!
//! The [`Scanner`] takes in the characters and hands out tokens on demand.
//! Single characters `(`, `,`, operators `==`, `&&`, integers `123`, string
//! literals `"hi!"`, identifiers `min` and keywords `let` are all tokens.
//!
//! Whitespaces are skipped. So the tokens are
//! `["let", "average", "=", "(", "min", "+", "max", ")", "/", "2", ";", EOF]`.
//!
//! A character the language doesn't know becomes an `ILLEGAL` token, the
//! parser reports it.

//! ## Parsing
//!
//! The [`Parser`] is a Pratt parser. Statements are parsed by recursive
//! descent, expressions by binding power: each token type has a prefix rule,
//! maybe an infix rule and a [`Precedence`](parser::Precedence).
//!
//! ``` markdown
//! average (Statement::Let)
//! └── / (Expression::Infix)
//!     ├── + (Expression::Infix)
//!     │   ├── min (Expression::Identifier)
//!     │   └── max (Expression::Identifier)
//!     └── 2 (Expression::Integer)
//! ```
//!
//! Syntax errors don't stop the parser. It records a [`ParseError`], skips to
//! the next `;` and carries on, so one pass reports as many errors as it can.
//! Every node prints back as source text that parses to the same tree.

//! ## Evaluation
//!
//! A tree-walk [`Interpreter`] executes the AST right after parsing it, no
//! static analysis. Names live in chained [`Environment`]s, a function call
//! opens a scope enclosed by the one the function was created in, so closures
//! work.
//!
//! Runtime values are [`Object`]s. The first runtime error aborts evaluation
//! and surfaces as an [`EvalError`].

//! ## Builtins
//!
//! `len`, `push`, `puts`, `first`, `last` and `rest` are native functions,
//! resolved after every scope misses. Call [`init_builtins`] once at startup.

pub mod cli;
mod environment;
mod error;
mod interpreter;
mod monkey;
mod parser;
mod scanner;
mod statement;
mod utils;

pub use environment::Environment;
pub use error::{MonkeyError, interpreter::EvalError, parser::{ParseError, ParseErrorType}};
pub use interpreter::{Evaluate, Interpreter, Signal, builtins::init_builtins, callable::{Builtin, FunctionValue}, object::{HashKey, HashPair, Object}};
pub use monkey::Monkey;
pub use parser::{Parser, Precedence, expression::{Expression, FunctionLiteral, IfExpression}};
pub use scanner::{Scanner, Token, TokenType};
pub use statement::{BlockStatement, Program, Statement};
pub use utils::RcCell;

/// Scan and parse `source`. The program holds every statement that parsed,
/// the errors are in source order.
pub fn parse(source: &str) -> (Program, Vec<ParseError>) { Parser::new(Scanner::new(source)).parse_program() }

/// Evaluate a program, statement or expression in `environment`.
///
/// Bindings made at the top level stay in `environment`, so a REPL can keep
/// feeding programs into the same one.
pub fn evaluate<N: Evaluate + ?Sized>(node: &N, environment: &RcCell<Environment>) -> Result<Object, EvalError> {
	node.evaluate_with(&mut Interpreter::new(environment.clone()))
}

/// A fresh, empty global environment.
pub fn new_environment() -> RcCell<Environment> { RcCell::new(Environment::new()) }
