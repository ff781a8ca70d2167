pub mod interpreter;
pub mod parser;

/// MonkeyError is the top-level error type for the Monkey interpreter.
#[derive(thiserror::Error, Debug)]
pub enum MonkeyError {
	/// Internal error, IO failures land here too
	#[error("InternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Syntax errors encountered during parsing, each already reported
	#[error("Generated {0} parser errors")]
	ParserErrors(usize),
	/// Runtime error that stopped evaluation
	#[error("Runtime error: {0}")]
	RuntimeError(#[from] interpreter::EvalError),
}
