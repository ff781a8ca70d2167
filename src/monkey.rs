use std::{fs::read_to_string, io::Write, path::Path};

use anyhow::Context;
use tracing::debug;

use crate::{Environment, MonkeyError, Object, ParseError, RcCell, evaluate, new_environment, parse};

const PROMPT: &str = ">> ";

/// Monkey is the driver that feeds source text through the interpreter.
pub struct Monkey;

impl Monkey {
	/// Run a source file in a fresh environment.
	pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<Object, MonkeyError> {
		let source = read_to_string(path).context("Failed open source file")?;
		self.run(&source, &new_environment())
	}

	/// Run the REPL prompt. Bindings persist from one line to the next.
	pub fn run_prompt(&self) {
		let environment = new_environment();
		let mut input = String::new();
		let stdin = std::io::stdin();
		loop {
			input.clear();
			print!("{PROMPT}");
			if let Err(e) = std::io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match stdin.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited zmonkey repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			match self.execute(input.trim(), &environment, Output::Repl) {
				Ok(Object::Null) => {}
				Ok(object) => println!("{object}"),
				// already reported line by line
				Err(MonkeyError::ParserErrors(_)) => {}
				Err(MonkeyError::RuntimeError(e)) => println!("Error: {e}"),
				Err(e) => eprintln!("Failed run prompt: {e}"),
			}
		}
	}

	/// Run `source` in `environment`. Syntax errors are printed and nothing
	/// is evaluated.
	pub fn run(&self, source: &str, environment: &RcCell<Environment>) -> Result<Object, MonkeyError> {
		self.execute(source, environment, Output::File)
	}

	fn execute(&self, source: &str, environment: &RcCell<Environment>, output: Output) -> Result<Object, MonkeyError> {
		let source = strip_comments(source);
		let (program, errors) = parse(&source);
		if !errors.is_empty() {
			for error in &errors {
				println!("{}", output.syntax_error(error));
			}
			return Err(MonkeyError::ParserErrors(errors.len()));
		}
		debug!(statements = program.statements.len(), "evaluating program");
		Ok(evaluate(&program, environment)?)
	}
}

/// Where source text came from, decides how syntax errors are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
	File,
	Repl,
}

impl Output {
	fn syntax_error(self, error: &ParseError) -> String {
		match self {
			Output::File => error.to_string(),
			Output::Repl => format!("\t{error}"),
		}
	}
}

/// Drop `#` comments up to the end of their line. A `#` inside a string
/// literal is kept. Newlines survive so line numbers stay right.
pub(crate) fn strip_comments(source: &str) -> String {
	let mut stripped = String::with_capacity(source.len());
	let mut in_string = false;
	let mut in_comment = false;
	let mut chars = source.chars();
	while let Some(c) = chars.next() {
		match c {
			'\n' => {
				in_comment = false;
				stripped.push(c);
			}
			_ if in_comment => {}
			'#' if !in_string => in_comment = true,
			'"' => {
				in_string = !in_string;
				stripped.push(c);
			}
			'\\' if in_string => {
				stripped.push(c);
				if let Some(escaped) = chars.next() {
					stripped.push(escaped);
				}
			}
			_ => stripped.push(c),
		}
	}
	stripped
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::EvalError;

	#[test]
	fn strips_line_comments() {
		assert_eq!(strip_comments("let a = 1; # one\nlet b = 2;"), "let a = 1; \nlet b = 2;");
		assert_eq!(strip_comments("# only a comment"), "");
		assert_eq!(strip_comments("#\n#\nx"), "\n\nx");
	}

	#[test]
	fn keeps_hash_inside_strings() {
		assert_eq!(strip_comments(r#"let s = "a # b"; # gone"#), r#"let s = "a # b"; "#);
		assert_eq!(strip_comments(r##""say \"#\"" # gone"##), r##""say \"#\"" "##);
	}

	#[test]
	fn syntax_errors_are_indented_only_in_the_repl() {
		let (_, errors) = parse("let = 1;");
		assert_eq!(Output::File.syntax_error(&errors[0]), "line 1: expected next token to be 'IDENT', got '=' instead");
		assert_eq!(Output::Repl.syntax_error(&errors[0]), "\tline 1: expected next token to be 'IDENT', got '=' instead");
	}

	#[test]
	fn run_keeps_environment() {
		let environment = new_environment();
		let monkey = Monkey;
		assert_eq!(monkey.run("let x = 40; # setup", &environment).unwrap(), Object::Null);
		assert_eq!(monkey.run("x + 2", &environment).unwrap(), Object::Integer(42));
	}

	#[test]
	fn run_reports_syntax_errors_without_evaluating() {
		let environment = new_environment();
		let result = Monkey.run("let x = 1; let = 2; let 3;", &environment);
		assert!(matches!(result, Err(MonkeyError::ParserErrors(2))), "{result:?}");
		assert_eq!(environment.borrow().get("x"), None);
	}

	#[test]
	fn run_surfaces_runtime_errors() {
		let result = Monkey.run("1 / 0", &new_environment());
		assert!(matches!(result, Err(MonkeyError::RuntimeError(EvalError::DivisionByZero))), "{result:?}");
	}
}
