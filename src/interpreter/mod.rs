//! Monkey tree-walk interpreter.
//!
//! The interpreter walks the abstract syntax tree (AST) produced by the parser,
//! recursively evaluating each node against the current environment and
//! computing its runtime value.
//!
//! # Control flow
//!
//! Every evaluation step answers `Result<Signal, EvalError>`:
//!
//! - **`Err`**: an evaluation error, propagated unchanged up to the caller of
//!   [`evaluate`](crate::evaluate).
//! - **`Signal::Return`**: a `return` was executed. Blocks stop and pass it on
//!   until a function call turns it back into a plain value, or the program
//!   ends.
//! - **`Signal::Value`**: normal completion.
//!
//! # Scopes
//!
//! Only function calls open a new environment. It is enclosed by the
//! environment captured when the function was created, not by the caller's, so
//! names resolve lexically. Blocks of an `if` share the surrounding scope.

pub(crate) mod builtins;
pub(crate) mod callable;
pub(crate) mod object;
mod operators;

use std::collections::HashMap;

use tracing::trace;

use crate::{environment::Environment, error::interpreter::EvalError, interpreter::{callable::FunctionValue, object::{HashPair, Object}}, parser::expression::{Expression, IfExpression}, scanner::TokenType, statement::{BlockStatement, Program, Statement}, utils::RcCell};

/// Outcome of evaluating a statement or expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
	Value(Object),
	Return(Object),
}

impl Signal {
	pub fn into_object(self) -> Object {
		match self {
			Signal::Value(object) | Signal::Return(object) => object,
		}
	}
}

/// Unwraps a `Signal::Value`, hands a `Signal::Return` straight back.
macro_rules! value {
	($signal:expr) => {
		match $signal {
			Signal::Value(object) => object,
			signal @ Signal::Return(_) => return Ok(signal),
		}
	};
}

/// Any AST node the interpreter can evaluate on its own.
pub trait Evaluate {
	fn evaluate_with(&self, interpreter: &mut Interpreter) -> Result<Object, EvalError>;
}

impl Evaluate for Program {
	fn evaluate_with(&self, interpreter: &mut Interpreter) -> Result<Object, EvalError> {
		interpreter.interpret_program(self)
	}
}

impl Evaluate for BlockStatement {
	fn evaluate_with(&self, interpreter: &mut Interpreter) -> Result<Object, EvalError> {
		interpreter.interpret_block(self).map(Signal::into_object)
	}
}

impl Evaluate for Statement {
	fn evaluate_with(&self, interpreter: &mut Interpreter) -> Result<Object, EvalError> {
		interpreter.interpret_statement(self).map(Signal::into_object)
	}
}

impl Evaluate for Expression {
	fn evaluate_with(&self, interpreter: &mut Interpreter) -> Result<Object, EvalError> {
		interpreter.evaluate(self).map(Signal::into_object)
	}
}

/// Interpreter that evaluates Monkey programs.
pub struct Interpreter {
	environment: RcCell<Environment>,
}

impl Interpreter {
	pub fn new(environment: RcCell<Environment>) -> Self { Self { environment } }

	/// Run the statements in order. A top-level `return` stops the program with
	/// its value, otherwise the last statement's value is the result.
	pub fn interpret_program(&mut self, program: &Program) -> Result<Object, EvalError> {
		let mut result = Object::Null;
		for statement in &program.statements {
			match self.interpret_statement(statement)? {
				Signal::Value(object) => result = object,
				Signal::Return(object) => return Ok(object),
			}
		}
		Ok(result)
	}

	fn interpret_block(&mut self, block: &BlockStatement) -> Result<Signal, EvalError> {
		let mut result = Object::Null;
		for statement in &block.statements {
			result = value!(self.interpret_statement(statement)?);
		}
		Ok(Signal::Value(result))
	}

	fn interpret_statement(&mut self, statement: &Statement) -> Result<Signal, EvalError> {
		match statement {
			Statement::Let { name, value } => {
				let value = value!(self.evaluate(value)?);
				trace!(name = name.as_str(), %value, "let");
				self.environment.borrow_mut().create(name, value)?;
				Ok(Signal::Value(Object::Null))
			}
			Statement::Return(Some(expression)) => {
				let value = value!(self.evaluate(expression)?);
				Ok(Signal::Return(value))
			}
			Statement::Return(None) => Ok(Signal::Return(Object::Null)),
			Statement::Expression(expression) => self.evaluate(expression),
		}
	}

	/// Evaluate the given expression and return its value.
	fn evaluate(&mut self, expression: &Expression) -> Result<Signal, EvalError> {
		let object = match expression {
			Expression::Identifier(name) => self.lookup(name)?,
			Expression::Boolean(b) => Object::Boolean(*b),
			Expression::Integer(n) => Object::Integer(*n),
			Expression::StringLiteral(s) => Object::String(s.clone()),
			Expression::Array(elements) => {
				let mut values = Vec::with_capacity(elements.len());
				for element in elements {
					values.push(value!(self.evaluate(element)?));
				}
				Object::array(values)
			}
			Expression::Hash(pairs) => {
				let mut hash = HashMap::with_capacity(pairs.len());
				for (key_expression, value_expression) in pairs {
					let key = value!(self.evaluate(key_expression)?);
					let hash_key = key.hash_key()?;
					let value = value!(self.evaluate(value_expression)?);
					hash.insert(hash_key, HashPair { key, value });
				}
				Object::hash(hash)
			}
			Expression::Function(function) => Object::Function(FunctionValue::new(
				function.parameters.clone(),
				function.body.clone(),
				self.environment.clone(),
			)),
			Expression::Prefix { operator, right } => value!(self.evaluate(right)?).prefix_op(*operator)?,
			Expression::Infix { left, operator: operator @ (TokenType::And | TokenType::Or), right } => {
				let left = value!(self.evaluate(left)?).is_truthy();
				let short_circuits = if *operator == TokenType::And { !left } else { left };
				if short_circuits { Object::Boolean(left) } else { Object::Boolean(value!(self.evaluate(right)?).is_truthy()) }
			}
			Expression::Infix { left, operator, right } => {
				let left = value!(self.evaluate(left)?);
				let right = value!(self.evaluate(right)?);
				left.binary_op(*operator, &right)?
			}
			Expression::Call { callee, arguments } => {
				let callee = value!(self.evaluate(callee)?);
				let mut values = Vec::with_capacity(arguments.len());
				for argument in arguments {
					values.push(value!(self.evaluate(argument)?));
				}
				self.call(callee, values)?
			}
			Expression::Index { target, index } => {
				let target = value!(self.evaluate(target)?);
				let index = value!(self.evaluate(index)?);
				target.index(&index)?
			}
			Expression::If(if_expression) => return self.if_expression(if_expression),
		};
		Ok(Signal::Value(object))
	}

	fn lookup(&self, name: &str) -> Result<Object, EvalError> {
		self
			.environment
			.borrow()
			.get(name)
			.or_else(|| builtins::lookup(name).map(Object::Builtin))
			.ok_or_else(|| EvalError::UnknownIdentifier(name.to_string()))
	}

	/// The first truthy condition picks its block, then the `else` block, then
	/// `Null`.
	fn if_expression(&mut self, if_expression: &IfExpression) -> Result<Signal, EvalError> {
		for (condition, block) in if_expression.conditions.iter().zip(&if_expression.blocks) {
			if value!(self.evaluate(condition)?).is_truthy() {
				return self.interpret_block(block);
			}
		}
		match if_expression.else_block() {
			Some(block) => self.interpret_block(block),
			None => Ok(Signal::Value(Object::Null)),
		}
	}

	#[tracing::instrument(level = "trace", skip(self, callee, arguments), fields(callee = callee.type_name(), arguments = arguments.len()))]
	fn call(&mut self, callee: Object, arguments: Vec<Object>) -> Result<Object, EvalError> {
		match callee {
			Object::Function(function) => {
				if function.parameters.len() != arguments.len() {
					return Err(EvalError::WrongArgumentCount {
						expected: function.parameters.len(),
						got:      arguments.len(),
					});
				}

				let mut environment = Environment::enclosed(function.closure.clone());
				for (parameter, argument) in function.parameters.iter().zip(arguments) {
					environment.create(parameter, argument)?;
				}

				// Run the body in the call's scope, then restore the caller's scope
				let previous = std::mem::replace(&mut self.environment, RcCell::new(environment));
				let result = self.interpret_block(&function.body);
				self.environment = previous;

				Ok(result?.into_object())
			}
			Object::Builtin(builtin) => match builtin.call(&arguments) {
				Object::Error(message) => Err(EvalError::Builtin(message)),
				object => Ok(object),
			},
			other => Err(EvalError::NotCallable(other.type_name())),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::{evaluate, interpreter::object::HashKey, new_environment, parse};

	fn run(input: &str) -> Result<Object, EvalError> {
		let (program, errors) = parse(input);
		assert!(errors.is_empty(), "unexpected errors for {input:?}: {errors:?}");
		evaluate(&program, &new_environment())
	}

	fn integer(input: &str, expected: i64) {
		assert_eq!(run(input), Ok(Object::Integer(expected)), "input: {input}");
	}

	fn boolean(input: &str, expected: bool) {
		assert_eq!(run(input), Ok(Object::Boolean(expected)), "input: {input}");
	}

	fn null(input: &str) {
		assert_eq!(run(input), Ok(Object::Null), "input: {input}");
	}

	fn error(input: &str, expected: &str) {
		match run(input) {
			Err(error) => assert_eq!(error.to_string(), expected, "input: {input}"),
			Ok(object) => panic!("expected error for {input:?}, got {object}"),
		}
	}

	#[test]
	fn test_integer_expressions() {
		integer("5", 5);
		integer("-10", -10);
		integer("5 + 5 + 5 + 5 - 10", 10);
		integer("2 * 2 * 2 * 2 * 2", 32);
		integer("-50 + 100 + -50", 0);
		integer("5 * 2 + 10", 20);
		integer("5 + 2 * 10", 25);
		integer("20 + 2 * -10", 0);
		integer("50 / 2 * 2 + 10", 60);
		integer("2 * (5 + 10)", 30);
		integer("3 * 3 * 3 + 10", 37);
		integer("3 * (3 * 3) + 10", 37);
		integer("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50);
		integer("12 / 6", 2);
		integer("5 % 2", 1);
		integer("10 - 5 * 2", 0);
		integer("5 & 3", 1);
		integer("5 | 3", 7);
		integer("--5", 5);
	}

	#[test]
	fn test_boolean_expressions() {
		boolean("true", true);
		boolean("false", false);
		boolean("!true", false);
		boolean("!!false", false);
		boolean("!5", false);
		boolean("!0", true);
		boolean("true == true", true);
		boolean("true != false", true);
		boolean("false == false", true);
		boolean("5 < 10", true);
		boolean("10 > 5", true);
		boolean("5 <= 5", true);
		boolean("5 >= 6", false);
		boolean("5 == 5", true);
		boolean("5 != 6", true);
		boolean("5 * 2 < 10", false);
		boolean("(5 * 2 > 10) || (5 < 8)", true);
		boolean("(1 < 2) == true", true);
		boolean("(1 > 2) == false", true);
	}

	#[test]
	fn test_logical_operators() {
		boolean("true && true", true);
		boolean("true && false", false);
		boolean("false || true", true);
		boolean("false || false", false);
		boolean("1 && 2", true);
		boolean("0 || 0", false);
		// the right side never runs once the left decides
		boolean("false && undefined", false);
		boolean("true || undefined", true);
	}

	#[test]
	fn test_string_expressions() {
		assert_eq!(run(r#""Hello" + " " + "World!""#), Ok(Object::String("Hello World!".to_string())));
		error(r#""a" - "b""#, "type mismatch: STRING - STRING");
		error(r#""a" == "a""#, "type mismatch: STRING == STRING");
	}

	#[test]
	fn test_division_by_zero() {
		error("1 / 0", "division by zero");
		error("1 % 0", "modulo by zero");
		error("let f = fn(x) { 10 / x }; f(0)", "division by zero");
	}

	#[test]
	fn test_if_else_expressions() {
		integer("if (true) { 10 }", 10);
		integer("if (1) { 10 }", 10);
		integer("if (1 < 2) { 10 } else { 20 }", 10);
		integer("if (1 > 2) { 10 } else { 20 }", 20);
		integer("if (2 > 1) { if (true) { 10 } else { 20 } } else { 30 }", 10);
		integer("if (1 > 2) { 10 } else if (true) { 20 } else { 30 }", 20);
		integer("if (false) { 1 } else if (0) { 2 } else if (\"\") { 3 } else { 4 }", 3);
		null("if (false) { 10 }");
		null("if (0) { 10 }");
		null("if (false) { 1 } else if (false) { 2 }");
		null("if (true) { }");
	}

	#[test]
	fn test_return_statements() {
		integer("return 10;", 10);
		integer("return 10; 9;", 10);
		integer("return 2 * 5; 9;", 10);
		integer("9; return 2 * 5; 9;", 10);
		integer("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10);
		integer("let f = fn(x) { if (x) { return 1; } 2 }; f(true) + f(false)", 3);
		integer("let f = fn() { [1, if (true) { return 7; }] }; f()", 7);
		null("return;");
		null("let f = fn() { return; 5 }; f()");
	}

	#[test]
	fn test_let_statements() {
		integer("let a = 5; a;", 5);
		integer("let a = 5 * 5; a;", 25);
		integer("let a = 5; let b = a; b;", 5);
		integer("let a = 5; let b = a; let c = a + b + 5; c;", 15);
		null("let a = 5;");
		error("let a = 1; let a = 2;", "variable 'a' already declared in this scope");
		error("if (true) { let a = 1; } let a = 2;", "variable 'a' already declared in this scope");
	}

	#[test]
	fn test_shadowing_in_function_scope() {
		integer("let x = 1; let f = fn() { let x = 2; x }; f()", 2);
		integer("let x = 1; let f = fn() { let x = 2; x }; f(); x", 1);
		integer("let x = 1; let f = fn(x) { x * 10 }; f(5) + x", 51);
		error("let f = fn(x) { let x = 2; x }; f(1)", "variable 'x' already declared in this scope");
	}

	#[test]
	fn test_unknown_identifier() {
		error("foobar", "identifier not found: foobar");
		error("let f = fn() { y }; f()", "identifier not found: y");
	}

	#[test]
	fn test_error_stops_evaluation() {
		error("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN");
		error("-true", "unknown operator: -BOOLEAN");
		error("if (10 > 1) { true + false; 1 }", "type mismatch: BOOLEAN + BOOLEAN");
		error("[1, 2 + true, 3]", "type mismatch: INTEGER + BOOLEAN");
	}

	#[test]
	fn test_function_object() {
		let object = run("fn(x) { x + 2; };").unwrap();
		let Object::Function(function) = &object else { panic!("expected function, got {object:?}") };
		assert_eq!(function.parameters.as_slice(), ["x"]);
		assert_eq!(function.body.to_string(), "{ (x + 2); }");
		assert_eq!(object.to_string(), "fn(x) { (x + 2); }");
	}

	#[test]
	fn test_function_application() {
		integer("let identity = fn(x) { x; }; identity(5);", 5);
		integer("let identity = fn(x) { return x; }; identity(5);", 5);
		integer("let double = fn(x) { x * 2; }; double(5);", 10);
		integer("let add = fn(x, y) { x + y; }; add(5, 5);", 10);
		integer("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20);
		integer("fn(x) { x; }(5)", 5);
		integer("let five = fn() { 5 }; five()", 5);
		null("let nothing = fn() { }; nothing()");
	}

	#[test]
	fn test_call_errors() {
		error("let add = fn(x, y) { x + y }; add(1)", "wrong number of arguments: want=2, got=1");
		error("let one = fn() { 1 }; one(1, 2)", "wrong number of arguments: want=0, got=2");
		error("5(1)", "not a function: INTEGER");
		error("len(1)", "argument to `len` not supported, got INTEGER");
	}

	#[test]
	fn test_closures() {
		let adder = "let makeAdder = fn(x) { fn(y) { x + y } }; let add5 = makeAdder(5);";
		integer(&format!("{adder} add5(10);"), 15);
		integer(&format!("{adder} makeAdder(100)(1)"), 101);
		integer(&format!("{adder} let add100 = makeAdder(100); add100(1); add5(1)"), 6);
	}

	#[test]
	fn test_lexical_not_dynamic_scope() {
		integer("let x = 10; let get = fn() { x }; let call = fn(x) { get() }; call(99)", 10);
	}

	#[test]
	fn test_recursion() {
		integer("let fact = fn(n) { if (n < 2) { 1 } else { n * fact(n - 1) } }; fact(10)", 3628800);
		integer(
			"let fib = fn(n) { if (n < 2) { return n; } fib(n - 1) + fib(n - 2) }; fib(15)",
			610,
		);
	}

	#[test]
	fn test_higher_order_functions() {
		integer("let apply = fn(f, x) { f(x) }; apply(fn(n) { n * n }, 7)", 49);
		integer(
			"let map = fn(arr, f) { let iter = fn(i, acc) { if (i < len(arr)) { push(acc, f(arr[i])); iter(i + 1, acc) } else { acc } }; iter(0, []) }; let out = map([1, 2, 3], fn(x) { x * 10 }); out[2]",
			30,
		);
	}

	#[test]
	fn test_array_literals() {
		let object = run("[1, 2 * 2, 3 + 3]").unwrap();
		assert_eq!(object, Object::array(vec![Object::Integer(1), Object::Integer(4), Object::Integer(6)]));
	}

	#[test]
	fn test_array_index_expressions() {
		integer("[1, 2, 3][0]", 1);
		integer("[1, 2, 3][2]", 3);
		integer("let i = 0; [1][i];", 1);
		integer("[1, 2, 3][1 + 1];", 3);
		integer("let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];", 6);
		integer("let myArray = [1, 2, 3]; let i = myArray[0]; myArray[i]", 2);
		null("[1, 2, 3][3]");
		null("[1, 2, 3][10]");
		null("[1, 2, 3][-1]");
		error("[1][true]", "index operator not supported: ARRAY[BOOLEAN]");
	}

	#[test]
	fn test_hash_literals() {
		let input = r#"let two = "two";
		{
			"one": 10 - 9,
			two: 1 + 1,
			"thr" + "ee": 6 / 2,
			4: 4,
			true: 5,
			false: 6
		}"#;
		let object = run(input).unwrap();
		let Object::Hash(pairs) = &object else { panic!("expected hash, got {object:?}") };
		let pairs = pairs.borrow();
		let expected = [
			(HashKey::String("one".into()), 1),
			(HashKey::String("two".into()), 2),
			(HashKey::String("three".into()), 3),
			(HashKey::Integer(4), 4),
			(HashKey::Boolean(true), 5),
			(HashKey::Boolean(false), 6),
		];
		assert_eq!(pairs.len(), expected.len());
		for (key, value) in expected {
			assert_eq!(pairs.get(&key).map(|pair| pair.value.clone()), Some(Object::Integer(value)));
		}
	}

	#[test]
	fn test_hash_overwrites_equal_keys() {
		integer(r#"{"a": 1, "a": 2}["a"]"#, 2);
		integer(r#"len({"a": 1, "a": 2, 1: 3})"#, 2);
	}

	#[test]
	fn test_hash_index_expressions() {
		integer(r#"{"foo": 5}["foo"]"#, 5);
		integer(r#"let key = "foo"; {"foo": 5}[key]"#, 5);
		integer("{5: 5}[5]", 5);
		integer("{true: 5}[true]", 5);
		integer("{false: 5}[false]", 5);
		null(r#"{"foo": 5}["bar"]"#);
		null("{}[0]");
		error(r#"{"name": "Monkey"}[fn(x) { x }]"#, "unusable as hash key: FUNCTION");
		error("{[1]: 2}", "unusable as hash key: ARRAY");
	}

	#[test]
	fn test_builtin_functions() {
		integer(r#"len("")"#, 0);
		integer(r#"len("four")"#, 4);
		integer(r#"len("hello world")"#, 11);
		integer("len([1, 2, 3])", 3);
		integer("let test = {}; push(test, 1, 2); len(test)", 1);
		integer("let a = []; push(a, 1); push(a, 2); len(a)", 2);
		integer("let a = [1]; push(a, 5)", 2);
		integer("first([4, 5])", 4);
		integer("last([4, 5])", 5);
		integer("rest([4, 5, 6])[1]", 6);
		error(r#"len("one", "two")"#, "wrong number of arguments. got=2, want=1");
		error("push(1, 1)", "argument to `push` not supported, got INTEGER");
	}

	#[test]
	fn test_self_pushed_containers_render() {
		let rendered = |input: &str| run(input).map(|object| object.to_string());
		assert_eq!(rendered("let a = []; push(a, a); len(a)"), Ok("1".to_string()));
		assert_eq!(rendered("let a = []; push(a, a); a"), Ok("[[...]]".to_string()));
		assert_eq!(rendered("let h = {}; push(h, 1, h); h"), Ok("{1: {...}}".to_string()));
		assert_eq!(rendered("let a = [1]; let h = {\"a\": a}; push(a, h); a"), Ok("[1, {a: [...]}]".to_string()));
	}

	#[test]
	fn test_builtins_can_be_shadowed() {
		integer("let len = fn(x) { 42 }; len([])", 42);
		assert_eq!(run("len").map(|object| object.to_string()), Ok("builtin function len".to_string()));
	}

	#[test]
	fn test_environment_persists_between_evaluations() {
		let environment = new_environment();
		let (first, _) = parse("let x = 5; let add = fn(y) { x + y };");
		let (second, _) = parse("add(10)");
		assert_eq!(evaluate(&first, &environment), Ok(Object::Null));
		assert_eq!(evaluate(&second, &environment), Ok(Object::Integer(15)));
		assert_eq!(evaluate(&first, &environment), Err(EvalError::Redeclaration("x".to_string())));
	}

	#[test]
	fn test_evaluate_single_nodes() {
		let environment = new_environment();
		let (program, _) = parse("let x = 2; x * 21");
		assert_eq!(evaluate(&program.statements[0], &environment), Ok(Object::Null));
		let Statement::Expression(expression) = &program.statements[1] else { panic!("expected expression") };
		assert_eq!(evaluate(expression, &environment), Ok(Object::Integer(42)));
	}

	#[test]
	fn test_rendered_program_evaluates_the_same() {
		let sources = [
			"2 * (5 + 10)",
			"let makeAdder = fn(x) { fn(y) { x + y } }; let add5 = makeAdder(5); add5(10);",
			"if (1 > 2) { 10 } else if (true) { 20 } else { 30 }",
			r#"let h = {"one": 1, true: 2}; h["one"] + h[true]"#,
			"let a = [1, 2, 3]; push(a, 4); len(a) + a[3]",
			"-(3 - 10) % 4",
		];
		for source in sources {
			let (program, _) = parse(source);
			let (rendered, errors) = parse(&program.to_string());
			assert!(errors.is_empty(), "{errors:?}");
			assert_eq!(
				evaluate(&rendered, &new_environment()),
				evaluate(&program, &new_environment()),
				"source: {source}"
			);
		}
	}
}
