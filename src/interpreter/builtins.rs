//! Native functions visible to every Monkey program.
//!
//! The table is built once per process and consulted after the scope chain,
//! so a user binding with the same name shadows a builtin.

use std::{collections::HashMap, sync::OnceLock};

use tracing::debug;

use crate::interpreter::{callable::Builtin, object::{HashPair, Object}};

static BUILTINS: OnceLock<HashMap<&'static str, Builtin>> = OnceLock::new();

/// Populate the builtin table. Calling it again is a no-op.
pub fn init_builtins() { registry(); }

/// Find the builtin registered under `name`.
pub fn lookup(name: &str) -> Option<Builtin> { registry().get(name).copied() }

fn registry() -> &'static HashMap<&'static str, Builtin> {
	BUILTINS.get_or_init(|| {
		let builtins = [
			Builtin { name: "len", function: len },
			Builtin { name: "push", function: push },
			Builtin { name: "puts", function: puts },
			Builtin { name: "first", function: first },
			Builtin { name: "last", function: last },
			Builtin { name: "rest", function: rest },
		];
		debug!(count = builtins.len(), "registering builtins");
		builtins.into_iter().map(|builtin| (builtin.name, builtin)).collect()
	})
}

fn wrong_arguments(got: usize, want: &str) -> Object {
	Object::error(format!("wrong number of arguments. got={got}, want={want}"))
}

fn unsupported(name: &str, argument: &Object) -> Object {
	Object::error(format!("argument to `{name}` not supported, got {}", argument.type_name()))
}

fn size(count: usize) -> Object { Object::Integer(i64::try_from(count).unwrap_or(i64::MAX)) }

/// `len(x)`: characters of a string, elements of an array, pairs of a hash.
fn len(arguments: &[Object]) -> Object {
	let [argument] = arguments else {
		return wrong_arguments(arguments.len(), "1");
	};
	match argument {
		Object::String(s) => size(s.chars().count()),
		Object::Array(elements) => size(elements.borrow().len()),
		Object::Hash(pairs) => size(pairs.borrow().len()),
		other => unsupported("len", other),
	}
}

/// `push(array, value)` or `push(hash, key, value)`, in place. Answers the
/// new size.
fn push(arguments: &[Object]) -> Object {
	match arguments {
		[Object::Array(elements), value] => {
			let mut elements = elements.borrow_mut();
			elements.push(value.clone());
			size(elements.len())
		}
		[Object::Hash(pairs), key, value] => {
			let hash_key = match key.hash_key() {
				Ok(hash_key) => hash_key,
				Err(error) => return Object::error(error.to_string()),
			};
			let mut pairs = pairs.borrow_mut();
			pairs.insert(hash_key, HashPair { key: key.clone(), value: value.clone() });
			size(pairs.len())
		}
		[Object::Array(_), ..] => wrong_arguments(arguments.len(), "2"),
		[Object::Hash(_), ..] => wrong_arguments(arguments.len(), "3"),
		[other, ..] => unsupported("push", other),
		[] => wrong_arguments(0, "2 or 3"),
	}
}

/// `puts(a, b, ...)` prints each argument on its own line.
fn puts(arguments: &[Object]) -> Object {
	for argument in arguments {
		println!("{argument}");
	}
	Object::Null
}

fn with_array(name: &str, arguments: &[Object], f: impl FnOnce(&[Object]) -> Object) -> Object {
	match arguments {
		[Object::Array(elements)] => f(elements.borrow().as_slice()),
		[other] => unsupported(name, other),
		_ => wrong_arguments(arguments.len(), "1"),
	}
}

fn first(arguments: &[Object]) -> Object {
	with_array("first", arguments, |elements| elements.first().cloned().unwrap_or(Object::Null))
}

fn last(arguments: &[Object]) -> Object {
	with_array("last", arguments, |elements| elements.last().cloned().unwrap_or(Object::Null))
}

/// `rest(array)`: a new array without the first element.
fn rest(arguments: &[Object]) -> Object {
	with_array("rest", arguments, |elements| match elements {
		[] => Object::Null,
		[_, tail @ ..] => Object::array(tail.to_vec()),
	})
}
