use std::{collections::HashMap, fmt::Display};

use crate::{error::interpreter::EvalError, interpreter::callable::{Builtin, FunctionValue}, utils::RcCell};

/// Object represents a runtime value in Monkey.
///
/// Arrays and hashes are shared handles: `push` mutates the one value every
/// binding of it sees.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
	Integer(i64),
	Boolean(bool),
	String(String),
	Null,
	Array(RcCell<Vec<Object>>),
	Hash(RcCell<HashMap<HashKey, HashPair>>),
	Function(FunctionValue),
	Builtin(Builtin),
	Error(String),
}

/// The hashable projection of an integer, boolean or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
	Integer(i64),
	Boolean(bool),
	String(String),
}

/// A hash entry keeps the key it was stored under for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
	pub key:   Object,
	pub value: Object,
}

impl Object {
	pub fn array(elements: Vec<Object>) -> Self { Object::Array(RcCell::new(elements)) }

	pub fn hash(pairs: HashMap<HashKey, HashPair>) -> Self { Object::Hash(RcCell::new(pairs)) }

	pub fn error(message: impl Into<String>) -> Self { Object::Error(message.into()) }

	/// Name of the variant, used in error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Object::Integer(_) => "INTEGER",
			Object::Boolean(_) => "BOOLEAN",
			Object::String(_) => "STRING",
			Object::Null => "NULL",
			Object::Array(_) => "ARRAY",
			Object::Hash(_) => "HASH",
			Object::Function(_) => "FUNCTION",
			Object::Builtin(_) => "BUILTIN",
			Object::Error(_) => "ERROR",
		}
	}

	/// `false` and `0` are falsy, every other value is truthy.
	pub fn is_truthy(&self) -> bool { !matches!(self, Object::Boolean(false) | Object::Integer(0)) }

	pub fn hash_key(&self) -> Result<HashKey, EvalError> {
		match self {
			Object::Integer(n) => Ok(HashKey::Integer(*n)),
			Object::Boolean(b) => Ok(HashKey::Boolean(*b)),
			Object::String(s) => Ok(HashKey::String(s.clone())),
			other => Err(EvalError::UnusableHashKey(other.type_name())),
		}
	}
}

impl Object {
	/// Renders the value. `seen` holds the arrays and hashes currently being
	/// rendered, a container that holds itself prints as `[...]` or `{...}`.
	fn render(&self, f: &mut std::fmt::Formatter<'_>, seen: &mut Vec<*const ()>) -> std::fmt::Result {
		match self {
			Object::Array(elements) => {
				if seen.contains(&elements.as_ptr()) {
					return write!(f, "[...]");
				}
				seen.push(elements.as_ptr());
				write!(f, "[")?;
				for (i, element) in elements.borrow().iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					element.render(f, seen)?;
				}
				seen.pop();
				write!(f, "]")
			}
			Object::Hash(pairs) => {
				if seen.contains(&pairs.as_ptr()) {
					return write!(f, "{{...}}");
				}
				seen.push(pairs.as_ptr());
				write!(f, "{{")?;
				for (i, pair) in pairs.borrow().values().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}: ", pair.key)?;
					pair.value.render(f, seen)?;
				}
				seen.pop();
				write!(f, "}}")
			}
			Object::Integer(n) => write!(f, "{n}"),
			Object::Boolean(b) => write!(f, "{b}"),
			Object::String(s) => write!(f, "{s}"),
			Object::Null => write!(f, "null"),
			Object::Function(function) => write!(f, "fn({}) {}", function.parameters.join(", "), function.body),
			Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
			Object::Error(message) => write!(f, "ERROR: {message}"),
		}
	}
}

impl Display for Object {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.render(f, &mut Vec::new()) }
}
