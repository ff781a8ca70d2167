use std::collections::HashMap;

use crate::{error::interpreter::EvalError, interpreter::object::Object, utils::RcCell};

/// One scope of bindings plus a shared link to the enclosing scope.
///
/// Function values hold an `RcCell<Environment>` of the scope they were
/// defined in, so a scope lives as long as its longest-lived closure.
/// Not thread safe, an environment must stay on the thread that made it.
#[derive(Default, Debug)]
pub struct Environment {
	variables: HashMap<String, Object>,
	outer:     Option<RcCell<Environment>>,
}

impl Environment {
	pub fn new() -> Self { Self { variables: HashMap::new(), outer: None } }

	/// A fresh scope enclosed by `outer`.
	pub fn enclosed(outer: RcCell<Environment>) -> Self { Self { variables: HashMap::new(), outer: Some(outer) } }

	/// Bind `name` in this scope. Names are bound once per scope, an outer
	/// binding with the same name is shadowed, never touched.
	pub fn create(&mut self, name: &str, value: Object) -> Result<(), EvalError> {
		if self.variables.contains_key(name) {
			return Err(EvalError::Redeclaration(name.to_string()));
		}
		self.variables.insert(name.to_string(), value);
		Ok(())
	}

	/// Look `name` up here, then along the chain of enclosing scopes.
	pub fn get(&self, name: &str) -> Option<Object> {
		self
			.variables
			.get(name)
			.cloned()
			.or_else(|| self.outer.as_ref().and_then(|outer| outer.borrow().get(name)))
	}
}
