use std::{fmt::Debug, rc::Rc};

use crate::{environment::Environment, interpreter::object::Object, statement::BlockStatement, utils::RcCell};

/// Native functions validate their own arguments and answer with
/// `Object::Error` on misuse.
pub type NativeFunction = fn(&[Object]) -> Object;

/// A user function together with the scope it was defined in.
#[derive(Clone)]
pub struct FunctionValue {
	pub parameters: Rc<Vec<String>>,
	pub body:       Rc<BlockStatement>,
	pub closure:    RcCell<Environment>,
}

impl FunctionValue {
	pub fn new(parameters: Rc<Vec<String>>, body: Rc<BlockStatement>, closure: RcCell<Environment>) -> Self {
		Self { parameters, body, closure }
	}
}

impl PartialEq for FunctionValue {
	fn eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.body, &other.body) && self.closure.ptr_eq(&other.closure) }
}

// The closure is left out, a function stored in its own scope would recurse.
impl Debug for FunctionValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FunctionValue").field("parameters", &self.parameters).field("body", &self.body).finish()
	}
}

/// A function implemented in Rust and exposed under a fixed name.
#[derive(Clone, Copy)]
pub struct Builtin {
	pub name:     &'static str,
	pub function: NativeFunction,
}

impl Builtin {
	pub fn call(&self, arguments: &[Object]) -> Object { (self.function)(arguments) }
}

impl PartialEq for Builtin {
	fn eq(&self, other: &Self) -> bool { self.name == other.name }
}

impl Debug for Builtin {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Builtin").field(&self.name).finish()
	}
}
