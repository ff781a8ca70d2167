use crate::{error::interpreter::EvalError, interpreter::object::Object, scanner::TokenType};

impl Object {
	/// Applies a prefix operator.
	pub fn prefix_op(&self, operator: TokenType) -> Result<Object, EvalError> {
		match (operator, self) {
			(TokenType::Bang, operand) => Ok(Object::Boolean(!operand.is_truthy())),
			(TokenType::Minus, Object::Integer(n)) => Ok(Object::Integer(n.wrapping_neg())),
			(operator, operand) => Err(EvalError::UnknownPrefix { operator, operand: operand.type_name() }),
		}
	}

	/// Performs a binary operation between two values.
	///
	/// Integers use wrapping 64-bit arithmetic, dividing by zero is an error.
	pub fn binary_op(&self, operator: TokenType, right: &Self) -> Result<Object, EvalError> {
		use Object::{Boolean as Bool, Integer as Int, String as Str};
		use TokenType::*;

		let value = match (self, operator, right) {
			(Int(l), Plus, Int(r)) => Int(l.wrapping_add(*r)),
			(Int(l), Minus, Int(r)) => Int(l.wrapping_sub(*r)),
			(Int(l), Star, Int(r)) => Int(l.wrapping_mul(*r)),
			(Int(_), Slash, Int(0)) => return Err(EvalError::DivisionByZero),
			(Int(l), Slash, Int(r)) => Int(l.wrapping_div(*r)),
			(Int(_), Percent, Int(0)) => return Err(EvalError::ModuloByZero),
			(Int(l), Percent, Int(r)) => Int(l.wrapping_rem(*r)),
			(Int(l), Ampersand, Int(r)) => Int(l & r),
			(Int(l), Pipe, Int(r)) => Int(l | r),
			(Int(l), Less, Int(r)) => Bool(l < r),
			(Int(l), LessEqual, Int(r)) => Bool(l <= r),
			(Int(l), Greater, Int(r)) => Bool(l > r),
			(Int(l), GreaterEqual, Int(r)) => Bool(l >= r),
			(Int(l), EqualEqual, Int(r)) => Bool(l == r),
			(Int(l), BangEqual, Int(r)) => Bool(l != r),
			(Bool(l), EqualEqual, Bool(r)) => Bool(l == r),
			(Bool(l), BangEqual, Bool(r)) => Bool(l != r),
			(Str(l), Plus, Str(r)) => Str(format!("{l}{r}")),
			(left, operator, right) => {
				return Err(EvalError::TypeMismatch { left: left.type_name(), operator, right: right.type_name() });
			}
		};
		Ok(value)
	}

	/// `array[integer]` or `hash[key]`, missing entries are `Null`.
	pub fn index(&self, index: &Self) -> Result<Object, EvalError> {
		match (self, index) {
			(Object::Array(elements), Object::Integer(i)) => {
				let element = usize::try_from(*i).ok().and_then(|i| elements.borrow().get(i).cloned());
				Ok(element.unwrap_or(Object::Null))
			}
			(Object::Hash(pairs), key) => {
				let key = key.hash_key()?;
				Ok(pairs.borrow().get(&key).map_or(Object::Null, |pair| pair.value.clone()))
			}
			(target, index) => {
				Err(EvalError::IndexNotSupported { target: target.type_name(), index: index.type_name() })
			}
		}
	}
}
