use std::{cell::{Ref, RefCell, RefMut}, rc::Rc};

/// Shared, interior-mutable handle. Cloning is a shallow copy.
///
/// Single-threaded only, the `Rc` inside keeps it `!Send`.
#[derive(Debug, Default)]
pub struct RcCell<T> {
	inner: Rc<RefCell<T>>,
}

impl<T> Clone for RcCell<T> {
	fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<T> RcCell<T> {
	pub fn new(value: T) -> Self { Self { inner: Rc::new(RefCell::new(value)) } }

	pub fn borrow(&self) -> Ref<'_, T> { self.inner.borrow() }

	pub fn borrow_mut(&self) -> RefMut<'_, T> { self.inner.borrow_mut() }

	/// Whether both handles point at the same allocation.
	pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.inner, &other.inner) }

	/// Address of the shared allocation, stable for the handle's lifetime.
	pub fn as_ptr(&self) -> *const () { Rc::as_ptr(&self.inner).cast() }
}

impl<T: PartialEq> PartialEq for RcCell<T> {
	fn eq(&self, other: &Self) -> bool { self.ptr_eq(other) || *self.borrow() == *other.borrow() }
}
