use std::fmt::Debug;

use parking_lot::RwLock;

/// Storage for one primitive sub-field of a composite.
#[derive(Default)]
pub struct Slot<T> {
	value: RwLock<T>,
}

impl<T> Slot<T> {
	pub fn new(value: T) -> Self {
		Slot {
			value: RwLock::new(value),
		}
	}

	#[inline]
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.read().clone()
	}

	#[inline]
	pub fn set(&self, value: T) {
		*self.value.write() = value;
	}
}

impl<T> Debug for Slot<T>
where
	T: Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.value.read().fmt(f)
	}
}
