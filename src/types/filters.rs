use crate::{CompositeField, Field};

/// Window handles, as the operating system reports them.
pub type WindowHandle = isize;

/// Windows excluded from magnification.
pub struct WindowFilters;

pub type FiltersList = CompositeField<WindowFilters>;

impl Field for WindowFilters {
	type Raw = Vec<WindowHandle>;

	fn default_raw() -> Self::Raw {
		Vec::new()
	}
}
