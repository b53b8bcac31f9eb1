use crate::consts::ZERO_RECT;
use crate::slot::Slot;
use crate::types::ensure_same;
use crate::{Field, Result, Shape, WrappedField};

/// `(left, top, right, bottom)`
pub type RectangleRaw = (i32, i32, i32, i32);

/// Two corners: start (upper-left) and end (lower-right).
#[derive(Default)]
pub struct RectangleFields {
	left: Slot<i32>,
	top: Slot<i32>,
	right: Slot<i32>,
	bottom: Slot<i32>,
}

pub type Rectangle = WrappedField<RectangleFields>;

/// Area the magnifier copies its pixels from.
pub type SourceRectangle = Rectangle;

impl Field for RectangleFields {
	type Raw = RectangleRaw;

	fn default_raw() -> Self::Raw {
		ZERO_RECT
	}
}

impl Shape for RectangleFields {
	const NAMES: &'static [&'static str] = &["left", "top", "right", "bottom"];

	fn compose(&self) -> Self::Raw {
		(
			self.left.get(),
			self.top.get(),
			self.right.get(),
			self.bottom.get(),
		)
	}

	fn decompose(&self, (left, top, right, bottom): Self::Raw) {
		self.left.set(left);
		self.top.set(top);
		self.right.set(right);
		self.bottom.set(bottom);
	}
}

field_accessors! {
	impl [] RectangleFields {
		left: i32 => set_left, reset_left;
		top: i32 => set_top, reset_top;
		right: i32 => set_right, reset_right;
		bottom: i32 => set_bottom, reset_bottom;
	}
}

impl Rectangle {
	/// `(left, top)`
	pub fn start(&self) -> Result<(i32, i32)> {
		self.batch(|this| Ok((this.left()?, this.top()?)))
	}

	pub fn set_start(&self, (left, top): (i32, i32)) -> Result<()> {
		self.batch(|this| {
			this.set_left(left)?;
			this.set_top(top)
		})
	}

	pub fn start_same(&self) -> Result<Option<i32>> {
		self.batch(|this| Ok(ensure_same(&[this.left()?, this.top()?])))
	}

	pub fn set_start_same(&self, value: i32) -> Result<()> {
		self.set_start((value, value))
	}

	/// `(right, bottom)`
	pub fn end(&self) -> Result<(i32, i32)> {
		self.batch(|this| Ok((this.right()?, this.bottom()?)))
	}

	pub fn set_end(&self, (right, bottom): (i32, i32)) -> Result<()> {
		self.batch(|this| {
			this.set_right(right)?;
			this.set_bottom(bottom)
		})
	}

	pub fn end_same(&self) -> Result<Option<i32>> {
		self.batch(|this| Ok(ensure_same(&[this.right()?, this.bottom()?])))
	}

	pub fn set_end_same(&self, value: i32) -> Result<()> {
		self.set_end((value, value))
	}

	/// The value shared by all four sides, `None` when any differs.
	pub fn same(&self) -> Result<Option<i32>> {
		self.batch(|this| {
			Ok(ensure_same(&[
				this.left()?,
				this.top()?,
				this.right()?,
				this.bottom()?,
			]))
		})
	}

	pub fn set_same(&self, value: i32) -> Result<()> {
		self.batch(|this| {
			this.set_start((value, value))?;
			this.set_end((value, value))
		})
	}
}
