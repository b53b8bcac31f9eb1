use std::marker::PhantomData;

use crate::consts::{DEFAULT_FULLSCREEN_TRANSFORM, DEFAULT_TRANSFORM_OFFSET, DEFAULT_TRANSFORM_SCALE};
use crate::slot::Slot;
use crate::types::ensure_same;
use crate::{Field, Result, Shape, WrappedField};

/// Picks the default raw value of a [`Vector2Fields`].
pub trait VectorDefault: Send + Sync + 'static {
	const DEFAULT: (f64, f64);
}

/// Defaults to the origin, `(0.0, 0.0)`.
pub struct Origin;

/// Defaults to the unit scale, `(1.0, 1.0)`.
pub struct Unit;

impl VectorDefault for Origin {
	const DEFAULT: (f64, f64) = DEFAULT_TRANSFORM_OFFSET;
}

impl VectorDefault for Unit {
	const DEFAULT: (f64, f64) = DEFAULT_TRANSFORM_SCALE;
}

/// Horizontal and vertical components.
pub struct Vector2Fields<D = Origin> {
	x: Slot<f64>,
	y: Slot<f64>,
	preset: PhantomData<D>,
}

pub type Vector2 = WrappedField<Vector2Fields<Origin>>;
pub type Scale = WrappedField<Vector2Fields<Unit>>;

impl<D> Default for Vector2Fields<D> {
	fn default() -> Self {
		Vector2Fields {
			x: Slot::default(),
			y: Slot::default(),
			preset: PhantomData,
		}
	}
}

impl<D: VectorDefault> Field for Vector2Fields<D> {
	type Raw = (f64, f64);

	fn default_raw() -> Self::Raw {
		D::DEFAULT
	}
}

impl<D: VectorDefault> Shape for Vector2Fields<D> {
	const NAMES: &'static [&'static str] = &["x", "y"];

	fn compose(&self) -> Self::Raw {
		(self.x.get(), self.y.get())
	}

	fn decompose(&self, (x, y): Self::Raw) {
		self.x.set(x);
		self.y.set(y);
	}
}

field_accessors! {
	impl [D: VectorDefault] Vector2Fields<D> {
		x: f64 => set_x, reset_x;
		y: f64 => set_y, reset_y;
	}
}

impl<D: VectorDefault> WrappedField<Vector2Fields<D>> {
	/// The value shared by both components, `None` when they differ.
	pub fn same(&self) -> Result<Option<f64>> {
		self.batch(|this| Ok(ensure_same(&[this.x()?, this.y()?])))
	}

	pub fn set_same(&self, value: f64) -> Result<()> {
		self.batch(|this| {
			this.set_x(value)?;
			this.set_y(value)
		})
	}
}

/// Whole-pixel offset from the upper-left corner.
#[derive(Default)]
pub struct OffsetFields {
	x: Slot<i32>,
	y: Slot<i32>,
}

pub type Offset = WrappedField<OffsetFields>;

impl Field for OffsetFields {
	type Raw = (i32, i32);

	fn default_raw() -> Self::Raw {
		DEFAULT_FULLSCREEN_TRANSFORM.1
	}
}

impl Shape for OffsetFields {
	const NAMES: &'static [&'static str] = &["x", "y"];

	fn compose(&self) -> Self::Raw {
		(self.x.get(), self.y.get())
	}

	fn decompose(&self, (x, y): Self::Raw) {
		self.x.set(x);
		self.y.set(y);
	}
}

field_accessors! {
	impl [] OffsetFields {
		x: i32 => set_x, reset_x;
		y: i32 => set_y, reset_y;
	}
}

impl Offset {
	pub fn same(&self) -> Result<Option<i32>> {
		self.batch(|this| Ok(ensure_same(&[this.x()?, this.y()?])))
	}

	pub fn set_same(&self, value: i32) -> Result<()> {
		self.batch(|this| {
			this.set_x(value)?;
			this.set_y(value)
		})
	}
}
