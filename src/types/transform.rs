use std::sync::Arc;

use crate::consts::{DEFAULT_FULLSCREEN_TRANSFORM, DEFAULT_TRANSFORM, TRANSFORM_MATRIX_SIZE};
use crate::matrix::position;
use crate::notifier::Notifier;
use crate::slot::Slot;
use crate::types::{Offset, Scale, Vector2};
use crate::{Field, Result, Shape, WrappedField};

/// Row-major 3x3 magnifier window transformation.
pub type TransformRaw = [f64; TRANSFORM_MATRIX_SIZE];

/// `((scale_x, scale_y), (offset_x, offset_y))`
pub type SimpleTransform = ((f64, f64), (f64, f64));

/// `(scale, (offset_x, offset_y))`
pub type FullscreenTransformRaw = (f64, (i32, i32));

fn negate(value: f64) -> f64 {
	if value == 0.0 {
		0.0
	} else {
		-value
	}
}

/// Scales by (`scale_x`, `scale_y`) and moves the view to (`offset_x`, `offset_y`).
pub fn transform_matrix(scale_x: f64, scale_y: f64, offset_x: f64, offset_y: f64) -> TransformRaw {
	[
		scale_x,
		0.0,
		negate(offset_x),
		0.0,
		scale_y,
		negate(offset_y),
		0.0,
		0.0,
		1.0,
	]
}

/// Extracts the scale and offset encoded by [`transform_matrix`].
pub fn simple_transform(matrix: &TransformRaw) -> SimpleTransform {
	let at = |row, col| matrix[position(3, row, col)];
	(
		(at(0, 0), at(1, 1)),
		(negate(at(0, 2)), negate(at(1, 2))),
	)
}

/// Scale and offset of a windowed magnifier.
#[derive(Default)]
pub struct WindowTransformFields {
	scale: Scale,
	offset: Vector2,
}

pub type WindowTransform = WrappedField<WindowTransformFields>;

impl Field for WindowTransformFields {
	type Raw = TransformRaw;

	fn default_raw() -> Self::Raw {
		DEFAULT_TRANSFORM
	}
}

impl Shape for WindowTransformFields {
	const NAMES: &'static [&'static str] = &["scale", "offset"];

	fn compose(&self) -> Self::Raw {
		let (scale_x, scale_y) = self.scale.composed();
		let (offset_x, offset_y) = self.offset.composed();
		transform_matrix(scale_x, scale_y, offset_x, offset_y)
	}

	fn decompose(&self, raw: Self::Raw) {
		let (scale, offset) = simple_transform(&raw);
		self.scale.load(scale);
		self.offset.load(offset);
	}

	fn children(&self) -> Vec<(&'static str, &Arc<Notifier>)> {
		vec![("scale", self.scale.notifier()), ("offset", self.offset.notifier())]
	}
}

field_accessors! {
	impl [] WindowTransformFields {}
	nested {
		scale: Scale => set_scale, reset_scale;
		offset: Vector2 => set_offset, reset_offset;
	}
}

impl WindowTransform {
	pub fn pair(&self) -> Result<SimpleTransform> {
		self.batch(|this| Ok((this.scale()?.raw()?, this.offset()?.raw()?)))
	}

	pub fn set_pair(&self, (scale, offset): SimpleTransform) -> Result<()> {
		self.batch(|this| {
			this.scale()?.set_raw(scale)?;
			this.offset()?.set_raw(offset)
		})
	}
}

/// Scale and offset of the fullscreen magnifier.
#[derive(Default)]
pub struct FullscreenTransformFields {
	scale: Slot<f64>,
	offset: Offset,
}

pub type FullscreenTransform = WrappedField<FullscreenTransformFields>;

impl Field for FullscreenTransformFields {
	type Raw = FullscreenTransformRaw;

	fn default_raw() -> Self::Raw {
		DEFAULT_FULLSCREEN_TRANSFORM
	}
}

impl Shape for FullscreenTransformFields {
	const NAMES: &'static [&'static str] = &["scale", "offset"];

	fn compose(&self) -> Self::Raw {
		(self.scale.get(), self.offset.composed())
	}

	fn decompose(&self, (scale, offset): Self::Raw) {
		self.scale.set(scale);
		self.offset.load(offset);
	}

	fn children(&self) -> Vec<(&'static str, &Arc<Notifier>)> {
		vec![("offset", self.offset.notifier())]
	}
}

field_accessors! {
	impl [] FullscreenTransformFields {
		scale: f64 => set_scale, reset_scale;
	}
	nested {
		offset: Offset => set_offset, reset_offset;
	}
}
