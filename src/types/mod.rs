//! Concrete wrappers for each magnifier setting.

mod color;
mod filters;
mod input;
mod rectangle;
mod transform;
mod vector;

pub use color::{ColorMatrix, ColorMatrixFields, ColorMatrixRaw};
pub use filters::{FiltersList, WindowFilters, WindowHandle};
pub use input::{InputTransform, InputTransformFields, InputTransformRaw};
pub use rectangle::{Rectangle, RectangleFields, RectangleRaw, SourceRectangle};
pub use transform::{
	simple_transform, transform_matrix, FullscreenTransform, FullscreenTransformFields,
	FullscreenTransformRaw, SimpleTransform, TransformRaw, WindowTransform, WindowTransformFields,
};
pub use vector::{Offset, OffsetFields, Origin, Scale, Unit, Vector2, Vector2Fields, VectorDefault};

/// The value shared by every element of `values`, `None` when any differs
/// or there are none.
pub fn ensure_same<T: PartialEq + Copy>(values: &[T]) -> Option<T> {
	let (first, rest) = values.split_first()?;
	rest.iter().all(|value| value == first).then_some(*first)
}
