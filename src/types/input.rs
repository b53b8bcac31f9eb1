use std::sync::Arc;

use crate::consts::DEFAULT_INPUT_TRANSFORM;
use crate::notifier::Notifier;
use crate::slot::Slot;
use crate::types::{Rectangle, RectangleRaw};
use crate::{Field, Shape, WrappedField};

/// `(enabled, source, destination)`
pub type InputTransformRaw = (bool, RectangleRaw, RectangleRaw);

/// Maps pen and touch input from the magnified area back onto the screen.
#[derive(Default)]
pub struct InputTransformFields {
	enabled: Slot<bool>,
	source: Rectangle,
	destination: Rectangle,
}

pub type InputTransform = WrappedField<InputTransformFields>;

impl Field for InputTransformFields {
	type Raw = InputTransformRaw;

	fn default_raw() -> Self::Raw {
		DEFAULT_INPUT_TRANSFORM
	}
}

impl Shape for InputTransformFields {
	const NAMES: &'static [&'static str] = &["enabled", "source", "destination"];

	fn compose(&self) -> Self::Raw {
		(
			self.enabled.get(),
			self.source.composed(),
			self.destination.composed(),
		)
	}

	fn decompose(&self, (enabled, source, destination): Self::Raw) {
		self.enabled.set(enabled);
		self.source.load(source);
		self.destination.load(destination);
	}

	fn children(&self) -> Vec<(&'static str, &Arc<Notifier>)> {
		vec![
			("source", self.source.notifier()),
			("destination", self.destination.notifier()),
		]
	}
}

field_accessors! {
	impl [] InputTransformFields {
		enabled: bool => set_enabled, reset_enabled;
	}
	nested {
		source: Rectangle => set_source, reset_source;
		destination: Rectangle => set_destination, reset_destination;
	}
}
