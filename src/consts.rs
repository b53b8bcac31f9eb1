//! Presets and default raw values.
//!
//! Color matrices are 5x5, row-major: rows scale and mix red, green, blue
//! and alpha, the last row is the translation added to each channel.

use crate::matrix::Matrix;
use crate::types::{FullscreenTransformRaw, InputTransformRaw, RectangleRaw, TransformRaw};

pub const COLOR_MATRIX_SIZE: usize = 5 * 5;
pub const TRANSFORM_MATRIX_SIZE: usize = 3 * 3;

pub const COLOR_NO_EFFECT: [f64; COLOR_MATRIX_SIZE] = [
	1.0, 0.0, 0.0, 0.0, 0.0, //
	0.0, 1.0, 0.0, 0.0, 0.0, //
	0.0, 0.0, 1.0, 0.0, 0.0, //
	0.0, 0.0, 0.0, 1.0, 0.0, //
	0.0, 0.0, 0.0, 0.0, 1.0,
];

pub const COLOR_INVERSION_EFFECT: [f64; COLOR_MATRIX_SIZE] = [
	-1.0, 0.0, 0.0, 0.0, 0.0, //
	0.0, -1.0, 0.0, 0.0, 0.0, //
	0.0, 0.0, -1.0, 0.0, 0.0, //
	0.0, 0.0, 0.0, 1.0, 0.0, //
	1.0, 1.0, 1.0, 0.0, 1.0,
];

pub const COLOR_GRAYSCALE_EFFECT: [f64; COLOR_MATRIX_SIZE] = [
	0.3, 0.3, 0.3, 0.0, 0.0, //
	0.6, 0.6, 0.6, 0.0, 0.0, //
	0.1, 0.1, 0.1, 0.0, 0.0, //
	0.0, 0.0, 0.0, 1.0, 0.0, //
	0.0, 0.0, 0.0, 0.0, 1.0,
];

pub const COLOR_SEPIA_EFFECT: [f64; COLOR_MATRIX_SIZE] = [
	0.393, 0.349, 0.272, 0.0, 0.0, //
	0.769, 0.686, 0.534, 0.0, 0.0, //
	0.189, 0.168, 0.131, 0.0, 0.0, //
	0.0, 0.0, 0.0, 1.0, 0.0, //
	0.0, 0.0, 0.0, 0.0, 1.0,
];

/// Green-weak color vision.
pub const COLOR_BLIND_DEUTERANOPIA_EFFECT: [f64; COLOR_MATRIX_SIZE] = [
	0.8, 0.258, 0.0, 0.0, 0.0, //
	0.2, 0.742, 0.142, 0.0, 0.0, //
	0.0, 0.0, 0.858, 0.0, 0.0, //
	0.0, 0.0, 0.0, 1.0, 0.0, //
	0.0, 0.0, 0.0, 0.0, 1.0,
];

/// Red-weak color vision.
pub const COLOR_BLIND_PROTANOPIA_EFFECT: [f64; COLOR_MATRIX_SIZE] = [
	0.817, 0.333, 0.0, 0.0, 0.0, //
	0.183, 0.667, 0.125, 0.0, 0.0, //
	0.0, 0.0, 0.875, 0.0, 0.0, //
	0.0, 0.0, 0.0, 1.0, 0.0, //
	0.0, 0.0, 0.0, 0.0, 1.0,
];

/// Blue-yellow-weak color vision.
pub const COLOR_BLIND_TRITANOPIA_EFFECT: [f64; COLOR_MATRIX_SIZE] = [
	0.967, 0.0, 0.0, 0.0, 0.0, //
	0.033, 0.733, 0.183, 0.0, 0.0, //
	0.0, 0.267, 0.817, 0.0, 0.0, //
	0.0, 0.0, 0.0, 1.0, 0.0, //
	0.0, 0.0, 0.0, 0.0, 1.0,
];

pub const NO_TRANSFORM: TransformRaw = [
	1.0, 0.0, 0.0, //
	0.0, 1.0, 0.0, //
	0.0, 0.0, 1.0,
];

pub const ZERO_RECT: RectangleRaw = (0, 0, 0, 0);

pub const DEFAULT_COLOR_EFFECT: [f64; COLOR_MATRIX_SIZE] = COLOR_NO_EFFECT;
pub const DEFAULT_TRANSFORM: TransformRaw = NO_TRANSFORM;
pub const DEFAULT_TRANSFORM_SCALE: (f64, f64) = (1.0, 1.0);
pub const DEFAULT_TRANSFORM_OFFSET: (f64, f64) = (0.0, 0.0);
pub const DEFAULT_FULLSCREEN_TRANSFORM: FullscreenTransformRaw = (1.0, (0, 0));
pub const DEFAULT_INPUT_TRANSFORM: InputTransformRaw = (false, ZERO_RECT, ZERO_RECT);
pub const DEFAULT_SOURCE: RectangleRaw = ZERO_RECT;

/// Grayscale followed by inversion.
pub fn color_inverted_grayscale_effect() -> Matrix {
	let grayscale = Matrix::from_parts(COLOR_GRAYSCALE_EFFECT, 5);
	let inversion = Matrix::from_parts(COLOR_INVERSION_EFFECT, 5);
	(&grayscale * &inversion).unwrap_or(grayscale)
}
