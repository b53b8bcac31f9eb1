//! Dial-able color effects.
//!
//! Each preset is a [`Transition`] from the identity color matrix: power
//! `0.0` applies nothing, `1.0` applies the full effect. Feed one to
//! [`ColorMatrix::from_transition`](crate::types::ColorMatrix).

use crate::consts::{
	COLOR_BLIND_DEUTERANOPIA_EFFECT, COLOR_BLIND_PROTANOPIA_EFFECT, COLOR_BLIND_TRITANOPIA_EFFECT,
	COLOR_GRAYSCALE_EFFECT, COLOR_INVERSION_EFFECT, COLOR_MATRIX_SIZE, COLOR_NO_EFFECT,
	COLOR_SEPIA_EFFECT,
};
use crate::transition::Transition;

const CONTRAST: [f64; COLOR_MATRIX_SIZE] = [
	1.2, 0.0, 0.0, 0.0, -0.2, //
	0.0, 1.2, 0.0, 0.0, -0.2, //
	0.0, 0.0, 1.2, 0.0, -0.2, //
	0.0, 0.0, 0.0, 1.0, 0.0, //
	0.0, 0.0, 0.0, 0.0, 1.0,
];

const BINARY: [f64; COLOR_MATRIX_SIZE] = [
	127.0, 127.0, 127.0, 0.0, 0.0, //
	127.0, 127.0, 127.0, 0.0, 0.0, //
	127.0, 127.0, 127.0, 0.0, 0.0, //
	0.0, 0.0, 0.0, 1.0, 0.0, //
	-180.0, -180.0, -180.0, 0.0, 1.0,
];

fn preset(end: &[f64; COLOR_MATRIX_SIZE]) -> Transition {
	Transition::between(&COLOR_NO_EFFECT, end)
}

/// Black becomes white and white becomes black.
pub fn inversion() -> Transition {
	preset(&COLOR_INVERSION_EFFECT)
}

pub fn grayscale() -> Transition {
	preset(&COLOR_GRAYSCALE_EFFECT)
}

pub fn sepia() -> Transition {
	preset(&COLOR_SEPIA_EFFECT)
}

pub fn contrast() -> Transition {
	preset(&CONTRAST)
}

/// Only black and white stay. Power `-1.0` gives the inverted picture.
pub fn binary() -> Transition {
	preset(&BINARY)
}

pub fn blindness_deuteranopia() -> Transition {
	preset(&COLOR_BLIND_DEUTERANOPIA_EFFECT)
}

pub fn blindness_protanopia() -> Transition {
	preset(&COLOR_BLIND_PROTANOPIA_EFFECT)
}

pub fn blindness_tritanopia() -> Transition {
	preset(&COLOR_BLIND_TRITANOPIA_EFFECT)
}
