//! Square matrices over a flat, row-major backing sequence.
//!
//! Every assignment rounds elements to [`PRECISION`] decimal places, so a
//! matrix survives a round trip through single-precision storage and still
//! compares equal to what was written.

use std::ops::{Add, Mul, Neg, Sub};

use crate::{Error, Result};

/// Decimal places kept by every matrix assignment.
pub const PRECISION: i32 = 5;

/// Serialized as its linear view. Deserializing goes through
/// [`Matrix::from_linear`], so non-square lengths are rejected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct Matrix {
	linear: Vec<f64>,
	side: usize,
}

pub fn round(value: f64) -> f64 {
	let scale = 10f64.powi(PRECISION);
	let rounded = (value * scale).round() / scale;
	// Folds -0.0 into 0.0.
	rounded + 0.0
}

/// Side of the square holding `len` elements, if there is one.
pub fn side_length(len: usize) -> Option<usize> {
	if len == 0 {
		return None;
	}

	let side = (len as f64).sqrt().round() as usize;
	(side * side == len).then_some(side)
}

/// Index of (`row`, `col`) in the linear view of a matrix with `side` columns.
#[inline]
pub fn position(side: usize, row: usize, col: usize) -> usize {
	row * side + col
}

impl Matrix {
	pub(crate) fn from_parts(values: impl IntoIterator<Item = f64>, side: usize) -> Self {
		Matrix {
			linear: values.into_iter().map(round).collect(),
			side,
		}
	}

	pub fn identity(side: usize) -> Self {
		Self::from_parts(
			(0..side * side).map(|index| if index / side == index % side { 1.0 } else { 0.0 }),
			side,
		)
	}

	pub fn from_linear(values: &[f64]) -> Option<Self> {
		let side = side_length(values.len())?;
		Some(Self::from_parts(values.iter().copied(), side))
	}

	pub fn from_square<R: AsRef<[f64]>>(rows: &[R]) -> Option<Self> {
		let side = rows.len();
		if side == 0 || rows.iter().any(|row| row.as_ref().len() != side) {
			return None;
		}

		Some(Self::from_parts(
			rows.iter().flat_map(|row| row.as_ref().iter().copied()),
			side,
		))
	}

	/// Reads `rows` as a square first, falling back to their flattened elements.
	pub fn from_any<R: AsRef<[f64]>>(rows: &[R]) -> Option<Self> {
		Self::from_square(rows).or_else(|| {
			let flat: Vec<f64> = rows
				.iter()
				.flat_map(|row| row.as_ref().iter().copied())
				.collect();
			Self::from_linear(&flat)
		})
	}

	#[inline]
	pub fn side_length(&self) -> usize {
		self.side
	}

	#[inline]
	pub fn linear(&self) -> &[f64] {
		&self.linear
	}

	pub fn set_linear(&mut self, values: &[f64]) -> Result<()> {
		if values.len() != self.linear.len() {
			return Err(Error::Shape {
				expected: self.linear.len(),
				actual: values.len(),
			});
		}

		for (slot, value) in self.linear.iter_mut().zip(values) {
			*slot = round(*value);
		}

		Ok(())
	}

	pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
		self.linear.chunks(self.side.max(1))
	}

	pub fn square(&self) -> Vec<Vec<f64>> {
		self.rows().map(<[f64]>::to_vec).collect()
	}

	pub fn set_square<R: AsRef<[f64]>>(&mut self, rows: &[R]) -> Result<()> {
		let actual = rows.iter().map(|row| row.as_ref().len()).sum();
		if rows.len() != self.side || rows.iter().any(|row| row.as_ref().len() != self.side) {
			return Err(Error::Shape {
				expected: self.linear.len(),
				actual,
			});
		}

		let flat: Vec<f64> = rows
			.iter()
			.flat_map(|row| row.as_ref().iter().copied())
			.collect();
		self.set_linear(&flat)
	}

	pub fn get(&self, row: usize, col: usize) -> Option<f64> {
		if row >= self.side || col >= self.side {
			return None;
		}

		self.linear.get(position(self.side, row, col)).copied()
	}

	/// Row-by-column product, composing two transformations. `None` when sides differ.
	pub fn product(&self, other: &Matrix) -> Option<Matrix> {
		if self.side != other.side {
			return None;
		}

		let side = self.side;
		let values = (0..side * side).map(|index| {
			let (row, col) = (index / side, index % side);
			(0..side)
				.map(|k| self.linear[position(side, row, k)] * other.linear[position(side, k, col)])
				.sum()
		});

		Some(Self::from_parts(values, side))
	}

	fn map(&self, func: impl Fn(f64) -> f64) -> Matrix {
		Self::from_parts(self.linear.iter().map(|value| func(*value)), self.side)
	}

	fn zip_with(&self, other: &Matrix, func: impl Fn(f64, f64) -> f64) -> Option<Matrix> {
		if self.side != other.side {
			return None;
		}

		Some(Self::from_parts(
			self.linear
				.iter()
				.zip(&other.linear)
				.map(|(a, b)| func(*a, *b)),
			self.side,
		))
	}
}

/// Builds a 5x5 color matrix scaling each RGBA channel by `mul`, then adding `add`.
pub fn simple_color_matrix(mul: [f64; 4], add: [f64; 4]) -> Matrix {
	let mut linear = Matrix::identity(5).linear;
	for channel in 0..4 {
		linear[position(5, channel, channel)] = mul[channel];
		linear[position(5, 4, channel)] = add[channel];
	}

	Matrix::from_parts(linear, 5)
}

impl TryFrom<Vec<f64>> for Matrix {
	type Error = Error;

	fn try_from(values: Vec<f64>) -> Result<Self> {
		Matrix::from_linear(&values).ok_or(Error::Conversion("linear"))
	}
}

impl From<Matrix> for Vec<f64> {
	fn from(matrix: Matrix) -> Self {
		matrix.linear
	}
}

impl Mul<&Matrix> for &Matrix {
	type Output = Option<Matrix>;

	fn mul(self, other: &Matrix) -> Self::Output {
		self.product(other)
	}
}

impl Add<&Matrix> for &Matrix {
	type Output = Option<Matrix>;

	fn add(self, other: &Matrix) -> Self::Output {
		self.zip_with(other, |a, b| a + b)
	}
}

impl Sub<&Matrix> for &Matrix {
	type Output = Option<Matrix>;

	fn sub(self, other: &Matrix) -> Self::Output {
		self.zip_with(other, |a, b| a - b)
	}
}

impl Mul<f64> for &Matrix {
	type Output = Matrix;

	fn mul(self, scalar: f64) -> Matrix {
		self.map(|value| value * scalar)
	}
}

impl Add<f64> for &Matrix {
	type Output = Matrix;

	fn add(self, scalar: f64) -> Matrix {
		self.map(|value| value + scalar)
	}
}

impl Sub<f64> for &Matrix {
	type Output = Matrix;

	fn sub(self, scalar: f64) -> Matrix {
		self.map(|value| value - scalar)
	}
}

impl Neg for &Matrix {
	type Output = Matrix;

	fn neg(self) -> Matrix {
		self * -1.0
	}
}
