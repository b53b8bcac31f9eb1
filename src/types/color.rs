use parking_lot::Mutex;

use crate::consts::{COLOR_MATRIX_SIZE, DEFAULT_COLOR_EFFECT};
use crate::matrix::Matrix;
use crate::slot::Slot;
use crate::transition::Transition;
use crate::{Error, Field, Result, Shape, WrappedField};

pub type ColorMatrixRaw = [f64; COLOR_MATRIX_SIZE];

const SIDE: usize = 5;

/// A 5x5 color transformation, plus the transition it was last dialed from.
///
/// The transition and its power are local state: neither is read from nor
/// pushed to the data source, only the matrix they produce is.
pub struct ColorMatrixFields {
	matrix: Slot<Matrix>,
	transition: Mutex<Option<Transition>>,
	power: Slot<f64>,
}

pub type ColorMatrix = WrappedField<ColorMatrixFields>;

impl Default for ColorMatrixFields {
	fn default() -> Self {
		ColorMatrixFields {
			matrix: Slot::new(Matrix::identity(SIDE)),
			transition: Mutex::new(None),
			power: Slot::new(0.0),
		}
	}
}

impl Field for ColorMatrixFields {
	type Raw = ColorMatrixRaw;

	fn default_raw() -> Self::Raw {
		DEFAULT_COLOR_EFFECT
	}
}

impl Shape for ColorMatrixFields {
	const NAMES: &'static [&'static str] = &["matrix"];

	fn compose(&self) -> Self::Raw {
		let matrix = self.matrix.get();
		ColorMatrixRaw::try_from(matrix.linear()).unwrap_or(DEFAULT_COLOR_EFFECT)
	}

	fn decompose(&self, raw: Self::Raw) {
		if let Some(matrix) = Matrix::from_linear(&raw) {
			self.matrix.set(matrix);
		}
	}
}

fn color_matrix(matrix: Option<Matrix>, what: &'static str) -> Result<Matrix> {
	match matrix {
		Some(matrix) if matrix.side_length() == SIDE => Ok(matrix),
		_ => Err(Error::Conversion(what)),
	}
}

impl ColorMatrix {
	pub fn matrix(&self) -> Result<Matrix> {
		self.read(|fields| fields.matrix.get())
	}

	/// Fails with [`Error::Conversion`] unless `matrix` is 5x5.
	pub fn set_matrix(&self, matrix: Matrix) -> Result<()> {
		let matrix = color_matrix(Some(matrix), "matrix")?;
		self.write("matrix", |fields| fields.matrix.set(matrix))
	}

	pub fn reset_matrix(&self) -> Result<()> {
		let matrix = self.default().matrix()?;
		self.set_matrix(matrix)
	}

	pub fn linear(&self) -> Result<Vec<f64>> {
		self.read(|fields| fields.matrix.get().linear().to_vec())
	}

	pub fn set_linear(&self, values: &[f64]) -> Result<()> {
		if values.len() != COLOR_MATRIX_SIZE {
			return Err(Error::Shape {
				expected: COLOR_MATRIX_SIZE,
				actual: values.len(),
			});
		}

		self.set_matrix(color_matrix(Matrix::from_linear(values), "matrix")?)
	}

	pub fn square(&self) -> Result<Vec<Vec<f64>>> {
		self.read(|fields| fields.matrix.get().square())
	}

	pub fn set_square<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<()> {
		let mut matrix = Matrix::identity(SIDE);
		matrix.set_square(rows)?;
		self.set_matrix(matrix)
	}

	pub fn transition(&self) -> Option<Transition> {
		self.shape().transition.lock().clone()
	}

	pub fn transition_power(&self) -> f64 {
		self.shape().power.get()
	}

	/// Moves the current transition to `power`: `0.0` is its start, `1.0`
	/// its end, anything outside extrapolates. Without a transition only
	/// the power is remembered.
	pub fn set_transition_power(&self, power: f64) -> Result<()> {
		let fields = self.shape();
		fields.power.set(power);

		let transition = fields.transition.lock().clone();
		match transition {
			Some(transition) => self.set_linear(&transition.at(power)),
			None => Ok(()),
		}
	}

	/// Sets up and applies a transition from `start` (the current matrix when
	/// `None`) to `end`, at `initial_power` (the last used power when `None`).
	pub fn make_transition(
		&self,
		end: &Matrix,
		start: Option<&Matrix>,
		initial_power: Option<f64>,
	) -> Result<()> {
		let start = match start {
			Some(start) => color_matrix(Some(start.clone()), "start")?,
			None => self.matrix()?,
		};
		let end = color_matrix(Some(end.clone()), "end")?;

		self.from_transition(Transition::new(start.linear(), end.linear())?, initial_power)
	}

	pub fn from_transition(&self, transition: Transition, initial_power: Option<f64>) -> Result<()> {
		let power = initial_power.unwrap_or_else(|| self.transition_power());
		*self.shape().transition.lock() = Some(transition);
		self.set_transition_power(power)
	}
}
