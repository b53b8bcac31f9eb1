use crate::{Error, Result};

/// Linear interpolation between two equally sized sequences.
///
/// `at(0.0)` yields `start`, `at(1.0)` yields `end`. Powers outside
/// `[0, 1]` extrapolate: below zero moves past `start` away from `end`,
/// above one moves past `end` away from `start`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
	start: Vec<f64>,
	delta: Vec<f64>,
}

impl Transition {
	pub fn new(start: &[f64], end: &[f64]) -> Result<Self> {
		if start.len() != end.len() {
			return Err(Error::Length {
				start: start.len(),
				end: end.len(),
			});
		}

		Ok(Self::between(start, end))
	}

	pub(crate) fn between(start: &[f64], end: &[f64]) -> Self {
		Transition {
			start: start.to_vec(),
			delta: start.iter().zip(end).map(|(from, to)| to - from).collect(),
		}
	}

	pub fn at(&self, power: f64) -> Vec<f64> {
		self.start
			.iter()
			.zip(&self.delta)
			.map(|(start, delta)| start + delta * power)
			.collect()
	}

	pub fn start(&self) -> &[f64] {
		&self.start
	}

	pub fn end(&self) -> Vec<f64> {
		self.at(1.0)
	}

	pub fn len(&self) -> usize {
		self.start.len()
	}

	pub fn is_empty(&self) -> bool {
		self.start.is_empty()
	}
}

/// Returns the interpolation function from `start` to `end`.
pub fn get_transition(start: &[f64], end: &[f64]) -> Result<impl Fn(f64) -> Vec<f64>> {
	let transition = Transition::new(start, end)?;
	Ok(move |power| transition.at(power))
}
