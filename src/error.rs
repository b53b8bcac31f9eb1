pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Raised by a data source getter or setter.
	#[error("external resource failed: {0}")]
	Source(#[source] BoxError),

	#[error("unable to convert `{0}` value to matrix")]
	Conversion(&'static str),

	#[error("expected {expected} elements, got {actual}")]
	Shape { expected: usize, actual: usize },

	#[error("transition endpoints differ in length: {start} != {end}")]
	Length { start: usize, end: usize },
}

impl Error {
	pub fn external(err: impl Into<BoxError>) -> Self {
		Error::Source(err.into())
	}
}
