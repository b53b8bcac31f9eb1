use std::fmt::Debug;

use parking_lot::Mutex;

use crate::Result;

pub type Getter<T> = Box<dyn Fn() -> Result<T> + Send + Sync>;
pub type Setter<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;

/// Mediates every exchange with the outside world: a getter/setter pair
/// plus a cache that only an enclosing batch may switch on.
pub struct DataSource<T> {
	getter: Getter<T>,
	setter: Setter<T>,
	cache: Mutex<Cache<T>>,
}

struct Cache<T> {
	enabled: bool,
	value: Option<T>,
}

impl<T> DataSource<T>
where
	T: Clone + Send + Sync + 'static,
{
	pub fn dynamic<G, S>(getter: G, setter: S) -> Self
	where
		G: Fn() -> Result<T> + Send + Sync + 'static,
		S: Fn(T) -> Result<()> + Send + Sync + 'static,
	{
		DataSource {
			getter: Box::new(getter),
			setter: Box::new(setter),
			cache: Mutex::new(Cache {
				enabled: false,
				value: None,
			}),
		}
	}

	/// Always yields `value`, writes are discarded.
	pub fn constant(value: T) -> Self {
		Self::dynamic(move || Ok(value.clone()), |_| Ok(()))
	}

	pub fn data(&self) -> Result<T> {
		let enabled = {
			let cache = self.cache.lock();
			if let (true, Some(value)) = (cache.enabled, &cache.value) {
				return Ok(value.clone());
			}
			cache.enabled
		};

		tracing::trace!("pull");
		let value = (self.getter)()?;

		if enabled {
			let mut cache = self.cache.lock();
			if cache.enabled {
				cache.value = Some(value.clone());
			}
		}

		Ok(value)
	}

	pub fn set_data(&self, value: T) -> Result<()> {
		tracing::trace!("push");
		let result = (self.setter)(value);
		// The resource may clamp what it stores, the next read has to ask again.
		self.cache.lock().value = None;
		result
	}

	pub fn has_cache(&self) -> bool {
		let cache = self.cache.lock();
		cache.enabled && cache.value.is_some()
	}

	pub fn use_cache(&self) -> bool {
		self.cache.lock().enabled
	}

	pub(crate) fn set_use_cache(&self, enabled: bool) {
		let mut cache = self.cache.lock();
		cache.enabled = enabled;
		cache.value = None;
	}
}

impl<T> Debug for DataSource<T>
where
	T: Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let cache = self.cache.lock();
		f.debug_struct("DataSource")
			.field("use_cache", &cache.enabled)
			.field("cached", &cache.value)
			.finish()
	}
}
