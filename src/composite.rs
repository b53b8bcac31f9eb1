use std::fmt::Debug;
use std::sync::Arc;

use crate::batch::CacheGuard;
use crate::datasource::DataSource;
use crate::defaults;
use crate::field::{Field, RAW};
use crate::notifier::Notifier;
use crate::Result;

/// A field that is never decomposed: its only attribute is the raw value.
pub struct CompositeField<F: Field> {
	inner: Arc<CompositeInner<F>>,
}

struct CompositeInner<F: Field> {
	source: DataSource<F::Raw>,
	notifier: Notifier,
}

impl<F: Field> CompositeField<F> {
	pub fn new(source: DataSource<F::Raw>) -> Self {
		CompositeField {
			inner: Arc::new(CompositeInner {
				source,
				notifier: Notifier::new(&[RAW]),
			}),
		}
	}

	pub fn raw(&self) -> Result<F::Raw> {
		self.inner.source.data()
	}

	/// Pushes `raw` and notifies subscribers once the push succeeded.
	pub fn set_raw(&self, raw: F::Raw) -> Result<()> {
		let source = &self.inner.source;
		self.inner.notifier.try_assign(RAW, || source.set_data(raw))
	}

	pub fn reset(&self) -> Result<()> {
		self.set_raw(F::default_raw())
	}

	pub fn default(&self) -> CompositeField<F> {
		defaults::cached(|| CompositeField::new(DataSource::constant(F::default_raw())))
	}

	pub fn batch<R>(&self, func: impl FnOnce(&Self) -> Result<R>) -> Result<R> {
		let notifier = &self.inner.notifier;
		if notifier.in_batch() {
			return func(self);
		}

		notifier.batch(|| {
			let _cache = CacheGuard::enable(&self.inner.source);
			func(self)
		})
	}

	pub fn subscribe(&self, observer: impl Fn() -> Result<()> + Send + Sync + 'static) {
		self.inner.notifier.subscribe(observer)
	}

	pub fn eq_raw(&self, other: &Self) -> Result<bool> {
		Ok(self.raw()? == other.raw()?)
	}

	pub fn ptr_eq(this: &Self, other: &Self) -> bool {
		Arc::ptr_eq(&this.inner, &other.inner)
	}
}

impl<F: Field> Clone for CompositeField<F> {
	fn clone(&self) -> Self {
		CompositeField {
			inner: self.inner.clone(),
		}
	}
}

/// Handles to the same field are always equal. Otherwise the pulled raw
/// values are compared, and a failing source makes the fields unequal since
/// there is no local state to fall back to. [`CompositeField::eq_raw`]
/// reports the failure.
impl<F: Field> PartialEq for CompositeField<F> {
	fn eq(&self, other: &Self) -> bool {
		CompositeField::ptr_eq(self, other) || matches!(self.eq_raw(other), Ok(true))
	}
}

impl<F: Field> Debug for CompositeField<F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CompositeField")
			.field("source", &self.inner.source)
			.finish()
	}
}
