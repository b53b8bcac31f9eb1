use std::fmt::Debug;
use std::sync::{Arc, Weak};

use enclose::enclose;
use parking_lot::ReentrantMutex;

use crate::batch::CacheGuard;
use crate::datasource::DataSource;
use crate::defaults;
use crate::notifier::Notifier;
use crate::Result;

pub(crate) const RAW: &str = "raw";

/// A value exchanged with the outside world as one raw value.
pub trait Field: Send + Sync + 'static {
	type Raw: Clone + PartialEq + Debug + Send + Sync + 'static;

	/// The value a field returns to on reset.
	fn default_raw() -> Self::Raw;
}

/// A raw value decomposed into named sub-fields.
///
/// `compose` must be a pure function of the sub-fields, and `decompose`
/// must set every one of them without notifying anybody: nested
/// [`WrappedField`] children are updated with [`WrappedField::load`].
pub trait Shape: Field + Default {
	/// Sub-fields synchronized against the data source. Fixed per type.
	const NAMES: &'static [&'static str];

	fn compose(&self) -> Self::Raw;

	fn decompose(&self, raw: Self::Raw);

	/// Nested observable sub-fields, each of which forwards its changes
	/// to the parent under its own name.
	fn children(&self) -> Vec<(&'static str, &Arc<Notifier>)> {
		Vec::new()
	}
}

pub struct WrappedField<S: Shape> {
	inner: Arc<Inner<S>>,
}

struct Inner<S: Shape> {
	source: Option<DataSource<S::Raw>>,
	notifier: Arc<Notifier>,
	pushing: ReentrantMutex<()>,
	shape: S,
}

impl<S: Shape> Inner<S> {
	fn load(&self, raw: S::Raw) {
		let _ignore = self.notifier.ignore_all();
		self.shape.decompose(raw);
	}

	/// Reads the data source and, on a fresh read, loads the value into
	/// local state. The load is dropped when a write was in flight or a push
	/// landed while the getter ran: local state is at least as new then.
	fn pull(&self, source: &DataSource<S::Raw>) -> Result<S::Raw> {
		let fresh = !source.has_cache();
		let generation = self.notifier.generation();
		let raw = source.data()?;
		if fresh && !self.notifier.ignoring_all() {
			self.notifier.exclusive(generation, || self.load(raw.clone()));
		}

		Ok(raw)
	}

	/// Refreshes every sub-field from the data source, unless the current
	/// batch already holds a pulled value.
	fn sync(&self) -> Result<()> {
		match &self.source {
			Some(source) if !source.has_cache() && !self.notifier.ignoring_all() => {
				self.pull(source).map(drop)
			}
			_ => Ok(()),
		}
	}

	fn push(&self) -> Result<()> {
		match &self.source {
			Some(source) => self.pushed(|| source.set_data(self.shape.compose())),
			None => Ok(()),
		}
	}

	/// Pushes are serialized, so the last one composes every prior write.
	fn pushed(&self, func: impl FnOnce() -> Result<()>) -> Result<()> {
		let _pushing = self.pushing.lock();
		let result = func();
		self.notifier.advance();
		result
	}
}

impl<S: Shape> WrappedField<S> {
	/// Binds a new field to `source`.
	pub fn new(source: DataSource<S::Raw>) -> Self {
		Self::build(Some(source))
	}

	/// A field living only in memory: its raw value is its sub-fields.
	pub fn unbound() -> Self {
		Self::build(None)
	}

	fn build(source: Option<DataSource<S::Raw>>) -> Self {
		let shape = S::default();
		shape.decompose(S::default_raw());

		let notifier = Arc::new(Notifier::new(S::NAMES));
		for (name, child) in shape.children() {
			notifier.adopt(child, name);
		}

		let inner = Arc::new_cyclic(|this: &Weak<Inner<S>>| {
			// Registered first, so every other observer sees the pushed state.
			notifier.subscribe(enclose!((this) move || match this.upgrade() {
				Some(inner) => inner.push(),
				None => Ok(()),
			}));

			Inner {
				source,
				notifier,
				pushing: ReentrantMutex::new(()),
				shape,
			}
		});

		WrappedField { inner }
	}

	pub fn raw(&self) -> Result<S::Raw> {
		match &self.inner.source {
			Some(source) => self.inner.pull(source),
			None => Ok(self.inner.shape.compose()),
		}
	}

	/// Pushes `raw` at once. The cache is invalidated, so the next read
	/// reflects whatever the resource actually stored.
	pub fn set_raw(&self, raw: S::Raw) -> Result<()> {
		let inner = &self.inner;
		inner.notifier.shared(|| match &inner.source {
			Some(source) => inner.pushed(|| {
				source.set_data(raw.clone())?;
				inner.load(raw);
				Ok(())
			}),
			None => {
				inner.load(raw);
				inner.notifier.changed(RAW)
			}
		})
	}

	pub fn reset(&self) -> Result<()> {
		self.set_raw(S::default_raw())
	}

	/// Read-only sibling bound to the default raw value, shared per type.
	pub fn default(&self) -> WrappedField<S> {
		defaults::cached(|| WrappedField::new(DataSource::constant(S::default_raw())))
	}

	/// The raw value composed from local sub-fields, without a pull.
	pub fn composed(&self) -> S::Raw {
		self.inner.shape.compose()
	}

	/// Replaces local sub-fields with `raw` without notifying or pushing.
	pub fn load(&self, raw: S::Raw) {
		self.inner.load(raw)
	}

	pub fn read<R>(&self, func: impl FnOnce(&S) -> R) -> Result<R> {
		self.inner.sync()?;
		Ok(func(&self.inner.shape))
	}

	/// Assigns sub-field `name` on top of the freshest external state.
	///
	/// `name` must be one of [`Shape::NAMES`]; any other name is changed
	/// locally and never pushed.
	pub fn write<R>(&self, name: &'static str, func: impl FnOnce(&S) -> R) -> Result<R> {
		debug_assert!(S::NAMES.contains(&name), "`{name}` is not a synchronized sub-field");
		self.inner.sync()?;
		self.inner.notifier.assign(name, || func(&self.inner.shape))
	}

	pub fn nested<C: Shape>(&self, func: impl FnOnce(&S) -> &WrappedField<C>) -> Result<&WrappedField<C>> {
		self.inner.sync()?;
		Ok(func(&self.inner.shape))
	}

	/// Copies `value` into the nested child, which keeps its identity.
	pub fn write_nested<C: Shape>(
		&self,
		name: &'static str,
		func: impl FnOnce(&S) -> &WrappedField<C>,
		value: &WrappedField<C>,
	) -> Result<()> {
		debug_assert!(S::NAMES.contains(&name), "`{name}` is not a synchronized sub-field");
		self.inner.sync()?;
		let raw = value.raw()?;
		let child = func(&self.inner.shape);
		self.inner.notifier.serialize(name, || child.set_raw(raw))
	}

	/// Runs `func` as one transaction: reads inside hit a single cached pull
	/// and all sub-field writes are pushed once, when the outermost batch exits.
	pub fn batch<R>(&self, func: impl FnOnce(&Self) -> Result<R>) -> Result<R> {
		let notifier = &self.inner.notifier;
		if notifier.in_batch() {
			return func(self);
		}

		notifier.batch(|| {
			let _cache = self.inner.source.as_ref().map(CacheGuard::enable);
			func(self)
		})
	}

	/// Runs `observer` after every committed change, following the push.
	/// See [`Notifier::subscribe`] for how failures are reported.
	pub fn subscribe(&self, observer: impl Fn() -> Result<()> + Send + Sync + 'static) {
		self.inner.notifier.subscribe(observer)
	}

	/// Local state, without a pull.
	pub(crate) fn shape(&self) -> &S {
		&self.inner.shape
	}

	pub fn notifier(&self) -> &Arc<Notifier> {
		&self.inner.notifier
	}

	pub fn in_batch(&self) -> bool {
		self.inner.notifier.in_batch()
	}

	pub fn is_bound(&self) -> bool {
		self.inner.source.is_some()
	}

	/// Compares freshly pulled raw values, reporting a failing source.
	pub fn eq_raw(&self, other: &Self) -> Result<bool> {
		Ok(self.raw()? == other.raw()?)
	}

	pub fn ptr_eq(this: &Self, other: &Self) -> bool {
		Arc::ptr_eq(&this.inner, &other.inner)
	}
}

impl<S: Shape> Clone for WrappedField<S> {
	fn clone(&self) -> Self {
		WrappedField {
			inner: self.inner.clone(),
		}
	}
}

impl<S: Shape> Default for WrappedField<S> {
	fn default() -> Self {
		WrappedField::unbound()
	}
}

/// Compares pulled raw values. When a source fails the local state is
/// compared instead; use [`WrappedField::eq_raw`] to see the failure.
impl<S: Shape> PartialEq for WrappedField<S> {
	fn eq(&self, other: &Self) -> bool {
		if WrappedField::ptr_eq(self, other) {
			return true;
		}

		match self.eq_raw(other) {
			Ok(equal) => equal,
			Err(err) => {
				tracing::debug!(error = %err, "comparing local state");
				self.composed() == other.composed()
			}
		}
	}
}

impl<S: Shape> Debug for WrappedField<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WrappedField")
			.field("local", &self.composed())
			.field("bound", &self.is_bound())
			.finish()
	}
}
