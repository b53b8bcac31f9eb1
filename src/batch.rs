use std::thread::{self, ThreadId};

use crate::datasource::DataSource;
use crate::notifier::Notifier;
use crate::Result;

pub(crate) struct BatchGuard<'a> {
	notifier: &'a Notifier,
	open: bool,
}

impl<'a> BatchGuard<'a> {
	pub(crate) fn enter(notifier: &'a Notifier) -> Self {
		let mut state = notifier.state.lock();
		state.depth += 1;
		if state.depth == 1 {
			tracing::trace!("batch started");
			state.dirty = false;
		}

		BatchGuard {
			notifier,
			open: true,
		}
	}

	/// Leaves the batch, flushing if it was the outermost one and something changed.
	pub(crate) fn exit(mut self) -> Result<()> {
		self.open = false;
		let flush = {
			let mut state = self.notifier.state.lock();
			state.depth -= 1;
			state.depth == 0 && std::mem::take(&mut state.dirty)
		};

		if flush {
			tracing::debug!("batch flush");
			self.notifier.notify()
		} else {
			Ok(())
		}
	}
}

impl Drop for BatchGuard<'_> {
	fn drop(&mut self) {
		// Only reached while unwinding out of the batch body.
		if self.open {
			let mut state = self.notifier.state.lock();
			state.depth -= 1;
			if state.depth == 0 {
				state.dirty = false;
			}
		}
	}
}

/// Silences one name for the thread that created it.
pub struct IgnoreGuard<'a> {
	notifier: &'a Notifier,
	thread: ThreadId,
	name: &'static str,
}

impl<'a> IgnoreGuard<'a> {
	pub(crate) fn new(notifier: &'a Notifier, name: &'static str) -> Self {
		let thread = thread::current().id();
		notifier.state.lock().ignored.push((thread, name));
		IgnoreGuard {
			notifier,
			thread,
			name,
		}
	}
}

impl Drop for IgnoreGuard<'_> {
	fn drop(&mut self) {
		let entry = (self.thread, self.name);
		let mut state = self.notifier.state.lock();
		if let Some(index) = state.ignored.iter().rposition(|ignored| *ignored == entry) {
			state.ignored.remove(index);
		}
	}
}

/// Silences every name for the thread that created it. Nests.
pub struct IgnoreAllGuard<'a> {
	notifier: &'a Notifier,
	thread: ThreadId,
}

impl<'a> IgnoreAllGuard<'a> {
	pub(crate) fn new(notifier: &'a Notifier) -> Self {
		let thread = thread::current().id();
		notifier.state.lock().ignore_all.push(thread);
		IgnoreAllGuard { notifier, thread }
	}
}

impl Drop for IgnoreAllGuard<'_> {
	fn drop(&mut self) {
		let mut state = self.notifier.state.lock();
		if let Some(index) = state.ignore_all.iter().rposition(|thread| *thread == self.thread) {
			state.ignore_all.remove(index);
		}
	}
}

/// Keeps the data source cache on for the lifetime of the guard.
pub(crate) struct CacheGuard<'a, T>
where
	T: Clone + Send + Sync + 'static,
{
	source: &'a DataSource<T>,
}

impl<'a, T> CacheGuard<'a, T>
where
	T: Clone + Send + Sync + 'static,
{
	pub(crate) fn enable(source: &'a DataSource<T>) -> Self {
		source.set_use_cache(true);
		CacheGuard { source }
	}
}

impl<T> Drop for CacheGuard<'_, T>
where
	T: Clone + Send + Sync + 'static,
{
	fn drop(&mut self) {
		self.source.set_use_cache(false);
	}
}
