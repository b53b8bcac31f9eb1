use std::fmt::Debug;
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};

use fxhash::FxHashMap;
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use smallvec::SmallVec;

use crate::batch::{BatchGuard, IgnoreAllGuard, IgnoreGuard};
use crate::Result;

pub type Observer = Arc<dyn Fn() -> Result<()> + Send + Sync>;

/// Guards local state against a pull landing in the middle of a write.
/// Writes hold it shared, loading a pulled value takes it exclusively.
/// Adopted children use their parent's gate.
type Gate = Arc<RwLock<()>>;

/// Subscribe/notify plumbing shared by every observable field.
///
/// The set of observed names is fixed at construction, each one gets its
/// own lock so concurrent writes to the same name are serialized. Writes to
/// different names are not ordered against each other: a reader on another
/// thread may observe a torn combination of two names while a batch is open.
///
/// Ignore scopes belong to the thread that opened them, so a load running
/// on one thread never silences a write made on another.
pub struct Notifier {
	observers: Mutex<Vec<Observer>>,
	pub(crate) state: Mutex<State>,
	locks: FxHashMap<&'static str, ReentrantMutex<()>>,
	gate: Mutex<Gate>,
	children: Mutex<Vec<Arc<Notifier>>>,
}

pub(crate) struct State {
	pub(crate) depth: usize,
	pub(crate) dirty: bool,
	/// Advanced after every push.
	pub(crate) generation: u64,
	pub(crate) ignore_all: SmallVec<[ThreadId; 2]>,
	pub(crate) ignored: SmallVec<[(ThreadId, &'static str); 4]>,
}

impl Notifier {
	pub fn new(names: &'static [&'static str]) -> Self {
		Notifier {
			observers: Mutex::new(Vec::new()),
			state: Mutex::new(State {
				depth: 0,
				dirty: false,
				generation: 0,
				ignore_all: SmallVec::new(),
				ignored: SmallVec::new(),
			}),
			locks: names
				.iter()
				.map(|name| (*name, ReentrantMutex::new(())))
				.collect(),
			gate: Mutex::new(Gate::default()),
			children: Mutex::new(Vec::new()),
		}
	}

	/// Registers `observer` for every committed change.
	///
	/// Observers run in subscription order. A failing observer does not stop
	/// the ones after it; the first error is returned to the writer.
	pub fn subscribe(&self, observer: impl Fn() -> Result<()> + Send + Sync + 'static) {
		self.observers.lock().push(Arc::new(observer));
	}

	/// Reports every committed change of `child` as a change of `name` on
	/// `self`, and makes the child share this notifier's gate.
	pub fn adopt(self: &Arc<Self>, child: &Arc<Notifier>, name: &'static str) {
		let parent: Weak<Notifier> = Arc::downgrade(self);
		child.subscribe(move || match parent.upgrade() {
			Some(parent) => parent.changed(name),
			None => Ok(()),
		});

		child.share_gate(&self.gate());
		self.children.lock().push(child.clone());
	}

	fn share_gate(&self, gate: &Gate) {
		*self.gate.lock() = gate.clone();
		for child in self.children.lock().iter() {
			child.share_gate(gate);
		}
	}

	fn gate(&self) -> Gate {
		self.gate.lock().clone()
	}

	pub fn is_observed(&self, name: &str) -> bool {
		let this = thread::current().id();
		let state = self.state.lock();
		!state.ignore_all.contains(&this)
			&& !state
				.ignored
				.iter()
				.any(|(thread, ignored)| *thread == this && *ignored == name)
			&& self.locks.contains_key(name)
	}

	pub fn in_batch(&self) -> bool {
		self.state.lock().depth > 0
	}

	/// Whether the current thread is inside an [`ignore_all`](Self::ignore_all) scope.
	pub fn ignoring_all(&self) -> bool {
		self.state.lock().ignore_all.contains(&thread::current().id())
	}

	/// Runs `func` with the gate held shared.
	pub(crate) fn shared<R>(&self, func: impl FnOnce() -> R) -> R {
		let gate = self.gate();
		let _shared = gate.read_recursive();
		func()
	}

	/// Runs `func` with the gate held exclusively, unless a write is in
	/// flight, a batch holds unflushed changes, or a push happened since
	/// `generation` was read. Returns whether `func` ran.
	pub(crate) fn exclusive(&self, generation: u64, func: impl FnOnce()) -> bool {
		let gate = self.gate();
		let Some(_exclusive) = gate.try_write() else {
			return false;
		};

		{
			let state = self.state.lock();
			if state.generation != generation || (state.depth > 0 && state.dirty) {
				return false;
			}
		}

		func();
		true
	}

	pub(crate) fn generation(&self) -> u64 {
		self.state.lock().generation
	}

	pub(crate) fn advance(&self) {
		let mut state = self.state.lock();
		state.generation = state.generation.wrapping_add(1);
	}

	pub fn assign<R>(&self, name: &'static str, func: impl FnOnce() -> R) -> Result<R> {
		self.try_assign(name, || Ok(func()))
	}

	/// Runs `func` under the lock of `name`, then reports the change unless
	/// `name` is currently ignored. A failed `func` reports nothing.
	pub fn try_assign<R>(&self, name: &'static str, func: impl FnOnce() -> Result<R>) -> Result<R> {
		let lock = match self.locks.get(name) {
			Some(lock) if self.is_observed(name) => lock,
			_ => return func(),
		};

		let _locked = lock.lock();
		self.shared(|| {
			let result = func()?;
			{
				// Observers reading `name` back must not report it again.
				let _ignored = self.ignore(name);
				self.changed(name)?;
			}

			Ok(result)
		})
	}

	pub(crate) fn serialize<R>(&self, name: &str, func: impl FnOnce() -> R) -> R {
		match self.locks.get(name) {
			Some(lock) => {
				let _locked = lock.lock();
				func()
			}
			None => func(),
		}
	}

	pub fn changed(&self, name: &'static str) -> Result<()> {
		{
			let mut state = self.state.lock();
			if state.depth > 0 {
				state.dirty = true;
				return Ok(());
			}

			if state.ignore_all.contains(&thread::current().id()) {
				return Ok(());
			}
		}

		tracing::trace!(name, "changed");
		self.notify()
	}

	/// Calls every observer, even after one fails. Returns the first failure.
	pub fn notify(&self) -> Result<()> {
		let observers = self.observers.lock().clone();
		self.shared(|| {
			let mut result = Ok(());
			for observer in observers {
				if let Err(err) = observer() {
					if result.is_ok() {
						result = Err(err);
					} else {
						tracing::warn!(error = %err, "observer failed");
					}
				}
			}

			result
		})
	}

	/// Defers notifications until the outermost batch exits, which then
	/// notifies exactly once if anything changed. The batch is closed even
	/// when `func` fails; its error takes precedence over a failed flush.
	pub fn batch<R>(&self, func: impl FnOnce() -> Result<R>) -> Result<R> {
		let guard = BatchGuard::enter(self);
		let result = func();
		match (guard.exit(), result) {
			(Ok(()), result) => result,
			(Err(err), Ok(_)) => Err(err),
			(Err(flush), Err(err)) => {
				tracing::warn!(error = %flush, "flush failed after a failed batch");
				Err(err)
			}
		}
	}

	pub fn ignore(&self, name: &'static str) -> IgnoreGuard<'_> {
		IgnoreGuard::new(self, name)
	}

	pub fn ignore_all(&self) -> IgnoreAllGuard<'_> {
		IgnoreAllGuard::new(self)
	}
}

impl Debug for Notifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		f.debug_struct("Notifier")
			.field("observers", &self.observers.lock().len())
			.field("depth", &state.depth)
			.field("dirty", &state.dirty)
			.field("generation", &state.generation)
			.field("ignore_all", &state.ignore_all)
			.field("ignored", &state.ignored)
			.finish()
	}
}
