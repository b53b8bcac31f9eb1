use std::any::{Any, TypeId};
use std::sync::OnceLock;

use fxhash::FxHashMap;
use parking_lot::Mutex;

type Registry = Mutex<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>>;

static DEFAULTS: OnceLock<Registry> = OnceLock::new();

/// Returns the process-wide instance of `T`, building it with `init` on first use.
pub(crate) fn cached<T>(init: impl FnOnce() -> T) -> T
where
	T: Clone + Send + Sync + 'static,
{
	let mut registry = DEFAULTS.get_or_init(Default::default).lock();
	if let Some(value) = registry
		.get(&TypeId::of::<T>())
		.and_then(|value| value.downcast_ref::<T>())
	{
		return value.clone();
	}

	tracing::debug!(ty = std::any::type_name::<T>(), "creating default sibling");
	let value = init();
	registry.insert(TypeId::of::<T>(), Box::new(value.clone()));
	value
}
