use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use magwrap::consts::{
	COLOR_GRAYSCALE_EFFECT, COLOR_INVERSION_EFFECT, COLOR_NO_EFFECT, DEFAULT_INPUT_TRANSFORM,
	NO_TRANSFORM, ZERO_RECT,
};
use magwrap::types::{
	transform_matrix, ColorMatrix, FiltersList, FullscreenTransform, InputTransform, Rectangle,
	Scale, Vector2, WindowTransform,
};
use magwrap::{effects, Error, Matrix};
use mockall::predicate;


use mock::{Spy, Store};

fn init() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn rectangle_start_and_end() {
	init();

	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.source());

	rect.set_start_same(5).unwrap();
	assert_eq!(rect.raw().unwrap(), (5, 5, 0, 0));
	assert_eq!(rect.same().unwrap(), None);

	rect.set_end_same(5).unwrap();
	assert_eq!(rect.raw().unwrap(), (5, 5, 5, 5));
	assert_eq!(rect.same().unwrap(), Some(5));
	assert_eq!(store.get(), (5, 5, 5, 5));
	assert_eq!(store.writes(), 2);
}

#[test]
fn reset_returns_to_default() {
	let store = Store::new((1, 2, 3, 4));
	let rect = Rectangle::new(store.source());

	rect.reset().unwrap();
	assert_eq!(rect.raw().unwrap(), rect.default().raw().unwrap());
	assert_eq!(store.get(), ZERO_RECT);

	rect.set_left(9).unwrap();
	rect.set_bottom(8).unwrap();
	rect.reset_left().unwrap();
	assert_eq!(rect.raw().unwrap(), (0, 0, 0, 8));
}

#[test]
fn default_sibling_is_shared() {
	let first = Rectangle::new(Store::new((1, 1, 1, 1)).source());
	let second = Rectangle::unbound();

	assert!(Rectangle::ptr_eq(&first.default(), &second.default()));
	assert_eq!(first.default().raw().unwrap(), ZERO_RECT);
	assert_eq!(Scale::unbound().default().raw().unwrap(), (1.0, 1.0));
	assert_eq!(Vector2::unbound().default().raw().unwrap(), (0.0, 0.0));
}

#[test]
fn raw_reads_back() {
	let store = Store::new(NO_TRANSFORM);
	let transform = WindowTransform::new(store.source());

	let raw = transform_matrix(2.0, 2.0, 10.0, 20.0);
	transform.set_raw(raw).unwrap();
	assert_eq!(transform.raw().unwrap(), raw);
	assert_eq!(transform.offset().unwrap().x().unwrap(), 10.0);
}

#[test]
fn external_changes_are_pulled() {
	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.source());
	assert_eq!(rect.left().unwrap(), 0);

	store.put((1, 2, 3, 4));
	assert_eq!(rect.left().unwrap(), 1);

	// Applied on top of the freshest state, siblings are kept.
	rect.set_top(7).unwrap();
	assert_eq!(store.get(), (1, 7, 3, 4));
}

#[test]
fn batch_pushes_once() {
	let spy = mock::SharedMock::new();
	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.spied_source(&spy));

	spy.get()
		.expect_pushed()
		.with(predicate::eq("(1, 2, 3, 4)".to_string()))
		.times(1)
		.return_const(());

	rect.batch(|rect| {
		rect.set_left(1)?;
		rect.set_top(2)?;
		rect.batch(|rect| rect.set_right(3))?;
		rect.set_bottom(4)
	})
	.unwrap();

	spy.get().checkpoint();
	assert_eq!(store.get(), (1, 2, 3, 4));
	assert_eq!(store.writes(), 1);
}

#[test]
fn batch_pulls_once() {
	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.source());

	rect.batch(|rect| {
		let first = rect.raw()?;
		store.put((9, 9, 9, 9));
		assert_eq!(rect.raw()?, first);
		assert_eq!(rect.left()?, 0);
		Ok(())
	})
	.unwrap();

	assert_eq!(store.reads(), 1);
	assert_eq!(store.writes(), 0);
	assert_eq!(rect.raw().unwrap(), (9, 9, 9, 9));
}

#[test]
fn every_batch_pulls_fresh() {
	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.source());

	assert_eq!(rect.batch(|rect| rect.left()).unwrap(), 0);
	store.put((3, 3, 3, 3));
	assert_eq!(rect.batch(|rect| rect.left()).unwrap(), 3);
	assert_eq!(store.reads(), 2);
}

#[test]
fn subscribers_are_notified() {
	let spy = mock::SharedMock::new();
	let rect = Rectangle::new(Store::new(ZERO_RECT).source());

	rect.subscribe({
		let spy = spy.clone();
		move || {
			spy.get().trigger();
			Ok(())
		}
	});

	spy.get().expect_trigger().times(1).return_const(());
	rect.set_left(3).unwrap();
	spy.get().checkpoint();

	spy.get().expect_trigger().times(1).return_const(());
	rect.set_same(4).unwrap();
	spy.get().checkpoint();

	spy.get().expect_trigger().times(0).return_const(());
	rect.batch(|rect| rect.same()).unwrap();
	rect.right().unwrap();
	spy.get().checkpoint();
}

#[test]
fn nested_assignment_keeps_identity() {
	let store = Store::new(DEFAULT_INPUT_TRANSFORM);
	let input = InputTransform::new(store.source());
	let child = input.source().unwrap().clone();

	let other = Rectangle::unbound();
	other.set_raw((1, 2, 3, 4)).unwrap();
	input.set_source(&other).unwrap();

	assert!(Rectangle::ptr_eq(input.source().unwrap(), &child));
	assert!(!Rectangle::ptr_eq(input.source().unwrap(), &other));
	assert_eq!(child.raw().unwrap(), (1, 2, 3, 4));
	assert_eq!(store.get(), (false, (1, 2, 3, 4), ZERO_RECT));
}

#[test]
fn every_nested_child_pushes() {
	let store = Store::new(DEFAULT_INPUT_TRANSFORM);
	let input = InputTransform::new(store.source());

	input.source().unwrap().set_left(1).unwrap();
	input.destination().unwrap().set_right(7).unwrap();
	assert_eq!(store.get(), (false, (1, 0, 0, 0), (0, 0, 7, 0)));
	assert_eq!(store.writes(), 2);

	input
		.batch(|input| {
			input.set_enabled(true)?;
			input.source()?.set_same(2)?;
			input.destination()?.set_end_same(5)
		})
		.unwrap();

	assert_eq!(store.get(), (true, (2, 2, 2, 2), (0, 0, 5, 5)));
	assert_eq!(store.writes(), 3);

	input.reset_destination().unwrap();
	assert_eq!(store.get().2, ZERO_RECT);
}

#[test]
fn nested_children_see_external_changes() {
	let store = Store::new(DEFAULT_INPUT_TRANSFORM);
	let input = InputTransform::new(store.source());

	store.put((true, (1, 1, 1, 1), (2, 2, 2, 2)));
	assert_eq!(input.destination().unwrap().same().unwrap(), Some(2));

	input.source().unwrap().set_top(5).unwrap();
	assert_eq!(store.get(), (true, (1, 5, 1, 1), (2, 2, 2, 2)));
}

#[test]
fn failures_propagate() {
	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.source());

	store.fail(true);
	assert!(matches!(rect.left(), Err(Error::Source(_))));
	assert!(matches!(rect.set_left(1), Err(Error::Source(_))));
	store.fail(false);
	assert_eq!(rect.raw().unwrap(), ZERO_RECT);
}

#[test]
fn failed_flush_keeps_local_state() {
	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.source());

	let result = rect.batch(|rect| {
		rect.set_left(4)?;
		store.fail(true);
		Ok(())
	});

	assert!(matches!(result, Err(Error::Source(_))));
	assert!(!rect.in_batch());
	assert_eq!(rect.composed(), (4, 0, 0, 0));

	store.fail(false);
	assert_eq!(store.get(), ZERO_RECT);
	assert_eq!(rect.raw().unwrap(), ZERO_RECT);
}

#[test]
fn failed_body_still_flushes() {
	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.source());

	let result: magwrap::Result<()> = rect.batch(|rect| {
		rect.set_left(2)?;
		Err(Error::Conversion("body"))
	});

	assert!(matches!(result, Err(Error::Conversion("body"))));
	assert_eq!(store.get(), (2, 0, 0, 0));
}

#[test]
fn window_transform_pair() {
	let store = Store::new(NO_TRANSFORM);
	let transform = WindowTransform::new(store.source());

	transform.set_pair(((2.0, 2.0), (100.0, 50.0))).unwrap();
	assert_eq!(store.get(), [2.0, 0.0, -100.0, 0.0, 2.0, -50.0, 0.0, 0.0, 1.0]);
	assert_eq!(store.writes(), 1);
	assert_eq!(transform.pair().unwrap(), ((2.0, 2.0), (100.0, 50.0)));
	assert_eq!(transform.scale().unwrap().same().unwrap(), Some(2.0));

	transform.reset_offset().unwrap();
	assert_eq!(transform.pair().unwrap(), ((2.0, 2.0), (0.0, 0.0)));
	assert_eq!(store.get()[2], 0.0);
}

#[test]
fn fullscreen_transform() {
	let store = Store::new((1.0, (0, 0)));
	let transform = FullscreenTransform::new(store.source());

	transform.set_scale(2.0).unwrap();
	transform.offset().unwrap().set_same(10).unwrap();
	assert_eq!(store.get(), (2.0, (10, 10)));

	transform.reset().unwrap();
	assert_eq!(store.get(), (1.0, (0, 0)));
	assert_eq!(transform.offset().unwrap().same().unwrap(), Some(0));
}

#[test]
fn color_matrix_transitions() {
	let store = Store::new(COLOR_NO_EFFECT);
	let color = ColorMatrix::new(store.source());

	color.from_transition(effects::inversion(), Some(1.0)).unwrap();
	assert_eq!(store.get(), COLOR_INVERSION_EFFECT);
	assert_eq!(color.transition_power(), 1.0);

	color.set_transition_power(0.5).unwrap();
	let matrix = color.matrix().unwrap();
	assert_eq!(matrix.get(0, 0), Some(0.0));
	assert_eq!(matrix.get(4, 0), Some(0.5));
	assert_eq!(matrix.get(3, 3), Some(1.0));

	color.set_transition_power(0.0).unwrap();
	assert_eq!(store.get(), COLOR_NO_EFFECT);

	let grayscale = Matrix::from_linear(&COLOR_GRAYSCALE_EFFECT).unwrap();
	color.make_transition(&grayscale, None, Some(1.0)).unwrap();
	assert_eq!(color.linear().unwrap(), COLOR_GRAYSCALE_EFFECT.to_vec());
	assert_eq!(color.transition().unwrap().start(), &COLOR_NO_EFFECT[..]);

	color.reset_matrix().unwrap();
	assert_eq!(store.get(), COLOR_NO_EFFECT);
}

#[test]
fn color_matrix_rejects_bad_shapes() {
	let color = ColorMatrix::new(Store::new(COLOR_NO_EFFECT).source());

	assert!(matches!(
		color.make_transition(&Matrix::identity(3), None, None),
		Err(Error::Conversion("end"))
	));
	assert!(matches!(
		color.make_transition(&Matrix::identity(5), Some(&Matrix::identity(4)), None),
		Err(Error::Conversion("start"))
	));
	assert!(matches!(
		color.set_linear(&[1.0; 5]),
		Err(Error::Shape {
			expected: 25,
			actual: 5
		})
	));
	assert!(matches!(
		color.set_square(&[vec![1.0; 3]]),
		Err(Error::Shape { .. })
	));
	assert!(matches!(
		color.set_matrix(Matrix::identity(3)),
		Err(Error::Conversion("matrix"))
	));
	assert!(color.transition().is_none());
}

#[test]
fn filters_list() {
	let spy = mock::SharedMock::new();
	let store = Store::new(vec![]);
	let filters = FiltersList::new(store.source());

	filters.subscribe({
		let spy = spy.clone();
		move || {
			spy.get().trigger();
			Ok(())
		}
	});

	spy.get().expect_trigger().times(2).return_const(());
	filters.set_raw(vec![101, 202]).unwrap();
	assert_eq!(filters.raw().unwrap(), vec![101, 202]);

	filters.reset().unwrap();
	spy.get().checkpoint();

	assert_eq!(store.get(), Vec::<isize>::new());
	assert_eq!(filters, filters.default());
}

#[test]
fn failed_composite_write_is_silent() {
	let spy = mock::SharedMock::new();
	let store = Store::new(vec![1]);
	let filters = FiltersList::new(store.source());

	filters.subscribe({
		let spy = spy.clone();
		move || {
			spy.get().trigger();
			Ok(())
		}
	});

	spy.get().expect_trigger().times(0).return_const(());
	store.fail(true);
	assert!(filters.set_raw(vec![2]).is_err());
	spy.get().checkpoint();
}

#[test]
fn writes_from_another_thread() {
	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.source());

	std::thread::spawn({
		let rect = rect.clone();
		move || rect.set_right(7)
	})
	.join()
	.unwrap()
	.unwrap();

	assert_eq!(rect.right().unwrap(), 7);
	assert_eq!(store.get(), (0, 0, 7, 0));
}

#[test]
fn reads_on_another_thread_keep_every_write() {
	const WRITES: i32 = 2000;

	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.source());
	let done = Arc::new(AtomicBool::new(false));

	let reader = thread::spawn({
		let rect = rect.clone();
		let done = done.clone();
		move || {
			while !done.load(Ordering::SeqCst) {
				rect.left().unwrap();
			}
		}
	});

	for top in 1..=WRITES {
		rect.set_top(top).unwrap();
	}

	done.store(true, Ordering::SeqCst);
	reader.join().unwrap();

	assert_eq!(store.writes(), WRITES as usize);
	assert_eq!(store.get(), (0, WRITES, 0, 0));
	assert_eq!(rect.top().unwrap(), WRITES);
}

#[test]
fn contended_writes_all_land() {
	const TOP: i32 = 500;
	const RIGHT: i32 = 300;

	let store = Store::new(ZERO_RECT);
	let rect = Rectangle::new(store.source());
	let done = Arc::new(AtomicBool::new(false));

	let reader = thread::spawn({
		let rect = rect.clone();
		let done = done.clone();
		move || {
			while !done.load(Ordering::SeqCst) {
				rect.raw().unwrap();
			}
		}
	});

	let writers: Vec<_> = [(true, TOP), (true, TOP), (false, RIGHT)]
		.into_iter()
		.map(|(top, count)| {
			let rect = rect.clone();
			thread::spawn(move || {
				for value in 1..=count {
					if top {
						rect.set_top(value).unwrap();
					} else {
						rect.set_right(value).unwrap();
					}
				}
			})
		})
		.collect();

	for writer in writers {
		writer.join().unwrap();
	}

	done.store(true, Ordering::SeqCst);
	reader.join().unwrap();

	assert_eq!(store.writes(), (2 * TOP + RIGHT) as usize);
	assert_eq!(store.get(), (0, TOP, RIGHT, 0));
	assert_eq!(rect.raw().unwrap(), (0, TOP, RIGHT, 0));
}

#[test]
fn failing_source_compares_local_state() {
	let store = Store::new((1, 2, 3, 4));
	let rect = Rectangle::new(store.source());
	let other = Rectangle::unbound();
	rect.top().unwrap();
	other.set_raw((1, 2, 3, 4)).unwrap();

	store.fail(true);
	assert!(rect.eq_raw(&rect.clone()).is_err());
	assert_eq!(rect, rect.clone());
	assert_eq!(rect, other);

	other.set_left(9).unwrap();
	assert_ne!(rect, other);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "not a synchronized sub-field")]
fn writes_need_a_synchronized_name() {
	let rect = Rectangle::unbound();
	let _ = rect.write("width", |_| ());
}
