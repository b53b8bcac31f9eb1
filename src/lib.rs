//! Observable, batch-aware wrappers for settings stored outside the process.
//!
//! A [`WrappedField`] exposes a composite raw value (a tuple, a matrix) as
//! named sub-fields. Reads pull from a [`DataSource`], writes push back to it,
//! and [`WrappedField::batch`] folds any number of reads into one pull and any
//! number of writes into one push.

#[macro_use]
mod macros;

mod batch;
mod composite;
pub mod consts;
mod datasource;
mod defaults;
pub mod effects;
mod error;
mod field;
pub mod matrix;
mod notifier;
mod slot;
pub mod transition;
pub mod types;

pub use batch::{IgnoreAllGuard, IgnoreGuard};
pub use composite::CompositeField;
pub use datasource::{DataSource, Getter, Setter};
pub use error::{BoxError, Error, Result};
pub use field::{Field, Shape, WrappedField};
pub use matrix::Matrix;
pub use notifier::{Notifier, Observer};
pub use slot::Slot;
pub use transition::{get_transition, Transition};
