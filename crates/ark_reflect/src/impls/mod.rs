//! [`Typed`](crate::info::Typed) for std types, plus the static cells used to
//! store type information.

// -----------------------------------------------------------------------------
// Modules

mod boxed;
mod cell;
mod collections;
mod option;
mod primitives;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
