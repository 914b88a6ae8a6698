//! Compilation of member paths into accessors.
//!
//! A declared member goes through three stages:
//!
//! 1. [`AccessExpr::resolve`] checks a path against the type descriptors and
//!    produces the steps from the record to the owner of the leaf field.
//!    Every `Option` met between two members becomes a [`AccessStep::Vivify`]
//!    step that constructs the absent value, every `Box` a
//!    [`AccessStep::Deref`] step.
//! 2. The binding keeps a [`ReadExpr`] and a [`WriteExpr`] describing what
//!    happens at the leaf. The DSL of [`MemberMap`](crate::MemberMap)
//!    rewrites them.
//! 3. [`ReadExpr::lower`] and [`WriteExpr::lower`] turn the expressions into
//!    a [`Getter`] and a [`Setter`]. No descriptor lookup happens in the
//!    closures besides the calls of the resolved accessors.

// -----------------------------------------------------------------------------
// Modules

mod access;
mod cast;
mod expr;

// -----------------------------------------------------------------------------
// Exports

pub use access::{AccessExpr, AccessStep};
pub use cast::{cast_value, is_numeric, supports_cast};
pub use expr::{Getter, IndexKey, ReadExpr, Setter, Transform, WriteExpr};
