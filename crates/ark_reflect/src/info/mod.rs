//! Containers for compile-time type information.
//!
//! The entry point is [`Typed::type_info`], which returns a `&'static`
//! [`TypeInfo`]. Its [`TypeKind`] selects one of:
//!
//! - [`StructInfo`]: a record with [`NamedField`]s,
//! - [`OptionalInfo`]: a value that may be absent,
//! - [`BoxedInfo`]: a heap indirection that is transparent to paths,
//! - [`IndexerInfo`]: a container readable through `value[key]`,
//! - `Opaque`: everything else (numbers, strings, ...).

// -----------------------------------------------------------------------------
// Modules

mod boxed_info;
mod field_info;
mod indexer_info;
mod optional_info;
mod struct_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use boxed_info::BoxedInfo;
pub use field_info::NamedField;
pub use indexer_info::{IndexError, IndexerInfo};
pub use optional_info::OptionalInfo;
pub use struct_info::StructInfo;
pub use ty::Type;
pub use type_info::{TypeInfo, TypeKind};
pub use typed::Typed;
