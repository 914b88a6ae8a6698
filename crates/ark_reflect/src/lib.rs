//! Static type descriptors for records that take part in mapped serialization.
//!
//! Rust keeps no field metadata at run time, so every type that can appear in
//! an access path describes itself once through [`Typed`](info::Typed). The
//! description ([`TypeInfo`](info::TypeInfo)) lists the fields of a record with
//! type-erased accessors, tells whether a value can be absent (`Option`),
//! whether it can be indexed (maps, vectors), and how to construct or copy it.
//!
//! Records usually derive it:
//!
//! ```
//! use ark_reflect::{derive::Record, info::Typed};
//!
//! #[derive(Record, Default)]
//! #[record(default)]
//! struct Header {
//!     version: u16,
//!     flags: u8,
//! }
//!
//! let info = Header::type_info().as_struct().unwrap();
//! assert_eq!(&*info.field_names(), ["version", "flags"]);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// Generated code names this crate as `ark_reflect`, including inside itself.
extern crate self as ark_reflect;

// -----------------------------------------------------------------------------
// Modules

pub mod access;
pub mod impls;
pub mod info;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use ark_reflect_derive as derive;
