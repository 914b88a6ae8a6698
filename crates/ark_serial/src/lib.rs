//! Declarative-mapping binary serialization.
//!
//! A [`TypeProfile`] lists, once per record type, the members written to the
//! wire and how each one is reached: a dotted path through nested records,
//! optionally narrowed to one entry of a map ([`MemberMap::with_indexer_key`]),
//! adapted by caller functions ([`MemberMap::map_by`]) or cast to another
//! numeric width ([`MemberMap::as_type`]). Registering the profile into a
//! [`ProfileSerializer`] compiles every member into a getter and a setter;
//! serialization then walks the members in declaration order and encodes each
//! value with the converter of its wire type.
//!
//! Paths are checked against the descriptors of `ark_reflect` when they are
//! declared. Absent `Option` intermediates are constructed on access, for reads
//! as well as for writes.
//!
//! # Examples
//!
//! ```
//! use ark_reflect::derive::Record;
//! use ark_serial::{MappingError, ProfileSerializer, TypeProfile};
//!
//! #[derive(Record, Default, Debug, PartialEq)]
//! #[record(default)]
//! struct Position {
//!     x: i32,
//!     y: i32,
//! }
//!
//! #[derive(Record, Default, Debug, PartialEq)]
//! #[record(default)]
//! struct Unit {
//!     id: u16,
//!     position: Option<Position>,
//! }
//!
//! let mut profile = TypeProfile::of::<Unit>();
//! profile.map::<u16>("id")?;
//! profile.map::<i32>("position.x")?.as_type::<i16>()?;
//! profile.map::<i32>("position.y")?.as_type::<i16>()?;
//!
//! let mut serializer = ProfileSerializer::new();
//! serializer.register_profile(profile)?;
//!
//! let mut unit = Unit { id: 7, position: Some(Position { x: -1, y: 3 }) };
//! let bytes = serializer.to_bytes(&mut unit)?;
//! assert_eq!(bytes, [7, 0, 0xFF, 0xFF, 3, 0]);
//! assert_eq!(serializer.from_bytes::<Unit>(&bytes)?, unit);
//! # Ok::<(), MappingError>(())
//! ```

// -----------------------------------------------------------------------------
// Modules

mod config;
mod member;
mod profile;
mod serializer;
mod value;

#[cfg(feature = "auto_register")]
mod auto_register;

pub mod compile;
pub mod converter;
pub mod error;

// -----------------------------------------------------------------------------
// Exports

pub use config::SerializerConfig;
pub use converter::{DefaultConverters, Endian, TypeConverterRegistry};
pub use error::MappingError;
pub use member::{MemberBinding, MemberMap};
pub use profile::{ProfileSource, TypeProfile};
pub use serializer::ProfileSerializer;
pub use value::ValueBox;

#[doc(hidden)]
pub mod __macro_exports {
    #[cfg(feature = "auto_register")]
    pub use crate::auto_register::ProfileRegistration;
    #[cfg(feature = "auto_register")]
    pub use inventory;
}
