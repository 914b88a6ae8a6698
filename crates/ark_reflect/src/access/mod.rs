//! Member paths through nested records.
//!
//! A path names a chain of fields starting at a record, e.g.
//! `"embedded_a.embedded_b.value"`. The [`AccessPath`] trait turns a path
//! representation into [`PathSegment`]s; this crate implements it for string
//! slices and for lists of member names.
//!
//! # Syntax
//!
//! Member names are separated by `.`, a single leading `.` is allowed.
//! A name is made of ASCII letters, digits and `_` and cannot begin with a
//! digit.
//!
//! # Examples
//!
//! ```
//! use ark_reflect::access::parse_path;
//!
//! let segments = parse_path(&".a.b").unwrap();
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[1].name, "b");
//! assert_eq!(segments[1].offset, 3);
//!
//! let err = parse_path(&"a..b").unwrap_err();
//! assert_eq!(err.offset, 2);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod parser;
mod path;

// -----------------------------------------------------------------------------
// Exports

pub use parser::StrSegments;
pub use path::{AccessPath, ParseError, PathSegment, parse_path};
