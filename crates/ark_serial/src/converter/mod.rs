//! Encode/decode functions selected by wire type.
//!
//! A [`TypeConverterRegistry`] maps a wire type to a [`Converter`]. The
//! baseline registry of [`DefaultConverters`] covers the eight fixed-width
//! integers; anything else is registered by the caller.

// -----------------------------------------------------------------------------
// Modules

mod defaults;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use defaults::{DefaultConverters, Endian};
pub use registry::{Converter, DecodeFn, EncodeFn, TypeConverterRegistry};
