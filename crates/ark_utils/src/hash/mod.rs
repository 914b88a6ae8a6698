//! Hash containers with deterministic hashing.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
///
/// Used for the field-name lookup of record descriptors.
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
