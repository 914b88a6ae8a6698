//! Small containers shared by the `ark` crates.
//!
//! - [`TypeIdMap`]: the map every registry in the workspace is keyed by.
//! - [`hash`]: hash states, the fixed-seed [`hash::HashMap`], re-exports *hashbrown* and *foldhash*.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
