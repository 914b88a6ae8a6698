//! `FixedHasher` hashes with `foldhash` under a constant seed, so two runs
//! of the same program agree on every hash.
//!
//! `NoOpHasher` passes an already well-distributed `u64` (such as the bits
//! of a `TypeId`) straight through.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5A17_C0DE_A4C1_E47B);

/// Hasher produced by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A `foldhash` state with a constant seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use ark_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one(7_u32), FixedHashState.hash_one(7_u32));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// Hasher produced by [`NoOpHashState`].
#[derive(Copy, Clone, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline(always)]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // Fold arbitrary input so the hasher stays usable for non-`u64` keys.
        for &byte in bytes {
            self.hash = self.hash.rotate_left(8) ^ u64::from(byte);
        }
    }

    #[inline(always)]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// A hash state that trusts its keys to already be hashes.
///
/// Used for [`TypeIdMap`](crate::TypeIdMap).
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use ark_utils::hash::NoOpHashState;
///
/// assert_eq!(NoOpHashState.hash_one(42_u64), 42);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}
