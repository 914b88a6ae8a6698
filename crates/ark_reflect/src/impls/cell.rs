//! Containers for static storage of type information.
//!
//! - [`NonGenericTypeInfoCell`]: a [`OnceLock`], for concrete types.
//! - [`GenericTypeInfoCell`]: one `static` shared by every instantiation of a
//!   generic type, so it keys leaked [`TypeInfo`]s by [`TypeId`].

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use ark_utils::TypeIdMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Static storage for the [`TypeInfo`] of a non-generic type.
///
/// See [`Typed`](crate::info::Typed) for an example.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored information, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Static storage for the [`TypeInfo`] of every instantiation of a generic type.
///
/// # Examples
///
/// ```
/// use ark_reflect::impls::GenericTypeInfoCell;
/// use ark_reflect::info::{TypeInfo, TypeKind, Typed};
///
/// struct Tagged<T>(T);
///
/// impl<T: 'static> Typed for Tagged<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::new::<Self>(TypeKind::Opaque))
///     }
/// }
///
/// assert!(<Tagged<u8>>::type_info().type_is::<Tagged<u8>>());
/// assert!(<Tagged<u16>>::type_info().type_is::<Tagged<u16>>());
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the information stored for `G`, building it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        let cached = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();

        if let Some(info) = cached {
            return info;
        }

        // Built outside the lock: `f` may ask other cells for their information.
        let info = f();

        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(info)))
    }
}
