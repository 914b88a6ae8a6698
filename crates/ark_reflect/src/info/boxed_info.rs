use core::any::Any;
use core::fmt;

use crate::info::{Type, TypeInfo, Typed};

/// Information about `Box<T>`.
///
/// A box is invisible to access paths: `a.b` walks through `a: Box<A>` as if
/// it were `a: A`.
#[derive(Clone)]
pub struct BoxedInfo {
    inner: Type,
    inner_info: fn() -> &'static TypeInfo,
    deref: fn(&dyn Any) -> Option<&dyn Any>,
    deref_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
}

fn deref<T: Any>(boxed: &dyn Any) -> Option<&dyn Any> {
    boxed.downcast_ref::<Box<T>>().map(|v| &**v as &dyn Any)
}

fn deref_mut<T: Any>(boxed: &mut dyn Any) -> Option<&mut dyn Any> {
    boxed.downcast_mut::<Box<T>>().map(|v| &mut **v as &mut dyn Any)
}

impl BoxedInfo {
    /// Creates the information of `Box<T>`.
    #[inline]
    pub fn new<T: Typed>() -> Self {
        Self {
            inner: Type::of::<T>(),
            inner_info: T::type_info,
            deref: deref::<T>,
            deref_mut: deref_mut::<T>,
        }
    }

    /// Returns the [`Type`] of the boxed value.
    #[inline]
    pub const fn inner(&self) -> Type {
        self.inner
    }

    /// Returns the [`TypeInfo`] of the boxed value.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }

    /// Borrows the boxed value.
    #[inline]
    pub fn deref<'a>(&self, boxed: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.deref)(boxed)
    }

    /// Mutably borrows the boxed value.
    #[inline]
    pub fn deref_mut<'a>(&self, boxed: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.deref_mut)(boxed)
    }
}

impl fmt::Debug for BoxedInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedInfo")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
