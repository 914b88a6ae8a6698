use core::any::Any;
use core::fmt;

use crate::info::{Type, TypeInfo, Typed};

/// Information about `Option<T>`, a value that may be absent.
///
/// Access paths that run through an `OptionalInfo` construct the inner value
/// when it is absent, see `ark_serial`.
#[derive(Clone)]
pub struct OptionalInfo {
    inner: Type,
    inner_info: fn() -> &'static TypeInfo,
    is_none: fn(&dyn Any) -> bool,
    get: fn(&dyn Any) -> Option<&dyn Any>,
    get_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
    insert: fn(&mut dyn Any, Box<dyn Any>) -> Result<(), Box<dyn Any>>,
}

fn is_none<T: Any>(slot: &dyn Any) -> bool {
    slot.downcast_ref::<Option<T>>()
        .is_some_and(Option::is_none)
}

fn get<T: Any>(slot: &dyn Any) -> Option<&dyn Any> {
    slot.downcast_ref::<Option<T>>()?
        .as_ref()
        .map(|v| v as &dyn Any)
}

fn get_mut<T: Any>(slot: &mut dyn Any) -> Option<&mut dyn Any> {
    slot.downcast_mut::<Option<T>>()?
        .as_mut()
        .map(|v| v as &mut dyn Any)
}

fn insert<T: Any>(slot: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
    let Some(slot) = slot.downcast_mut::<Option<T>>() else {
        return Err(value);
    };
    *slot = Some(*value.downcast::<T>()?);
    Ok(())
}

impl OptionalInfo {
    /// Creates the information of `Option<T>`.
    #[inline]
    pub fn new<T: Typed>() -> Self {
        Self {
            inner: Type::of::<T>(),
            inner_info: T::type_info,
            is_none: is_none::<T>,
            get: get::<T>,
            get_mut: get_mut::<T>,
            insert: insert::<T>,
        }
    }

    /// Returns the [`Type`] of the wrapped value.
    #[inline]
    pub const fn inner(&self) -> Type {
        self.inner
    }

    /// Returns the [`TypeInfo`] of the wrapped value.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }

    /// Returns `true` if `slot` is an `Option<T>` holding nothing.
    #[inline]
    pub fn is_none(&self, slot: &dyn Any) -> bool {
        (self.is_none)(slot)
    }

    /// Borrows the wrapped value, if any.
    #[inline]
    pub fn get<'a>(&self, slot: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.get)(slot)
    }

    /// Mutably borrows the wrapped value, if any.
    #[inline]
    pub fn get_mut<'a>(&self, slot: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.get_mut)(slot)
    }

    /// Stores `value` as `Some(value)` in `slot`.
    ///
    /// Gives `value` back if either `slot` or `value` has the wrong type.
    #[inline]
    pub fn insert(&self, slot: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        (self.insert)(slot, value)
    }
}

impl fmt::Debug for OptionalInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalInfo")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
