use core::any::Any;
use core::fmt;

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// NamedField

/// A named field of a record, with type-erased accessors.
///
/// Both accessors take the *owner* of the field (the record) as `dyn Any`
/// and return `None` if the owner is not the record type this field was
/// declared on.
///
/// # Examples
///
/// ```
/// use ark_reflect::{derive::Record, info::Typed};
///
/// #[derive(Record)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let info = Point::type_info().as_struct().unwrap();
/// let y = info.field("y").unwrap();
///
/// let mut point = Point { x: 1, y: 2 };
/// assert!(y.type_is::<i32>());
/// assert_eq!(y.get(&point).unwrap().downcast_ref::<i32>(), Some(&2));
///
/// *y.get_mut(&mut point).unwrap().downcast_mut::<i32>().unwrap() = 5;
/// assert_eq!(point.y, 5);
/// # let _ = point.x;
/// ```
#[derive(Clone)]
pub struct NamedField {
    name: &'static str,
    ty: Type,
    // Resolved on first use, so recursive records can describe themselves.
    type_info: fn() -> &'static TypeInfo,
    get: fn(&dyn Any) -> Option<&dyn Any>,
    get_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
}

impl NamedField {
    /// Creates a field called `name` of type `T`.
    #[inline]
    pub fn new<T: Typed>(
        name: &'static str,
        get: fn(&dyn Any) -> Option<&dyn Any>,
        get_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
    ) -> Self {
        Self {
            name,
            ty: Type::of::<T>(),
            type_info: T::type_info,
            get,
            get_mut,
        }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`Type`] of the field.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Check if the field is of type `T`.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty.is::<T>()
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Borrows the field out of `owner`.
    #[inline]
    pub fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.get)(owner)
    }

    /// Mutably borrows the field out of `owner`.
    #[inline]
    pub fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.get_mut)(owner)
    }
}

impl fmt::Debug for NamedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedField")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}
