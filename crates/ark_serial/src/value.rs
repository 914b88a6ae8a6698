use core::any::Any;
use core::fmt;

use ark_reflect::info::Type;

use crate::MappingError;

/// A type-erased value flowing between accessors and converters.
///
/// Getters produce one, setters and encoders consume one. The [`Type`] is
/// kept next to the value, so failed downcasts can name both sides.
///
/// # Examples
///
/// ```
/// use ark_serial::ValueBox;
///
/// let value = ValueBox::new(7_u16);
/// assert!(value.is::<u16>());
/// assert_eq!(value.downcast_ref::<u16>().unwrap(), &7);
/// assert!(value.downcast::<u32>().is_err());
/// ```
pub struct ValueBox {
    ty: Type,
    value: Box<dyn Any>,
}

impl ValueBox {
    /// Boxes `value`.
    #[inline]
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            ty: Type::of::<T>(),
            value: Box::new(value),
        }
    }

    /// Wraps an already boxed value declared to be of type `ty`.
    ///
    /// Fails if the value is of another type.
    pub fn from_boxed(ty: Type, value: Box<dyn Any>) -> Result<Self, MappingError> {
        if (*value).type_id() != ty.id() {
            return Err(MappingError::TypeCastFailure {
                expected: ty.name(),
                actual: "an erased value of another type",
            });
        }
        Ok(Self { ty, value })
    }

    /// Returns the [`Type`] of the value.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Check if the value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty.is::<T>()
    }

    /// Borrows the value as `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Result<&T, MappingError> {
        self.value
            .downcast_ref::<T>()
            .ok_or_else(|| self.mismatch::<T>())
    }

    /// Takes the value out as `T`.
    #[inline]
    pub fn downcast<T: Any>(self) -> Result<T, MappingError> {
        let err = self.mismatch::<T>();
        self.value.downcast::<T>().map(|v| *v).map_err(|_| err)
    }

    /// Borrows the erased value.
    #[inline]
    pub fn as_any(&self) -> &dyn Any {
        &*self.value
    }

    /// Returns the erased value.
    #[inline]
    pub fn into_any(self) -> Box<dyn Any> {
        self.value
    }

    #[inline]
    fn mismatch<T: Any>(&self) -> MappingError {
        MappingError::TypeCastFailure {
            expected: core::any::type_name::<T>(),
            actual: self.ty.name(),
        }
    }
}

impl fmt::Debug for ValueBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueBox")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}
