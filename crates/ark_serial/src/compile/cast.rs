//! Numeric conversions behind `as_type`.
//!
//! Conversions follow the `as` operator: integers wrap (two's complement
//! truncation when narrowing), floats saturate when converted to integers.

use core::any::{Any, TypeId};

use ark_reflect::info::Type;

use crate::{MappingError, ValueBox};

trait NumericCast: Any + Copy {
    fn cast_to(self, to: TypeId) -> Option<ValueBox>;
}

macro_rules! cast_to {
    ($value:ident, $to:ident; $($target:ty),*) => {{
        $(
            if $to == TypeId::of::<$target>() {
                return Some(ValueBox::new($value as $target));
            }
        )*
        None
    }};
}

macro_rules! impl_numeric {
    ($($ty:ty),*) => {
        $(
            impl NumericCast for $ty {
                #[allow(clippy::cast_lossless, clippy::unnecessary_cast, reason = "generated for every pair")]
                fn cast_to(self, to: TypeId) -> Option<ValueBox> {
                    let value = self;
                    cast_to!(value, to; u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64)
                }
            }
        )*

        /// Returns `true` if `ty` is a primitive integer or float.
        pub fn is_numeric(ty: TypeId) -> bool {
            $( ty == TypeId::of::<$ty>() )||*
        }

        /// Converts `value` to `to`.
        ///
        /// Fails with [`MappingError::TypeCastFailure`] if either side is not numeric.
        pub fn cast_value(value: ValueBox, to: Type) -> Result<ValueBox, MappingError> {
            if value.ty() == to {
                return Ok(value);
            }
            let from = value.ty();
            let failure = || MappingError::TypeCastFailure {
                expected: to.name(),
                actual: from.name(),
            };
            $(
                if from.is::<$ty>() {
                    return value.downcast::<$ty>()?.cast_to(to.id()).ok_or_else(failure);
                }
            )*
            Err(failure())
        }
    };
}

impl_numeric!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

/// Returns `true` if values of `from` can be converted to `to`.
#[inline]
pub fn supports_cast(from: Type, to: Type) -> bool {
    from == to || (is_numeric(from.id()) && is_numeric(to.id()))
}

#[cfg(test)]
mod tests {
    use ark_reflect::info::Type;

    use super::{cast_value, supports_cast};
    use crate::ValueBox;

    fn cast<T: core::any::Any>(value: ValueBox) -> T {
        cast_value(value, Type::of::<T>())
            .unwrap()
            .downcast::<T>()
            .unwrap()
    }

    #[test]
    fn narrowing_truncates() {
        assert_eq!(cast::<i16>(ValueBox::new(200_i32)), 200);
        assert_eq!(cast::<i16>(ValueBox::new(70_000_i32)), 4464);
        assert_eq!(cast::<u8>(ValueBox::new(-1_i64)), 255);
    }

    #[test]
    fn widening_and_floats() {
        assert_eq!(cast::<i64>(ValueBox::new(-5_i16)), -5);
        assert_eq!(cast::<u16>(ValueBox::new(1e9_f64)), u16::MAX);
        assert_eq!(cast::<f32>(ValueBox::new(3_u8)), 3.0);
    }

    #[test]
    fn non_numeric_pairs() {
        assert!(supports_cast(Type::of::<i32>(), Type::of::<u8>()));
        assert!(supports_cast(Type::of::<String>(), Type::of::<String>()));
        assert!(!supports_cast(Type::of::<String>(), Type::of::<u8>()));
        assert!(!supports_cast(Type::of::<bool>(), Type::of::<u8>()));

        let err = cast_value(ValueBox::new(true), Type::of::<u8>()).unwrap_err();
        assert!(matches!(err, crate::MappingError::TypeCastFailure { .. }));
    }
}
