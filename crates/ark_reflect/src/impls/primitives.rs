use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeInfo, TypeKind, Typed};

macro_rules! impl_typed_opaque {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::new::<$ty>(TypeKind::Opaque)
                        .with_default::<$ty>()
                        .with_clone::<$ty>()
                })
            }
        }
    )*};
}

impl_typed_opaque!(
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64, bool, char, String,
);

#[cfg(test)]
mod tests {
    use crate::info::{TypeKind, Typed};

    #[test]
    fn primitives_are_opaque() {
        assert!(matches!(u32::type_info().kind(), TypeKind::Opaque));
        assert!(matches!(String::type_info().kind(), TypeKind::Opaque));
        assert_eq!(i64::type_info().type_name(), "i64");
    }

    #[test]
    fn primitives_construct_and_clone() {
        let zero = u16::type_info().construct().unwrap();
        assert_eq!(zero.downcast_ref::<u16>(), Some(&0));

        let text = String::from("ark");
        let copy = String::type_info().clone_value(&text).unwrap();
        assert_eq!(copy.downcast_ref::<String>().map(String::as_str), Some("ark"));

        assert!(String::type_info().clone_value(&1_u8).is_none());
    }
}
