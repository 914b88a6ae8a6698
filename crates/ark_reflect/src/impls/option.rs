use core::any::Any;

use crate::impls::GenericTypeInfoCell;
use crate::info::{OptionalInfo, TypeInfo, TypeKind, Typed};

// `Option<T>` is always constructible (as `None`); copying goes through `T`.
fn clone_option<T: Typed>(value: &dyn Any) -> Option<Box<dyn Any>> {
    match value.downcast_ref::<Option<T>>()? {
        None => Some(Box::new(None::<T>)),
        Some(inner) => {
            let copied = T::type_info().clone_value(inner)?;
            let copied = copied.downcast::<T>().ok()?;
            Some(Box::new(Some(*copied)))
        }
    }
}

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::new::<Self>(TypeKind::Optional(OptionalInfo::new::<T>()))
                .with_default::<Self>()
                .with_copier(clone_option::<T>)
        })
    }
}

#[cfg(test)]
mod tests {
    use core::any::Any;

    use crate::info::Typed;

    #[test]
    fn vivify_through_info() {
        let info = <Option<u32>>::type_info().as_optional().unwrap();
        let mut slot: Option<u32> = None;
        assert!(info.is_none(&slot));

        let fresh = info.inner_info().construct().unwrap();
        info.insert(&mut slot, fresh).unwrap();
        assert_eq!(slot, Some(0));

        *info.get_mut(&mut slot).unwrap().downcast_mut::<u32>().unwrap() = 9;
        assert_eq!(slot, Some(9));
    }

    #[test]
    fn insert_rejects_wrong_value() {
        let info = <Option<u32>>::type_info().as_optional().unwrap();
        let mut slot: Option<u32> = None;
        let rejected = info.insert(&mut slot, Box::new(1_i64)).unwrap_err();
        assert_eq!(rejected.downcast_ref::<i64>(), Some(&1));
        assert_eq!(slot, None);
    }

    #[test]
    fn clone_copies_inner() {
        let value: Option<String> = Some("x".into());
        let copy = <Option<String>>::type_info()
            .clone_value(&value as &dyn Any)
            .unwrap();
        assert_eq!(copy.downcast_ref::<Option<String>>(), Some(&value));
    }
}
