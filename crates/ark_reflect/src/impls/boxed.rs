use core::any::Any;

use crate::impls::GenericTypeInfoCell;
use crate::info::{BoxedInfo, TypeInfo, TypeKind, Typed};

fn construct_boxed<T: Typed>() -> Option<Box<dyn Any>> {
    let inner = T::type_info().construct()?.downcast::<T>().ok()?;
    Some(Box::new(inner))
}

fn clone_boxed<T: Typed>(value: &dyn Any) -> Option<Box<dyn Any>> {
    let inner: &T = value.downcast_ref::<Box<T>>()?;
    let copied = T::type_info().clone_value(inner)?.downcast::<T>().ok()?;
    Some(Box::new(copied))
}

impl<T: Typed> Typed for Box<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::new::<Self>(TypeKind::Boxed(BoxedInfo::new::<T>()))
                .with_constructor(construct_boxed::<T>)
                .with_copier(clone_boxed::<T>)
        })
    }
}
