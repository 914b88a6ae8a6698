use crate::info::TypeInfo;

/// A static accessor to compile-time type information.
///
/// Implemented by [`#[derive(Record)]`](crate::derive::Record) for records,
/// and by this crate for numbers, `bool`, `char`, `String`, `Option<T>`,
/// `Box<T>`, `Vec<T>`, `HashMap<K, V>` and `BTreeMap<K, V>`.
///
/// # Manually Impl
///
/// Store the information in a [`NonGenericTypeInfoCell`]
/// (or a [`GenericTypeInfoCell`] for generic types):
///
/// ```
/// use core::any::Any;
/// use ark_reflect::impls::NonGenericTypeInfoCell;
/// use ark_reflect::info::{NamedField, StructInfo, TypeInfo, TypeKind, Typed};
///
/// #[derive(Default)]
/// struct Version {
///     major: u8,
/// }
///
/// impl Typed for Version {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::new::<Self>(TypeKind::Struct(StructInfo::new(&[
///                 NamedField::new::<u8>(
///                     "major",
///                     |v| v.downcast_ref::<Self>().map(|v| &v.major as &dyn Any),
///                     |v| v.downcast_mut::<Self>().map(|v| &mut v.major as &mut dyn Any),
///                 ),
///             ])))
///             .with_default::<Self>()
///         })
///     }
/// }
///
/// assert!(Version::type_info().as_struct().unwrap().field("major").is_some());
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: 'static {
    /// Returns the information of this type.
    fn type_info() -> &'static TypeInfo;
}
