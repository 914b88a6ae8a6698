use core::any::Any;

use crate::info::{BoxedInfo, IndexerInfo, OptionalInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// TypeKind

/// The shape of a type as seen by access paths.
#[derive(Debug)]
pub enum TypeKind {
    /// A record with named fields.
    Struct(StructInfo),
    /// A value that may be absent, i.e. `Option<T>`.
    Optional(OptionalInfo),
    /// A heap indirection, i.e. `Box<T>`.
    Boxed(BoxedInfo),
    /// A container with an indexer, e.g. `HashMap<K, V>` or `Vec<T>`.
    Indexed(IndexerInfo),
    /// Anything without inner structure.
    Opaque,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information about a type.
///
/// Besides the [`TypeKind`], a `TypeInfo` carries two erased capabilities:
///
/// - a *constructor*, the equivalent of a public parameterless constructor.
///   It is only present for types that implement [`Default`] (or opted into
///   it through `#[record(default)]`).
/// - a *copier*, that clones a value out of a `&dyn Any`. It is only present
///   for types that implement [`Clone`] (or opted in with `#[record(clone)]`).
///
/// Assignment of a boxed value into a slot is always available.
///
/// # Examples
///
/// ```
/// use ark_reflect::info::Typed;
///
/// let info = <Option<u32>>::type_info();
/// let fresh = info.construct().unwrap();
/// assert_eq!(fresh.downcast_ref::<Option<u32>>(), Some(&None));
/// ```
#[derive(Debug)]
pub struct TypeInfo {
    ty: Type,
    kind: TypeKind,
    construct: Option<fn() -> Option<Box<dyn Any>>>,
    clone: Option<fn(&dyn Any) -> Option<Box<dyn Any>>>,
    assign: fn(&mut dyn Any, Box<dyn Any>) -> Result<(), Box<dyn Any>>,
}

fn assign_value<T: Any>(slot: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
    let Some(slot) = slot.downcast_mut::<T>() else {
        return Err(value);
    };
    *slot = *value.downcast::<T>()?;
    Ok(())
}

fn construct_default<T: Default + Any>() -> Option<Box<dyn Any>> {
    Some(Box::new(T::default()))
}

fn clone_value<T: Clone + Any>(value: &dyn Any) -> Option<Box<dyn Any>> {
    value
        .downcast_ref::<T>()
        .map(|v| Box::new(v.clone()) as Box<dyn Any>)
}

impl TypeInfo {
    /// Creates the information of `T` with neither constructor nor copier.
    #[inline]
    pub fn new<T: Any>(kind: TypeKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            construct: None,
            clone: None,
            assign: assign_value::<T>,
        }
    }

    /// Uses [`Default::default`] as the constructor of `T`.
    #[inline]
    pub fn with_default<T: Default + Any>(mut self) -> Self {
        self.debug_check::<T>();
        self.construct = Some(construct_default::<T>);
        self
    }

    /// Uses [`Clone::clone`] as the copier of `T`.
    #[inline]
    pub fn with_clone<T: Clone + Any>(mut self) -> Self {
        self.debug_check::<T>();
        self.clone = Some(clone_value::<T>);
        self
    }

    /// Installs a custom constructor.
    ///
    /// Used by wrappers whose constructor depends on their inner type,
    /// so it may still return `None`.
    #[inline]
    pub fn with_constructor(mut self, construct: fn() -> Option<Box<dyn Any>>) -> Self {
        self.construct = Some(construct);
        self
    }

    /// Installs a custom copier.
    #[inline]
    pub fn with_copier(mut self, clone: fn(&dyn Any) -> Option<Box<dyn Any>>) -> Self {
        self.clone = Some(clone);
        self
    }

    #[inline(always)]
    fn debug_check<T: Any>(&self) {
        if cfg!(all(debug_assertions, feature = "debug")) {
            assert!(
                self.ty.is::<T>(),
                "capability of `{}` installed on `{}`",
                core::any::type_name::<T>(),
                self.ty,
            );
        }
    }

    /// Returns the [`Type`] described.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Returns the name of the type described.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Check if the described type is `T`.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty.is::<T>()
    }

    /// Returns the [`TypeKind`].
    #[inline]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Returns `true` if a constructor is installed.
    #[inline]
    pub const fn has_constructor(&self) -> bool {
        self.construct.is_some()
    }

    /// Returns `true` if a copier is installed.
    #[inline]
    pub const fn has_copier(&self) -> bool {
        self.clone.is_some()
    }

    /// Constructs a default value, or `None` if the type has no constructor.
    #[inline]
    pub fn construct(&self) -> Option<Box<dyn Any>> {
        self.construct.and_then(|construct| construct())
    }

    /// Copies `value` out, or `None` if the type has no copier
    /// or `value` is of another type.
    #[inline]
    pub fn clone_value(&self, value: &dyn Any) -> Option<Box<dyn Any>> {
        self.clone.and_then(|clone| clone(value))
    }

    /// Moves `value` into `slot`, dropping the previous value.
    ///
    /// Gives `value` back if either `slot` or `value` is not of the described type.
    #[inline]
    pub fn assign(&self, slot: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        (self.assign)(slot, value)
    }

    /// Returns the [`StructInfo`] if this is a record.
    #[inline]
    pub const fn as_struct(&self) -> Option<&StructInfo> {
        match &self.kind {
            TypeKind::Struct(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the [`OptionalInfo`] if this is an `Option`.
    #[inline]
    pub const fn as_optional(&self) -> Option<&OptionalInfo> {
        match &self.kind {
            TypeKind::Optional(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the [`BoxedInfo`] if this is a `Box`.
    #[inline]
    pub const fn as_boxed(&self) -> Option<&BoxedInfo> {
        match &self.kind {
            TypeKind::Boxed(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the [`IndexerInfo`] if the type exposes an indexer.
    #[inline]
    pub const fn as_indexed(&self) -> Option<&IndexerInfo> {
        match &self.kind {
            TypeKind::Indexed(info) => Some(info),
            _ => None,
        }
    }
}
