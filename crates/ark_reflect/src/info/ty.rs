use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

/// The identity of a type: its [`TypeId`] plus a readable name.
///
/// Equality and hashing only consider the [`TypeId`]; the name is for
/// error messages and logs.
///
/// # Examples
///
/// ```
/// use ark_reflect::info::Type;
///
/// let ty = Type::of::<u16>();
/// assert!(ty.is::<u16>());
/// assert_eq!(ty.name(), "u16");
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    name: &'static str,
}

impl Type {
    /// Returns the identity of `T`.
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the name reported by [`core::any::type_name`].
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Check if this is the type `T`.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
