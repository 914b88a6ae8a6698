use core::any::Any;
use core::fmt;

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// IndexError

/// Why an indexed write was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// The container, the key or the value is not of the declared type.
    Mismatch,
    /// The key does not address a slot and the container cannot grow to it.
    Absent,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch => f.write_str("indexed access with a value of the wrong type"),
            Self::Absent => f.write_str("indexed access to an absent slot"),
        }
    }
}

impl core::error::Error for IndexError {}

// -----------------------------------------------------------------------------
// IndexerInfo

/// Information about a container read and written through `container[key]`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use ark_reflect::info::Typed;
///
/// let info = <HashMap<String, i32>>::type_info().as_indexed().unwrap();
/// assert!(info.key().is::<String>());
///
/// let mut map: HashMap<String, i32> = HashMap::new();
/// let key = String::from("x");
/// info.set(&mut map, &key, Box::new(7_i32)).unwrap();
/// assert_eq!(info.get(&map, &key).unwrap().downcast_ref::<i32>(), Some(&7));
/// ```
#[derive(Clone)]
pub struct IndexerInfo {
    key: Type,
    value: Type,
    value_info: fn() -> &'static TypeInfo,
    get: for<'a> fn(&'a dyn Any, &dyn Any) -> Option<&'a dyn Any>,
    set: fn(&mut dyn Any, &dyn Any, Box<dyn Any>) -> Result<(), IndexError>,
}

impl IndexerInfo {
    /// Creates the information of a container indexed by `K` and holding `V`.
    ///
    /// `get` receives `(container, key)`; `set` receives
    /// `(container, key, value)`. All three are erased, implementations
    /// downcast them and report [`IndexError::Mismatch`] on failure.
    #[inline]
    pub fn new<K: Any, V: Typed>(
        get: for<'a> fn(&'a dyn Any, &dyn Any) -> Option<&'a dyn Any>,
        set: fn(&mut dyn Any, &dyn Any, Box<dyn Any>) -> Result<(), IndexError>,
    ) -> Self {
        Self {
            key: Type::of::<K>(),
            value: Type::of::<V>(),
            value_info: V::type_info,
            get,
            set,
        }
    }

    /// Returns the [`Type`] of keys.
    #[inline]
    pub const fn key(&self) -> Type {
        self.key
    }

    /// Returns the [`Type`] of values.
    #[inline]
    pub const fn value(&self) -> Type {
        self.value
    }

    /// Returns the [`TypeInfo`] of values.
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    /// Borrows `container[key]`, or `None` if absent.
    #[inline]
    pub fn get<'a>(&self, container: &'a dyn Any, key: &dyn Any) -> Option<&'a dyn Any> {
        (self.get)(container, key)
    }

    /// Stores `container[key] = value`.
    #[inline]
    pub fn set(
        &self,
        container: &mut dyn Any,
        key: &dyn Any,
        value: Box<dyn Any>,
    ) -> Result<(), IndexError> {
        (self.set)(container, key, value)
    }
}

impl fmt::Debug for IndexerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexerInfo")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
