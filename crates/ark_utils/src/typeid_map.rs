use core::any::TypeId;
use core::fmt::Debug;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::hash::NoOpHashState;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`].
///
/// Profile tables, converter tables and the generic type-info cells are all
/// `TypeIdMap`s. The map hashes with [`NoOpHashState`], since a [`TypeId`]
/// already is a hash.
///
/// # Examples
///
/// ```
/// use ark_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// map.insert_type::<u16>("two bytes");
///
/// assert_eq!(map.get_type::<u16>(), Some(&"two bytes"));
/// assert!(!map.contains_type::<u32>());
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty map, usable in `static` items.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Returns the value stored for `type_id`, or inserts the one produced by `f`.
    ///
    /// `f` only runs when the key is vacant.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Returns the value stored for `type_id`.
    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Returns the value stored for `T`.
    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    /// Inserts or **overwrites** the value for `type_id`, returning the previous one.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, v: V) -> Option<V> {
        self.0.insert(type_id, v)
    }

    /// Inserts or **overwrites** the value for `T`, returning the previous one.
    #[inline(always)]
    pub fn insert_type<T: ?Sized + 'static>(&mut self, v: V) -> Option<V> {
        self.insert(TypeId::of::<T>(), v)
    }

    /// Removes the value for `type_id`.
    #[inline]
    pub fn remove(&mut self, type_id: &TypeId) -> Option<V> {
        self.0.remove(type_id)
    }

    /// Returns `true` if a value is stored for `type_id`.
    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    /// Returns `true` if a value is stored for `T`.
    #[inline(always)]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&TypeId::of::<T>())
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TypeIdMap<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V: Debug> Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeIdMap;

    #[test]
    fn insert_overwrites() {
        let mut map = TypeIdMap::new();
        assert_eq!(map.insert_type::<i32>(1), None);
        assert_eq!(map.insert_type::<i32>(2), Some(1));
        assert_eq!(map.get_type::<i32>(), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_or_insert_runs_once() {
        let mut map = TypeIdMap::<u8>::new();
        let mut calls = 0;
        *map.get_or_insert(TypeId::of::<u64>(), || {
            calls += 1;
            3
        }) += 1;
        map.get_or_insert(TypeId::of::<u64>(), || {
            calls += 1;
            0
        });
        assert_eq!(calls, 1);
        assert_eq!(map.get_type::<u64>(), Some(&4));
    }

    #[test]
    fn distinct_types_do_not_collide() {
        let mut map = TypeIdMap::new();
        map.insert_type::<u8>("u8");
        map.insert_type::<i8>("i8");
        map.insert_type::<alloc::string::String>("string");
        assert_eq!(map.get_type::<u8>(), Some(&"u8"));
        assert_eq!(map.get_type::<i8>(), Some(&"i8"));
        assert!(map.remove(&TypeId::of::<i8>()).is_some());
        assert!(!map.contains_type::<i8>());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn values_cover_every_entry() {
        let mut map = TypeIdMap::new();
        map.insert_type::<u8>(1);
        map.insert_type::<u16>(2);
        map.insert_type::<u8>(3);

        let mut values: alloc::vec::Vec<i32> = map.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, [2, 3]);
        assert!(!map.is_empty());
    }
}
