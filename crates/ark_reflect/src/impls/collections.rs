use core::any::Any;
use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap};

use crate::impls::GenericTypeInfoCell;
use crate::info::{IndexError, IndexerInfo, TypeInfo, TypeKind, Typed};

// -----------------------------------------------------------------------------
// Vec

fn vec_get<'a, T: Typed>(container: &'a dyn Any, key: &dyn Any) -> Option<&'a dyn Any> {
    let vec = container.downcast_ref::<Vec<T>>()?;
    vec.get(*key.downcast_ref::<usize>()?).map(|v| v as &dyn Any)
}

// Writing one past the end appends, so an empty vector can be filled in order.
fn vec_set<T: Typed>(
    container: &mut dyn Any,
    key: &dyn Any,
    value: Box<dyn Any>,
) -> Result<(), IndexError> {
    let vec = container
        .downcast_mut::<Vec<T>>()
        .ok_or(IndexError::Mismatch)?;
    let index = *key.downcast_ref::<usize>().ok_or(IndexError::Mismatch)?;
    let value = *value.downcast::<T>().map_err(|_| IndexError::Mismatch)?;

    match index.cmp(&vec.len()) {
        core::cmp::Ordering::Less => vec[index] = value,
        core::cmp::Ordering::Equal => vec.push(value),
        core::cmp::Ordering::Greater => return Err(IndexError::Absent),
    }
    Ok(())
}

impl<T: Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let indexer = IndexerInfo::new::<usize, T>(vec_get::<T>, vec_set::<T>);
            TypeInfo::new::<Self>(TypeKind::Indexed(indexer)).with_default::<Self>()
        })
    }
}

// -----------------------------------------------------------------------------
// HashMap

fn hash_map_get<'a, K, V, S>(container: &'a dyn Any, key: &dyn Any) -> Option<&'a dyn Any>
where
    K: Eq + Hash + Any,
    V: Typed,
    S: BuildHasher + Any,
{
    let map = container.downcast_ref::<HashMap<K, V, S>>()?;
    map.get(key.downcast_ref::<K>()?).map(|v| v as &dyn Any)
}

fn hash_map_set<K, V, S>(
    container: &mut dyn Any,
    key: &dyn Any,
    value: Box<dyn Any>,
) -> Result<(), IndexError>
where
    K: Eq + Hash + Clone + Any,
    V: Typed,
    S: BuildHasher + Any,
{
    let map = container
        .downcast_mut::<HashMap<K, V, S>>()
        .ok_or(IndexError::Mismatch)?;
    let key = key.downcast_ref::<K>().ok_or(IndexError::Mismatch)?;
    let value = value.downcast::<V>().map_err(|_| IndexError::Mismatch)?;
    map.insert(key.clone(), *value);
    Ok(())
}

impl<K, V, S> Typed for HashMap<K, V, S>
where
    K: Eq + Hash + Clone + Any,
    V: Typed,
    S: BuildHasher + Default + Any,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let indexer = IndexerInfo::new::<K, V>(
                hash_map_get::<K, V, S>,
                hash_map_set::<K, V, S>,
            );
            TypeInfo::new::<Self>(TypeKind::Indexed(indexer)).with_default::<Self>()
        })
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

fn btree_map_get<'a, K, V>(container: &'a dyn Any, key: &dyn Any) -> Option<&'a dyn Any>
where
    K: Ord + Any,
    V: Typed,
{
    let map = container.downcast_ref::<BTreeMap<K, V>>()?;
    map.get(key.downcast_ref::<K>()?).map(|v| v as &dyn Any)
}

fn btree_map_set<K, V>(
    container: &mut dyn Any,
    key: &dyn Any,
    value: Box<dyn Any>,
) -> Result<(), IndexError>
where
    K: Ord + Clone + Any,
    V: Typed,
{
    let map = container
        .downcast_mut::<BTreeMap<K, V>>()
        .ok_or(IndexError::Mismatch)?;
    let key = key.downcast_ref::<K>().ok_or(IndexError::Mismatch)?;
    let value = value.downcast::<V>().map_err(|_| IndexError::Mismatch)?;
    map.insert(key.clone(), *value);
    Ok(())
}

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Ord + Clone + Any,
    V: Typed,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let indexer = IndexerInfo::new::<K, V>(btree_map_get::<K, V>, btree_map_set::<K, V>);
            TypeInfo::new::<Self>(TypeKind::Indexed(indexer)).with_default::<Self>()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use crate::info::{IndexError, Typed};

    #[test]
    fn vec_appends_at_len() {
        let info = <Vec<u8>>::type_info().as_indexed().unwrap();
        let mut vec: Vec<u8> = Vec::new();
        info.set(&mut vec, &0_usize, Box::new(1_u8)).unwrap();
        info.set(&mut vec, &1_usize, Box::new(2_u8)).unwrap();
        info.set(&mut vec, &0_usize, Box::new(5_u8)).unwrap();
        assert_eq!(vec, [5, 2]);
        assert_eq!(
            info.set(&mut vec, &7_usize, Box::new(0_u8)),
            Err(IndexError::Absent)
        );
        assert!(info.get(&vec, &7_usize).is_none());
    }

    #[test]
    fn hash_map_rejects_wrong_key() {
        let info = <HashMap<String, i32>>::type_info().as_indexed().unwrap();
        let mut map: HashMap<String, i32> = HashMap::new();
        assert_eq!(
            info.set(&mut map, &1_u32, Box::new(1_i32)),
            Err(IndexError::Mismatch)
        );
        assert!(map.is_empty());
    }

    #[test]
    fn btree_map_round_trip() {
        let info = <BTreeMap<u8, String>>::type_info().as_indexed().unwrap();
        let mut map: BTreeMap<u8, String> = BTreeMap::new();
        info.set(&mut map, &3_u8, Box::new(String::from("c"))).unwrap();
        let value = info.get(&map, &3_u8).unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("c"));
        assert!(info.value().is::<String>());
    }
}
