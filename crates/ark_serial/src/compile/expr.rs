use core::any::Any;
use core::fmt;
use std::sync::Arc;

use ark_reflect::info::{IndexError, IndexerInfo, Type, TypeInfo};

use crate::compile::{AccessExpr, cast_value};
use crate::{MappingError, ValueBox};

// -----------------------------------------------------------------------------
// Compiled accessors

/// A compiled read of a member, `(record) -> value`.
///
/// Takes the record mutably: absent `Option` intermediates on the path are
/// constructed and stay attached to the record, as they are for writes.
pub type Getter = Arc<dyn Fn(&mut dyn Any) -> Result<ValueBox, MappingError> + Send + Sync>;

/// A compiled write of a member, `(record, value) -> ()`.
pub type Setter = Arc<dyn Fn(&mut dyn Any, ValueBox) -> Result<(), MappingError> + Send + Sync>;

#[inline(always)]
fn getter<F>(f: F) -> Getter
where
    F: Fn(&mut dyn Any) -> Result<ValueBox, MappingError> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[inline(always)]
fn setter<F>(f: F) -> Setter
where
    F: Fn(&mut dyn Any, ValueBox) -> Result<(), MappingError> + Send + Sync + 'static,
{
    Arc::new(f)
}

// -----------------------------------------------------------------------------
// IndexKey

/// The key of an indexed member, fixed at configuration.
#[derive(Clone)]
pub struct IndexKey {
    ty: Type,
    key: Arc<dyn Any + Send + Sync>,
}

impl IndexKey {
    /// Captures `key`.
    #[inline]
    pub fn new<K: Any + Send + Sync>(key: K) -> Self {
        Self {
            ty: Type::of::<K>(),
            key: Arc::new(key),
        }
    }

    /// Returns the [`Type`] of the key.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Borrows the key.
    #[inline]
    pub fn as_any(&self) -> &dyn Any {
        &*self.key
    }
}

impl fmt::Debug for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexKey")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Transform

type Extract = Arc<dyn Fn(&dyn Any) -> Result<ValueBox, MappingError> + Send + Sync>;
type Combine = Arc<dyn Fn(&mut dyn Any, ValueBox) -> Result<(), MappingError> + Send + Sync>;

/// A pair of caller functions standing between a leaf `M` and its wire value.
#[derive(Clone)]
pub struct Transform {
    wire: Type,
    extract: Extract,
    combine: Combine,
}

impl Transform {
    /// Erases `extract: M -> S` and `combine: (M, S) -> ()`.
    pub fn new<M, S>(
        extract: impl Fn(&M) -> S + Send + Sync + 'static,
        combine: impl Fn(&mut M, S) + Send + Sync + 'static,
    ) -> Self
    where
        M: Any,
        S: Any,
    {
        let leaf_mismatch = || MappingError::TypeCastFailure {
            expected: core::any::type_name::<M>(),
            actual: "an erased value of another type",
        };
        Self {
            wire: Type::of::<S>(),
            extract: Arc::new(move |leaf: &dyn Any| -> Result<ValueBox, MappingError> {
                let leaf = leaf.downcast_ref::<M>().ok_or_else(leaf_mismatch)?;
                Ok(ValueBox::new(extract(leaf)))
            }),
            combine: Arc::new(move |leaf: &mut dyn Any, value: ValueBox| -> Result<(), MappingError> {
                let leaf = leaf.downcast_mut::<M>().ok_or_else(leaf_mismatch)?;
                combine(leaf, value.downcast::<S>()?);
                Ok(())
            }),
        }
    }

    /// Returns the [`Type`] exchanged with converters.
    #[inline]
    pub const fn wire(&self) -> Type {
        self.wire
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("wire", &self.wire)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn indexer_of(access: &AccessExpr, key: &IndexKey) -> Result<IndexerInfo, MappingError> {
    let leaf = access.leaf();
    match leaf.type_info().as_indexed() {
        Some(indexer) if indexer.key() == key.ty() => Ok(indexer.clone()),
        _ => Err(MappingError::NoIndexer {
            ty: leaf.ty().name(),
            key: key.ty().name(),
        }),
    }
}

fn require_copier(access: &AccessExpr, info: &TypeInfo) -> Result<(), MappingError> {
    if info.has_copier() {
        return Ok(());
    }
    Err(MappingError::InvalidPath {
        ty: access.root().type_name(),
        path: access.path().into(),
        reason: format!(
            "values of `{}` cannot be copied out, declare `#[record(clone)]` or use `map_by`",
            info.type_name()
        ),
    })
}

fn copy_out(info: &TypeInfo, value: &dyn Any) -> Result<ValueBox, MappingError> {
    let copied = info
        .clone_value(value)
        .ok_or(MappingError::TypeCastFailure {
            expected: info.type_name(),
            actual: "an erased value of another type",
        })?;
    ValueBox::from_boxed(info.ty(), copied)
}

// -----------------------------------------------------------------------------
// ReadExpr

/// What a getter does once it reached the owner of the leaf.
#[derive(Debug, Clone)]
pub enum ReadExpr {
    /// Copies the leaf out.
    Member,
    /// Copies `leaf[key]` out.
    Index { key: IndexKey },
    /// Passes the leaf to a caller function.
    Transform(Transform),
    /// Converts the result of `inner` to `to`.
    Cast { inner: Box<ReadExpr>, to: Type },
}

impl ReadExpr {
    /// Compiles the expression into a [`Getter`].
    pub fn lower(&self, access: &Arc<AccessExpr>) -> Result<Getter, MappingError> {
        let access = Arc::clone(access);
        match self {
            Self::Member => {
                let info = access.leaf().type_info();
                require_copier(&access, info)?;
                Ok(getter(move |record| {
                    let leaf = access.walk_leaf(record)?;
                    copy_out(info, leaf)
                }))
            }
            Self::Index { key } => {
                let indexer = indexer_of(&access, key)?;
                let info = indexer.value_info();
                require_copier(&access, info)?;
                let container_ty = access.leaf().ty();
                let key = key.clone();
                Ok(getter(move |record| {
                    let container = access.walk_leaf(record)?;
                    let value = indexer
                        .get(container, key.as_any())
                        .ok_or(MappingError::IndexerKeyAbsent {
                            ty: container_ty.name(),
                        })?;
                    copy_out(info, value)
                }))
            }
            Self::Transform(transform) => {
                let extract = Arc::clone(&transform.extract);
                Ok(getter(move |record| extract(&*access.walk_leaf(record)?)))
            }
            Self::Cast { inner, to } => {
                let inner = inner.lower(&access)?;
                let to = *to;
                Ok(getter(move |record| cast_value(inner(record)?, to)))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// WriteExpr

/// What a setter does once it reached the owner of the leaf.
#[derive(Debug, Clone)]
pub enum WriteExpr {
    /// Replaces the leaf.
    Member,
    /// Stores `leaf[key] = value`.
    Index { key: IndexKey },
    /// Passes the leaf and the value to a caller function.
    Transform(Transform),
    /// Converts the value to `to` before running `inner`.
    Cast { inner: Box<WriteExpr>, to: Type },
}

impl WriteExpr {
    /// Compiles the expression into a [`Setter`].
    pub fn lower(&self, access: &Arc<AccessExpr>) -> Result<Setter, MappingError> {
        let access = Arc::clone(access);
        match self {
            Self::Member => {
                let info = access.leaf().type_info();
                Ok(setter(move |record, value| {
                    let slot = access.walk_leaf(record)?;
                    let actual = value.ty().name();
                    info.assign(slot, value.into_any())
                        .map_err(|_| MappingError::TypeCastFailure {
                            expected: info.type_name(),
                            actual,
                        })
                }))
            }
            Self::Index { key } => {
                let indexer = indexer_of(&access, key)?;
                let container_ty = access.leaf().ty();
                let key = key.clone();
                Ok(setter(move |record, value| {
                    let container = access.walk_leaf(record)?;
                    let actual = value.ty().name();
                    indexer
                        .set(container, key.as_any(), value.into_any())
                        .map_err(|err| match err {
                            IndexError::Absent => MappingError::IndexerKeyAbsent {
                                ty: container_ty.name(),
                            },
                            IndexError::Mismatch => MappingError::TypeCastFailure {
                                expected: indexer.value().name(),
                                actual,
                            },
                        })
                }))
            }
            Self::Transform(transform) => {
                let combine = Arc::clone(&transform.combine);
                Ok(setter(move |record, value| {
                    combine(access.walk_leaf(record)?, value)
                }))
            }
            Self::Cast { inner, to } => {
                let inner = inner.lower(&access)?;
                let to = *to;
                Ok(setter(move |record, value| inner(record, cast_value(value, to)?)))
            }
        }
    }
}
