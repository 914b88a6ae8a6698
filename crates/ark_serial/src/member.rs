use core::any::Any;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use std::sync::Arc;

use ark_reflect::info::Type;

use crate::compile::{
    AccessExpr, Getter, IndexKey, ReadExpr, Setter, Transform, WriteExpr, supports_cast,
};
use crate::{MappingError, ValueBox};

// -----------------------------------------------------------------------------
// MemberBinding

#[derive(Debug)]
struct Declaration {
    access: Arc<AccessExpr>,
    read: ReadExpr,
    write: WriteExpr,
}

struct Compiled {
    getter: Getter,
    setter: Setter,
}

enum BindingState {
    Declared(Declaration),
    Built(Compiled),
}

/// One member of a [`TypeProfile`](crate::TypeProfile).
///
/// Until the profile is built the binding holds the resolved path and the
/// expressions describing its accesses. Building compiles them into a
/// [`Getter`] and a [`Setter`] and drops everything else.
///
/// The wire type selects the converter used for the member.
pub struct MemberBinding {
    record: &'static str,
    path: String,
    wire: Type,
    state: BindingState,
}

impl MemberBinding {
    pub(crate) fn declare(access: AccessExpr) -> Self {
        Self {
            record: access.root().type_name(),
            path: access.path().to_owned(),
            wire: access.leaf().ty(),
            state: BindingState::Declared(Declaration {
                access: Arc::new(access),
                read: ReadExpr::Member,
                write: WriteExpr::Member,
            }),
        }
    }

    /// Returns the path as declared.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the [`Type`] used to select the converter of this member.
    #[inline]
    pub const fn wire_type(&self) -> Type {
        self.wire
    }

    /// Returns `true` once the accessors are compiled.
    #[inline]
    pub const fn is_built(&self) -> bool {
        matches!(self.state, BindingState::Built(_))
    }

    /// Returns the compiled getter.
    #[inline]
    pub fn getter(&self) -> Option<&Getter> {
        match &self.state {
            BindingState::Built(compiled) => Some(&compiled.getter),
            BindingState::Declared(_) => None,
        }
    }

    /// Returns the compiled setter.
    #[inline]
    pub fn setter(&self) -> Option<&Setter> {
        match &self.state {
            BindingState::Built(compiled) => Some(&compiled.setter),
            BindingState::Declared(_) => None,
        }
    }

    /// Reads the member out of `record`.
    ///
    /// Not free of side effects: absent intermediates on the path are
    /// constructed and attached to `record`.
    pub fn get(&self, record: &mut dyn Any) -> Result<ValueBox, MappingError> {
        let getter = self.getter().ok_or_else(|| self.not_built())?;
        getter(record)
    }

    /// Writes `value` into the member of `record`.
    pub fn set(&self, record: &mut dyn Any, value: ValueBox) -> Result<(), MappingError> {
        let setter = self.setter().ok_or_else(|| self.not_built())?;
        setter(record, value)
    }

    /// Compiles the accessors. Does nothing if they already are.
    pub(crate) fn build(&mut self) -> Result<(), MappingError> {
        let BindingState::Declared(declaration) = &self.state else {
            return Ok(());
        };
        let compiled = Compiled {
            getter: declaration.read.lower(&declaration.access)?,
            setter: declaration.write.lower(&declaration.access)?,
        };
        self.state = BindingState::Built(compiled);
        Ok(())
    }

    fn declaration_mut(&mut self) -> Result<&mut Declaration, MappingError> {
        match &mut self.state {
            BindingState::Declared(declaration) => Ok(declaration),
            BindingState::Built(_) => Err(MappingError::InvalidPath {
                ty: self.record,
                path: self.path.clone(),
                reason: "the member is already built and cannot be reconfigured".into(),
            }),
        }
    }

    fn not_built(&self) -> MappingError {
        MappingError::InvalidPath {
            ty: self.record,
            path: self.path.clone(),
            reason: "the member is used before its profile was built".into(),
        }
    }
}

impl fmt::Debug for MemberBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberBinding")
            .field("path", &self.path)
            .field("wire", &self.wire)
            .field("built", &self.is_built())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// MemberMap

/// Fluent configuration of a freshly mapped member whose leaf is `M`.
///
/// Returned by [`TypeProfile::map`](crate::TypeProfile::map).
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use ark_reflect::derive::Record;
/// use ark_serial::{MappingError, TypeProfile};
///
/// #[derive(Record, Default)]
/// #[record(default)]
/// struct Stats {
///     level: u32,
///     counters: HashMap<String, i32>,
///     name: String,
/// }
///
/// let mut profile = TypeProfile::of::<Stats>();
/// profile.map::<u32>("level")?.as_type::<u8>()?;
/// profile.map::<HashMap<String, i32>>("counters")?.with_indexer_key("kills")?;
/// profile
///     .map::<String>("name")?
///     .map_by(|name: &String| name.len() as u16, |_, _| {})?;
///
/// let wires: Vec<_> = profile.members().iter().map(|m| m.wire_type().name()).collect();
/// assert_eq!(wires, ["u8", "i32", "u16"]);
/// # Ok::<(), MappingError>(())
/// ```
///
/// A customization that fails removes the member from the profile.
pub struct MemberMap<'p, M> {
    members: &'p mut Vec<MemberBinding>,
    index: usize,
    _marker: PhantomData<fn() -> M>,
}

impl<'p, M: Any> MemberMap<'p, M> {
    /// Wraps the member at `index`, the last one of `members`.
    #[inline]
    pub(crate) fn new(members: &'p mut Vec<MemberBinding>, index: usize) -> Self {
        Self {
            members,
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the current wire type of the member.
    #[inline]
    pub fn wire_type(&self) -> Type {
        self.members[self.index].wire
    }

    /// Reads and writes `leaf[key]` instead of the leaf.
    ///
    /// The wire type becomes the value type of the indexer. Previous
    /// `map_by`/`as_type` customizations are discarded.
    ///
    /// A `&'static str` key is accepted for `String` keyed containers.
    /// Fails with [`MappingError::NoIndexer`] if `M` has no indexer accepting
    /// keys of type `K`.
    pub fn with_indexer_key<K: Any + Send + Sync>(self, key: K) -> Result<Self, MappingError> {
        self.customize(|binding| {
            let no_indexer = || MappingError::NoIndexer {
                ty: core::any::type_name::<M>(),
                key: core::any::type_name::<K>(),
            };

            let declaration = binding.declaration_mut()?;
            let indexer = declaration
                .access
                .leaf()
                .type_info()
                .as_indexed()
                .ok_or_else(no_indexer)?;

            let key = if indexer.key().is::<K>() {
                IndexKey::new(key)
            } else if let Some(text) = (&key as &dyn Any).downcast_ref::<&'static str>()
                && indexer.key().is::<String>()
            {
                IndexKey::new(String::from(*text))
            } else {
                return Err(no_indexer());
            };

            let wire = indexer.value();
            declaration.read = ReadExpr::Index { key: key.clone() };
            declaration.write = WriteExpr::Index { key };
            binding.wire = wire;
            Ok(())
        })
    }

    /// Replaces verbatim access with caller functions.
    ///
    /// `extract` computes the wire value from the leaf when serializing,
    /// `combine` applies a decoded wire value to the leaf. Pass a no-op for a
    /// direction that is never used. The wire type becomes `S`.
    pub fn map_by<S: Any>(
        self,
        extract: impl Fn(&M) -> S + Send + Sync + 'static,
        combine: impl Fn(&mut M, S) + Send + Sync + 'static,
    ) -> Result<Self, MappingError> {
        self.customize(|binding| {
            let transform = Transform::new(extract, combine);
            let wire = transform.wire();

            let declaration = binding.declaration_mut()?;
            declaration.read = ReadExpr::Transform(transform.clone());
            declaration.write = WriteExpr::Transform(transform);
            binding.wire = wire;
            Ok(())
        })
    }

    /// Forces the wire type to `T` through a numeric cast.
    ///
    /// The value is converted to `T` after it is read and back before it is
    /// written. Conversions follow `as`: narrowing integers truncate and
    /// out-of-range values are not checked.
    ///
    /// Fails with [`MappingError::TypeCastFailure`] unless both the current
    /// wire type and `T` are primitive numbers (or are the same type).
    #[inline]
    pub fn as_type<T: Any>(self) -> Result<Self, MappingError> {
        self.as_type_dyn(Type::of::<T>())
    }

    /// Type-erased version of [`as_type`](Self::as_type).
    pub fn as_type_dyn(self, to: Type) -> Result<Self, MappingError> {
        self.customize(|binding| {
            let from = binding.wire;
            if from == to {
                return Ok(());
            }
            if !supports_cast(from, to) {
                return Err(MappingError::TypeCastFailure {
                    expected: to.name(),
                    actual: from.name(),
                });
            }

            let declaration = binding.declaration_mut()?;
            let read = mem::replace(&mut declaration.read, ReadExpr::Member);
            let write = mem::replace(&mut declaration.write, WriteExpr::Member);
            declaration.read = ReadExpr::Cast {
                inner: Box::new(read),
                to,
            };
            declaration.write = WriteExpr::Cast {
                inner: Box::new(write),
                to: from,
            };
            binding.wire = to;
            Ok(())
        })
    }

    // Runs `f` on the binding, or drops the binding when `f` fails.
    fn customize(
        self,
        f: impl FnOnce(&mut MemberBinding) -> Result<(), MappingError>,
    ) -> Result<Self, MappingError> {
        match f(&mut self.members[self.index]) {
            Ok(()) => Ok(self),
            Err(err) => {
                self.members.truncate(self.index);
                Err(err)
            }
        }
    }
}

impl<M> fmt::Debug for MemberMap<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.members[self.index], f)
    }
}
