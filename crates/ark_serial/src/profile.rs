use core::any::Any;

use ark_reflect::access::AccessPath;
use ark_reflect::info::{Type, TypeInfo, Typed};

use crate::compile::AccessExpr;
use crate::{MappingError, MemberBinding, MemberMap};

// -----------------------------------------------------------------------------
// TypeProfile

/// The ordered members serialized for one record type.
///
/// Declaration order is wire order. A profile is built once, when it is
/// registered; building compiles every member and releases the data used to
/// compile them.
///
/// # Examples
///
/// ```
/// use ark_reflect::derive::Record;
/// use ark_serial::{MappingError, TypeProfile};
///
/// #[derive(Record, Default)]
/// #[record(default)]
/// struct Inner {
///     value: i32,
/// }
///
/// #[derive(Record, Default)]
/// #[record(default)]
/// struct Outer {
///     id: u16,
///     inner: Option<Inner>,
/// }
///
/// let mut profile = TypeProfile::of::<Outer>();
/// profile.map::<u16>("id")?;
/// profile.map::<i32>("inner.value")?;
/// profile.build()?;
///
/// // Reading through an absent `inner` creates it.
/// let mut outer = Outer::default();
/// let value = profile.members()[1].get(&mut outer)?;
/// assert_eq!(value.downcast::<i32>()?, 0);
/// assert!(outer.inner.is_some());
/// # Ok::<(), MappingError>(())
/// ```
#[derive(Debug)]
pub struct TypeProfile {
    target: &'static TypeInfo,
    members: Vec<MemberBinding>,
}

impl TypeProfile {
    /// Creates an empty profile for `R`.
    #[inline]
    pub fn of<R: Typed>() -> Self {
        Self::from_info(R::type_info())
    }

    /// Creates an empty profile for the type described by `target`.
    #[inline]
    pub fn from_info(target: &'static TypeInfo) -> Self {
        Self {
            target,
            members: Vec::new(),
        }
    }

    /// Returns the [`Type`] of the record.
    #[inline]
    pub fn target(&self) -> Type {
        self.target.ty()
    }

    /// Returns the [`TypeInfo`] of the record.
    #[inline]
    pub fn target_info(&self) -> &'static TypeInfo {
        self.target
    }

    /// Appends a member reached through `path`, whose leaf is of type `M`.
    ///
    /// The path is checked against the type descriptors now: an unknown
    /// member, a member that is not a record in the middle of the path, or a
    /// leaf that is not an `M` is reported as [`MappingError::InvalidPath`].
    pub fn map<'a, M: Any>(
        &mut self,
        path: impl AccessPath<'a>,
    ) -> Result<MemberMap<'_, M>, MappingError> {
        let access = AccessExpr::resolve(self.target, &path)?;
        let leaf = access.leaf();
        if !leaf.type_is::<M>() {
            return Err(MappingError::InvalidPath {
                ty: self.target.type_name(),
                path: access.path().to_owned(),
                reason: format!(
                    "`{}` is of type `{}`, not `{}`",
                    leaf.name(),
                    leaf.ty(),
                    core::any::type_name::<M>(),
                ),
            });
        }

        let index = self.members.len();
        self.members.push(MemberBinding::declare(access));
        Ok(MemberMap::new(&mut self.members, index))
    }

    /// Compiles every member not compiled yet.
    ///
    /// Building twice is harmless, members mapped after a build are compiled
    /// by the next one.
    pub fn build(&mut self) -> Result<(), MappingError> {
        for member in &mut self.members {
            member.build()?;
        }
        log::debug!(
            "built profile of `{}` with {} members",
            self.target.type_name(),
            self.members.len(),
        );
        Ok(())
    }

    /// Returns `true` if every member is compiled.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.members.iter().all(MemberBinding::is_built)
    }

    /// Returns the members in wire order.
    #[inline]
    pub fn members(&self) -> &[MemberBinding] {
        &self.members
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if no member is mapped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// -----------------------------------------------------------------------------
// ProfileSource

/// A provider of a [`TypeProfile`].
///
/// Implemented by the types that declare profiles, so they can be registered
/// by type with [`ProfileSerializer::register_source`] or collected with
/// [`submit_profile!`](crate::submit_profile).
///
/// ```
/// use ark_reflect::derive::Record;
/// use ark_serial::{MappingError, ProfileSerializer, ProfileSource, TypeProfile};
///
/// #[derive(Record, Default)]
/// #[record(default)]
/// struct Ping {
///     seq: u32,
/// }
///
/// struct PingProfile;
///
/// impl ProfileSource for PingProfile {
///     fn profile() -> Result<TypeProfile, MappingError> {
///         let mut profile = TypeProfile::of::<Ping>();
///         profile.map::<u32>("seq")?;
///         Ok(profile)
///     }
/// }
///
/// let mut serializer = ProfileSerializer::new();
/// serializer.register_source::<PingProfile>()?;
/// assert!(serializer.has_profile::<Ping>());
/// # Ok::<(), MappingError>(())
/// ```
///
/// [`ProfileSerializer::register_source`]: crate::ProfileSerializer::register_source
pub trait ProfileSource {
    /// Declares the profile.
    fn profile() -> Result<TypeProfile, MappingError>;
}

#[cfg(test)]
mod tests {
    use ark_reflect::derive::Record;

    use super::TypeProfile;
    use crate::{MappingError, ValueBox};

    #[derive(Record, Default, Debug, PartialEq)]
    #[record(default)]
    struct Inner {
        value: i32,
    }

    #[derive(Record, Default, Debug, PartialEq)]
    #[record(default)]
    struct Outer {
        count: u32,
        inner: Option<Inner>,
    }

    #[test]
    fn leaf_type_is_checked() {
        let mut profile = TypeProfile::of::<Outer>();
        let err = profile.map::<i64>("count").unwrap_err();
        assert!(matches!(err, MappingError::InvalidPath { ref reason, .. } if reason.contains("u32")));
        assert!(profile.is_empty());
    }

    #[test]
    fn build_is_idempotent() {
        let mut profile = TypeProfile::of::<Outer>();
        profile.map::<u32>("count").unwrap();
        assert!(!profile.is_built());

        profile.build().unwrap();
        profile.build().unwrap();
        assert!(profile.is_built());

        // Members mapped afterwards are compiled by the next build.
        profile.map::<i32>("inner.value").unwrap();
        assert!(!profile.is_built());
        profile.build().unwrap();
        assert_eq!(profile.len(), 2);
        assert!(profile.is_built());
    }

    #[test]
    fn unbuilt_member_is_rejected() {
        let mut profile = TypeProfile::of::<Outer>();
        profile.map::<u32>("count").unwrap();
        let mut outer = Outer::default();
        assert!(profile.members()[0].get(&mut outer).is_err());
    }

    #[test]
    fn setter_attaches_intermediate() {
        let mut profile = TypeProfile::of::<Outer>();
        profile.map::<i32>("inner.value").unwrap();
        profile.build().unwrap();

        let mut outer = Outer::default();
        profile.members()[0]
            .set(&mut outer, ValueBox::new(42_i32))
            .unwrap();
        assert_eq!(outer.inner, Some(Inner { value: 42 }));

        let err = profile.members()[0]
            .set(&mut outer, ValueBox::new(42_u8))
            .unwrap_err();
        assert!(matches!(err, MappingError::TypeCastFailure { expected: "i32", actual: "u8" }));
    }

    #[test]
    fn as_type_round_trips_through_cast() {
        let mut profile = TypeProfile::of::<Outer>();
        profile.map::<u32>("count").unwrap().as_type::<u8>().unwrap();
        profile.build().unwrap();
        let member = &profile.members()[0];

        let mut outer = Outer {
            count: 300,
            ..Outer::default()
        };
        // Narrowing truncates like `as`.
        assert_eq!(member.get(&mut outer).unwrap().downcast::<u8>().unwrap(), 44);

        member.set(&mut outer, ValueBox::new(7_u8)).unwrap();
        assert_eq!(outer.count, 7);
        assert!(member.set(&mut outer, ValueBox::new(String::new())).is_err());
    }

    #[test]
    fn failed_customization_drops_member() {
        let mut profile = TypeProfile::of::<Outer>();
        profile.map::<u32>("count").unwrap();

        let err = profile
            .map::<u32>("count")
            .unwrap()
            .with_indexer_key(0_usize)
            .unwrap_err();
        assert!(matches!(err, MappingError::NoIndexer { ty: "u32", .. }));
        assert_eq!(profile.len(), 1);

        let err = profile
            .map::<i32>("inner.value")
            .unwrap()
            .as_type::<u8>()
            .unwrap()
            .as_type::<String>()
            .unwrap_err();
        assert!(matches!(err, MappingError::TypeCastFailure { .. }));
        assert_eq!(profile.len(), 1);
        assert_eq!(profile.members()[0].path(), "count");
    }

    #[test]
    fn unsupported_cast_is_a_configuration_error() {
        let mut profile = TypeProfile::of::<Outer>();
        let err = profile
            .map::<u32>("count")
            .unwrap()
            .as_type::<String>()
            .unwrap_err();
        assert!(matches!(err, MappingError::TypeCastFailure { expected: "alloc::string::String", .. }));
    }
}
