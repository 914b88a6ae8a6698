use core::any::{Any, TypeId};
use core::fmt;
use std::io::{self, Read, Write};

use ark_reflect::info::Type;
use ark_utils::TypeIdMap;

use crate::converter::{
    Converter, DecodeFn, DefaultConverters, EncodeFn, Endian, TypeConverterRegistry,
};
use crate::{MappingError, MemberBinding, ProfileSource, SerializerConfig, TypeProfile};

// -----------------------------------------------------------------------------
// ProfileSerializer

/// Encodes and decodes records through their registered [`TypeProfile`]s.
///
/// A record is written as the concatenation of its members, in declaration
/// order, each encoded by the converter of its wire type. There is no header
/// and no framing: both ends need the same profile.
///
/// Registration takes `&mut self` and serialization `&self`, so a configured
/// serializer can be shared between threads, each call using its own stream.
///
/// # Examples
///
/// ```
/// use ark_reflect::derive::Record;
/// use ark_serial::{MappingError, ProfileSerializer, TypeProfile};
///
/// #[derive(Record, Default, Debug, PartialEq)]
/// #[record(default)]
/// struct Header {
///     kind: u8,
///     length: u32,
/// }
///
/// let mut profile = TypeProfile::of::<Header>();
/// profile.map::<u8>("kind")?;
/// profile.map::<u32>("length")?;
///
/// let mut serializer = ProfileSerializer::new();
/// serializer.register_profile(profile)?;
///
/// let mut header = Header { kind: 2, length: 258 };
/// let bytes = serializer.to_bytes(&mut header)?;
/// assert_eq!(bytes, [2, 2, 1, 0, 0]);
///
/// let decoded: Header = serializer.from_bytes(&bytes)?;
/// assert_eq!(decoded, header);
/// # Ok::<(), MappingError>(())
/// ```
pub struct ProfileSerializer {
    converters: TypeConverterRegistry,
    profiles: TypeIdMap<TypeProfile>,
    initial_buffer: usize,
}

impl ProfileSerializer {
    /// Creates a serializer with the little-endian baseline converters.
    pub fn new() -> Self {
        Self::with_converters(DefaultConverters::registry(Endian::Little))
    }

    /// Creates a serializer using `converters` instead of the baseline ones.
    pub fn with_converters(converters: TypeConverterRegistry) -> Self {
        Self {
            converters,
            profiles: TypeIdMap::new(),
            initial_buffer: SerializerConfig::DEFAULT_INITIAL_BUFFER,
        }
    }

    /// Creates a serializer with the baseline converters described by `config`.
    pub fn from_config(config: &SerializerConfig) -> Self {
        Self {
            converters: DefaultConverters::registry(config.endian),
            profiles: TypeIdMap::new(),
            initial_buffer: config.initial_buffer,
        }
    }

    // -------------------------------------------------------------------------
    // Registration

    /// Registers the converter of wire type `T`, replacing any existing one.
    pub fn register_type<T: Any>(
        &mut self,
        encode: impl Fn(&mut dyn Write, &T) -> io::Result<()> + Send + Sync + 'static,
        decode: impl Fn(&mut dyn Read) -> io::Result<T> + Send + Sync + 'static,
    ) {
        self.insert_converter(Converter::of(encode, decode));
    }

    /// Registers erased converter functions for wire type `ty`.
    pub fn register_type_dyn(&mut self, ty: Type, encode: EncodeFn, decode: DecodeFn) {
        self.insert_converter(Converter::new(ty, encode, decode));
    }

    fn insert_converter(&mut self, converter: Converter) {
        let ty = converter.ty();
        if self.converters.insert(converter).is_some() {
            log::debug!("overwrote the converter of `{ty}`");
        } else {
            log::debug!("registered a converter for `{ty}`");
        }
    }

    /// Builds `profile` and registers it for its record type.
    ///
    /// A profile already registered for the same type is replaced.
    pub fn register_profile(&mut self, mut profile: TypeProfile) -> Result<(), MappingError> {
        profile.build()?;
        let target = profile.target();
        if self.profiles.insert(target.id(), profile).is_some() {
            log::warn!("replaced the profile of `{target}`");
        } else {
            log::debug!("registered the profile of `{target}`");
        }
        Ok(())
    }

    /// Registers the profile declared by `S`.
    #[inline]
    pub fn register_source<S: ProfileSource>(&mut self) -> Result<(), MappingError> {
        self.register_profile(S::profile()?)
    }

    /// Registers every profile of `profiles`, stopping at the first failure.
    pub fn register_profiles(
        &mut self,
        profiles: impl IntoIterator<Item = Result<TypeProfile, MappingError>>,
    ) -> Result<(), MappingError> {
        for profile in profiles {
            self.register_profile(profile?)?;
        }
        Ok(())
    }

    /// Registers every source submitted with [`submit_profile!`](crate::submit_profile).
    ///
    /// Returns the number of profiles registered.
    #[cfg(feature = "auto_register")]
    pub fn register_submitted(&mut self) -> Result<usize, MappingError> {
        let mut count = 0;
        for registration in crate::auto_register::submitted() {
            self.register_profile(registration.profile()?)?;
            count += 1;
        }
        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Queries

    /// Returns `true` if a profile is registered for `R`.
    #[inline]
    pub fn has_profile<R: Any>(&self) -> bool {
        self.profiles.contains_type::<R>()
    }

    /// Returns `true` if a profile is registered for `ty`.
    #[inline]
    pub fn has_profile_dyn(&self, ty: TypeId) -> bool {
        self.profiles.contains(&ty)
    }

    /// Returns the profile registered for `ty`.
    #[inline]
    pub fn profile(&self, ty: TypeId) -> Option<&TypeProfile> {
        self.profiles.get(&ty)
    }

    /// Returns the number of registered profiles.
    #[inline]
    pub fn profile_len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns the converter registry.
    #[inline]
    pub fn converters(&self) -> &TypeConverterRegistry {
        &self.converters
    }

    // -------------------------------------------------------------------------
    // Serialization

    /// Writes the mapped members of `record` to `writer`, then flushes it.
    ///
    /// Members are read through their getters, so absent intermediates of
    /// `record` are created on the way. On error nothing is written.
    #[inline]
    pub fn serialize<R: Any>(
        &self,
        writer: &mut impl Write,
        record: &mut R,
    ) -> Result<(), MappingError> {
        self.serialize_dyn(writer, Type::of::<R>(), record)
    }

    /// Erased version of [`serialize`](Self::serialize), `record` must be a `ty`.
    pub fn serialize_dyn(
        &self,
        writer: &mut dyn Write,
        ty: Type,
        record: &mut dyn Any,
    ) -> Result<(), MappingError> {
        let profile = self.lookup(ty)?;
        check_record(ty, record)?;

        let mut buffer: Vec<u8> = Vec::with_capacity(self.initial_buffer);
        for member in profile.members() {
            let value = member.get(record)?;
            self.converter_of(member)?.encode(&mut buffer, &value)?;
        }

        writer.write_all(&buffer)?;
        writer.flush()?;
        log::trace!("serialized `{ty}` into {} bytes", buffer.len());
        Ok(())
    }

    /// Serializes `record` into a new buffer.
    pub fn to_bytes<R: Any>(&self, record: &mut R) -> Result<Vec<u8>, MappingError> {
        let mut bytes: Vec<u8> = Vec::new();
        self.serialize(&mut bytes, record)?;
        Ok(bytes)
    }

    // -------------------------------------------------------------------------
    // Deserialization

    /// Reads a new `R` from `reader`.
    ///
    /// The record is created through its parameterless constructor, then
    /// every member is decoded in order and written through its setter.
    pub fn deserialize<R: Any>(&self, reader: &mut impl Read) -> Result<R, MappingError> {
        let ty = Type::of::<R>();
        let record = self.deserialize_dyn(reader, ty)?;
        record
            .downcast::<R>()
            .map(|record| *record)
            .map_err(|_| MappingError::TypeCastFailure {
                expected: ty.name(),
                actual: "an erased value of another type",
            })
    }

    /// Reads the members of `record` from `reader`, overwriting their values.
    #[inline]
    pub fn deserialize_into<R: Any>(
        &self,
        reader: &mut impl Read,
        record: &mut R,
    ) -> Result<(), MappingError> {
        self.deserialize_into_dyn(reader, Type::of::<R>(), record)
    }

    /// Erased version of [`deserialize`](Self::deserialize).
    pub fn deserialize_dyn(
        &self,
        reader: &mut dyn Read,
        ty: Type,
    ) -> Result<Box<dyn Any>, MappingError> {
        let profile = self.lookup(ty)?;
        let mut record = profile
            .target_info()
            .construct()
            .ok_or(MappingError::ConstructionFailure { ty: ty.name() })?;
        self.decode_members(reader, profile, &mut *record)?;
        Ok(record)
    }

    /// Erased version of [`deserialize_into`](Self::deserialize_into),
    /// `record` must be a `ty`.
    pub fn deserialize_into_dyn(
        &self,
        reader: &mut dyn Read,
        ty: Type,
        record: &mut dyn Any,
    ) -> Result<(), MappingError> {
        let profile = self.lookup(ty)?;
        check_record(ty, record)?;
        self.decode_members(reader, profile, record)
    }

    /// Deserializes a new `R` from `bytes`.
    pub fn from_bytes<R: Any>(&self, mut bytes: &[u8]) -> Result<R, MappingError> {
        self.deserialize(&mut bytes)
    }

    fn decode_members(
        &self,
        reader: &mut dyn Read,
        profile: &TypeProfile,
        record: &mut dyn Any,
    ) -> Result<(), MappingError> {
        for member in profile.members() {
            let value = self.converter_of(member)?.decode(reader)?;
            member.set(record, value)?;
        }
        log::trace!("deserialized `{}`", profile.target());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Helpers

    #[inline]
    fn lookup(&self, ty: Type) -> Result<&TypeProfile, MappingError> {
        self.profiles
            .get(&ty.id())
            .ok_or(MappingError::UnknownProfile { ty: ty.name() })
    }

    #[inline]
    fn converter_of(&self, member: &MemberBinding) -> Result<&Converter, MappingError> {
        let wire = member.wire_type();
        self.converters
            .get(wire.id())
            .ok_or(MappingError::UnknownConverter { ty: wire.name() })
    }
}

fn check_record(ty: Type, record: &dyn Any) -> Result<(), MappingError> {
    if record.type_id() == ty.id() {
        Ok(())
    } else {
        Err(MappingError::TypeCastFailure {
            expected: ty.name(),
            actual: "an erased value of another type",
        })
    }
}

impl Default for ProfileSerializer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProfileSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileSerializer")
            .field("converters", &self.converters)
            .field("profiles", &self.profiles.len())
            .field("initial_buffer", &self.initial_buffer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use ark_reflect::derive::Record;
    use ark_reflect::info::Type;

    use super::ProfileSerializer;
    use crate::{MappingError, TypeProfile};

    #[derive(Record, Default, Debug, PartialEq)]
    #[record(default)]
    struct Pair {
        left: u16,
        right: i8,
    }

    fn serializer() -> ProfileSerializer {
        let mut profile = TypeProfile::of::<Pair>();
        profile.map::<u16>("left").unwrap();
        profile.map::<i8>("right").unwrap();

        let mut serializer = ProfileSerializer::new();
        serializer.register_profile(profile).unwrap();
        serializer
    }

    #[test]
    fn serializer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProfileSerializer>();
    }

    #[test]
    fn registration_builds_profile() {
        let serializer = serializer();
        assert!(serializer.has_profile::<Pair>());
        assert_eq!(serializer.profile_len(), 1);
        assert!(
            serializer
                .profile(Type::of::<Pair>().id())
                .unwrap()
                .is_built()
        );
    }

    #[test]
    fn erased_record_type_is_checked() {
        let serializer = serializer();
        let mut other = 5_u32;
        let mut out: Vec<u8> = Vec::new();
        let err = serializer
            .serialize_dyn(&mut out, Type::of::<Pair>(), &mut other)
            .unwrap_err();
        assert!(matches!(err, MappingError::TypeCastFailure { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn erased_round_trip() {
        let serializer = serializer();
        let mut pair = Pair { left: 513, right: -1 };
        let mut bytes: Vec<u8> = Vec::new();
        serializer
            .serialize_dyn(&mut bytes, Type::of::<Pair>(), &mut pair)
            .unwrap();
        assert_eq!(bytes, [1, 2, 0xFF]);

        let decoded = serializer
            .deserialize_dyn(&mut bytes.as_slice(), Type::of::<Pair>())
            .unwrap();
        assert_eq!(decoded.downcast_ref::<Pair>(), Some(&pair));
    }

    #[test]
    fn truncated_input_is_an_io_error() {
        let serializer = serializer();
        let err = serializer.from_bytes::<Pair>(&[1]).unwrap_err();
        assert!(matches!(err, MappingError::Io(_)));
    }

    #[test]
    fn replacing_a_profile_changes_the_layout() {
        let mut serializer = serializer();
        let mut profile = TypeProfile::of::<Pair>();
        profile.map::<i8>("right").unwrap();
        serializer.register_profile(profile).unwrap();
        assert_eq!(serializer.profile_len(), 1);

        let mut pair = Pair { left: 9, right: 3 };
        assert_eq!(serializer.to_bytes(&mut pair).unwrap(), [3]);
    }
}
