use core::any::{Any, TypeId};
use core::fmt;
use std::io::{self, Read, Write};
use std::sync::Arc;

use ark_reflect::info::Type;
use ark_utils::TypeIdMap;

use crate::{MappingError, ValueBox};

/// Erased encoder, writes one value to a byte sink.
pub type EncodeFn = Arc<dyn Fn(&mut dyn Write, &ValueBox) -> Result<(), MappingError> + Send + Sync>;

/// Erased decoder, reads one value from a byte source.
pub type DecodeFn = Arc<dyn Fn(&mut dyn Read) -> Result<ValueBox, MappingError> + Send + Sync>;

// -----------------------------------------------------------------------------
// Converter

/// The encoder and decoder of one wire type.
#[derive(Clone)]
pub struct Converter {
    ty: Type,
    encode: EncodeFn,
    decode: DecodeFn,
}

impl Converter {
    /// Pairs erased functions for `ty`.
    #[inline]
    pub fn new(ty: Type, encode: EncodeFn, decode: DecodeFn) -> Self {
        Self { ty, encode, decode }
    }

    /// Erases typed functions for `T`.
    pub fn of<T: Any>(
        encode: impl Fn(&mut dyn Write, &T) -> io::Result<()> + Send + Sync + 'static,
        decode: impl Fn(&mut dyn Read) -> io::Result<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            encode: Arc::new(
                move |writer: &mut dyn Write, value: &ValueBox| -> Result<(), MappingError> {
                    Ok(encode(writer, value.downcast_ref::<T>()?)?)
                },
            ),
            decode: Arc::new(move |reader: &mut dyn Read| -> Result<ValueBox, MappingError> {
                Ok(ValueBox::new(decode(reader)?))
            }),
        }
    }

    /// Returns the wire [`Type`].
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Writes `value`.
    #[inline]
    pub fn encode(&self, writer: &mut dyn Write, value: &ValueBox) -> Result<(), MappingError> {
        (self.encode)(writer, value)
    }

    /// Reads one value.
    ///
    /// A decoder returning a value of another type than the wire type is
    /// reported as [`MappingError::TypeCastFailure`].
    #[inline]
    pub fn decode(&self, reader: &mut dyn Read) -> Result<ValueBox, MappingError> {
        let value = (self.decode)(reader)?;
        if value.ty() != self.ty {
            return Err(MappingError::TypeCastFailure {
                expected: self.ty.name(),
                actual: value.ty().name(),
            });
        }
        Ok(value)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// TypeConverterRegistry

/// Converters keyed by wire type. Registering a type twice overwrites.
///
/// # Examples
///
/// ```
/// use std::io::{Read, Write};
/// use ark_serial::converter::TypeConverterRegistry;
///
/// let mut registry = TypeConverterRegistry::new();
/// registry.register::<bool>(
///     |writer, value| writer.write_all(&[u8::from(*value)]),
///     |reader| {
///         let mut byte = [0];
///         reader.read_exact(&mut byte)?;
///         Ok(byte[0] != 0)
///     },
/// );
/// assert!(registry.contains_type::<bool>());
/// ```
#[derive(Clone, Default)]
pub struct TypeConverterRegistry {
    converters: TypeIdMap<Converter>,
}

impl TypeConverterRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            converters: TypeIdMap::new(),
        }
    }

    /// Registers typed functions for `T`, returning the replaced converter.
    #[inline]
    pub fn register<T: Any>(
        &mut self,
        encode: impl Fn(&mut dyn Write, &T) -> io::Result<()> + Send + Sync + 'static,
        decode: impl Fn(&mut dyn Read) -> io::Result<T> + Send + Sync + 'static,
    ) -> Option<Converter> {
        self.insert(Converter::of(encode, decode))
    }

    /// Registers erased functions for `ty`, returning the replaced converter.
    #[inline]
    pub fn register_dyn(&mut self, ty: Type, encode: EncodeFn, decode: DecodeFn) -> Option<Converter> {
        self.insert(Converter::new(ty, encode, decode))
    }

    /// Inserts `converter` under its wire type, returning the replaced one.
    #[inline]
    pub fn insert(&mut self, converter: Converter) -> Option<Converter> {
        self.converters.insert(converter.ty().id(), converter)
    }

    /// Returns the converter of `ty`.
    #[inline]
    pub fn get(&self, ty: TypeId) -> Option<&Converter> {
        self.converters.get(&ty)
    }

    /// Returns `true` if `ty` has a converter.
    #[inline]
    pub fn contains(&self, ty: TypeId) -> bool {
        self.converters.contains(&ty)
    }

    /// Returns `true` if `T` has a converter.
    #[inline]
    pub fn contains_type<T: Any>(&self) -> bool {
        self.converters.contains_type::<T>()
    }

    /// Returns the number of converters.
    #[inline]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns `true` if no converter is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Iterates over the registered wire types in arbitrary order.
    #[inline]
    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        self.converters.values().map(Converter::ty)
    }
}

impl fmt::Debug for TypeConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.types()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::sync::Arc;

    use ark_reflect::info::Type;

    use super::{Converter, TypeConverterRegistry};
    use crate::{MappingError, ValueBox};

    fn byte_converter(tag: u8) -> Converter {
        Converter::of::<u8>(
            move |writer, _| writer.write_all(&[tag]),
            |_| Ok(0),
        )
    }

    #[test]
    fn registration_overwrites() {
        let mut registry = TypeConverterRegistry::new();
        assert!(registry.insert(byte_converter(1)).is_none());
        assert!(registry.insert(byte_converter(2)).is_some());
        assert_eq!(registry.len(), 1);

        let mut out: Vec<u8> = Vec::new();
        registry
            .get(Type::of::<u8>().id())
            .unwrap()
            .encode(&mut out, &ValueBox::new(9_u8))
            .unwrap();
        assert_eq!(out, [2]);
    }

    #[test]
    fn encoder_rejects_other_types() {
        let converter = byte_converter(0);
        let err = converter
            .encode(&mut Vec::<u8>::new(), &ValueBox::new(1_i64))
            .unwrap_err();
        assert!(matches!(err, MappingError::TypeCastFailure { expected: "u8", actual: "i64" }));
    }

    #[test]
    fn decoder_output_is_checked() {
        let mut registry = TypeConverterRegistry::new();
        registry.register_dyn(
            Type::of::<u16>(),
            Arc::new(|writer: &mut dyn Write, _: &ValueBox| -> Result<(), MappingError> {
                Ok(writer.flush()?)
            }),
            Arc::new(|_: &mut dyn Read| -> Result<ValueBox, MappingError> {
                Ok(ValueBox::new(1_u8))
            }),
        );
        let mut empty: &[u8] = &[];
        let err = registry
            .get(Type::of::<u16>().id())
            .unwrap()
            .decode(&mut empty)
            .unwrap_err();
        assert!(matches!(err, MappingError::TypeCastFailure { expected: "u16", actual: "u8" }));
    }
}
