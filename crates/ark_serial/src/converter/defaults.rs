use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::converter::TypeConverterRegistry;

/// Byte order of the default integer converters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

/// The baseline converters: `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`
/// and `i64`, written as fixed-width integers without framing.
///
/// # Examples
///
/// ```
/// use ark_serial::ValueBox;
/// use ark_serial::converter::{DefaultConverters, Endian};
///
/// let registry = DefaultConverters::registry(Endian::Big);
/// let converter = registry.get(core::any::TypeId::of::<u16>()).unwrap();
///
/// let mut bytes: Vec<u8> = Vec::new();
/// converter.encode(&mut bytes, &ValueBox::new(0x0102_u16)).unwrap();
/// assert_eq!(bytes, [1, 2]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DefaultConverters;

macro_rules! register_integers {
    ($registry:ident, $to_bytes:ident, $from_bytes:ident; $($ty:ty),*) => {$(
        $registry.register::<$ty>(
            |writer: &mut dyn Write, value: &$ty| writer.write_all(&value.$to_bytes()),
            |reader: &mut dyn Read| {
                let mut bytes = [0; size_of::<$ty>()];
                reader.read_exact(&mut bytes)?;
                Ok(<$ty>::$from_bytes(bytes))
            },
        );
    )*};
}

impl DefaultConverters {
    /// Creates a registry holding the baseline converters.
    pub fn registry(endian: Endian) -> TypeConverterRegistry {
        let mut registry = TypeConverterRegistry::new();
        Self::register(&mut registry, endian);
        registry
    }

    /// Adds the baseline converters to `registry`, overwriting existing ones.
    pub fn register(registry: &mut TypeConverterRegistry, endian: Endian) {
        match endian {
            Endian::Little => {
                register_integers!(registry, to_le_bytes, from_le_bytes; u8, i8, u16, i16, u32, i32, u64, i64);
            }
            Endian::Big => {
                register_integers!(registry, to_be_bytes, from_be_bytes; u8, i8, u16, i16, u32, i32, u64, i64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::{DefaultConverters, Endian};
    use crate::{MappingError, ValueBox};

    #[test]
    fn baseline_set() {
        let registry = DefaultConverters::registry(Endian::Little);
        assert_eq!(registry.len(), 8);
        assert!(registry.contains_type::<i64>());
        assert!(!registry.contains_type::<u128>());
        assert!(!registry.contains_type::<String>());
    }

    #[test]
    fn little_endian_layout() {
        let registry = DefaultConverters::registry(Endian::Little);
        let converter = registry.get(TypeId::of::<i32>()).unwrap();

        let mut bytes: Vec<u8> = Vec::new();
        converter.encode(&mut bytes, &ValueBox::new(-2_i32)).unwrap();
        assert_eq!(bytes, [0xFE, 0xFF, 0xFF, 0xFF]);

        let value = converter.decode(&mut bytes.as_slice()).unwrap();
        assert_eq!(value.downcast::<i32>().unwrap(), -2);
    }

    #[test]
    fn short_input_is_an_io_error() {
        let registry = DefaultConverters::registry(Endian::Big);
        let converter = registry.get(TypeId::of::<u64>()).unwrap();
        let err = converter.decode(&mut &[1_u8, 2][..]).unwrap_err();
        assert!(matches!(err, MappingError::Io(_)));
    }
}
