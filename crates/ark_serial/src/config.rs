use serde::{Deserialize, Serialize};

use crate::converter::Endian;

/// Runtime settings of a [`ProfileSerializer`](crate::ProfileSerializer).
///
/// Missing fields take their default values, so a configuration file only
/// lists what it changes.
///
/// # Examples
///
/// ```
/// use ark_serial::{Endian, ProfileSerializer, SerializerConfig};
///
/// let config = SerializerConfig {
///     endian: Endian::Big,
///     ..SerializerConfig::default()
/// };
/// let serializer = ProfileSerializer::from_config(&config);
/// assert_eq!(serializer.converters().len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Byte order of the baseline integer converters.
    pub endian: Endian,
    /// Initial capacity of the buffer a record is encoded into.
    pub initial_buffer: usize,
}

impl SerializerConfig {
    /// Default of [`initial_buffer`](Self::initial_buffer), in bytes.
    pub const DEFAULT_INITIAL_BUFFER: usize = 64;
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            endian: Endian::Little,
            initial_buffer: Self::DEFAULT_INITIAL_BUFFER,
        }
    }
}
