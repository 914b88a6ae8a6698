use std::io;

use thiserror::Error;

// -----------------------------------------------------------------------------
// MappingError

/// Failures of profile configuration and of mapped serialization.
///
/// Configuration failures (`InvalidPath`, `NoIndexer`, an unsupported
/// `as_type` pair) are reported when the profile is declared. The others are
/// reported by the `serialize`/`deserialize` call that hits them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MappingError {
    #[error("invalid path `{path}` on `{ty}`: {reason}")]
    InvalidPath {
        ty: &'static str,
        path: String,
        reason: String,
    },

    #[error("`{ty}` has no indexer accepting keys of `{key}`")]
    NoIndexer { ty: &'static str, key: &'static str },

    #[error("`{ty}` has no parameterless constructor")]
    ConstructionFailure { ty: &'static str },

    #[error("no profile is registered for `{ty}`")]
    UnknownProfile { ty: &'static str },

    #[error("no converter is registered for `{ty}`")]
    UnknownConverter { ty: &'static str },

    #[error("type cast failure: expected `{expected}`, found `{actual}`")]
    TypeCastFailure {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("the indexer key is absent from `{ty}`")]
    IndexerKeyAbsent { ty: &'static str },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl MappingError {
    /// Returns `true` for failures of the profile declaration itself.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidPath { .. } | Self::NoIndexer { .. })
    }
}
