//! Link-time collection of [`ProfileSource`]s.
//!
//! [`submit_profile!`](crate::submit_profile) records a source in a static
//! registry maintained by the `inventory` crate, and
//! [`ProfileSerializer::register_submitted`](crate::ProfileSerializer::register_submitted)
//! registers every recorded source.

use crate::{MappingError, TypeProfile};

#[cfg(doc)]
use crate::ProfileSource;

/// A submitted profile constructor.
#[doc(hidden)]
pub struct ProfileRegistration(pub fn() -> Result<TypeProfile, MappingError>);

impl ProfileRegistration {
    #[inline]
    pub(crate) fn profile(&self) -> Result<TypeProfile, MappingError> {
        (self.0)()
    }
}

inventory::collect!(ProfileRegistration);

pub(crate) fn submitted() -> impl Iterator<Item = &'static ProfileRegistration> {
    inventory::iter::<ProfileRegistration>.into_iter()
}

/// Submits a [`ProfileSource`] for
/// [`ProfileSerializer::register_submitted`](crate::ProfileSerializer::register_submitted).
///
/// Requires the `auto_register` feature.
///
/// # Examples
///
/// ```no_run
/// use ark_reflect::derive::Record;
/// use ark_serial::{MappingError, ProfileSerializer, ProfileSource, TypeProfile};
///
/// #[derive(Record, Default)]
/// #[record(default)]
/// struct Ack {
///     seq: u32,
/// }
///
/// struct AckProfile;
///
/// impl ProfileSource for AckProfile {
///     fn profile() -> Result<TypeProfile, MappingError> {
///         let mut profile = TypeProfile::of::<Ack>();
///         profile.map::<u32>("seq")?;
///         Ok(profile)
///     }
/// }
///
/// ark_serial::submit_profile!(AckProfile);
///
/// let mut serializer = ProfileSerializer::new();
/// serializer.register_submitted()?;
/// assert!(serializer.has_profile::<Ack>());
/// # Ok::<(), MappingError>(())
/// ```
#[macro_export]
macro_rules! submit_profile {
    ($source:ty) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::__macro_exports::ProfileRegistration(
                <$source as $crate::ProfileSource>::profile
            )
        }
    };
}
