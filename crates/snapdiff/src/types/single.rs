use derive_more::{Deref, DerefMut, From};
use serde::{Deserialize, Serialize};

///
/// Single
///
/// A container holding exactly one element.
///
/// - Kept distinct from the bare value so every container kind shares the
///   same diffing surface.
/// - Serializes transparently as the inner value.
///

#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, Deref, DerefMut, Deserialize, Eq, From, Hash, Ord, PartialEq,
    PartialOrd, Serialize,
)]
pub struct Single<T>(pub T);

impl<T> Single<T> {
    /// Wrap a value.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Unwrap the contained value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

///
/// TESTS
///
