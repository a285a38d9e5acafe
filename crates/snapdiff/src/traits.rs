use crate::error::ApplyError;

///
/// Diffable
///
/// Structural diffing over container snapshots.
///
/// - `difference_from` is pure: `new.difference_from(&old)` describes the
///   delta from `old` to `new`.
/// - A difference is consumed exactly once by whichever apply operation
///   receives it.
/// - `applying` never mutates the receiver; `apply` mutates in place and
///   leaves the receiver unchanged when it fails.
///

pub trait Diffable: Sized {
    /// Delta between two snapshots of this container.
    type Difference;

    /// Compute the difference that transforms `older` into `self`.
    #[must_use]
    fn difference_from(&self, older: &Self) -> Self::Difference;

    /// Return a patched copy, or `None` when the difference was computed
    /// against a different base state.
    #[must_use]
    fn applying(&self, difference: Self::Difference) -> Option<Self>
    where
        Self: Clone,
    {
        let mut next = self.clone();
        match next.apply(difference) {
            Ok(()) => Some(next),
            Err(_) => None,
        }
    }

    /// Apply the difference in place.
    fn apply(&mut self, difference: Self::Difference) -> Result<(), ApplyError>;
}
