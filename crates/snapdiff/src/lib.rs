//! Structural snapshot diffing: compute a normalized difference between two
//! container values and apply it back conditionally or in place, via the
//! vocabulary exported through the `prelude`.
#![warn(unreachable_pub)]

pub mod diff;
pub mod error;
pub mod traits;
pub mod types;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        diff::{
            MapChange, MapDifference, SequenceChange, SequenceDifference, SetDifference,
            SingleDifference, ValueUpdate,
        },
        traits::Diffable,
        types::Single,
    };
}
