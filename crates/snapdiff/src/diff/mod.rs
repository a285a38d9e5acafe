pub mod map;
pub mod result;
pub mod sequence;
pub mod set;
pub mod single;


pub use map::{MapChange, MapDifference};
pub use sequence::{SequenceChange, SequenceDifference};
pub use set::SetDifference;
pub use single::{SingleDifference, ValueUpdate};
