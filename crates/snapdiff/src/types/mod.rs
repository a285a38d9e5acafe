pub mod single;

pub use single::Single;
