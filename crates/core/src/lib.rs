#![forbid(unsafe_code)]

pub mod model;
pub mod random;
pub mod text;

pub use random::RandomSource;
