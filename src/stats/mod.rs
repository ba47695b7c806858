//! Statistics module - distribution functions and descriptive tests

pub mod descriptive;
pub mod distribution;

pub use descriptive::*;
pub use distribution::*;
