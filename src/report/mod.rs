//! Report module - rendering fitted models and exploratory figures

pub mod histogram;
pub mod summary;

pub use histogram::*;
pub use summary::*;
