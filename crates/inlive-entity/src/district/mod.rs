//! District domain entities.

pub mod model;

pub use model::District;
