//! Inbound access-token validation.

pub mod claims;
pub mod decoder;

pub use claims::Claims;
pub use decoder::TokenDecoder;
