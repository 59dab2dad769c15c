//! # inlive-core
//!
//! Core crate for the Inlive accommodation-booking backend. Contains
//! configuration schemas, pagination types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Inlive crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
