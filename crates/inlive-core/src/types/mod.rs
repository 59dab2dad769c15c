//! Core type definitions used across the Inlive workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
