//! # inlive-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all Inlive entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::connect;
