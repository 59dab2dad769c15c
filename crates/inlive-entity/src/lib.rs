//! # inlive-entity
//!
//! Domain entity models for the Inlive accommodation marketplace. Every
//! struct in this crate represents a database table row or a domain value
//! object. All entities derive `Debug`, `Clone`, `Serialize`,
//! `Deserialize`, and database entities additionally derive `sqlx::FromRow`.
//!
//! Rows are never physically deleted. Each table carries an `is_deleted`
//! flag and queries filter on it.

pub mod accommodation;
pub mod city;
pub mod dictionary;
pub mod district;
pub mod price_request;
pub mod reservation;
pub mod search_request;
pub mod unit;
pub mod user;
