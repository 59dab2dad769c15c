//! # inlive-service
//!
//! Business logic for the Inlive accommodation marketplace: the workflow
//! from published search request through price offers to a decided
//! reservation, plus profile, listing and reference-data management.
//!
//! Services own the rules (status machines, ownership checks, dictionary
//! category validation); repositories own SQL; the API layer owns HTTP.

pub mod context;
pub mod expiration;
pub mod services;

pub use context::RequestContext;
pub use expiration::ExpirationSweeper;
