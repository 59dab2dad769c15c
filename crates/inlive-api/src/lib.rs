//! # inlive-api
//!
//! HTTP API layer for the Inlive marketplace built on Axum.
//!
//! Provides all REST endpoints, middleware (CORS, tracing, body limits),
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
