//! Custom Axum extractors.

pub mod auth;
pub mod pagination;
pub mod upload;

pub use auth::AuthUser;
pub use pagination::PaginationParams;
pub use upload::MultipartForm;
