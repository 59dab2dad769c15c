//! Price request domain entities.

pub mod model;
pub mod status;

pub use model::{CreatePriceRequest, PriceRequest};
pub use status::{ClientResponseStatus, PriceRequestStatus};
