//! Search request domain entities.

pub mod model;
pub mod status;

pub use model::{
    CreateSearchRequest, SearchRequest, SearchRequestDictionary, SearchRequestDistrict,
    SearchRequestUnitType,
};
pub use status::SearchRequestStatus;
