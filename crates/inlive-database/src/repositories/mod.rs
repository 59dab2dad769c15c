//! Repository implementations for all Inlive entities.

pub mod accommodation;
pub mod city;
pub mod dictionary;
pub mod district;
pub mod price_request;
pub mod reservation;
pub mod search_request;
pub mod unit;
pub mod user;

pub use accommodation::{AccommodationFilter, AccommodationRepository};
pub use city::CityRepository;
pub use dictionary::DictionaryRepository;
pub use district::DistrictRepository;
pub use price_request::PriceRequestRepository;
pub use reservation::ReservationRepository;
pub use search_request::SearchRequestRepository;
pub use unit::{UnitFilter, UnitMatchCriteria, UnitRepository};
pub use user::UserRepository;
