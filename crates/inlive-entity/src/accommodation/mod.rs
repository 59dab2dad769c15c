//! Accommodation domain entities.

pub mod dictionary;
pub mod document;
pub mod image;
pub mod model;

pub use dictionary::AccommodationDictionary;
pub use document::AccommodationDocument;
pub use image::AccommodationImage;
pub use model::{Accommodation, CreateAccommodation, UpdateAccommodation};
