//! Accommodation unit domain entities.

pub mod dictionary;
pub mod image;
pub mod model;
pub mod tariff;
pub mod unit_type;

pub use dictionary::UnitDictionary;
pub use image::UnitImage;
pub use model::{AccommodationUnit, CreateUnit, UpdateUnit};
pub use tariff::{RangeType, UnitTariff};
pub use unit_type::UnitType;
