//! Dictionary (reference data) domain entities.

pub mod key;
pub mod model;

pub use key::DictionaryKey;
pub use model::{CreateDictionary, Dictionary, UpdateDictionary};
