//! Service implementations, one per domain aggregate.

use inlive_core::{AppError, AppResult};
use inlive_database::repositories::DictionaryRepository;
use inlive_entity::dictionary::DictionaryKey;

pub mod accommodation;
pub mod auth;
pub mod city;
pub mod dictionary;
pub mod district;
pub mod price_request;
pub mod reservation;
pub mod search_request;
pub mod unit;
pub mod user;

pub use accommodation::{AccommodationDetails, AccommodationService};
pub use auth::AuthService;
pub use city::CityService;
pub use dictionary::DictionaryService;
pub use district::DistrictService;
pub use price_request::PriceRequestService;
pub use reservation::ReservationService;
pub use search_request::{NewSearchRequest, SearchRequestDetails, SearchRequestService};
pub use unit::{UnitDetails, UnitService};
pub use user::UserService;

/// Verify that every dictionary ID exists and belongs to one of the
/// allowed key categories.
///
/// Missing IDs are a not-found error; an entry under the wrong category
/// is a validation error.
pub(crate) async fn ensure_dictionary_entries(
    dictionaries: &DictionaryRepository,
    ids: &[i64],
    allowed: &[DictionaryKey],
) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let found = dictionaries.find_by_ids(ids).await?;
    let missing: Vec<i64> = ids
        .iter()
        .copied()
        .filter(|id| !found.iter().any(|d| d.id == *id))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::not_found(format!(
            "Dictionary entries not found: {missing:?}"
        )));
    }

    for entry in &found {
        if !allowed.contains(&entry.key) {
            return Err(AppError::validation(format!(
                "Dictionary entry {} belongs to category {}, which is not applicable here",
                entry.id, entry.key
            )));
        }
    }
    Ok(())
}
